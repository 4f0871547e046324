//! Ad-hoc edit warning: check a single candidate cell-edit against a
//! subset of the validator's rules without committing it to the live table.

use crate::calendar;
use crate::constraints::effective_max_consecutive;
use crate::settings::Settings;
use crate::staff::Staff;
use crate::table::AssignmentTable;
use shared::{NightCapability, ShiftType, StaffKind};

/// `edit_warnings(staff, assignments, staff_list, day, new_shift, year, month, settings)`.
///
/// Applies `new_shift` to a shallow copy of `staff`'s row only — the live
/// table passed in is never mutated — and returns every warning the subset
/// of checks a hypothetical edit would produce.
pub fn edit_warnings(
    staff: &Staff,
    table: &AssignmentTable,
    day: u32,
    new_shift: ShiftType,
    year: i32,
    month: u32,
    settings: &Settings,
) -> Vec<String> {
    let days_in_month = calendar::days_in_month(year, month);
    let mut row = table
        .row(staff.id)
        .cloned()
        .unwrap_or_default();
    row.insert(day, new_shift);

    let mut warnings = Vec::new();

    check_consecutive_run(staff, &row, day, days_in_month, settings, &mut warnings);
    check_night_eligibility(staff, day, year, month, new_shift, &mut warnings);
    check_part_restrictions(staff, day, new_shift, &mut warnings);
    check_overtime_eligibility(staff, day, new_shift, &mut warnings);

    warnings
}

fn row_is_workday(row: &std::collections::HashMap<u32, ShiftType>, day: u32) -> bool {
    row.get(&day).copied().unwrap_or(ShiftType::Off).is_workday()
}

fn check_consecutive_run(
    staff: &Staff,
    row: &std::collections::HashMap<u32, ShiftType>,
    day: u32,
    days_in_month: u32,
    settings: &Settings,
    warnings: &mut Vec<String>,
) {
    if !row_is_workday(row, day) {
        return;
    }
    let mut past = 0u32;
    let mut d = day;
    while d > 1 {
        d -= 1;
        if row_is_workday(row, d) {
            past += 1;
        } else {
            break;
        }
    }
    let mut forward = 0u32;
    let mut d = day;
    while d < days_in_month {
        d += 1;
        if row_is_workday(row, d) {
            forward += 1;
        } else {
            break;
        }
    }
    let total = past + 1 + forward;
    let max = effective_max_consecutive(staff, settings);
    let allowed = max + if staff.allow_consecutive_plus_one { 1 } else { 0 };
    if total > allowed {
        warnings.push(format!(
            "{}: editing day {} would create a run of {} consecutive workdays, exceeding {}",
            staff.name, day, total, allowed
        ));
    }
}

fn check_night_eligibility(
    staff: &Staff,
    day: u32,
    year: i32,
    month: u32,
    new_shift: ShiftType,
    warnings: &mut Vec<String>,
) {
    if new_shift != ShiftType::Night {
        return;
    }
    if staff.kind == StaffKind::Part || staff.night_capability == NightCapability::None {
        warnings.push(format!(
            "{}: cannot assign NIGHT on day {} (night-ineligible)",
            staff.name, day
        ));
    }
    if staff.night_capability == NightCapability::WeekdayOnly
        && calendar::is_fri_sat_sun(year, month, day)
    {
        warnings.push(format!(
            "{}: cannot assign NIGHT on day {} (weekday-only, but day is Fri/Sat/Sun)",
            staff.name, day
        ));
    }
}

fn check_part_restrictions(staff: &Staff, day: u32, new_shift: ShiftType, warnings: &mut Vec<String>) {
    if staff.kind != StaffKind::Part {
        return;
    }
    if staff.late_only && matches!(new_shift, ShiftType::Early | ShiftType::Overtime) {
        warnings.push(format!(
            "{}: cannot assign {} on day {} (late-only part-timer)",
            staff.name, new_shift.token(), day
        ));
    }
    if staff.early_only && matches!(new_shift, ShiftType::Late | ShiftType::Overtime) {
        warnings.push(format!(
            "{}: cannot assign {} on day {} (early-only part-timer)",
            staff.name, new_shift.token(), day
        ));
    }
}

fn check_overtime_eligibility(staff: &Staff, day: u32, new_shift: ShiftType, warnings: &mut Vec<String>) {
    if new_shift != ShiftType::Overtime {
        return;
    }
    if staff.kind == StaffKind::Part || !staff.can_overtime {
        warnings.push(format!(
            "{}: cannot assign OVERTIME on day {} (overtime-ineligible)",
            staff.name, day
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(kind: StaffKind, night: NightCapability) -> Staff {
        Staff {
            id: StaffId::new(),
            name: "Test".into(),
            kind,
            night_capability: night,
            can_overtime: false,
            early_only: false,
            late_only: false,
            monthly_days_off_target: 9,
            max_days_per_week: 3,
            max_consecutive_override: 0,
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            allow_consecutive_plus_one: false,
        }
    }

    #[test]
    fn flags_consecutive_overrun_from_hypothetical_edit() {
        let mut s = staff(StaffKind::Full, NightCapability::None);
        s.max_consecutive_override = 2;
        let ids = vec![s.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        table.set(s.id, 1, ShiftType::Early);
        table.set(s.id, 2, ShiftType::Early);

        let warnings = edit_warnings(&s, &table, 3, ShiftType::Early, 2025, 3, &Settings::default());
        assert!(warnings.iter().any(|w| w.contains("consecutive workdays")));
        // the live table itself must be untouched
        assert_eq!(table.get(s.id, 3), ShiftType::Off);
    }

    #[test]
    fn flags_overtime_on_part_timer() {
        let s = staff(StaffKind::Part, NightCapability::None);
        let ids = vec![s.id];
        let table = AssignmentTable::blank(&ids, 10);
        let warnings = edit_warnings(&s, &table, 3, ShiftType::Overtime, 2025, 3, &Settings::default());
        assert!(warnings.iter().any(|w| w.contains("overtime-ineligible")));
    }

    #[test]
    fn allows_harmless_edit() {
        let s = staff(StaffKind::Full, NightCapability::None);
        let ids = vec![s.id];
        let table = AssignmentTable::blank(&ids, 10);
        let warnings = edit_warnings(&s, &table, 3, ShiftType::Early, 2025, 3, &Settings::default());
        assert!(warnings.is_empty());
    }
}

//! The validator: re-examines a completed assignment table and
//! reports every rule violation it can still find, independent of how the
//! table was produced.

use crate::calendar;
use crate::constraints::effective_max_consecutive;
use crate::settings::Settings;
use crate::staff::Staff;
use crate::table::AssignmentTable;
use shared::{NightCapability, ShiftType, StaffKind};

/// One maximal run of workday cells for a single staff member.
struct Run {
    start_day: u32,
    len: u32,
}

fn workday_runs(table: &AssignmentTable, staff: &Staff, days_in_month: u32) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current_start: Option<u32> = None;
    let mut len = 0u32;
    for day in 1..=days_in_month {
        if table.get(staff.id, day).is_workday() {
            if current_start.is_none() {
                current_start = Some(day);
            }
            len += 1;
        } else if let Some(start) = current_start.take() {
            runs.push(Run { start_day: start, len });
            len = 0;
        }
    }
    if let Some(start) = current_start {
        runs.push(Run { start_day: start, len });
    }
    runs
}

/// `validate(staff_list, assignments, year, month, settings) -> warnings`.
pub fn validate(
    staff_list: &[Staff],
    table: &AssignmentTable,
    year: i32,
    month: u32,
    settings: &Settings,
) -> Vec<String> {
    let days_in_month = calendar::days_in_month(year, month);
    let mut warnings = Vec::new();

    for staff in staff_list {
        check_consecutive_runs(staff, table, days_in_month, settings, &mut warnings);

        for day in 1..=days_in_month {
            let shift = table.get(staff.id, day);
            check_night_rules(staff, table, day, year, month, days_in_month, shift, &mut warnings);
            check_overtime_rules(staff, shift, day, &mut warnings);
            check_part_side_restrictions(staff, shift, day, &mut warnings);
        }
    }

    warnings
}

fn check_consecutive_runs(
    staff: &Staff,
    table: &AssignmentTable,
    days_in_month: u32,
    settings: &Settings,
    warnings: &mut Vec<String>,
) {
    let max = effective_max_consecutive(staff, settings);
    let allowed = max + if staff.allow_consecutive_plus_one { 1 } else { 0 };
    let mut overrun_runs = 0u32;

    for run in workday_runs(table, staff, days_in_month) {
        if run.len > allowed {
            warnings.push(format!(
                "{}: run of {} consecutive workdays starting day {} exceeds the allowed {}",
                staff.name, run.len, run.start_day, allowed
            ));
        } else if run.len == max + 1 {
            overrun_runs += 1;
        }
    }

    if overrun_runs > crate::constraints::OverrunTracker::BUDGET {
        warnings.push(format!(
            "{}: {} consecutive-run overruns exceed the monthly budget of {}",
            staff.name,
            overrun_runs,
            crate::constraints::OverrunTracker::BUDGET
        ));
    }
}

#[allow(clippy::too_many_arguments)]
fn check_night_rules(
    staff: &Staff,
    table: &AssignmentTable,
    day: u32,
    year: i32,
    month: u32,
    days_in_month: u32,
    shift: ShiftType,
    warnings: &mut Vec<String>,
) {
    if shift != ShiftType::Night {
        return;
    }
    if staff.kind == StaffKind::Part || staff.night_capability == NightCapability::None {
        warnings.push(format!(
            "{}: assigned NIGHT on day {} despite being night-ineligible",
            staff.name, day
        ));
    }
    if staff.night_capability == NightCapability::WeekdayOnly
        && calendar::is_fri_sat_sun(year, month, day)
    {
        warnings.push(format!(
            "{}: assigned NIGHT on day {}, a Friday/Saturday/Sunday, despite being weekday-only",
            staff.name, day
        ));
    }
    if day + 1 <= days_in_month && table.get(staff.id, day + 1) != ShiftType::NightOff {
        warnings.push(format!(
            "{}: NIGHT on day {} is not followed by NIGHT_OFF on day {}",
            staff.name,
            day,
            day + 1
        ));
    }
}

fn check_overtime_rules(staff: &Staff, shift: ShiftType, day: u32, warnings: &mut Vec<String>) {
    if shift != ShiftType::Overtime {
        return;
    }
    if staff.kind == StaffKind::Part || !staff.can_overtime {
        warnings.push(format!(
            "{}: assigned OVERTIME on day {} despite being overtime-ineligible",
            staff.name, day
        ));
    }
}

fn check_part_side_restrictions(staff: &Staff, shift: ShiftType, day: u32, warnings: &mut Vec<String>) {
    if staff.kind != StaffKind::Part {
        return;
    }
    if staff.late_only && matches!(shift, ShiftType::Early | ShiftType::Overtime) {
        warnings.push(format!(
            "{}: late-only part-timer assigned {} on day {}",
            staff.name, shift.token(), day
        ));
    }
    if staff.early_only && matches!(shift, ShiftType::Late | ShiftType::Overtime) {
        warnings.push(format!(
            "{}: early-only part-timer assigned {} on day {}",
            staff.name, shift.token(), day
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::StaffId;

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
    fn flags_night_without_trailing_night_off() {
        let s = staff(StaffKind::Full, NightCapability::AllDays);
        let ids = vec![s.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        table.set(s.id, 3, ShiftType::Night);
        table.set(s.id, 4, ShiftType::Early); // should have been NIGHT_OFF

        let warnings = validate(&[s], &table, 2025, 3, &Settings::default());
        assert!(warnings.iter().any(|w| w.contains("not followed by NIGHT_OFF")));
    }

    #[test]
    fn flags_night_on_ineligible_staff() {
        let s = staff(StaffKind::Part, NightCapability::None);
        let ids = vec![s.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        table.set(s.id, 3, ShiftType::Night);

        let warnings = validate(&[s], &table, 2025, 3, &Settings::default());
        assert!(warnings.iter().any(|w| w.contains("night-ineligible")));
    }

    #[test]
    fn flags_overrun_beyond_cap() {
        let mut s = staff(StaffKind::Full, NightCapability::None);
        s.max_consecutive_override = 3;
        let ids = vec![s.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        for d in 1..=6 {
            table.set(s.id, d, ShiftType::Early);
        }
        let warnings = validate(&[s], &table, 2025, 3, &Settings::default());
        assert!(warnings.iter().any(|w| w.contains("exceeds the allowed")));
    }

    #[test]
    fn flags_restricted_side_violations_for_part_timers() {
        let mut s = staff(StaffKind::Part, NightCapability::None);
        s.late_only = true;
        let ids = vec![s.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        table.set(s.id, 2, ShiftType::Early);
        let warnings = validate(&[s], &table, 2025, 3, &Settings::default());
        assert!(warnings.iter().any(|w| w.contains("late-only")));
    }
}

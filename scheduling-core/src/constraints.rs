//! Constraint predicates: consecutive-run lookups, the `can_work_on`
//! / `can_assign_night` eligibility tests, and the `+1` overrun budget.

use crate::calendar;
use crate::settings::Settings;
use crate::staff::Staff;
use crate::table::AssignmentTable;
use shared::{NightCapability, StaffId, StaffKind};
use std::collections::HashMap;

/// The effective max-consecutive-workday cap for a staff member.
pub fn effective_max_consecutive(staff: &Staff, settings: &Settings) -> u32 {
    if staff.max_consecutive_override > 0 {
        return staff.max_consecutive_override;
    }
    if staff.kind == StaffKind::Full && staff.night_capability != NightCapability::None {
        return 2;
    }
    settings.max_consecutive
}

/// Length of the maximal run of workday cells immediately preceding `day`
/// (not including `day` itself). OFF and NIGHT_OFF break the run.
pub fn run_length_backward(table: &AssignmentTable, staff: StaffId, day: u32) -> u32 {
    let mut len = 0u32;
    let mut d = day;
    while d > 1 {
        d -= 1;
        if table.get(staff, d).is_workday() {
            len += 1;
        } else {
            break;
        }
    }
    len
}

/// Length of the maximal run of workday cells immediately following `day`
/// (not including `day` itself), bounded by `days_in_month`.
pub fn run_length_forward(
    table: &AssignmentTable,
    staff: StaffId,
    day: u32,
    days_in_month: u32,
) -> u32 {
    let mut len = 0u32;
    let mut d = day;
    while d < days_in_month {
        d += 1;
        if table.get(staff, d).is_workday() {
            len += 1;
        } else {
            break;
        }
    }
    len
}

/// Tracks, per staff member, how many `+1` consecutive-run overruns have
/// been consumed this month (budget of 2).
#[derive(Debug, Default)]
pub struct OverrunTracker {
    counts: HashMap<StaffId, u32>,
}

impl OverrunTracker {
    pub const BUDGET: u32 = 2;

    pub fn count(&self, staff: StaffId) -> u32 {
        self.counts.get(&staff).copied().unwrap_or(0)
    }

    pub fn mark_used(&mut self, staff: StaffId) {
        *self.counts.entry(staff).or_insert(0) += 1;
    }

    pub fn has_budget(&self, staff: StaffId) -> bool {
        self.count(staff) < Self::BUDGET
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanWork {
    /// The cell is not OFF, or assigning here would overrun the
    /// consecutive-run cap with no remaining `+1` budget.
    No,
    /// Fits within `effective_max_consecutive` with no overrun.
    Plain,
    /// Fits only by spending one of the staff member's `+1` overrun slots;
    /// the caller must call `OverrunTracker::mark_used` if it commits this
    /// assignment.
    Overrun,
}

impl CanWork {
    pub fn is_allowed(self) -> bool {
        !matches!(self, CanWork::No)
    }
}

/// Whether a staff member can work a given day, and under what condition.
pub fn can_work_on(
    table: &AssignmentTable,
    staff: &Staff,
    day: u32,
    days_in_month: u32,
    settings: &Settings,
    overrun: &OverrunTracker,
) -> CanWork {
    use shared::ShiftType;
    if table.get(staff.id, day) != ShiftType::Off {
        return CanWork::No;
    }
    let past = run_length_backward(table, staff.id, day);
    let forward = run_length_forward(table, staff.id, day, days_in_month);
    let total = past + 1 + forward;
    let max = effective_max_consecutive(staff, settings);

    if total <= max {
        CanWork::Plain
    } else if total == max + 1 && staff.allow_consecutive_plus_one && overrun.has_budget(staff.id)
    {
        CanWork::Overrun
    } else {
        CanWork::No
    }
}

/// Whether a staff member can be assigned a NIGHT shift on a given day.
pub fn can_assign_night(
    table: &AssignmentTable,
    staff: &Staff,
    day: u32,
    year: i32,
    month: u32,
    days_in_month: u32,
    settings: &Settings,
) -> bool {
    use shared::ShiftType;

    if staff.kind == StaffKind::Part {
        return false;
    }
    match staff.night_capability {
        NightCapability::None => return false,
        NightCapability::WeekdayOnly => {
            if calendar::is_fri_sat_sun(year, month, day) {
                return false;
            }
        }
        NightCapability::AllDays => {}
    }

    if table.get(staff.id, day) != ShiftType::Off {
        return false;
    }
    if day + 1 <= days_in_month && table.get(staff.id, day + 1) != ShiftType::Off {
        return false;
    }
    if day + 2 <= days_in_month && table.get(staff.id, day + 2) != ShiftType::Off {
        return false;
    }

    let past = run_length_backward(table, staff.id, day);
    let forward = run_length_forward(table, staff.id, day, days_in_month);
    let max = effective_max_consecutive(staff, settings);
    past + 1 + forward <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ShiftType, StaffId};

    fn make_staff(kind: StaffKind, night: NightCapability, allow_plus_one: bool) -> Staff {
        Staff {
            id: StaffId::new(),
            name: "Test".into(),
            kind,
            night_capability: night,
            can_overtime: true,
            early_only: false,
            late_only: false,
            monthly_days_off_target: 9,
            max_days_per_week: 3,
            max_consecutive_override: 0,
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            allow_consecutive_plus_one: allow_plus_one,
        }
    }

    #[test]
    fn effective_max_consecutive_prefers_override() {
        let settings = Settings::default();
        let mut staff = make_staff(StaffKind::Full, NightCapability::AllDays, false);
        staff.max_consecutive_override = 4;
        assert_eq!(effective_max_consecutive(&staff, &settings), 4);
    }

    #[test]
    fn effective_max_consecutive_night_capable_full_timer_is_two() {
        let settings = Settings::default();
        let staff = make_staff(StaffKind::Full, NightCapability::AllDays, false);
        assert_eq!(effective_max_consecutive(&staff, &settings), 2);
    }

    #[test]
    fn effective_max_consecutive_falls_back_to_global_default() {
        let settings = Settings::default();
        let staff = make_staff(StaffKind::Full, NightCapability::None, false);
        assert_eq!(effective_max_consecutive(&staff, &settings), 5);
    }

    #[test]
    fn can_work_on_rejects_non_off_cell() {
        let settings = Settings::default();
        let overrun = OverrunTracker::default();
        let staff = make_staff(StaffKind::Full, NightCapability::None, false);
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        table.set(staff.id, 5, ShiftType::Early);
        assert_eq!(
            can_work_on(&table, &staff, 5, 10, &settings, &overrun),
            CanWork::No
        );
    }

    #[test]
    fn can_work_on_allows_plain_run_within_cap() {
        let settings = Settings::default();
        let overrun = OverrunTracker::default();
        let staff = make_staff(StaffKind::Full, NightCapability::None, false);
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        for d in 1..=4 {
            table.set(staff.id, d, ShiftType::Early);
        }
        // 4 consecutive already worked, cap is 5: day 5 still fits plainly.
        assert_eq!(
            can_work_on(&table, &staff, 5, 10, &settings, &overrun),
            CanWork::Plain
        );
    }

    #[test]
    fn can_work_on_uses_overrun_budget_then_exhausts_it() {
        let settings = Settings::default();
        let mut overrun = OverrunTracker::default();
        let staff = make_staff(StaffKind::Full, NightCapability::None, true);
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        for d in 1..=5 {
            table.set(staff.id, d, ShiftType::Early);
        }
        // 5 consecutive already worked, cap is 5: day 6 would make 6 (max+1).
        assert_eq!(
            can_work_on(&table, &staff, 6, 10, &settings, &overrun),
            CanWork::Overrun
        );
        overrun.mark_used(staff.id);
        overrun.mark_used(staff.id);
        assert!(!overrun.has_budget(staff.id));
        assert_eq!(
            can_work_on(&table, &staff, 6, 10, &settings, &overrun),
            CanWork::No
        );
    }

    #[test]
    fn can_assign_night_rejects_part_and_none_capability() {
        let settings = Settings::default();
        let part = make_staff(StaffKind::Part, NightCapability::AllDays, false);
        let none_cap = make_staff(StaffKind::Full, NightCapability::None, false);
        let ids = vec![part.id, none_cap.id];
        let table = AssignmentTable::blank(&ids, 10);
        assert!(!can_assign_night(
            &table, &part, 3, 2025, 3, 10, &settings
        ));
        assert!(!can_assign_night(
            &table, &none_cap, 3, 2025, 3, 10, &settings
        ));
    }

    #[test]
    fn can_assign_night_rejects_weekday_only_on_weekend() {
        let settings = Settings::default();
        let staff = make_staff(StaffKind::Full, NightCapability::WeekdayOnly, false);
        let ids = vec![staff.id];
        let table = AssignmentTable::blank(&ids, 31);
        // March 7 2025 is a Friday.
        assert!(!can_assign_night(&table, &staff, 7, 2025, 3, 31, &settings));
        // March 4 2025 is a Tuesday.
        assert!(can_assign_night(&table, &staff, 4, 2025, 3, 31, &settings));
    }

    #[test]
    fn can_assign_night_requires_trailing_window_free() {
        let settings = Settings::default();
        let staff = make_staff(StaffKind::Full, NightCapability::AllDays, false);
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 10);
        table.set(staff.id, 5, ShiftType::Early);
        assert!(!can_assign_night(&table, &staff, 3, 2025, 3, 10, &settings));
    }
}

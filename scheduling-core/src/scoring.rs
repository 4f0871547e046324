//! Fairness / scoring helpers.

use crate::calendar;
use crate::staff::Staff;
use crate::table::AssignmentTable;
use shared::ShiftType;

/// `count_shift(staff, type)`: occurrences of `shift_type` in the staff
/// member's row.
pub fn count_shift(
    table: &AssignmentTable,
    staff: &Staff,
    days_in_month: u32,
    shift_type: ShiftType,
) -> u32 {
    (1..=days_in_month)
        .filter(|&day| table.get(staff.id, day) == shift_type)
        .count() as u32
}

/// `workdays(staff)`: cells that are neither OFF nor NIGHT_OFF.
pub fn workdays(table: &AssignmentTable, staff: &Staff, days_in_month: u32) -> u32 {
    (1..=days_in_month)
        .filter(|&day| table.get(staff.id, day).is_workday())
        .count() as u32
}

/// `off_days(staff)`: cells equal to OFF (NIGHT_OFF excluded).
pub fn off_days(table: &AssignmentTable, staff: &Staff, days_in_month: u32) -> u32 {
    off_days_through(table, staff, days_in_month)
}

/// `off_days`, but counting only `1..=through_day`. Lets a caller mid-way
/// through a per-day loop score the off-day floor against days already
/// decided, rather than against days that are still blank placeholders.
pub fn off_days_through(table: &AssignmentTable, staff: &Staff, through_day: u32) -> u32 {
    (1..=through_day)
        .filter(|&day| table.get(staff.id, day) == ShiftType::Off)
        .count() as u32
}

/// `target_workdays(staff) = daysInMonth - monthly_days_off_target - count(NIGHT_OFF)`.
pub fn target_workdays(table: &AssignmentTable, staff: &Staff, days_in_month: u32) -> i32 {
    let night_off = count_shift(table, staff, days_in_month, ShiftType::NightOff);
    days_in_month as i32 - staff.monthly_days_off_target as i32 - night_off as i32
}

/// `work_gap(staff) = target_workdays - workdays`. Positive means still short.
pub fn work_gap(table: &AssignmentTable, staff: &Staff, days_in_month: u32) -> i32 {
    target_workdays(table, staff, days_in_month) - workdays(table, staff, days_in_month) as i32
}

/// `week_workdays(staff, day)`: workdays in the Mon-Sun week containing `day`.
pub fn week_workdays(
    table: &AssignmentTable,
    staff: &Staff,
    day: u32,
    year: i32,
    month: u32,
    days_in_month: u32,
) -> u32 {
    let weekday = match calendar::weekday_of(year, month, day) {
        Some(w) => w,
        None => return 0,
    };
    use chrono::Datelike;
    let from_monday = weekday.num_days_from_monday();
    let week_start = day.saturating_sub(from_monday).max(1);
    let week_end = (week_start + 6).min(days_in_month);

    (week_start..=week_end)
        .filter(|&d| table.get(staff.id, d).is_workday())
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{NightCapability, StaffId, StaffKind};

    fn staff_with_target(target: u32) -> Staff {
        Staff {
            id: StaffId::new(),
            name: "Test".into(),
            kind: StaffKind::Full,
            night_capability: NightCapability::None,
            can_overtime: true,
            early_only: false,
            late_only: false,
            monthly_days_off_target: target,
            max_days_per_week: 3,
            max_consecutive_override: 0,
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            allow_consecutive_plus_one: false,
        }
    }

    #[test]
    fn target_workdays_accounts_for_night_off() {
        let staff = staff_with_target(9);
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 30);
        table.set(staff.id, 10, ShiftType::Night);
        table.set(staff.id, 11, ShiftType::NightOff);
        // 30 - 9 off-target - 1 night_off = 20
        assert_eq!(target_workdays(&table, &staff, 30), 20);
    }

    #[test]
    fn work_gap_positive_when_under_target() {
        let staff = staff_with_target(9);
        let ids = vec![staff.id];
        let table = AssignmentTable::blank(&ids, 30);
        // entirely OFF: workdays=0, target=21, gap=21
        assert_eq!(work_gap(&table, &staff, 30), 21);
    }

    #[test]
    fn week_workdays_counts_within_mon_sun_window() {
        let staff = staff_with_target(9);
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 31);
        // March 2025: Monday 3rd through Sunday 9th.
        for d in 3..=9 {
            table.set(staff.id, d, ShiftType::Early);
        }
        assert_eq!(week_workdays(&table, &staff, 5, 2025, 3, 31), 7);
    }
}

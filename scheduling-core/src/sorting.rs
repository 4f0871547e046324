//! Candidate sort orders used by placement. Every order shuffles
//! first through the caller-injected PRNG, then applies a stable sort, so
//! ties are broken randomly but deterministically under a fixed seed.

use crate::constraints::OverrunTracker;
use crate::scoring::{count_shift, work_gap};
use crate::staff::Staff;
use crate::table::AssignmentTable;
use rand::seq::SliceRandom;
use rand::Rng;
use shared::ShiftType;
use std::collections::HashMap;

/// Per-staff overtime cap used to filter `sort_for_overtime` candidates
/// staff already at the per-person overtime cap (6).
pub const OVERTIME_CAP: u32 = 6;

fn gap_rank(gap: i32) -> (bool, i32) {
    // false sorts before true, so a positive gap (still short of target)
    // ranks ahead of a non-positive one; within a class, larger gap first.
    (!(gap > 0), -gap)
}

/// The default soft-balance candidate ordering.
pub fn sort_soft(
    candidates: &mut Vec<&Staff>,
    table: &AssignmentTable,
    days_in_month: u32,
    rng: &mut impl Rng,
) {
    candidates.shuffle(rng);
    candidates.sort_by_key(|staff| gap_rank(work_gap(table, staff, days_in_month)));
}

/// `sort_soft` with the `balance_early` secondary key: ascending EARLY-count.
pub fn sort_soft_balance_early(
    candidates: &mut Vec<&Staff>,
    table: &AssignmentTable,
    days_in_month: u32,
    rng: &mut impl Rng,
) {
    candidates.shuffle(rng);
    candidates.sort_by_key(|staff| {
        let (class, neg_gap) = gap_rank(work_gap(table, staff, days_in_month));
        let early_count = count_shift(table, staff, days_in_month, ShiftType::Early);
        (class, neg_gap, early_count)
    });
}

/// `sort_soft` with the `balance_late` secondary key: ascending LATE-count.
pub fn sort_soft_balance_late(
    candidates: &mut Vec<&Staff>,
    table: &AssignmentTable,
    days_in_month: u32,
    rng: &mut impl Rng,
) {
    candidates.shuffle(rng);
    candidates.sort_by_key(|staff| {
        let (class, neg_gap) = gap_rank(work_gap(table, staff, days_in_month));
        let late_count = count_shift(table, staff, days_in_month, ShiftType::Late);
        (class, neg_gap, late_count)
    });
}

/// The overtime candidate ordering: filters out staff already at the
/// per-person overtime cap, shuffles, then sorts ascending by current
/// overtime count and descending by work gap.
pub fn sort_for_overtime(
    candidates: &mut Vec<&Staff>,
    table: &AssignmentTable,
    days_in_month: u32,
    rng: &mut impl Rng,
) {
    candidates.retain(|staff| {
        count_shift(table, staff, days_in_month, ShiftType::Overtime) < OVERTIME_CAP
    });
    candidates.shuffle(rng);
    candidates.sort_by_key(|staff| {
        let overtime_count = count_shift(table, staff, days_in_month, ShiftType::Overtime);
        let gap = work_gap(table, staff, days_in_month);
        (overtime_count, -gap)
    });
}

/// Variant of `sort_for_overtime` used by Phase 4 step 5 (EARLY/LATE upgrade
/// fallback), which ignores the 5-count "target" cap used elsewhere but
/// still respects the hard 6-per-month cap.
pub fn sort_for_overtime_upgrade(
    candidates: &mut Vec<&Staff>,
    table: &AssignmentTable,
    days_in_month: u32,
    rng: &mut impl Rng,
) {
    sort_for_overtime(candidates, table, days_in_month, rng);
}

/// Filters a staff list to those available for a fresh work-shift
/// assignment: OFF today, not requested off, not already at their off-day
/// target (the "off-day floor"), and `can_work_on`-eligible.
///
/// `off_day_horizon` bounds the off-day count used by the floor check to
/// the days already decided by the caller's loop — days beyond it are
/// still blank placeholders (defaulted to OFF) and must not be counted as
/// if they were real rest days. A caller mid-way through a forward per-day
/// pass (Phase 4) passes `day - 1`; a caller running after the whole month
/// has already been decided (Phase 5) passes `days_in_month`.
pub fn available_for_work<'a>(
    staff_list: &'a [Staff],
    table: &AssignmentTable,
    requests: &crate::table::Requests,
    day: u32,
    days_in_month: u32,
    off_day_horizon: u32,
    settings: &crate::settings::Settings,
    overrun: &OverrunTracker,
) -> Vec<&'a Staff> {
    use crate::constraints::can_work_on;
    use crate::scoring::off_days_through;

    staff_list
        .iter()
        .filter(|staff| {
            table.get(staff.id, day) == ShiftType::Off
                && !requests.is_requested(staff.id, day)
                && off_days_through(table, staff, off_day_horizon) < staff.monthly_days_off_target
                && can_work_on(table, staff, day, days_in_month, settings, overrun).is_allowed()
        })
        .collect()
}

pub fn by_id<'a>(staff_list: &'a [Staff]) -> HashMap<shared::StaffId, &'a Staff> {
    staff_list.iter().map(|s| (s.id, s)).collect()
}

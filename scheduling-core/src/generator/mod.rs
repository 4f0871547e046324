//! The generator pipeline: an ordered sequence of phases that
//! transform a blank month into a completed assignment table, each
//! mutating the shared table and the shared warnings list.

mod phase2_night;
mod phase3_part;
mod phase4_fulltime;
mod phase5_topup;
mod phase58_balance;
mod phase6_offdays;

use crate::calendar;
use crate::constraints::OverrunTracker;
use crate::coverage::SundayRelaxation;
use crate::settings::Settings;
use crate::staff::Staff;
use crate::table::{AssignmentTable, Requests};
use crate::warnings::Warnings;
use rand::Rng;
use shared::StaffId;
use std::collections::HashSet;

/// Read-only context threaded through every phase: the roster, the
/// requested-off days, and the month being scheduled.
pub struct GenCtx<'a> {
    pub staff_list: &'a [Staff],
    pub requests: &'a Requests,
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub settings: &'a Settings,
}

/// Runs Phases 0 through 7 and returns the completed table plus the
/// accumulated warnings.
pub fn run(
    staff_list: &[Staff],
    year: i32,
    month: u32,
    raw_requests: &std::collections::HashMap<StaffId, HashSet<u32>>,
    settings: &Settings,
    rng: &mut impl Rng,
) -> (AssignmentTable, Vec<String>) {
    let days_in_month = calendar::days_in_month(year, month);
    let staff_ids: Vec<StaffId> = staff_list.iter().map(|s| s.id).collect();
    let known_staff: HashSet<StaffId> = staff_ids.iter().copied().collect();

    // Phase 0: blank start.
    let mut table = AssignmentTable::blank(&staff_ids, days_in_month);
    // Phase 1: requested-off days are normalized here; later phases consult
    // `requests` directly rather than mutating the table again for them.
    let requests = Requests::normalize(raw_requests, &known_staff, days_in_month);

    let ctx = GenCtx {
        staff_list,
        requests: &requests,
        year,
        month,
        days_in_month,
        settings,
    };

    let mut warnings = Warnings::new();
    let mut overrun = OverrunTracker::default();
    let mut relaxation = SundayRelaxation::default();

    phase2_night::run(&ctx, &mut table, &mut warnings, rng);
    phase3_part::run(&ctx, &mut table, rng);
    phase4_fulltime::run(&ctx, &mut table, &mut overrun, &mut relaxation, &mut warnings, rng);
    phase5_topup::run(&ctx, &mut table, &mut overrun, &mut warnings, rng);
    phase58_balance::run(&ctx, &mut table, rng);
    phase6_offdays::run(&ctx, &table, &mut warnings);

    // Phase 7: final validation.
    for message in crate::validator::validate(staff_list, &table, year, month, settings) {
        warnings.push(message);
    }

    (table, warnings.into_vec())
}

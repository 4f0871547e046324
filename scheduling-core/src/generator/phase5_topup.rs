//! Phase 5 — Workday-gap top-up for full-timers, and Phase 5.5 — coverage
//! final-rescue.

use super::GenCtx;
use crate::constraints::{can_work_on, CanWork, OverrunTracker};
use crate::coverage::{count_at_checkpoint, Checkpoint};
use crate::scoring::{count_shift, off_days, week_workdays, work_gap};
use crate::settings::Settings;
use crate::sorting::{available_for_work, sort_for_overtime_upgrade, sort_soft};
use crate::staff::Staff;
use crate::table::AssignmentTable;
use crate::warnings::Warnings;
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{ShiftType, StaffKind};

pub fn run(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    warnings: &mut Warnings,
    rng: &mut impl Rng,
) {
    top_up_workday_gaps(ctx, table, overrun, rng);
    coverage_final_rescue(ctx, table, overrun, rng);
    let _ = warnings; // Phase 5.5 emits no new warnings of its own.
}

fn place(
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    settings: &Settings,
    days_in_month: u32,
    staff: &Staff,
    day: u32,
    shift: ShiftType,
) {
    let decision = can_work_on(table, staff, day, days_in_month, settings, overrun);
    if decision == CanWork::Overrun {
        overrun.mark_used(staff.id);
    }
    table.set(staff.id, day, shift);
}

fn top_up_workday_gaps(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    rng: &mut impl Rng,
) {
    for staff in ctx.staff_list.iter().filter(|s| s.kind == StaffKind::Full) {
        loop {
            if work_gap(table, staff, ctx.days_in_month) <= 0 {
                break;
            }
            if off_days(table, staff, ctx.days_in_month) >= staff.monthly_days_off_target {
                break;
            }

            let candidate_days: Vec<u32> = (1..=ctx.days_in_month)
                .filter(|&day| {
                    table.get(staff.id, day) == ShiftType::Off
                        && !ctx.requests.is_requested(staff.id, day)
                        && can_work_on(table, staff, day, ctx.days_in_month, ctx.settings, overrun)
                            .is_allowed()
                })
                .collect();
            if candidate_days.is_empty() {
                break;
            }

            let mut scored: Vec<DayScore> = candidate_days
                .iter()
                .map(|&day| day_score(table, ctx.staff_list, day))
                .collect();
            scored.shuffle(rng);

            // Preference 1: the day with the largest coverage shortfall.
            // Preference 2: no day has any shortfall, so fall back to the
            // day with the lowest total presence, to spread load evenly.
            let best = if scored.iter().all(|s| s.shortfall_total() == 0) {
                scored.iter().min_by_key(|s| s.presence).unwrap()
            } else {
                scored.iter().max_by_key(|s| s.shortfall_total()).unwrap()
            };
            let shift = choose_shift(table, staff, ctx.days_in_month, best);
            place(table, overrun, ctx.settings, ctx.days_in_month, staff, best.day, shift);
        }
    }
}

struct DayScore {
    day: u32,
    morning_short: u32,
    noon_short: u32,
    evening_short: u32,
    presence: u32,
}

impl DayScore {
    fn shortfall_total(&self) -> u32 {
        self.morning_short + self.noon_short + self.evening_short
    }
}

fn day_score(table: &AssignmentTable, staff_list: &[Staff], day: u32) -> DayScore {
    let morning = count_at_checkpoint(table, staff_list, day, Checkpoint::Morning);
    let noon = count_at_checkpoint(table, staff_list, day, Checkpoint::Noon);
    let evening = count_at_checkpoint(table, staff_list, day, Checkpoint::Evening);
    DayScore {
        day,
        morning_short: 4u32.saturating_sub(morning),
        noon_short: 4u32.saturating_sub(noon),
        evening_short: 4u32.saturating_sub(evening),
        presence: morning + noon + evening,
    }
}

/// Evening shortfall wins (needs LATE), then morning shortfall (needs
/// EARLY); otherwise (noon-only, or preference-2's no-shortfall case) pick
/// whichever of this staff's EARLY/LATE counts is lower.
fn choose_shift(
    table: &AssignmentTable,
    staff: &Staff,
    days_in_month: u32,
    score: &DayScore,
) -> ShiftType {
    if score.evening_short > 0 && score.evening_short >= score.morning_short {
        ShiftType::Late
    } else if score.morning_short > 0 {
        ShiftType::Early
    } else {
        let early = count_shift(table, staff, days_in_month, ShiftType::Early);
        let late = count_shift(table, staff, days_in_month, ShiftType::Late);
        if early <= late {
            ShiftType::Early
        } else {
            ShiftType::Late
        }
    }
}

fn coverage_final_rescue(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    rng: &mut impl Rng,
) {
    for day in 1..=ctx.days_in_month {
        for checkpoint in Checkpoint::ALL {
            loop {
                let count = count_at_checkpoint(table, ctx.staff_list, day, checkpoint);
                if count >= 4 {
                    break;
                }
                if try_overtime_upgrade(ctx, table, day, checkpoint, rng) {
                    continue;
                }
                if try_add_full_timer(ctx, table, overrun, day, checkpoint, rng) {
                    continue;
                }
                if try_add_part_timer(ctx, table, overrun, day, checkpoint) {
                    continue;
                }
                break;
            }
        }
    }
}

fn try_overtime_upgrade(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    day: u32,
    checkpoint: Checkpoint,
    rng: &mut impl Rng,
) -> bool {
    let from_shift = match checkpoint {
        Checkpoint::Evening => ShiftType::Early,
        Checkpoint::Morning => ShiftType::Late,
        Checkpoint::Noon => return false,
    };
    let mut candidates: Vec<&Staff> = ctx
        .staff_list
        .iter()
        .filter(|staff| {
            staff.kind == StaffKind::Full
                && staff.can_overtime
                && table.get(staff.id, day) == from_shift
        })
        .collect();
    sort_for_overtime_upgrade(&mut candidates, table, ctx.days_in_month, rng);
    match candidates.into_iter().next() {
        Some(staff) => {
            table.set(staff.id, day, ShiftType::Overtime);
            true
        }
        None => false,
    }
}

fn try_add_full_timer(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    day: u32,
    checkpoint: Checkpoint,
    rng: &mut impl Rng,
) -> bool {
    let mut candidates = available_for_work(
        ctx.staff_list,
        table,
        ctx.requests,
        day,
        ctx.days_in_month,
        ctx.days_in_month,
        ctx.settings,
        overrun,
    );
    candidates.retain(|staff| staff.kind == StaffKind::Full);
    sort_soft(&mut candidates, table, ctx.days_in_month, rng);
    let Some(staff) = candidates.into_iter().next() else {
        return false;
    };
    let shift = match checkpoint {
        Checkpoint::Morning => ShiftType::Early,
        Checkpoint::Evening => ShiftType::Late,
        Checkpoint::Noon => {
            let early = count_shift(table, staff, ctx.days_in_month, ShiftType::Early);
            let late = count_shift(table, staff, ctx.days_in_month, ShiftType::Late);
            if early <= late {
                ShiftType::Early
            } else {
                ShiftType::Late
            }
        }
    };
    place(table, overrun, ctx.settings, ctx.days_in_month, staff, day, shift);
    true
}

fn try_add_part_timer(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    day: u32,
    checkpoint: Checkpoint,
) -> bool {
    let minute = checkpoint.minute();
    let candidate = ctx.staff_list.iter().find(|staff| {
        staff.kind == StaffKind::Part
            && table.get(staff.id, day) == ShiftType::Off
            && !ctx.requests.is_requested(staff.id, day)
            && {
                let (start, end) = staff.part_interval();
                minute >= start && minute < end
            }
            && week_workdays(table, staff, day, ctx.year, ctx.month, ctx.days_in_month)
                < staff.max_days_per_week
            && can_work_on(table, staff, day, ctx.days_in_month, ctx.settings, overrun).is_allowed()
    });
    match candidate {
        Some(staff) => {
            place(table, overrun, ctx.settings, ctx.days_in_month, staff, day, ShiftType::Part);
            true
        }
        None => false,
    }
}

//! Phase 4 — Full-timer day-shift placement, the per-day core of the
//! pipeline: strategic overtime, morning/evening/noon fill, overtime-upgrade
//! fallback, and coverage warnings.

use super::GenCtx;
use crate::calendar;
use crate::constraints::{can_work_on, CanWork, OverrunTracker};
use crate::coverage::{count_at_checkpoint, required_at, Checkpoint, SundayRelaxation};
use crate::scoring::count_shift;
use crate::settings::Settings;
use crate::sorting::{
    available_for_work, sort_for_overtime, sort_for_overtime_upgrade, sort_soft,
    sort_soft_balance_early, sort_soft_balance_late,
};
use crate::staff::Staff;
use crate::table::AssignmentTable;
use crate::warnings::Warnings;
use rand::Rng;
use shared::{ShiftType, StaffKind};

/// Overtime is only offered up to this monthly count in steps 1-4; step 5
/// ignores it (still bound by the hard 6-cap via `sort_for_overtime`).
const OVERTIME_TARGET: u32 = 5;

pub fn run(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    relaxation: &mut SundayRelaxation,
    warnings: &mut Warnings,
    rng: &mut impl Rng,
) {
    for day in 1..=ctx.days_in_month {
        let is_sunday = calendar::is_sunday(ctx.year, ctx.month, day);

        step1_strategic_overtime(ctx, table, overrun, day, rng);
        step2_fill_morning(ctx, table, overrun, day, rng);
        step3_fill_evening(ctx, table, overrun, day, rng);
        step4_fill_noon(ctx, table, overrun, relaxation, is_sunday, day, rng);
        step5_overtime_upgrade(ctx, table, day, rng);
        step6_emit_warnings(ctx, table, relaxation, is_sunday, day, warnings);

        if is_sunday {
            let morning = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Morning);
            let noon = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Noon);
            if morning < 4 || noon < 4 {
                relaxation.mark_used();
            }
        }
    }
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

fn step1_strategic_overtime(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    day: u32,
    rng: &mut impl Rng,
) {
    let morning = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Morning);
    let evening = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Evening);
    let ot_want = 4u32.saturating_sub(morning).min(4u32.saturating_sub(evening));
    if ot_want == 0 {
        return;
    }

    let mut candidates = available_for_work(
        ctx.staff_list,
        table,
        ctx.requests,
        day,
        ctx.days_in_month,
        day.saturating_sub(1),
        ctx.settings,
        overrun,
    );
    candidates.retain(|staff| {
        staff.can_overtime
            && count_shift(table, staff, ctx.days_in_month, ShiftType::Overtime) < OVERTIME_TARGET
    });
    sort_for_overtime(&mut candidates, table, ctx.days_in_month, rng);

    for staff in candidates.into_iter().take(ot_want as usize) {
        place(table, overrun, ctx.settings, ctx.days_in_month, staff, day, ShiftType::Overtime);
    }
}

fn step2_fill_morning(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    day: u32,
    rng: &mut impl Rng,
) {
    let morning = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Morning);
    let needed = 4u32.saturating_sub(morning);
    if needed == 0 {
        return;
    }
    let mut candidates = available_for_work(
        ctx.staff_list,
        table,
        ctx.requests,
        day,
        ctx.days_in_month,
        day.saturating_sub(1),
        ctx.settings,
        overrun,
    );
    sort_soft_balance_early(&mut candidates, table, ctx.days_in_month, rng);
    for staff in candidates.into_iter().take(needed as usize) {
        place(table, overrun, ctx.settings, ctx.days_in_month, staff, day, ShiftType::Early);
    }
}

fn step3_fill_evening(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    day: u32,
    rng: &mut impl Rng,
) {
    let evening = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Evening);
    let needed = 4u32.saturating_sub(evening);
    if needed == 0 {
        return;
    }
    let mut candidates = available_for_work(
        ctx.staff_list,
        table,
        ctx.requests,
        day,
        ctx.days_in_month,
        day.saturating_sub(1),
        ctx.settings,
        overrun,
    );
    sort_soft_balance_late(&mut candidates, table, ctx.days_in_month, rng);
    for staff in candidates.into_iter().take(needed as usize) {
        place(table, overrun, ctx.settings, ctx.days_in_month, staff, day, ShiftType::Late);
    }
}

fn step4_fill_noon(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    overrun: &mut OverrunTracker,
    relaxation: &SundayRelaxation,
    is_sunday: bool,
    day: u32,
    rng: &mut impl Rng,
) {
    let required = required_at(Checkpoint::Noon, is_sunday, relaxation);
    loop {
        let noon = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Noon);
        if noon >= required {
            break;
        }
        let mut candidates = available_for_work(
            ctx.staff_list,
            table,
            ctx.requests,
            day,
            ctx.days_in_month,
            day.saturating_sub(1),
            ctx.settings,
            overrun,
        );
        sort_soft(&mut candidates, table, ctx.days_in_month, rng);
        let Some(staff) = candidates.into_iter().next() else {
            break;
        };
        let early_count = count_shift(table, staff, ctx.days_in_month, ShiftType::Early);
        let late_count = count_shift(table, staff, ctx.days_in_month, ShiftType::Late);
        let shift = if early_count <= late_count {
            ShiftType::Early
        } else {
            ShiftType::Late
        };
        place(table, overrun, ctx.settings, ctx.days_in_month, staff, day, shift);
    }
}

fn step5_overtime_upgrade(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    day: u32,
    rng: &mut impl Rng,
) {
    upgrade_toward(ctx, table, day, ShiftType::Early, Checkpoint::Evening, rng);
    upgrade_toward(ctx, table, day, ShiftType::Late, Checkpoint::Morning, rng);
}

fn upgrade_toward(
    ctx: &GenCtx,
    table: &mut AssignmentTable,
    day: u32,
    from_shift: ShiftType,
    target_checkpoint: Checkpoint,
    rng: &mut impl Rng,
) {
    loop {
        let count = count_at_checkpoint(table, ctx.staff_list, day, target_checkpoint);
        if count >= 4 {
            break;
        }
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
        let Some(staff) = candidates.into_iter().next() else {
            break;
        };
        table.set(staff.id, day, ShiftType::Overtime);
    }
}

fn step6_emit_warnings(
    ctx: &GenCtx,
    table: &AssignmentTable,
    relaxation: &SundayRelaxation,
    is_sunday: bool,
    day: u32,
    warnings: &mut Warnings,
) {
    for checkpoint in Checkpoint::ALL {
        let required = required_at(checkpoint, is_sunday, relaxation);
        let count = count_at_checkpoint(table, ctx.staff_list, day, checkpoint);
        if count < required {
            warnings.push_coverage(format!(
                "Day {day}: {} coverage short ({count}/{required})",
                checkpoint.label()
            ));
        }
    }
}

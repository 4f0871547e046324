//! Phase 2 — Night + morning-after placement.

use super::GenCtx;
use crate::calendar;
use crate::constraints::can_assign_night;
use crate::scoring::{count_shift, workdays};
use crate::table::AssignmentTable;
use crate::warnings::Warnings;
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{ShiftType, StaffId};

pub fn run(ctx: &GenCtx, table: &mut AssignmentTable, warnings: &mut Warnings, rng: &mut impl Rng) {
    for day in 1..=ctx.days_in_month {
        let is_sunday = calendar::is_sunday(ctx.year, ctx.month, day);
        let required = ctx.settings.night_required_for(is_sunday);
        let mut unmet = false;

        for _ in 0..required {
            match pick_candidate(ctx, table, day, rng) {
                Some(staff_id) => {
                    table.set(staff_id, day, ShiftType::Night);
                    if day + 1 <= ctx.days_in_month {
                        table.set(staff_id, day + 1, ShiftType::NightOff);
                    }
                }
                None => unmet = true,
            }
        }

        if unmet {
            warnings.push(format!("No night-eligible staff available to cover day {day}"));
        }
    }
}

fn pick_candidate(
    ctx: &GenCtx,
    table: &AssignmentTable,
    day: u32,
    rng: &mut impl Rng,
) -> Option<StaffId> {
    let eligible: Vec<_> = ctx
        .staff_list
        .iter()
        .filter(|staff| {
            can_assign_night(
                table,
                staff,
                day,
                ctx.year,
                ctx.month,
                ctx.days_in_month,
                ctx.settings,
            )
        })
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let scored: Vec<_> = eligible
        .into_iter()
        .map(|staff| {
            let score = (
                count_shift(table, staff, ctx.days_in_month, ShiftType::Night),
                workdays(table, staff, ctx.days_in_month),
            );
            (staff, score)
        })
        .collect();

    let min_score = scored.iter().map(|(_, score)| *score).min().unwrap();
    let mut best_tier: Vec<_> = scored
        .into_iter()
        .filter(|(_, score)| *score == min_score)
        .map(|(staff, _)| staff)
        .collect();
    best_tier.shuffle(rng);
    best_tier.first().map(|staff| staff.id)
}

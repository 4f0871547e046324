//! Phase 5.8 — Early/Late balancing: nudge each full-timer's
//! EARLY/LATE split closer together without dropping coverage.

use super::GenCtx;
use crate::coverage::{count_at_checkpoint, Checkpoint};
use crate::scoring::count_shift;
use crate::table::AssignmentTable;
use rand::Rng;
use shared::{ShiftType, StaffKind};

pub fn run(ctx: &GenCtx, table: &mut AssignmentTable, _rng: &mut impl Rng) {
    for staff in ctx.staff_list.iter().filter(|s| s.kind == StaffKind::Full) {
        let early = count_shift(table, staff, ctx.days_in_month, ShiftType::Early) as i32;
        let late = count_shift(table, staff, ctx.days_in_month, ShiftType::Late) as i32;
        let diff = early - late;
        if diff.abs() <= 2 {
            continue;
        }

        let swaps_wanted = (diff.unsigned_abs() / 2) as u32;
        let (from_shift, to_shift) = if diff > 0 {
            (ShiftType::Early, ShiftType::Late)
        } else {
            (ShiftType::Late, ShiftType::Early)
        };

        let mut swapped = 0u32;
        for day in 1..=ctx.days_in_month {
            if swapped >= swaps_wanted {
                break;
            }
            if table.get(staff.id, day) != from_shift {
                continue;
            }
            table.set(staff.id, day, to_shift);
            let morning = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Morning);
            let evening = count_at_checkpoint(table, ctx.staff_list, day, Checkpoint::Evening);
            if morning < 4 || evening < 4 {
                table.set(staff.id, day, from_shift);
            } else {
                swapped += 1;
            }
        }
    }
}

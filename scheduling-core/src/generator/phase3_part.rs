//! Phase 3 — Part-timer placement, and Phase 3.5 — rest equalization.

use super::GenCtx;
use crate::calendar;
use crate::constraints::effective_max_consecutive;
use crate::scoring::off_days;
use crate::staff::Staff;
use crate::table::AssignmentTable;
use rand::Rng;
use shared::{ShiftType, StaffKind};
use std::collections::HashMap;

const REST_EQUALIZATION_ITERATIONS: u32 = 20;

pub fn run(ctx: &GenCtx, table: &mut AssignmentTable, rng: &mut impl Rng) {
    for staff in ctx.staff_list.iter().filter(|s| s.kind == StaffKind::Part) {
        place_part_timer(ctx, table, staff, rng);
    }
    rest_equalize(ctx, table);
}

fn place_part_timer(ctx: &GenCtx, table: &mut AssignmentTable, staff: &Staff, rng: &mut impl Rng) {
    let max = effective_max_consecutive(staff, ctx.settings);

    let best_row = if max <= 2 {
        best_rotating_offset(ctx, table, staff)
    } else {
        random_walk_with_second_pass(ctx, table, staff, rng)
    };

    for (day, shift) in best_row {
        table.set(staff.id, day, shift);
    }
}

/// Three rotating work-work-off offsets, keeping the one with the highest
/// resulting workday count.
fn best_rotating_offset(
    ctx: &GenCtx,
    table: &AssignmentTable,
    staff: &Staff,
) -> HashMap<u32, ShiftType> {
    let base_row = table.row(staff.id).cloned().unwrap_or_default();
    let mut best: Option<(u32, HashMap<u32, ShiftType>)> = None;

    for offset in 0..3u32 {
        let mut row = base_row.clone();
        for day in 1..=ctx.days_in_month {
            let pattern_is_work = (day - 1 + offset) % 3 != 2;
            if pattern_is_work && can_place_part(ctx, |d| row_get(&row, d), staff, day) {
                row.insert(day, ShiftType::Part);
            }
        }
        let workday_count = row.values().filter(|s| s.is_workday()).count() as u32;
        if best.as_ref().map(|(wd, _)| workday_count > *wd).unwrap_or(true) {
            best = Some((workday_count, row));
        }
    }

    best.map(|(_, row)| row).unwrap_or(base_row)
}

/// A random start day, walking forward wrapping through the month; a
/// second reverse-order pass if still below target workdays.
fn random_walk_with_second_pass(
    ctx: &GenCtx,
    table: &AssignmentTable,
    staff: &Staff,
    rng: &mut impl Rng,
) -> HashMap<u32, ShiftType> {
    let mut row = table.row(staff.id).cloned().unwrap_or_default();
    let start = rng.gen_range(1..=ctx.days_in_month);

    for i in 0..ctx.days_in_month {
        let day = ((start - 1 + i) % ctx.days_in_month) + 1;
        if can_place_part(ctx, |d| row_get(&row, d), staff, day) {
            row.insert(day, ShiftType::Part);
        }
    }

    let target = ctx.days_in_month as i32 - staff.monthly_days_off_target as i32;
    let workday_count = row.values().filter(|s| s.is_workday()).count() as i32;
    if workday_count < target {
        for day in (1..=ctx.days_in_month).rev() {
            if can_place_part(ctx, |d| row_get(&row, d), staff, day) {
                row.insert(day, ShiftType::Part);
            }
        }
    }

    row
}

/// Phase 3.5: repeatedly give the part-timer with the largest off-day
/// surplus one more PART shift, forward pass first then backward, until no
/// staff member has a surplus or no day accepts the addition.
fn rest_equalize(ctx: &GenCtx, table: &mut AssignmentTable) {
    for _ in 0..REST_EQUALIZATION_ITERATIONS {
        let worst = ctx
            .staff_list
            .iter()
            .filter(|s| s.kind == StaffKind::Part)
            .filter_map(|s| {
                let surplus = off_days(table, s, ctx.days_in_month) as i32
                    - s.monthly_days_off_target as i32;
                (surplus > 0).then_some((s, surplus))
            })
            .max_by_key(|(_, surplus)| *surplus);

        let Some((staff, _)) = worst else {
            break;
        };

        let forward_day = (1..=ctx.days_in_month)
            .find(|&day| can_place_part(ctx, |d| table.get(staff.id, d), staff, day));
        let placement = forward_day.or_else(|| {
            (1..=ctx.days_in_month)
                .rev()
                .find(|&day| can_place_part(ctx, |d| table.get(staff.id, d), staff, day))
        });

        match placement {
            Some(day) => table.set(staff.id, day, ShiftType::Part),
            None => break,
        }
    }
}

fn row_get(row: &HashMap<u32, ShiftType>, day: u32) -> ShiftType {
    row.get(&day).copied().unwrap_or(ShiftType::Off)
}

/// Shared placement gate for Phase 3 and Phase 3.5, parameterized over the
/// data source (a scratch row or the live table) via `get`.
fn can_place_part(ctx: &GenCtx, get: impl Fn(u32) -> ShiftType, staff: &Staff, day: u32) -> bool {
    if get(day) != ShiftType::Off {
        return false;
    }
    if ctx.requests.is_requested(staff.id, day) {
        return false;
    }
    if week_workdays(ctx, &get, day) >= staff.max_days_per_week {
        return false;
    }
    let past = run_backward(&get, day);
    let forward = run_forward(&get, day, ctx.days_in_month);
    let total = past + 1 + forward;
    total <= effective_max_consecutive(staff, ctx.settings)
}

fn run_backward(get: &impl Fn(u32) -> ShiftType, day: u32) -> u32 {
    let mut len = 0u32;
    let mut d = day;
    while d > 1 {
        d -= 1;
        if get(d).is_workday() {
            len += 1;
        } else {
            break;
        }
    }
    len
}

fn run_forward(get: &impl Fn(u32) -> ShiftType, day: u32, days_in_month: u32) -> u32 {
    let mut len = 0u32;
    let mut d = day;
    while d < days_in_month {
        d += 1;
        if get(d).is_workday() {
            len += 1;
        } else {
            break;
        }
    }
    len
}

fn week_workdays(ctx: &GenCtx, get: &impl Fn(u32) -> ShiftType, day: u32) -> u32 {
    use chrono::Datelike;
    let weekday = match calendar::weekday_of(ctx.year, ctx.month, day) {
        Some(w) => w,
        None => return 0,
    };
    let from_monday = weekday.num_days_from_monday();
    let week_start = day.saturating_sub(from_monday).max(1);
    let week_end = (week_start + 6).min(ctx.days_in_month);
    (week_start..=week_end).filter(|&d| get(d).is_workday()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::table::Requests;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::{NightCapability, StaffId};

    fn part_staff(max_consecutive: u32, max_per_week: u32, target_off: u32) -> Staff {
        Staff {
            id: StaffId::new(),
            name: "Part".into(),
            kind: StaffKind::Part,
            night_capability: NightCapability::None,
            can_overtime: false,
            early_only: false,
            late_only: false,
            monthly_days_off_target: target_off,
            max_days_per_week: max_per_week,
            max_consecutive_override: max_consecutive,
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            allow_consecutive_plus_one: false,
        }
    }

    #[test]
    fn two_consecutive_cap_never_produces_triple_run() {
        let staff = part_staff(2, 3, 10);
        let staff_list = vec![staff.clone()];
        let requests = Requests::default();
        let settings = Settings::default();
        let ctx = GenCtx {
            staff_list: &staff_list,
            requests: &requests,
            year: 2025,
            month: 4,
            days_in_month: 30,
            settings: &settings,
        };
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 30);
        let mut rng = StdRng::seed_from_u64(3);

        run(&ctx, &mut table, &mut rng);

        let mut run_len = 0u32;
        for day in 1..=30 {
            if table.get(staff.id, day).is_workday() {
                run_len += 1;
                assert!(run_len <= 2, "run exceeded 2 at day {day}");
            } else {
                run_len = 0;
            }
        }
    }

    #[test]
    fn rest_equalization_respects_off_day_target() {
        let staff = part_staff(5, 7, 10);
        let staff_list = vec![staff.clone()];
        let requests = Requests::default();
        let settings = Settings::default();
        let ctx = GenCtx {
            staff_list: &staff_list,
            requests: &requests,
            year: 2025,
            month: 4,
            days_in_month: 30,
            settings: &settings,
        };
        let ids = vec![staff.id];
        let mut table = AssignmentTable::blank(&ids, 30);
        let mut rng = StdRng::seed_from_u64(9);

        run(&ctx, &mut table, &mut rng);

        let off = off_days(&table, &staff, 30);
        assert!(off <= 20);
    }
}

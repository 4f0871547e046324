//! Phase 6 — Off-day warning emission: warn for every staff whose
//! final off-day count fell short of their target. Over-target is fine and
//! silent.

use super::GenCtx;
use crate::scoring::off_days;
use crate::table::AssignmentTable;
use crate::warnings::Warnings;

pub fn run(ctx: &GenCtx, table: &AssignmentTable, warnings: &mut Warnings) {
    for staff in ctx.staff_list {
        let actual = off_days(table, staff, ctx.days_in_month);
        if actual < staff.monthly_days_off_target {
            warnings.push(format!(
                "{}: only {} off day(s), short of the {} target",
                staff.name, actual, staff.monthly_days_off_target
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::staff::Staff;
    use crate::table::Requests;
    use shared::{NightCapability, ShiftType, StaffId, StaffKind};

    fn staff(target: u32) -> Staff {
        Staff {
            id: StaffId::new(),
            name: "Test".into(),
            kind: StaffKind::Full,
            night_capability: NightCapability::None,
            can_overtime: false,
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
    fn warns_only_when_short_of_target() {
        let short = staff(9);
        let met = staff(5);
        let staff_list = vec![short.clone(), met.clone()];
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
        let ids: Vec<_> = staff_list.iter().map(|s| s.id).collect();
        let mut table = AssignmentTable::blank(&ids, 30);
        // `short` works every day (0 off days, short of target 9).
        for d in 1..=30 {
            table.set(short.id, d, ShiftType::Early);
        }
        // `met` exactly hits its target of 5 off days.
        for d in 1..=5 {
            table.set(met.id, d, ShiftType::Off);
        }
        for d in 6..=30 {
            table.set(met.id, d, ShiftType::Early);
        }

        let mut warnings = Warnings::new();
        run(&ctx, &table, &mut warnings);

        assert_eq!(warnings.as_slice().len(), 1);
        assert!(warnings.as_slice()[0].contains(&short.name));
    }
}

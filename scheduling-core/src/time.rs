//! The presence predicate: whether a given staff member, currently
//! on a given shift, is physically present at a given minute-of-day.

use crate::staff::Staff;
use shared::ShiftType;

/// Whether a staff member working a given shift is present at a given minute.
pub fn present_at(staff: &Staff, shift: ShiftType, minute: u32) -> bool {
    if shift == ShiftType::Off {
        return false;
    }
    let (start, end) = match shift {
        ShiftType::Part => staff.part_interval(),
        other => other
            .fixed_interval()
            .expect("every non-OFF, non-PART shift has a fixed interval"),
    };
    minute >= start && minute < end
}

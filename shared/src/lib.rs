pub mod error;
pub mod types;

pub use error::{ScheduleError, ScheduleResult};
pub use types::{NightCapability, ShiftType, StaffId, StaffKind};

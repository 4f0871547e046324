use thiserror::Error;

/// Internal failure modes of the scheduling core.
///
/// Nothing in the public surface (`generate`, `validate`, `edit_warnings`)
/// returns this: every caller-facing defect is surfaced as a warning string
/// instead. This exists for the one place a value can't be silently
/// defaulted away without a named failure: parsing a staff member's
/// `HH:MM` start/end time.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid time string: {0}")]
    InvalidTime(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

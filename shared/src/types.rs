use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable opaque identifier for a staff member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StaffId(pub Uuid);

impl StaffId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StaffId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full-time staff work a fixed shift table; part-time staff work a single
/// shift whose interval is derived from their own start/end time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffKind {
    Full,
    Part,
}

/// How willing a staff member is to take a NIGHT shift.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NightCapability {
    None,
    WeekdayOnly,
    AllDays,
}

/// The closed set of shift values a single (staff, day) cell can hold.
///
/// Display tokens (glossary): A=Early, B=Late, 夜=Night, 明=NightOff,
/// 休=Off, A残=Overtime, P=Part.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    Early,
    Late,
    Night,
    NightOff,
    Off,
    Overtime,
    Part,
}

impl ShiftType {
    /// Fixed minute-of-day interval `[start, end)` for every shift type
    /// except PART, whose interval depends on the owning staff member's own
    /// start/end time (see `scheduling_core::time::present_at`).
    pub fn fixed_interval(self) -> Option<(u32, u32)> {
        match self {
            ShiftType::Early => Some((420, 960)),
            ShiftType::Late => Some((570, 1110)),
            ShiftType::Overtime => Some((420, 1110)),
            ShiftType::Night => Some((1020, 1440)),
            ShiftType::NightOff => Some((0, 540)),
            ShiftType::Off => None,
            ShiftType::Part => None,
        }
    }

    /// True for every shift that counts toward a consecutive workday run
    /// (excludes OFF and NIGHT_OFF).
    pub fn is_workday(self) -> bool {
        !matches!(self, ShiftType::Off | ShiftType::NightOff)
    }

    pub fn token(self) -> &'static str {
        match self {
            ShiftType::Early => "A",
            ShiftType::Late => "B",
            ShiftType::Night => "\u{591c}",
            ShiftType::NightOff => "\u{660e}",
            ShiftType::Off => "\u{4f11}",
            ShiftType::Overtime => "A\u{6b8b}",
            ShiftType::Part => "P",
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

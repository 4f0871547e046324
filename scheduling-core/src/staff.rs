//! The staff record and the `HH:MM` time parsing part-timer shifts are
//! derived from.

use serde::{Deserialize, Serialize};
use shared::{NightCapability, ScheduleError, ScheduleResult, StaffId, StaffKind};

fn default_monthly_days_off_target() -> u32 {
    9
}

fn default_max_days_per_week() -> u32 {
    3
}

fn default_start_time() -> String {
    "09:00".to_string()
}

fn default_end_time() -> String {
    "17:00".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub kind: StaffKind,
    pub night_capability: NightCapability,
    #[serde(default)]
    pub can_overtime: bool,
    #[serde(default)]
    pub early_only: bool,
    #[serde(default)]
    pub late_only: bool,
    #[serde(default = "default_monthly_days_off_target")]
    pub monthly_days_off_target: u32,
    #[serde(default = "default_max_days_per_week")]
    pub max_days_per_week: u32,
    /// Zero means "use `effective_max_consecutive`'s derived default".
    #[serde(default)]
    pub max_consecutive_override: u32,
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_end_time")]
    pub end_time: String,
    #[serde(default)]
    pub allow_consecutive_plus_one: bool,
}

impl Staff {
    /// Minute-of-day interval of this staff member's PART shift, parsed
    /// from `start_time`/`end_time`. Unparseable or missing times fall back
    /// defensively to 09:00-17:00 per the external-interface contract.
    pub fn part_interval(&self) -> (u32, u32) {
        let start = parse_hhmm(&self.start_time).unwrap_or(540);
        let end = parse_hhmm(&self.end_time).unwrap_or(1020);
        (start, end)
    }
}

/// Parse an `HH:MM` string into minutes-since-midnight.
pub fn parse_hhmm(s: &str) -> ScheduleResult<u32> {
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| ScheduleError::InvalidTime(s.to_string()))?;
    let h: u32 = h
        .trim()
        .parse()
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
    let m: u32 = m
        .trim()
        .parse()
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
    if h > 23 || m > 59 {
        return Err(ScheduleError::InvalidTime(s.to_string()));
    }
    Ok(h * 60 + m)
}

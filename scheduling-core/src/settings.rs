//! `Settings`: a flat, defaulted record the caller supplies by value.
//! No file or environment source — the core takes no environment variables
//! so this is constructed directly or deserialized from a
//! caller-supplied JSON value.

use serde::{Deserialize, Serialize};

fn default_early_required() -> u32 {
    3
}
fn default_late_required() -> u32 {
    3
}
fn default_night_required() -> u32 {
    1
}
fn default_sunday_early_required() -> u32 {
    3
}
fn default_sunday_late_required() -> u32 {
    2
}
fn default_sunday_night_required() -> u32 {
    1
}
fn default_max_consecutive() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub early_required: u32,
    pub late_required: u32,
    pub night_required: u32,
    pub sunday_early_required: u32,
    pub sunday_late_required: u32,
    pub sunday_night_required: u32,
    pub max_consecutive: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            early_required: default_early_required(),
            late_required: default_late_required(),
            night_required: default_night_required(),
            sunday_early_required: default_sunday_early_required(),
            sunday_late_required: default_sunday_late_required(),
            sunday_night_required: default_sunday_night_required(),
            max_consecutive: default_max_consecutive(),
        }
    }
}

impl Settings {
    /// Required NIGHT headcount for the given day.
    pub fn night_required_for(&self, is_sunday: bool) -> u32 {
        if is_sunday {
            self.sunday_night_required
        } else {
            self.night_required
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let s = Settings::default();
        assert_eq!(s.early_required, 3);
        assert_eq!(s.late_required, 3);
        assert_eq!(s.night_required, 1);
        assert_eq!(s.sunday_early_required, 3);
        assert_eq!(s.sunday_late_required, 2);
        assert_eq!(s.sunday_night_required, 1);
        assert_eq!(s.max_consecutive, 5);
    }

    #[test]
    fn partial_json_fills_remaining_defaults() {
        let s: Settings = serde_json::from_str(r#"{"night_required": 2}"#).unwrap();
        assert_eq!(s.night_required, 2);
        assert_eq!(s.early_required, 3);
        assert_eq!(s.max_consecutive, 5);
    }
}

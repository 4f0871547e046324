//! The shared mutable assignment table and the per-staff requested-off
//! day sets threaded through every phase.

use shared::{ShiftType, StaffId};
use std::collections::{HashMap, HashSet};

/// `(staff_id -> (day -> shift))`. Days are 1-based. Exclusively owned by
/// one generation run.
#[derive(Debug, Clone, Default)]
pub struct AssignmentTable {
    rows: HashMap<StaffId, HashMap<u32, ShiftType>>,
}

impl AssignmentTable {
    /// Wraps an already-populated rows map, e.g. one the caller received
    /// from a prior `generate` call and now wants to `validate`.
    pub fn from_rows(rows: HashMap<StaffId, HashMap<u32, ShiftType>>) -> Self {
        Self { rows }
    }

    /// Blank table: every (staff, day) cell initialized to OFF (Phase 0).
    pub fn blank(staff_ids: &[StaffId], days_in_month: u32) -> Self {
        let mut rows = HashMap::with_capacity(staff_ids.len());
        for &id in staff_ids {
            let mut row = HashMap::with_capacity(days_in_month as usize);
            for day in 1..=days_in_month {
                row.insert(day, ShiftType::Off);
            }
            rows.insert(id, row);
        }
        Self { rows }
    }

    pub fn get(&self, staff: StaffId, day: u32) -> ShiftType {
        self.rows
            .get(&staff)
            .and_then(|row| row.get(&day))
            .copied()
            .unwrap_or(ShiftType::Off)
    }

    pub fn set(&mut self, staff: StaffId, day: u32, shift: ShiftType) {
        self.rows.entry(staff).or_default().insert(day, shift);
    }

    pub fn row(&self, staff: StaffId) -> Option<&HashMap<u32, ShiftType>> {
        self.rows.get(&staff)
    }

    pub fn staff_ids(&self) -> impl Iterator<Item = StaffId> + '_ {
        self.rows.keys().copied()
    }

    pub fn into_rows(self) -> HashMap<StaffId, HashMap<u32, ShiftType>> {
        self.rows
    }
}

/// Per-staff requested-off days (Phase 0/1). Unknown staff ids and
/// out-of-range days are dropped during normalization.
#[derive(Debug, Clone, Default)]
pub struct Requests {
    by_staff: HashMap<StaffId, HashSet<u32>>,
}

impl Requests {
    pub fn normalize(
        raw: &HashMap<StaffId, HashSet<u32>>,
        known_staff: &HashSet<StaffId>,
        days_in_month: u32,
    ) -> Self {
        let mut by_staff = HashMap::new();
        for (staff, days) in raw {
            if !known_staff.contains(staff) {
                continue;
            }
            let valid: HashSet<u32> = days
                .iter()
                .copied()
                .filter(|&d| d >= 1 && d <= days_in_month)
                .collect();
            if !valid.is_empty() {
                by_staff.insert(*staff, valid);
            }
        }
        Self { by_staff }
    }

    pub fn is_requested(&self, staff: StaffId, day: u32) -> bool {
        self.by_staff
            .get(&staff)
            .map(|days| days.contains(&day))
            .unwrap_or(false)
    }
}

//! Scheduling Core
//!
//! The monthly shift-schedule generator: calendar utilities, the time
//! presence model, constraint predicates, fairness scoring, the generator
//! pipeline, and the validator. Exposes three pure functions —
//! [`generate`], [`validate`], and [`edit_warnings`] — with no I/O, no
//! logging, and no environment dependence.

pub mod calendar;
pub mod constraints;
pub mod coverage;
mod edit_warnings;
mod generator;
pub mod scoring;
pub mod settings;
pub mod sorting;
pub mod staff;
pub mod table;
pub mod time;
pub mod validator;
pub mod warnings;

pub use settings::Settings;
pub use staff::Staff;
pub use table::AssignmentTable;

use rand::Rng;
use shared::{ShiftType, StaffId};
use std::collections::{HashMap, HashSet};

/// Result of [`generate`]: one `ShiftType` per (staff, day) cell, plus every
/// warning the run accumulated.
#[derive(Debug, Clone, Default)]
pub struct GenerateOutput {
    pub assignments: HashMap<StaffId, HashMap<u32, ShiftType>>,
    pub warnings: Vec<String>,
}

/// `generate(staff_list, year, month, requests, settings) -> { assignments, warnings }`.
///
/// Runs Phases 0-7 of the generator pipeline to completion. Never fails:
/// an unsatisfiable roster still produces a best-effort table, with every
/// unmet constraint recorded in `warnings` instead. `rng` is caller-injected
/// so identical inputs and seed reproduce identical output.
pub fn generate(
    staff_list: &[Staff],
    year: i32,
    month: u32,
    requests: &HashMap<StaffId, HashSet<u32>>,
    settings: &Settings,
    rng: &mut impl Rng,
) -> GenerateOutput {
    let (table, warnings) = generator::run(staff_list, year, month, requests, settings, rng);
    GenerateOutput {
        assignments: table.into_rows(),
        warnings,
    }
}

/// `validate(staff_list, assignments, year, month, settings) -> warnings`.
///
/// Re-examines a completed table independent of how it was produced; an
/// empty result means no violation was found.
pub fn validate(
    staff_list: &[Staff],
    assignments: &HashMap<StaffId, HashMap<u32, ShiftType>>,
    year: i32,
    month: u32,
    settings: &Settings,
) -> Vec<String> {
    let table = AssignmentTable::from_rows(assignments.clone());
    validator::validate(staff_list, &table, year, month, settings)
}

/// `edit_warnings(staff, assignments, staff_list, day, new_shift, year, month, settings) -> warnings`.
///
/// Probes a single hypothetical cell edit without committing it. `staff_list`
/// is accepted for parity with the external interface; the checks this
/// performs are all scoped to the one staff member being edited.
#[allow(clippy::too_many_arguments)]
pub fn edit_warnings(
    staff: &Staff,
    assignments: &HashMap<StaffId, HashMap<u32, ShiftType>>,
    _staff_list: &[Staff],
    day: u32,
    new_shift: ShiftType,
    year: i32,
    month: u32,
    settings: &Settings,
) -> Vec<String> {
    let table = AssignmentTable::from_rows(assignments.clone());
    edit_warnings::edit_warnings(staff, &table, day, new_shift, year, month, settings)
}

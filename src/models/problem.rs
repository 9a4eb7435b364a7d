//! Solve input container and constraint options.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AvailabilityWindow, Location, Qualification, ShiftRequirement, Staff};

/// Tunable solver options.
///
/// Only `max_hours_per_staff` is a hard bound (it tightens each staff
/// member's own ceiling); the rest steer heuristics or are reserved for
/// collaborating services and pass through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveConstraints {
    /// Global weekly hour floor (advisory; warnings only).
    pub min_hours_per_staff: Option<u32>,
    /// Global weekly hour ceiling, additional to each staff's own max.
    pub max_hours_per_staff: Option<u32>,
    /// Prefer staff with fewer assigned hours when ranks tie.
    pub balance_hours: bool,
    /// Reserved; eligibility is the only preference signal read here.
    pub respect_preferences: bool,
    /// Shift ids to preserve across regeneration.
    pub locked_shift_ids: Vec<String>,
    /// Allow assignments covering only part of a requirement interval.
    pub allow_split_shifts: bool,
    /// Minimum single-window overlap (hours) in split mode.
    pub min_overlap_hours: u32,
    /// Time budget for the external OR-solver collaborator (ignored here).
    pub solve_seconds: u32,
    /// Default number of top variants to return.
    pub solution_pool_size: usize,
}

impl Default for SolveConstraints {
    fn default() -> Self {
        Self {
            min_hours_per_staff: None,
            max_hours_per_staff: None,
            balance_hours: true,
            respect_preferences: true,
            locked_shift_ids: Vec::new(),
            allow_split_shifts: false,
            min_overlap_hours: 2,
            solve_seconds: 10,
            solution_pool_size: 3,
        }
    }
}

impl SolveConstraints {
    /// Merges `new` over `self` for regeneration: every option of `new`
    /// takes effect, and the locked-shift sets are unioned so a lock
    /// granted earlier is never silently dropped.
    pub fn merged_with(&self, new: &SolveConstraints) -> SolveConstraints {
        let mut merged = new.clone();
        for id in &self.locked_shift_ids {
            if !merged.locked_shift_ids.contains(id) {
                merged.locked_shift_ids.push(id.clone());
            }
        }
        merged
    }
}

/// A complete scheduling problem for one week.
///
/// Inputs are immutable during a solve. `locations` and
/// `qualifications` are catalog pass-throughs used only for validation
/// and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Staff roster.
    pub staff: Vec<Staff>,
    /// Availability windows across all staff.
    pub availability: Vec<AvailabilityWindow>,
    /// Slots to cover.
    pub requirements: Vec<ShiftRequirement>,
    /// Location catalog (pass-through).
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Qualification catalog (pass-through).
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
    /// First day of the week being scheduled (day-of-week 0).
    pub week_start_date: NaiveDate,
    /// Solver options.
    #[serde(default)]
    pub constraints: SolveConstraints,
}

impl Problem {
    /// Creates an empty problem for the given week.
    pub fn new(week_start_date: NaiveDate) -> Self {
        Self {
            staff: Vec::new(),
            availability: Vec::new(),
            requirements: Vec::new(),
            locations: Vec::new(),
            qualifications: Vec::new(),
            week_start_date,
            constraints: SolveConstraints::default(),
        }
    }

    /// Sets the staff roster.
    pub fn with_staff(mut self, staff: Vec<Staff>) -> Self {
        self.staff = staff;
        self
    }

    /// Sets the availability windows.
    pub fn with_availability(mut self, availability: Vec<AvailabilityWindow>) -> Self {
        self.availability = availability;
        self
    }

    /// Sets the requirements.
    pub fn with_requirements(mut self, requirements: Vec<ShiftRequirement>) -> Self {
        self.requirements = requirements;
        self
    }

    /// Sets the solver options.
    pub fn with_constraints(mut self, constraints: SolveConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

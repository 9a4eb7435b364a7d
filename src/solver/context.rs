//! Immutable per-solve lookups.
//!
//! Built once from a [`Problem`] before any pass runs. Holds the
//! availability index (staff × day → windows), weekly availability
//! totals, and id lookups the passes consult on every eligibility
//! check. Inputs are read-only for the lifetime of a solve.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::models::{
    best_window, max_overlap, HourSpan, Problem, ShiftRequirement, Staff,
};

use super::state::Placement;
use crate::models::ScheduledShift;

const NO_WINDOWS: &[HourSpan] = &[];

/// Precomputed lookups shared by all passes of one solve.
pub(crate) struct SolveContext<'a> {
    /// The problem being solved.
    pub problem: &'a Problem,
    /// Staff id → availability spans per day-of-week.
    availability: HashMap<&'a str, [Vec<HourSpan>; 7]>,
    /// Staff id → total weekly availability hours (sum over windows).
    weekly_availability: HashMap<&'a str, u32>,
    /// Staff id → roster index.
    staff_index: HashMap<&'a str, usize>,
    /// Requirement id → requirement index.
    requirement_index: HashMap<&'a str, usize>,
}

impl<'a> SolveContext<'a> {
    /// Builds the lookup tables for a problem.
    pub fn new(problem: &'a Problem) -> Self {
        let mut availability: HashMap<&str, [Vec<HourSpan>; 7]> = HashMap::new();
        let mut weekly_availability: HashMap<&str, u32> = HashMap::new();

        for window in &problem.availability {
            if window.day_of_week > 6 {
                continue;
            }
            let days = availability.entry(window.staff_id.as_str()).or_default();
            days[usize::from(window.day_of_week)].push(window.span());
            *weekly_availability
                .entry(window.staff_id.as_str())
                .or_insert(0) += window.duration();
        }

        let staff_index = problem
            .staff
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        let requirement_index = problem
            .requirements
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();

        Self {
            problem,
            availability,
            weekly_availability,
            staff_index,
            requirement_index,
        }
    }

    /// Availability spans of a staff member on a day.
    pub fn windows(&self, staff_id: &str, day_of_week: u8) -> &[HourSpan] {
        if day_of_week > 6 {
            return NO_WINDOWS;
        }
        self.availability
            .get(staff_id)
            .map(|days| days[usize::from(day_of_week)].as_slice())
            .unwrap_or(NO_WINDOWS)
    }

    /// Total weekly availability hours of a staff member.
    pub fn weekly_availability(&self, staff_id: &str) -> u32 {
        self.weekly_availability
            .get(staff_id)
            .copied()
            .unwrap_or(0)
    }

    /// Looks up a staff member by id.
    pub fn staff(&self, staff_id: &str) -> Option<&'a Staff> {
        self.staff_index
            .get(staff_id)
            .map(|&i| &self.problem.staff[i])
    }

    /// Looks up a requirement by id.
    pub fn requirement(&self, requirement_id: &str) -> Option<&'a ShiftRequirement> {
        self.requirement_index
            .get(requirement_id)
            .map(|&i| &self.problem.requirements[i])
    }

    /// Whether split-shift (partial-window) eligibility is enabled.
    pub fn allow_split(&self) -> bool {
        self.problem.constraints.allow_split_shifts
    }

    /// Minimum single-window overlap required in split mode.
    pub fn min_overlap(&self) -> u32 {
        self.problem.constraints.min_overlap_hours
    }

    /// The effective weekly hour ceiling for a staff member: their own
    /// max, tightened by the global cap when one is set.
    pub fn max_hours_for(&self, staff: &Staff) -> u32 {
        match self.problem.constraints.max_hours_per_staff {
            Some(global) if global > 0 => staff.max_hours_per_week.min(global),
            _ => staff.max_hours_per_week,
        }
    }

    /// The effective weekly hour floor for a staff member.
    pub fn min_hours_for(&self, staff: &Staff) -> u32 {
        staff
            .min_hours_per_week
            .max(self.problem.constraints.min_hours_per_staff.unwrap_or(0))
    }

    /// Hours charged against the weekly budget for covering a
    /// requirement: the full slot length normally, the best
    /// single-window overlap in split mode.
    pub fn hours_worked(&self, staff: &Staff, requirement: &ShiftRequirement) -> u32 {
        if self.allow_split() {
            max_overlap(
                self.windows(&staff.id, requirement.day_of_week),
                requirement.span(),
            )
        } else {
            requirement.duration()
        }
    }

    /// The interval the staff member actually stands for a requirement:
    /// the requirement interval normally, the best-overlap chunk in
    /// split mode (`None` when no window touches the slot).
    pub fn worked_span(&self, staff: &Staff, requirement: &ShiftRequirement) -> Option<HourSpan> {
        if self.allow_split() {
            best_window(
                self.windows(&staff.id, requirement.day_of_week),
                requirement.span(),
            )
        } else {
            Some(requirement.span())
        }
    }

    /// Calendar date of a day-of-week within the scheduled week.
    pub fn shift_date(&self, day_of_week: u8) -> NaiveDate {
        self.problem
            .week_start_date
            .checked_add_days(Days::new(u64::from(day_of_week)))
            .unwrap_or(self.problem.week_start_date)
    }

    /// Builds a placement for one staff covering one requirement.
    ///
    /// The shift is recorded at the requirement's interval; the worked
    /// span and charged hours come from the mode-specific overlap rules.
    /// `None` when the staff has no usable window in split mode.
    pub fn placement_for(&self, staff: &Staff, requirement: &ShiftRequirement) -> Option<Placement> {
        let worked = self.worked_span(staff, requirement)?;
        let hours = self.hours_worked(staff, requirement);
        let shift = ScheduledShift::new(
            &staff.id,
            &requirement.id,
            self.shift_date(requirement.day_of_week),
            requirement.span(),
            &requirement.location_id,
        );
        Some(Placement {
            shift,
            day: requirement.day_of_week,
            worked,
            hours,
            locked: false,
        })
    }
}

//! Structural input validation.
//!
//! Checks a [`Problem`] for integrity issues before solving: duplicate
//! ids, inverted hour intervals, days outside the week, impossible
//! headcounts, and dangling references. Validation is advisory — the
//! solver does not defend against malformed input itself — so callers
//! run this at the boundary where the data arrives.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::Problem;

/// Validation outcome: all detected issues, not just the first.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A structural problem in the solve input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Two staff share an id.
    #[error("duplicate staff id `{0}`")]
    DuplicateStaffId(String),
    /// Two requirements share an id.
    #[error("duplicate requirement id `{0}`")]
    DuplicateRequirementId(String),
    /// Two availability windows share an id.
    #[error("duplicate availability id `{0}`")]
    DuplicateAvailabilityId(String),
    /// A staff member's hour floor exceeds their ceiling.
    #[error("staff `{0}` has min hours {1} above max hours {2}")]
    InvertedHourBounds(String, u32, u32),
    /// An hour interval is empty, inverted, or runs past 24.
    #[error("{entity} `{id}` has an invalid hour interval {start}..{end}")]
    InvalidInterval {
        /// Kind of entity carrying the interval.
        entity: &'static str,
        /// Id of the offending entity.
        id: String,
        /// Interval start.
        start: u8,
        /// Interval end.
        end: u8,
    },
    /// A day-of-week outside `0..=6`.
    #[error("{entity} `{id}` has day-of-week {day} outside 0..=6")]
    InvalidDay {
        /// Kind of entity carrying the day.
        entity: &'static str,
        /// Id of the offending entity.
        id: String,
        /// The bad day value.
        day: u8,
    },
    /// A requirement with no reachable headcount.
    #[error("requirement `{0}` has invalid headcount {1}..{2}")]
    InvalidHeadcount(String, u32, u32),
    /// An availability window for a staff member not in the roster.
    #[error("availability `{0}` references unknown staff `{1}`")]
    UnknownStaff(String, String),
    /// A requirement for a location not in the catalog.
    #[error("requirement `{0}` references unknown location `{1}`")]
    UnknownLocation(String, String),
    /// A requirement demanding a qualification not in the catalog.
    #[error("requirement `{0}` requires unknown qualification `{1}`")]
    UnknownQualification(String, String),
}

/// Validates a problem, collecting every detected issue.
///
/// Catalog reference checks (locations, qualifications) only run when
/// the corresponding pass-through list is non-empty, since callers may
/// legitimately omit the catalogs.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    let mut staff_ids = HashSet::new();
    for staff in &problem.staff {
        if !staff_ids.insert(staff.id.as_str()) {
            errors.push(ValidationError::DuplicateStaffId(staff.id.clone()));
        }
        if staff.min_hours_per_week > staff.max_hours_per_week {
            errors.push(ValidationError::InvertedHourBounds(
                staff.id.clone(),
                staff.min_hours_per_week,
                staff.max_hours_per_week,
            ));
        }
    }

    let mut window_ids = HashSet::new();
    for window in &problem.availability {
        if !window_ids.insert(window.id.as_str()) {
            errors.push(ValidationError::DuplicateAvailabilityId(window.id.clone()));
        }
        if window.start_hour >= window.end_hour || window.end_hour > 24 {
            errors.push(ValidationError::InvalidInterval {
                entity: "availability",
                id: window.id.clone(),
                start: window.start_hour,
                end: window.end_hour,
            });
        }
        if window.day_of_week > 6 {
            errors.push(ValidationError::InvalidDay {
                entity: "availability",
                id: window.id.clone(),
                day: window.day_of_week,
            });
        }
        if !staff_ids.contains(window.staff_id.as_str()) {
            errors.push(ValidationError::UnknownStaff(
                window.id.clone(),
                window.staff_id.clone(),
            ));
        }
    }

    let location_ids: HashSet<&str> = problem.locations.iter().map(|l| l.id.as_str()).collect();
    let qualification_ids: HashSet<&str> = problem
        .qualifications
        .iter()
        .map(|q| q.id.as_str())
        .collect();

    let mut requirement_ids = HashSet::new();
    for requirement in &problem.requirements {
        if !requirement_ids.insert(requirement.id.as_str()) {
            errors.push(ValidationError::DuplicateRequirementId(
                requirement.id.clone(),
            ));
        }
        if requirement.start_hour >= requirement.end_hour || requirement.end_hour > 24 {
            errors.push(ValidationError::InvalidInterval {
                entity: "requirement",
                id: requirement.id.clone(),
                start: requirement.start_hour,
                end: requirement.end_hour,
            });
        }
        if requirement.day_of_week > 6 {
            errors.push(ValidationError::InvalidDay {
                entity: "requirement",
                id: requirement.id.clone(),
                day: requirement.day_of_week,
            });
        }
        if requirement.min_staff < 1 || requirement.max_staff < requirement.min_staff {
            errors.push(ValidationError::InvalidHeadcount(
                requirement.id.clone(),
                requirement.min_staff,
                requirement.max_staff,
            ));
        }
        if !location_ids.is_empty() && !location_ids.contains(requirement.location_id.as_str()) {
            errors.push(ValidationError::UnknownLocation(
                requirement.id.clone(),
                requirement.location_id.clone(),
            ));
        }
        if !qualification_ids.is_empty() {
            for qualification in &requirement.required_qualifications {
                if !qualification_ids.contains(qualification.as_str()) {
                    errors.push(ValidationError::UnknownQualification(
                        requirement.id.clone(),
                        qualification.clone(),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AvailabilityWindow, Location, Qualification, ShiftRequirement, Staff,
    };
    use chrono::NaiveDate;

    fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    fn valid_problem() -> Problem {
        Problem::new(week_start())
            .with_staff(vec![
                Staff::new("ada", 40).with_qualification("rn"),
                Staff::new("bea", 20),
            ])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 9, 17),
                AvailabilityWindow::new("a2", "bea", 2, 8, 12),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 17).with_qualification("rn")
            ])
    }

    #[test]
    fn test_valid_problem_passes() {
        assert!(validate_problem(&valid_problem()).is_ok());
    }

    #[test]
    fn test_duplicate_staff_id() {
        let mut problem = valid_problem();
        problem.staff.push(Staff::new("ada", 10));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateStaffId("ada".into())));
    }

    #[test]
    fn test_inverted_hour_bounds() {
        let mut problem = valid_problem();
        problem.staff.push(Staff::new("cyd", 10).with_min_hours(20));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.contains(&ValidationError::InvertedHourBounds("cyd".into(), 20, 10)));
    }

    #[test]
    fn test_inverted_interval_and_bad_day() {
        let mut problem = valid_problem();
        problem
            .availability
            .push(AvailabilityWindow::new("a3", "ada", 9, 17, 9));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidInterval {
                entity: "availability",
                ..
            }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidDay {
                entity: "availability",
                day: 9,
                ..
            }
        )));
    }

    #[test]
    fn test_interval_past_midnight() {
        let mut problem = valid_problem();
        problem
            .requirements
            .push(ShiftRequirement::new("r2", "loc1", 1, 20, 25));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidInterval {
                entity: "requirement",
                end: 25,
                ..
            }
        )));
    }

    #[test]
    fn test_invalid_headcount() {
        let mut problem = valid_problem();
        problem
            .requirements
            .push(ShiftRequirement::new("r2", "loc1", 1, 9, 12).with_staffing(3, 2));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidHeadcount("r2".into(), 3, 2)));
    }

    #[test]
    fn test_unknown_staff_reference() {
        let mut problem = valid_problem();
        problem
            .availability
            .push(AvailabilityWindow::new("a3", "ghost", 1, 9, 12));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.contains(&ValidationError::UnknownStaff("a3".into(), "ghost".into())));
    }

    #[test]
    fn test_catalog_checks_only_with_catalogs() {
        // Without catalogs the loc1 reference is fine.
        assert!(validate_problem(&valid_problem()).is_ok());

        let mut problem = valid_problem();
        problem.locations = vec![Location::new("other", "Other Site")];
        problem.qualifications = vec![Qualification::new("md", "Doctor")];

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.contains(&ValidationError::UnknownLocation("r1".into(), "loc1".into())));
        assert!(errors.contains(&ValidationError::UnknownQualification(
            "r1".into(),
            "rn".into()
        )));
    }

    #[test]
    fn test_errors_accumulate() {
        let mut problem = valid_problem();
        problem.staff.push(Staff::new("ada", 10));
        problem
            .availability
            .push(AvailabilityWindow::new("a1", "ghost", 9, 12, 9));

        let errors = validate_problem(&problem).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_error_display() {
        let e = ValidationError::DuplicateStaffId("ada".into());
        assert_eq!(e.to_string(), "duplicate staff id `ada`");
    }
}

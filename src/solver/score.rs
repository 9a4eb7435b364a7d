//! Scalar schedule scoring.
//!
//! Ranks candidate schedules for the variant generator. Coverage terms
//! dominate by construction; warning penalties are secondary signals.
//! The overtime penalty is defense-in-depth only — the max-hours gate
//! keeps it unreachable on well-formed output.

use crate::models::{ScheduleResult, Staff, WarningKind};

/// Weight per covered hour.
const COVERED_HOUR_WEIGHT: f64 = 1000.0;
/// Weight on the coverage percentage.
const COVERAGE_PCT_WEIGHT: f64 = 100.0;
/// Weight on the filled-requirement ratio.
const FILLED_RATIO_WEIGHT: f64 = 500.0;
/// Bonus when every staff member lands inside their hour bounds.
const BALANCE_BONUS: f64 = 200.0;
/// Penalty per uncovered required hour.
const UNCOVERED_HOUR_PENALTY: f64 = 5000.0;

/// Scores a schedule result; higher is better.
pub fn score(result: &ScheduleResult, staff: &[Staff]) -> f64 {
    let stats = &result.stats;

    let filled_ratio = stats.filled_shifts as f64 / stats.total_shifts.max(1) as f64;
    let uncovered_hours = stats.required_hours.saturating_sub(stats.covered_hours);

    let balanced = staff.iter().all(|s| {
        let hours = stats.hours_per_staff.get(&s.id).copied().unwrap_or(0);
        hours <= s.max_hours_per_week && (hours == 0 || hours >= s.min_hours_per_week)
    });
    let balance_bonus = if balanced { BALANCE_BONUS } else { 0.0 };

    let warning_penalty: f64 = result.warnings.iter().map(|w| penalty(w.kind)).sum();

    COVERED_HOUR_WEIGHT * f64::from(stats.covered_hours)
        + COVERAGE_PCT_WEIGHT * stats.coverage_percentage
        + FILLED_RATIO_WEIGHT * filled_ratio
        + balance_bonus
        - UNCOVERED_HOUR_PENALTY * f64::from(uncovered_hours)
        - warning_penalty
}

fn penalty(kind: WarningKind) -> f64 {
    match kind {
        WarningKind::Unfilled => 200.0,
        WarningKind::Overtime => 100.0,
        WarningKind::Undertime => 50.0,
        WarningKind::QualificationMismatch => 300.0,
        WarningKind::PreferenceIgnored => 20.0,
    }
}

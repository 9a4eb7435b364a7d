//! Coverage and statistics computation.
//!
//! Deterministic over the final placement list and the inputs. Coverage
//! is hour-level: an hour of a requirement counts as covered up to
//! `min_staff` by the placements whose *worked* interval contains it,
//! so a split-shift assignment only covers the chunk actually stood.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{ScheduleStats, ScheduleWarning, UncoveredGap};

use super::context::SolveContext;
use super::state::SolveState;

/// Computes the stats block and the warning list for a finished solve.
pub(crate) fn compute_stats(
    ctx: &SolveContext,
    state: &SolveState,
) -> (ScheduleStats, Vec<ScheduleWarning>) {
    let mut required_hours: u32 = 0;
    let mut covered_hours: u32 = 0;
    let mut filled_shifts: usize = 0;
    let mut uncovered_gaps: Vec<UncoveredGap> = Vec::new();
    let mut warnings: Vec<ScheduleWarning> = Vec::new();

    for requirement in &ctx.problem.requirements {
        required_hours += requirement.duration() * requirement.min_staff;

        let profile = state.coverage_profile(requirement);
        covered_hours += profile
            .iter()
            .map(|&c| c.min(requirement.min_staff))
            .sum::<u32>();
        if profile.iter().all(|&c| c >= requirement.min_staff) {
            filled_shifts += 1;
        }

        for gap in state.coverage_gaps(requirement) {
            uncovered_gaps.push(UncoveredGap {
                requirement_id: requirement.id.clone(),
                day_of_week: requirement.day_of_week,
                start_hour: gap.start,
                end_hour: gap.end,
                location_id: requirement.location_id.clone(),
            });
        }

        let assigned = state.assigned_count(&requirement.id);
        if assigned < requirement.min_staff {
            warnings.push(ScheduleWarning::unfilled(
                &requirement.id,
                format!(
                    "Requirement {} has {} of {} required staff",
                    requirement.id, assigned, requirement.min_staff
                ),
            ));
        }
    }

    let mut hours_per_staff: HashMap<String, u32> = HashMap::new();
    for staff in &ctx.problem.staff {
        let hours = state.hours_for(&staff.id);
        hours_per_staff.insert(staff.id.clone(), hours);

        let ceiling = ctx.max_hours_for(staff);
        if hours > ceiling {
            // Unreachable on well-formed output: the max-hours gate is
            // re-checked at every insertion point.
            warnings.push(ScheduleWarning::overtime(
                &staff.id,
                format!(
                    "{} exceeds their max hours ({}/{}h)",
                    display_name(staff),
                    hours,
                    ceiling
                ),
            ));
        }

        let floor = ctx.min_hours_for(staff);
        if floor > 0 && hours < floor {
            warnings.push(ScheduleWarning::undertime(
                &staff.id,
                format!(
                    "{} has fewer hours than their minimum ({}/{}h)",
                    display_name(staff),
                    hours,
                    floor
                ),
            ));
        }
    }

    let total_hours: u32 = hours_per_staff.values().sum();
    let coverage_percentage = if required_hours == 0 {
        100.0
    } else {
        f64::from(covered_hours) / f64::from(required_hours) * 100.0
    };

    debug!(
        "coverage {:.1}% ({}h of {}h), {} of {} requirements filled",
        coverage_percentage,
        covered_hours,
        required_hours,
        filled_shifts,
        ctx.problem.requirements.len()
    );

    let stats = ScheduleStats {
        total_shifts: ctx.problem.requirements.len(),
        filled_shifts,
        total_hours,
        hours_per_staff,
        coverage_percentage,
        required_hours,
        covered_hours,
        uncovered_gaps,
    };
    (stats, warnings)
}

fn display_name(staff: &crate::models::Staff) -> &str {
    if staff.name.is_empty() {
        &staff.id
    } else {
        &staff.name
    }
}

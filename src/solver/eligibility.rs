//! Eligibility rules and scarcity analysis.
//!
//! [`is_eligible`] is the single legality gate for putting a staff
//! member on a requirement. Rule 4 (the max-hours gate) is hard: every
//! pass re-checks it at its own insertion point because state mutates
//! between checks.

use std::collections::HashMap;

use crate::models::{max_overlap, ShiftRequirement, Staff};

use super::context::SolveContext;
use super::state::SolveState;

/// Whether the staff member's availability can stand this requirement
/// at all: full containment by a single window normally, or a single
/// window overlapping at least `min(minOverlapHours, duration)` in
/// split mode.
pub(crate) fn window_fit(ctx: &SolveContext, staff: &Staff, requirement: &ShiftRequirement) -> bool {
    let windows = ctx.windows(&staff.id, requirement.day_of_week);
    let span = requirement.span();
    if ctx.allow_split() {
        let needed = ctx.min_overlap().min(requirement.duration());
        max_overlap(windows, span) >= needed
    } else {
        windows.iter().any(|w| w.contains_span(&span))
    }
}

/// Whether assigning `staff` to `requirement` is legal in the current
/// state.
///
/// All four rules must hold:
/// 1. qualification superset,
/// 2. availability window fit for the active mode,
/// 3. no worked interval of this staff on this day intersects the
///    requirement interval,
/// 4. the weekly hour ceiling survives the added hours (hard gate).
pub(crate) fn is_eligible(
    staff: &Staff,
    requirement: &ShiftRequirement,
    ctx: &SolveContext,
    state: &SolveState,
) -> bool {
    if !staff.is_qualified_for(&requirement.required_qualifications) {
        return false;
    }
    if !window_fit(ctx, staff, requirement) {
        return false;
    }
    if state.day_conflict(
        &staff.id,
        requirement.day_of_week,
        requirement.span(),
        None,
    ) {
        return false;
    }
    let added = ctx.hours_worked(staff, requirement);
    state.hours_for(&staff.id) + added <= ctx.max_hours_for(staff)
}

/// Counts, per requirement, the staff who could legally cover it in
/// isolation (qualification + window fit, ignoring hours and existing
/// assignments). Drives the `scarcity-first` ordering.
pub(crate) fn eligible_counts(ctx: &SolveContext) -> HashMap<String, usize> {
    ctx.problem
        .requirements
        .iter()
        .map(|req| {
            let count = ctx
                .problem
                .staff
                .iter()
                .filter(|s| {
                    s.is_qualified_for(&req.required_qualifications) && window_fit(ctx, s, req)
                })
                .count();
            (req.id.clone(), count)
        })
        .collect()
}

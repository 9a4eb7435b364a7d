//! Local-search repair passes.
//!
//! Two passes run after greedy assignment:
//!
//! - **Swap repair** moves assignees from over-covered requirements to
//!   under-covered ones. Over-coverage only arises from a pre-seeded
//!   state (preserved locked shifts), but the pass defends the general
//!   case.
//! - **Gap fill** walks hour-level coverage gaps and adds eligible
//!   coverers one at a time until no requirement admits progress.
//!
//! Both passes re-run the hard max-hours gate at their insertion
//! points, and both treat locked placements as immovable.

use tracing::debug;

use crate::models::{HourSpan, ShiftRequirement, Staff};

use super::context::SolveContext;
use super::eligibility::window_fit;
use super::state::SolveState;

/// Safety bound on gap-fill sweeps; progress-making sweeps add at least
/// one assignment each, so correct runs converge long before this.
const MAX_GAP_FILL_SWEEPS: usize = 20;

/// Moves assignees from over-covered requirements into gap
/// requirements until each gap reaches `min_staff` or no legal swap
/// remains. Gap requirements are visited by day then start hour.
pub(crate) fn swap_pass(ctx: &SolveContext, state: &mut SolveState) {
    let mut gaps: Vec<&ShiftRequirement> = ctx
        .problem
        .requirements
        .iter()
        .filter(|r| state.assigned_count(&r.id) < r.min_staff)
        .collect();
    gaps.sort_by_key(|r| (r.day_of_week, r.start_hour));

    let mut moves = 0usize;
    for gap in gaps {
        while state.assigned_count(&gap.id) < gap.min_staff {
            let Some(shift_id) = find_swap_donor(ctx, state, gap) else {
                break;
            };
            let Some(donated) = state.remove_shift(&shift_id) else {
                break;
            };
            let staff_id = donated.shift.staff_id.clone();
            match ctx
                .staff(&staff_id)
                .and_then(|s| ctx.placement_for(s, gap))
            {
                Some(placement) => {
                    state.insert(placement);
                    moves += 1;
                }
                None => {
                    // Donor verified eligible before removal; restore
                    // rather than lose the assignment.
                    state.insert(donated);
                    break;
                }
            }
        }
    }

    if moves > 0 {
        debug!("swap repair moved {} assignment(s)", moves);
    }
}

/// Finds the first movable assignment whose holder could legally cover
/// `gap` once released from its current requirement.
fn find_swap_donor(ctx: &SolveContext, state: &SolveState, gap: &ShiftRequirement) -> Option<String> {
    for p in state.placements() {
        if p.locked || p.shift.requirement_id == gap.id {
            continue;
        }
        let Some(donor_req) = ctx.requirement(&p.shift.requirement_id) else {
            continue;
        };
        // Only take from requirements holding more than they need.
        if state.assigned_count(&donor_req.id) <= donor_req.min_staff {
            continue;
        }
        if state.has_assignment(&gap.id, &p.shift.staff_id) {
            continue;
        }
        let Some(staff) = ctx.staff(&p.shift.staff_id) else {
            continue;
        };
        if !staff.is_qualified_for(&gap.required_qualifications) {
            continue;
        }
        if !window_fit(ctx, staff, gap) {
            continue;
        }
        // Projected hours after releasing the donated assignment.
        let projected = state.hours_for(&staff.id) - p.hours + ctx.hours_worked(staff, gap);
        if projected > ctx.max_hours_for(staff) {
            continue;
        }
        if state.day_conflict(&staff.id, gap.day_of_week, gap.span(), Some(&p.shift.id)) {
            continue;
        }
        return Some(p.shift.id.clone());
    }
    None
}

/// Iterates hour-level coverage gaps and inserts the best eligible
/// coverer per gap until a full sweep makes no progress.
pub(crate) fn gap_fill_pass(ctx: &SolveContext, state: &mut SolveState) {
    let mut added = 0usize;
    for _ in 0..MAX_GAP_FILL_SWEEPS {
        let mut progressed = false;
        for requirement in &ctx.problem.requirements {
            loop {
                let gaps = state.coverage_gaps(requirement);
                if gaps.is_empty() {
                    break;
                }
                let mut inserted = false;
                for gap in gaps {
                    let Some(staff) = best_gap_candidate(ctx, state, requirement, gap) else {
                        continue;
                    };
                    if let Some(placement) = ctx.placement_for(staff, requirement) {
                        state.insert(placement);
                        added += 1;
                        inserted = true;
                        progressed = true;
                        break; // coverage changed; recompute gaps
                    }
                }
                if !inserted {
                    break;
                }
            }
        }
        if !progressed {
            break;
        }
    }

    if added > 0 {
        debug!("gap fill added {} assignment(s)", added);
    }
}

/// Best coverer for one gap range: qualification-compatible, window-fit
/// for the active mode, at least one hour of overlap with the gap, no
/// day conflict, and room under the hour ceiling for the full
/// requirement charge. Larger gap overlap wins, then larger remaining
/// capacity; ties keep roster order.
fn best_gap_candidate<'a>(
    ctx: &SolveContext<'a>,
    state: &SolveState,
    requirement: &ShiftRequirement,
    gap: HourSpan,
) -> Option<&'a Staff> {
    let mut best: Option<(&Staff, u32, u32)> = None;

    for staff in &ctx.problem.staff {
        if state.has_assignment(&requirement.id, &staff.id) {
            continue;
        }
        if !staff.is_qualified_for(&requirement.required_qualifications) {
            continue;
        }
        if !window_fit(ctx, staff, requirement) {
            continue;
        }
        let Some(worked) = ctx.worked_span(staff, requirement) else {
            continue;
        };
        let gap_overlap = worked
            .intersection(&gap)
            .map(|o| o.duration())
            .unwrap_or(0);
        if gap_overlap < 1 {
            continue;
        }
        if state.day_conflict(&staff.id, requirement.day_of_week, requirement.span(), None) {
            continue;
        }
        let added = ctx.hours_worked(staff, requirement);
        if state.hours_for(&staff.id) + added > ctx.max_hours_for(staff) {
            continue;
        }
        let remaining = ctx.max_hours_for(staff).saturating_sub(state.hours_for(&staff.id));

        let better = match best {
            None => true,
            Some((_, best_overlap, best_remaining)) => {
                gap_overlap > best_overlap
                    || (gap_overlap == best_overlap && remaining > best_remaining)
            }
        };
        if better {
            best = Some((staff, gap_overlap, remaining));
        }
    }

    best.map(|(staff, _, _)| staff)
}

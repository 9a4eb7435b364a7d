//! Greedy assignment pass.
//!
//! Visits requirements in the order chosen by the strategy and fills
//! each up to `min_staff` with the best-ranked eligible staff.
//!
//! # Ranking
//! Staff with more remaining weekly capacity go first: staff with broad
//! availability and large budgets are spent early, reserving
//! narrow-availability staff for the scarce slots visited later. Ties
//! fall to greater total weekly availability, or to fewer assigned
//! hours when `balanceHours` is on. A seed-derived jitter breaks
//! otherwise-identical ranks so repeated seeds stay reproducible while
//! distinct seeds diversify.

use rand::Rng;
use tracing::debug;

use super::context::SolveContext;
use super::eligibility::is_eligible;
use super::state::SolveState;

struct RankedCandidate {
    staff_idx: usize,
    remaining: u32,
    assigned: u32,
    breadth: u32,
    jitter: f64,
}

/// Runs the assignment pass over `order` (requirement indices).
pub(crate) fn assign_pass<R: Rng>(
    ctx: &SolveContext,
    order: &[usize],
    state: &mut SolveState,
    rng: &mut R,
) {
    let balance = ctx.problem.constraints.balance_hours;

    for &req_idx in order {
        let requirement = &ctx.problem.requirements[req_idx];
        let already = state.assigned_count(&requirement.id);
        if already >= requirement.min_staff {
            continue;
        }

        let mut ranked: Vec<RankedCandidate> = ctx
            .problem
            .staff
            .iter()
            .enumerate()
            .filter(|(_, s)| is_eligible(s, requirement, ctx, state))
            .map(|(staff_idx, s)| RankedCandidate {
                staff_idx,
                remaining: ctx.max_hours_for(s).saturating_sub(state.hours_for(&s.id)),
                assigned: state.hours_for(&s.id),
                breadth: ctx.weekly_availability(&s.id),
                jitter: rng.random::<f64>(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.remaining
                .cmp(&a.remaining)
                .then_with(|| {
                    if balance {
                        a.assigned.cmp(&b.assigned)
                    } else {
                        b.breadth.cmp(&a.breadth)
                    }
                })
                .then_with(|| a.jitter.total_cmp(&b.jitter))
        });

        let needed = (requirement.min_staff - already) as usize;
        for candidate in ranked.into_iter().take(needed) {
            let staff = &ctx.problem.staff[candidate.staff_idx];
            // The hard max-hours gate is re-verified at the insertion
            // point; state may have moved since ranking.
            let added = ctx.hours_worked(staff, requirement);
            if state.hours_for(&staff.id) + added > ctx.max_hours_for(staff) {
                continue;
            }
            if let Some(placement) = ctx.placement_for(staff, requirement) {
                state.insert(placement);
            }
        }

        if state.assigned_count(&requirement.id) < requirement.min_staff {
            debug!(
                "requirement {} short-staffed after assignment: {}/{}",
                requirement.id,
                state.assigned_count(&requirement.id),
                requirement.min_staff
            );
        }
    }
}

//! Solve entry points.
//!
//! One synchronous, CPU-bound pipeline per candidate: order → assign →
//! swap-repair → gap-fill → stats. Inputs are read by reference and
//! never mutated; all mutable state is owned by the run. Given the same
//! `(problem, strategy, seed)` the output assignments are identical —
//! only generated ids and timestamps differ.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

use crate::models::{Problem, Schedule, ScheduleResult, SolveConstraints};

use super::context::SolveContext;
use super::eligibility::eligible_counts;
use super::ordering::OrderingStrategy;
use super::repair::{gap_fill_pass, swap_pass};
use super::state::{Placement, SolveState};
use super::variants::{generate_variants, VariantSet};
use super::{assign::assign_pass, stats::compute_stats};

/// Produces one candidate schedule using the scarcity-first ordering.
pub fn solve(problem: &Problem, seed: u64) -> ScheduleResult {
    let ctx = SolveContext::new(problem);
    run_pipeline(&ctx, OrderingStrategy::ScarcityFirst, seed)
}

/// Produces `num_candidates` candidates across all ordering strategies
/// and returns the `num_top_variants` best unique schedules.
///
/// Passing `num_top_variants = 0` falls back to
/// `constraints.solution_pool_size`.
pub fn solve_variants(
    problem: &Problem,
    num_candidates: usize,
    num_top_variants: usize,
    seed: u64,
) -> VariantSet {
    let ctx = SolveContext::new(problem);
    let top = if num_top_variants == 0 {
        problem.constraints.solution_pool_size
    } else {
        num_top_variants
    };
    generate_variants(&ctx, num_candidates, top, seed)
}

/// Re-solves a problem while preserving locked shifts from an existing
/// schedule.
///
/// `new_constraints` is merged over the problem's constraints (locked
/// shift ids are unioned). Preserved shifts are pre-seeded into the
/// solve state as immovable placements, so every pass accounts their
/// hours and avoids conflicting with them; a final sweep defends
/// against duplicates on the same requirement.
pub fn regenerate(
    problem: &Problem,
    existing: &Schedule,
    new_constraints: SolveConstraints,
    seed: u64,
) -> ScheduleResult {
    let mut merged = problem.clone();
    merged.constraints = problem.constraints.merged_with(&new_constraints);

    let ctx = SolveContext::new(&merged);
    let mut state = SolveState::new();
    let mut preserved = 0usize;

    for shift in &existing.shifts {
        let locked = shift.is_locked
            || merged
                .constraints
                .locked_shift_ids
                .iter()
                .any(|id| id == &shift.id);
        if !locked {
            continue;
        }
        // A lock needs both ends to still exist in the problem.
        let Some(requirement) = ctx.requirement(&shift.requirement_id) else {
            continue;
        };
        let Some(staff) = ctx.staff(&shift.staff_id) else {
            continue;
        };
        if state.has_assignment(&requirement.id, &staff.id) {
            continue;
        }
        let (worked, hours) = match ctx.worked_span(staff, requirement) {
            Some(w) => (w, ctx.hours_worked(staff, requirement)),
            // Availability changed under a locked shift: honor the lock
            // at its recorded interval anyway.
            None => (shift.span(), shift.span().duration()),
        };
        state.insert(Placement {
            shift: shift.clone(),
            day: requirement.day_of_week,
            worked,
            hours,
            locked: true,
        });
        preserved += 1;
    }

    if preserved > 0 {
        debug!("regenerate preserved {} locked shift(s)", preserved);
    }

    run_passes(&ctx, OrderingStrategy::ScarcityFirst, seed, &mut state);
    state.remove_fresh_conflicts();
    finish(&ctx, state)
}

/// Runs one full candidate pipeline against a fresh state.
pub(crate) fn run_pipeline(
    ctx: &SolveContext,
    strategy: OrderingStrategy,
    seed: u64,
) -> ScheduleResult {
    let mut state = SolveState::new();
    run_passes(ctx, strategy, seed, &mut state);
    finish(ctx, state)
}

fn run_passes(
    ctx: &SolveContext,
    strategy: OrderingStrategy,
    seed: u64,
    state: &mut SolveState,
) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let scarcity = eligible_counts(ctx);
    let order = strategy.order(&ctx.problem.requirements, &scarcity, &mut rng);
    debug!("running pipeline with {} ordering", strategy.name());

    assign_pass(ctx, &order, state, &mut rng);
    swap_pass(ctx, state);
    gap_fill_pass(ctx, state);
}

fn finish(ctx: &SolveContext, state: SolveState) -> ScheduleResult {
    let (stats, warnings) = compute_stats(ctx, &state);
    let mut schedule = Schedule::new(ctx.problem.week_start_date);
    schedule.shifts = state.into_shifts();
    ScheduleResult {
        schedule,
        warnings,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        max_overlap, AvailabilityWindow, HourSpan, ShiftRequirement, Staff, WarningKind,
    };
    use crate::solver::variants::signature;
    use chrono::NaiveDate;

    fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap() // Sunday
    }

    /// Asserts every hard invariant over a returned result.
    fn assert_invariants(problem: &Problem, result: &ScheduleResult) {
        let constraints = &problem.constraints;

        // Max hours, per staff and global.
        for staff in &problem.staff {
            let hours = result
                .stats
                .hours_per_staff
                .get(&staff.id)
                .copied()
                .unwrap_or(0);
            assert!(
                hours <= staff.max_hours_per_week,
                "{} over personal ceiling",
                staff.id
            );
            if let Some(global) = constraints.max_hours_per_staff {
                if global > 0 {
                    assert!(hours <= global, "{} over global ceiling", staff.id);
                }
            }
        }

        let worked_span = |shift: &crate::models::ScheduledShift| -> HourSpan {
            let requirement = problem
                .requirements
                .iter()
                .find(|r| r.id == shift.requirement_id)
                .unwrap();
            if constraints.allow_split_shifts {
                let windows: Vec<HourSpan> = problem
                    .availability
                    .iter()
                    .filter(|w| {
                        w.staff_id == shift.staff_id
                            && w.day_of_week == requirement.day_of_week
                    })
                    .map(|w| w.span())
                    .collect();
                crate::models::best_window(&windows, requirement.span()).unwrap()
            } else {
                requirement.span()
            }
        };

        for (i, shift) in result.schedule.shifts.iter().enumerate() {
            let staff = problem
                .staff
                .iter()
                .find(|s| s.id == shift.staff_id)
                .expect("assignment references known staff");
            let requirement = problem
                .requirements
                .iter()
                .find(|r| r.id == shift.requirement_id)
                .expect("assignment references known requirement");

            // Recorded at the requirement's interval.
            assert_eq!(shift.span(), requirement.span());

            // Qualification superset.
            assert!(staff.is_qualified_for(&requirement.required_qualifications));

            // Eligibility window for the active mode.
            let windows: Vec<HourSpan> = problem
                .availability
                .iter()
                .filter(|w| {
                    w.staff_id == shift.staff_id && w.day_of_week == requirement.day_of_week
                })
                .map(|w| w.span())
                .collect();
            if constraints.allow_split_shifts {
                let needed = constraints.min_overlap_hours.min(requirement.duration());
                assert!(max_overlap(&windows, requirement.span()) >= needed);
            } else {
                assert!(windows.iter().any(|w| w.contains_span(&requirement.span())));
            }

            for other in &result.schedule.shifts[i + 1..] {
                if other.staff_id != shift.staff_id {
                    continue;
                }
                // Uniqueness per (requirement, staff).
                assert_ne!(other.requirement_id, shift.requirement_id);
                // No double-booking of worked intervals on a day.
                if other.date == shift.date {
                    assert!(!worked_span(shift).overlaps(&worked_span(other)));
                }
            }
        }

        // Coverage bounds.
        assert!(result.stats.covered_hours <= result.stats.required_hours);
        assert!(result.stats.coverage_percentage >= 0.0);
        assert!(result.stats.coverage_percentage <= 100.0 + 1e-9);
    }

    #[test]
    fn test_single_fit() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40)])
            .with_availability(vec![AvailabilityWindow::new("a1", "ada", 1, 9, 17)])
            .with_requirements(vec![ShiftRequirement::new("r1", "loc1", 1, 9, 17)]);

        let result = solve(&problem, 42);
        assert_invariants(&problem, &result);

        assert_eq!(result.schedule.shift_count(), 1);
        assert!((result.stats.coverage_percentage - 100.0).abs() < 1e-9);
        assert_eq!(result.stats.hours_per_staff["ada"], 8);
        assert_eq!(result.stats.filled_shifts, 1);
        assert!(result.warnings.is_empty());

        let shift = &result.schedule.shifts[0];
        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(shift.location_id, "loc1");
        assert!(!shift.is_locked);
    }

    #[test]
    fn test_over_demand() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 8), Staff::new("bea", 8)])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 9, 17),
                AvailabilityWindow::new("a2", "bea", 1, 9, 17),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 17).with_staffing(3, 3)
            ]);

        let result = solve(&problem, 42);
        assert_invariants(&problem, &result);

        assert_eq!(result.schedule.shift_count(), 2);
        assert_eq!(result.stats.filled_shifts, 0);
        assert_eq!(result.stats.covered_hours, 16);
        assert_eq!(result.stats.required_hours, 24);
        assert!((result.stats.coverage_percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.kind == WarningKind::Unfilled)
                .count(),
            1
        );
    }

    #[test]
    fn test_split_shift() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40)])
            .with_availability(vec![AvailabilityWindow::new("a1", "ada", 1, 9, 13)])
            .with_requirements(vec![ShiftRequirement::new("r1", "loc1", 1, 9, 17)])
            .with_constraints(SolveConstraints {
                allow_split_shifts: true,
                min_overlap_hours: 2,
                ..Default::default()
            });

        let result = solve(&problem, 42);
        assert_invariants(&problem, &result);

        assert_eq!(result.schedule.shift_count(), 1);
        // Recorded at the requirement interval, not the worked chunk.
        assert_eq!(result.schedule.shifts[0].span(), HourSpan::new(9, 17));
        assert_eq!(result.stats.hours_per_staff["ada"], 4);
        assert_eq!(result.stats.covered_hours, 4);

        assert_eq!(result.stats.uncovered_gaps.len(), 1);
        let gap = &result.stats.uncovered_gaps[0];
        assert_eq!(gap.start_hour, 13);
        assert_eq!(gap.end_hour, 17);
        assert_eq!(gap.day_of_week, 1);
        assert_eq!(gap.requirement_id, "r1");
    }

    #[test]
    fn test_max_hours_gate() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 6)])
            .with_availability(vec![AvailabilityWindow::new("a1", "ada", 1, 8, 20)])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 13),
                ShiftRequirement::new("r2", "loc1", 1, 14, 18),
            ]);

        let result = solve(&problem, 42);
        assert_invariants(&problem, &result);

        assert_eq!(result.schedule.shift_count(), 1);
        assert_eq!(result.stats.hours_per_staff["ada"], 4);
        assert_eq!(result.stats.filled_shifts, 1);
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.kind == WarningKind::Unfilled)
                .count(),
            1
        );
    }

    #[test]
    fn test_repair_covers_both_requirements() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40), Staff::new("bea", 40)])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 9, 16),
                AvailabilityWindow::new("a2", "bea", 1, 13, 16),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 12),
                ShiftRequirement::new("r2", "loc1", 1, 13, 16),
            ]);

        // Whatever the greedy pass does, the repair passes must leave
        // both requirements covered for every seed.
        for seed in [1, 7, 42, 1234] {
            let result = solve(&problem, seed);
            assert_invariants(&problem, &result);
            assert_eq!(result.stats.filled_shifts, 2, "seed {seed}");
            assert!((result.stats.coverage_percentage - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_variants_unique_signatures() {
        // Chronological ordering gives r1 to the bigger budget first;
        // duration-driven orderings visit r2 first and flip the pair.
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 10), Staff::new("bea", 8)])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 9, 14),
                AvailabilityWindow::new("a2", "bea", 1, 9, 14),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 12),
                ShiftRequirement::new("r2", "loc1", 1, 10, 14),
            ]);

        let set = solve_variants(&problem, 10, 3, 42);
        assert_eq!(set.best_index, 0);
        assert_eq!(set.variants.len(), 3);

        let unique: std::collections::HashSet<_> =
            set.variants.iter().map(signature).collect();
        assert!(unique.len() >= 2);

        let scores: Vec<f64> = set
            .variants
            .iter()
            .map(|v| super::super::score::score(v, &problem.staff))
            .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1]);
        }

        for variant in &set.variants {
            assert_invariants(&problem, variant);
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let problem = Problem::new(week_start())
            .with_staff(vec![
                Staff::new("ada", 40),
                Staff::new("bea", 40),
                Staff::new("cyd", 20).with_qualification("rn"),
            ])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 8, 18),
                AvailabilityWindow::new("a2", "bea", 1, 8, 18),
                AvailabilityWindow::new("a3", "cyd", 1, 8, 18),
                AvailabilityWindow::new("a4", "ada", 3, 8, 14),
                AvailabilityWindow::new("a5", "cyd", 3, 8, 14),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 17).with_staffing(2, 3),
                ShiftRequirement::new("r2", "loc1", 3, 9, 13).with_qualification("rn"),
            ]);

        let a = solve(&problem, 99);
        let b = solve(&problem, 99);
        assert_eq!(signature(&a), signature(&b));
        assert_eq!(a.stats.hours_per_staff, b.stats.hours_per_staff);
        assert_eq!(a.stats.covered_hours, b.stats.covered_hours);
        assert_eq!(a.warnings.len(), b.warnings.len());
        assert_invariants(&problem, &a);
    }

    #[test]
    fn test_no_eligible_staff_anywhere() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40)])
            // No availability at all.
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 17),
                ShiftRequirement::new("r2", "loc1", 2, 9, 17),
            ]);

        let result = solve(&problem, 42);
        assert!(result.schedule.shifts.is_empty());
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.kind == WarningKind::Unfilled)
                .count(),
            2
        );
        assert!((result.stats.coverage_percentage - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_regenerate_preserves_locked_shift() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40), Staff::new("bea", 40)])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 8, 18),
                AvailabilityWindow::new("a2", "bea", 1, 8, 18),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 13),
                ShiftRequirement::new("r2", "loc1", 1, 14, 18),
            ]);

        // Pin bea to r1 — the greedy pass left alone might choose
        // otherwise under balance ranking.
        let first = solve(&problem, 42);
        let mut existing = first.schedule.clone();
        let pinned = existing
            .shifts
            .iter_mut()
            .find(|s| s.requirement_id == "r1")
            .unwrap();
        pinned.staff_id = "bea".to_string();
        pinned.is_locked = true;
        let pinned_id = pinned.id.clone();
        existing.shifts.retain(|s| s.requirement_id == "r1");

        let result = regenerate(&problem, &existing, SolveConstraints::default(), 42);
        assert_invariants(&problem, &result);

        // The locked shift survives with its id and staff.
        let kept = result
            .schedule
            .shifts
            .iter()
            .find(|s| s.id == pinned_id)
            .expect("locked shift preserved");
        assert_eq!(kept.staff_id, "bea");
        assert!(kept.is_locked);

        // And the rest of the week still gets covered.
        assert_eq!(result.stats.filled_shifts, 2);
        assert!(!result
            .schedule
            .shifts
            .iter()
            .any(|s| s.requirement_id == "r1" && s.staff_id != "bea"));
    }

    #[test]
    fn test_regenerate_respects_locked_shift_ids_list() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40)])
            .with_availability(vec![AvailabilityWindow::new("a1", "ada", 1, 8, 18)])
            .with_requirements(vec![ShiftRequirement::new("r1", "loc1", 1, 9, 13)]);

        let first = solve(&problem, 7);
        let shift_id = first.schedule.shifts[0].id.clone();

        let constraints = SolveConstraints {
            locked_shift_ids: vec![shift_id.clone()],
            ..Default::default()
        };
        let result = regenerate(&problem, &first.schedule, constraints, 7);

        // Preserved via the id list even though is_locked was false.
        assert!(result.schedule.shifts.iter().any(|s| s.id == shift_id));
        assert_eq!(result.schedule.shift_count(), 1);
        assert_eq!(result.stats.hours_per_staff["ada"], 4);
    }

    #[test]
    fn test_regenerate_accounts_locked_hours_in_gate() {
        // Ada's 6h ceiling is half consumed by the locked shift; the
        // fresh pass must refuse the second 4h slot.
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 6)])
            .with_availability(vec![AvailabilityWindow::new("a1", "ada", 1, 8, 20)])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 13),
                ShiftRequirement::new("r2", "loc1", 1, 14, 18),
            ]);

        let first = solve(&problem, 42);
        let mut existing = first.schedule.clone();
        existing.shifts.retain(|s| s.requirement_id == "r1");
        assert_eq!(existing.shifts.len(), 1);
        existing.shifts[0].is_locked = true;

        let result = regenerate(&problem, &existing, SolveConstraints::default(), 42);
        assert_invariants(&problem, &result);
        assert_eq!(result.schedule.shift_count(), 1);
        assert_eq!(result.stats.hours_per_staff["ada"], 4);
    }

    #[test]
    fn test_global_cap_constraint() {
        let problem = Problem::new(week_start())
            .with_staff(vec![Staff::new("ada", 40)])
            .with_availability(vec![
                AvailabilityWindow::new("a1", "ada", 1, 8, 18),
                AvailabilityWindow::new("a2", "ada", 2, 8, 18),
            ])
            .with_requirements(vec![
                ShiftRequirement::new("r1", "loc1", 1, 9, 17),
                ShiftRequirement::new("r2", "loc1", 2, 9, 17),
            ])
            .with_constraints(SolveConstraints {
                max_hours_per_staff: Some(10),
                ..Default::default()
            });

        let result = solve(&problem, 42);
        assert_invariants(&problem, &result);
        // Only one 8h slot fits under the 10h global cap.
        assert_eq!(result.stats.hours_per_staff["ada"], 8);
        assert_eq!(result.schedule.shift_count(), 1);
    }
}

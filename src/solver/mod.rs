//! The scheduling engine.
//!
//! A greedy, heuristic weekly staff scheduler with local-search repair:
//!
//! 1. **Order** requirements by a named strategy (scarcity-first by
//!    default — slots few staff can cover go first).
//! 2. **Assign** greedily up to each requirement's `minStaff`, spending
//!    broad-availability staff before narrow ones.
//! 3. **Swap-repair**: move assignees from over-covered requirements to
//!    gapped ones.
//! 4. **Gap-fill**: walk hour-level coverage gaps and add eligible
//!    coverers.
//! 5. **Stats**: hour-level coverage, per-staff hours, gaps, warnings.
//!
//! The variant generator runs this pipeline across every strategy with
//! seeded diversification, scores each candidate, and returns the top
//! unique schedules.
//!
//! # Hard Guarantees
//!
//! On every returned schedule: no staff member exceeds their weekly
//! hour ceiling, no one is double-booked, every assignee holds the
//! required qualifications, and every assignment fits the staff
//! member's availability under the active (full or split) mode.
//!
//! # Determinism
//!
//! `(problem, strategy, seed)` fully determines the assignments.
//! Solves are synchronous and CPU-bound with no shared state.

mod assign;
mod context;
mod eligibility;
mod engine;
mod ordering;
mod repair;
mod score;
mod state;
mod stats;
mod variants;

pub use engine::{regenerate, solve, solve_variants};
pub use ordering::OrderingStrategy;
pub use score::score;
pub use variants::{signature, VariantSet};

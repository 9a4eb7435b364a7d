//! Requirement ordering strategies.
//!
//! Each strategy turns the requirement list into a visiting order for
//! the assignment pass. All strategies are deterministic given the
//! inputs and an RNG seed; `random` is a Fisher–Yates shuffle of the
//! indices.
//!
//! `scarcity-first` is the flagship: requirements few staff can cover
//! go first, so the staff who could cover them are not consumed by
//! abundant slots earlier in the pass.

use std::cmp::Reverse;
use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::ShiftRequirement;

/// A named requirement-ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingStrategy {
    /// Fewest legal coverers first; longer slots break ties.
    ScarcityFirst,
    /// Largest minimum headcount first.
    MinStaffFirst,
    /// Longest slot first.
    LongestFirst,
    /// Day of week, then start hour.
    Chronological,
    /// Seeded Fisher–Yates shuffle.
    Random,
}

impl OrderingStrategy {
    /// Every strategy, in the order the variant generator cycles them.
    pub const ALL: [OrderingStrategy; 5] = [
        OrderingStrategy::ScarcityFirst,
        OrderingStrategy::MinStaffFirst,
        OrderingStrategy::LongestFirst,
        OrderingStrategy::Chronological,
        OrderingStrategy::Random,
    ];

    /// Strategy name as it appears in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            OrderingStrategy::ScarcityFirst => "scarcity-first",
            OrderingStrategy::MinStaffFirst => "min-staff-first",
            OrderingStrategy::LongestFirst => "longest-first",
            OrderingStrategy::Chronological => "chronological",
            OrderingStrategy::Random => "random",
        }
    }

    /// Returns requirement indices in visiting order.
    ///
    /// `scarcity` is the legal-coverer count per requirement id from
    /// the scarcity analyzer; only `scarcity-first` reads it.
    pub fn order<R: Rng>(
        &self,
        requirements: &[ShiftRequirement],
        scarcity: &HashMap<String, usize>,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..requirements.len()).collect();
        match self {
            OrderingStrategy::ScarcityFirst => {
                indices.sort_by_key(|&i| {
                    let r = &requirements[i];
                    (
                        scarcity.get(&r.id).copied().unwrap_or(0),
                        Reverse(r.duration()),
                        r.day_of_week,
                        r.start_hour,
                    )
                });
            }
            OrderingStrategy::MinStaffFirst => {
                indices.sort_by_key(|&i| {
                    let r = &requirements[i];
                    (Reverse(r.min_staff), r.day_of_week, r.start_hour)
                });
            }
            OrderingStrategy::LongestFirst => {
                indices.sort_by_key(|&i| {
                    let r = &requirements[i];
                    (Reverse(r.duration()), r.day_of_week, r.start_hour)
                });
            }
            OrderingStrategy::Chronological => {
                indices.sort_by_key(|&i| {
                    let r = &requirements[i];
                    (r.day_of_week, r.start_hour)
                });
            }
            OrderingStrategy::Random => {
                indices.shuffle(rng);
            }
        }
        indices
    }
}

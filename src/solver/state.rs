//! Per-solve mutable state.
//!
//! Owns the placements made so far together with the running hour and
//! headcount accounting. Every insertion and removal keeps the three
//! views (placement list, per-staff hours, per-requirement counts)
//! consistent, so the passes can query state between any two mutations.

use std::collections::HashMap;

use crate::models::{HourSpan, ScheduledShift, ShiftRequirement};

/// One assignment plus the solve-internal bookkeeping around it.
///
/// `shift` carries the requirement's interval (what is recorded);
/// `worked` is the interval the staff member actually stands, which
/// drives hour-level coverage and day-conflict checks.
#[derive(Debug, Clone)]
pub(crate) struct Placement {
    /// The assignment as it will appear in the returned schedule.
    pub shift: ScheduledShift,
    /// Day of week of the covered requirement.
    pub day: u8,
    /// Interval actually stood (best window; requirement span in
    /// full-shift mode).
    pub worked: HourSpan,
    /// Hours charged against the staff member's weekly budget.
    pub hours: u32,
    /// Immovable: never removed by the swap or gap-fill passes.
    pub locked: bool,
}

/// Mutable solve state: placements plus running accounting.
#[derive(Debug, Default)]
pub(crate) struct SolveState {
    placements: Vec<Placement>,
    hours: HashMap<String, u32>,
    assigned: HashMap<String, u32>,
}

impl SolveState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// All placements in insertion order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Hours assigned so far to a staff member.
    pub fn hours_for(&self, staff_id: &str) -> u32 {
        self.hours.get(staff_id).copied().unwrap_or(0)
    }

    /// Number of staff assigned so far to a requirement.
    pub fn assigned_count(&self, requirement_id: &str) -> u32 {
        self.assigned.get(requirement_id).copied().unwrap_or(0)
    }

    /// Whether this staff member already covers this requirement.
    pub fn has_assignment(&self, requirement_id: &str, staff_id: &str) -> bool {
        self.placements
            .iter()
            .any(|p| p.shift.requirement_id == requirement_id && p.shift.staff_id == staff_id)
    }

    /// Whether any worked interval of this staff member on this day
    /// intersects `span`. `exclude_shift_id` leaves one placement out
    /// of the check (used when projecting a swap).
    pub fn day_conflict(
        &self,
        staff_id: &str,
        day: u8,
        span: HourSpan,
        exclude_shift_id: Option<&str>,
    ) -> bool {
        self.placements.iter().any(|p| {
            p.shift.staff_id == staff_id
                && p.day == day
                && exclude_shift_id != Some(p.shift.id.as_str())
                && p.worked.overlaps(&span)
        })
    }

    /// Inserts a placement, updating the hour and headcount accounting.
    pub fn insert(&mut self, placement: Placement) {
        *self
            .hours
            .entry(placement.shift.staff_id.clone())
            .or_insert(0) += placement.hours;
        *self
            .assigned
            .entry(placement.shift.requirement_id.clone())
            .or_insert(0) += 1;
        self.placements.push(placement);
    }

    /// Removes a placement by shift id, reversing its accounting.
    ///
    /// Preserves the order of the remaining placements so iteration
    /// stays deterministic.
    pub fn remove_shift(&mut self, shift_id: &str) -> Option<Placement> {
        let idx = self
            .placements
            .iter()
            .position(|p| p.shift.id == shift_id)?;
        let placement = self.placements.remove(idx);
        if let Some(h) = self.hours.get_mut(&placement.shift.staff_id) {
            *h = h.saturating_sub(placement.hours);
        }
        if let Some(c) = self.assigned.get_mut(&placement.shift.requirement_id) {
            *c = c.saturating_sub(1);
        }
        Some(placement)
    }

    /// Hour-by-hour coverage of a requirement, one entry per hour of
    /// its interval, counting placements whose worked interval contains
    /// the hour.
    pub fn coverage_profile(&self, requirement: &ShiftRequirement) -> Vec<u32> {
        let span = requirement.span();
        let mut profile = vec![0u32; span.duration() as usize];
        for p in &self.placements {
            if p.shift.requirement_id != requirement.id {
                continue;
            }
            for (slot, hour) in (span.start..span.end).enumerate() {
                if p.worked.contains_hour(hour) {
                    profile[slot] += 1;
                }
            }
        }
        profile
    }

    /// Maximal contiguous hour ranges of a requirement where coverage
    /// is below `min_staff`.
    pub fn coverage_gaps(&self, requirement: &ShiftRequirement) -> Vec<HourSpan> {
        let span = requirement.span();
        let profile = self.coverage_profile(requirement);
        let mut gaps = Vec::new();
        let mut gap_start: Option<u8> = None;

        for (slot, &coverage) in profile.iter().enumerate() {
            let hour = span.start + slot as u8;
            if coverage < requirement.min_staff {
                gap_start.get_or_insert(hour);
            } else if let Some(start) = gap_start.take() {
                gaps.push(HourSpan::new(start, hour));
            }
        }
        if let Some(start) = gap_start {
            gaps.push(HourSpan::new(start, span.end));
        }
        gaps
    }

    /// Drops unlocked placements that duplicate a locked one on the
    /// same requirement (same staff). Unreachable when the passes ran
    /// against a correctly pre-seeded state.
    pub fn remove_fresh_conflicts(&mut self) {
        let locked: Vec<(String, String)> = self
            .placements
            .iter()
            .filter(|p| p.locked)
            .map(|p| (p.shift.requirement_id.clone(), p.shift.staff_id.clone()))
            .collect();

        let conflicting: Vec<String> = self
            .placements
            .iter()
            .filter(|p| {
                !p.locked
                    && locked
                        .iter()
                        .any(|(r, s)| *r == p.shift.requirement_id && *s == p.shift.staff_id)
            })
            .map(|p| p.shift.id.clone())
            .collect();

        for id in conflicting {
            self.remove_shift(&id);
        }
    }

    /// Consumes the state, yielding the final shift list.
    pub fn into_shifts(self) -> Vec<ScheduledShift> {
        self.placements.into_iter().map(|p| p.shift).collect()
    }
}

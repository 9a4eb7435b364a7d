//! Hour-interval primitives and availability windows.
//!
//! All scheduling happens on integer hours within a day-of-week grid:
//! days are `0..=6` with `0 = Sunday`, and an interval `[start, end)`
//! is half-open with `end ≤ 24`.
//!
//! # Overlap Semantics
//! A staff member's availability on a day is a *set* of windows. Overlap
//! against a shift interval is the **maximum overlap with any single
//! window**, never the union: a 9–11 plus 14–16 availability cannot stand
//! a 9–16 shift as one chunk, so the engine sees at most 2 hours. Callers
//! wanting union semantics must say so explicitly with a new constraint
//! flag rather than changing this module.

use serde::{Deserialize, Serialize};

/// A half-open hour interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSpan {
    /// First hour (inclusive), `0..24`.
    pub start: u8,
    /// Last hour (exclusive), `≤ 24`.
    pub end: u8,
}

impl HourSpan {
    /// Creates a new span.
    pub fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Number of hours in this span.
    #[inline]
    pub fn duration(&self) -> u32 {
        u32::from(self.end.saturating_sub(self.start))
    }

    /// Whether an hour falls within this span.
    #[inline]
    pub fn contains_hour(&self, hour: u8) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Whether two spans share at least one hour.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this span fully contains another.
    pub fn contains_span(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// The shared sub-span, if any.
    pub fn intersection(&self, other: &Self) -> Option<HourSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            Some(HourSpan::new(start, end))
        } else {
            None
        }
    }
}

/// A declaration that a staff member can work a given hour range on a
/// given day of the week.
///
/// Multiple windows per staff per day are allowed and are kept separate
/// exactly as the caller provided them (see module docs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    /// Unique window identifier.
    pub id: String,
    /// Owning staff member.
    pub staff_id: String,
    /// Day of week, `0..=6` with `0 = Sunday`.
    pub day_of_week: u8,
    /// First available hour (inclusive).
    pub start_hour: u8,
    /// Last available hour (exclusive).
    pub end_hour: u8,
    /// Whether the staff member prefers to work this window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_preferred: Option<bool>,
}

impl AvailabilityWindow {
    /// Creates a new availability window.
    pub fn new(
        id: impl Into<String>,
        staff_id: impl Into<String>,
        day_of_week: u8,
        start_hour: u8,
        end_hour: u8,
    ) -> Self {
        Self {
            id: id.into(),
            staff_id: staff_id.into(),
            day_of_week,
            start_hour,
            end_hour,
            is_preferred: None,
        }
    }

    /// Marks this window as preferred.
    pub fn preferred(mut self) -> Self {
        self.is_preferred = Some(true);
        self
    }

    /// The hour span of this window.
    #[inline]
    pub fn span(&self) -> HourSpan {
        HourSpan::new(self.start_hour, self.end_hour)
    }

    /// Number of available hours.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.span().duration()
    }
}

/// Maximum overlap (in hours) between `span` and any *single* window.
pub fn max_overlap(windows: &[HourSpan], span: HourSpan) -> u32 {
    windows
        .iter()
        .filter_map(|w| w.intersection(&span))
        .map(|o| o.duration())
        .max()
        .unwrap_or(0)
}

/// The overlap interval achieving [`max_overlap`].
///
/// Ties go to the earliest window in input order. Returns `None` when no
/// window overlaps `span` at all.
pub fn best_window(windows: &[HourSpan], span: HourSpan) -> Option<HourSpan> {
    let mut best: Option<HourSpan> = None;
    for w in windows {
        if let Some(overlap) = w.intersection(&span) {
            match best {
                Some(b) if overlap.duration() <= b.duration() => {}
                _ => best = Some(overlap),
            }
        }
    }
    best
}

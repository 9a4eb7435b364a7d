//! Scheduled shift and schedule (solution) models.
//!
//! A schedule is a complete set of staff-to-requirement assignments for
//! one week. Each assignment is recorded at the **requirement's** hour
//! interval; when split shifts are enabled the hours a staff member
//! actually stands are a sub-interval of that, recoverable from their
//! availability. Downstream consumers rely on this: the assignment row
//! stays compact and the worked window is derived, not stored.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HourSpan;

/// A decision to have a specific staff member cover a specific
/// requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledShift {
    /// Generated shift identifier.
    pub id: String,
    /// Assigned staff member.
    pub staff_id: String,
    /// Covered requirement.
    pub requirement_id: String,
    /// Calendar date (week start + requirement day-of-week).
    pub date: NaiveDate,
    /// First hour (inclusive) — the requirement's interval.
    pub start_hour: u8,
    /// Last hour (exclusive) — the requirement's interval.
    pub end_hour: u8,
    /// Location of the requirement.
    pub location_id: String,
    /// Whether this shift must be preserved across regeneration.
    #[serde(default)]
    pub is_locked: bool,
}

impl ScheduledShift {
    /// Creates a new unlocked shift with a generated id.
    pub fn new(
        staff_id: impl Into<String>,
        requirement_id: impl Into<String>,
        date: NaiveDate,
        span: HourSpan,
        location_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            staff_id: staff_id.into(),
            requirement_id: requirement_id.into(),
            date,
            start_hour: span.start,
            end_hour: span.end,
            location_id: location_id.into(),
            is_locked: false,
        }
    }

    /// The recorded hour span (the requirement's interval).
    #[inline]
    pub fn span(&self) -> HourSpan {
        HourSpan::new(self.start_hour, self.end_hour)
    }
}

/// A complete weekly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Generated schedule identifier.
    pub id: String,
    /// First day of the scheduled week (day-of-week 0).
    pub week_start_date: NaiveDate,
    /// All assignments.
    pub shifts: Vec<ScheduledShift>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Whether this schedule has been published (always `false` here).
    #[serde(default)]
    pub is_published: bool,
}

impl Schedule {
    /// Creates an empty schedule for the given week.
    pub fn new(week_start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            week_start_date,
            shifts: Vec::new(),
            generated_at: Utc::now(),
            is_published: false,
        }
    }

    /// The calendar date of a day-of-week within this schedule's week.
    pub fn date_of(&self, day_of_week: u8) -> NaiveDate {
        self.week_start_date
            .checked_add_days(Days::new(u64::from(day_of_week)))
            .unwrap_or(self.week_start_date)
    }

    /// Adds a shift.
    pub fn add_shift(&mut self, shift: ScheduledShift) {
        self.shifts.push(shift);
    }

    /// All shifts for a given staff member.
    pub fn shifts_for_staff(&self, staff_id: &str) -> Vec<&ScheduledShift> {
        self.shifts
            .iter()
            .filter(|s| s.staff_id == staff_id)
            .collect()
    }

    /// All shifts covering a given requirement.
    pub fn shifts_for_requirement(&self, requirement_id: &str) -> Vec<&ScheduledShift> {
        self.shifts
            .iter()
            .filter(|s| s.requirement_id == requirement_id)
            .collect()
    }

    /// Number of assignments.
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }
}

//! Shift requirement and pass-through catalog models.
//!
//! A requirement is a slot to be covered: a day-of-week, an hour
//! interval, a location, a qualification set, and a headcount range.

use serde::{Deserialize, Serialize};

use super::HourSpan;

/// A slot to be covered by one or more staff.
///
/// `min_staff` is the headcount the engine works to reach at every hour
/// of the interval. `max_staff` is advisory: construction never goes
/// past `min_staff`, and each staff appears at most once per
/// requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequirement {
    /// Unique requirement identifier.
    pub id: String,
    /// Location this slot belongs to (opaque).
    pub location_id: String,
    /// Day of week, `0..=6` with `0 = Sunday`.
    pub day_of_week: u8,
    /// First hour of the slot (inclusive).
    pub start_hour: u8,
    /// Last hour of the slot (exclusive).
    pub end_hour: u8,
    /// Qualification ids every assignee must hold.
    #[serde(default)]
    pub required_qualifications: Vec<String>,
    /// Minimum simultaneous headcount.
    pub min_staff: u32,
    /// Maximum simultaneous headcount (advisory).
    pub max_staff: u32,
}

impl ShiftRequirement {
    /// Creates a new requirement with `min_staff = max_staff = 1`.
    pub fn new(
        id: impl Into<String>,
        location_id: impl Into<String>,
        day_of_week: u8,
        start_hour: u8,
        end_hour: u8,
    ) -> Self {
        Self {
            id: id.into(),
            location_id: location_id.into(),
            day_of_week,
            start_hour,
            end_hour,
            required_qualifications: Vec::new(),
            min_staff: 1,
            max_staff: 1,
        }
    }

    /// Sets the headcount range.
    pub fn with_staffing(mut self, min_staff: u32, max_staff: u32) -> Self {
        self.min_staff = min_staff;
        self.max_staff = max_staff;
        self
    }

    /// Adds a required qualification.
    pub fn with_qualification(mut self, qualification_id: impl Into<String>) -> Self {
        self.required_qualifications.push(qualification_id.into());
        self
    }

    /// The hour span of this requirement.
    #[inline]
    pub fn span(&self) -> HourSpan {
        HourSpan::new(self.start_hour, self.end_hour)
    }

    /// Slot length in hours.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.span().duration()
    }
}

/// A work location (pass-through).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique location identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
        }
    }
}

/// A qualification staff may hold (pass-through).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    /// Unique qualification identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
}

impl Qualification {
    /// Creates a new qualification.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
        }
    }
}

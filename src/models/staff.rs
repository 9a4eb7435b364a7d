//! Staff model.
//!
//! Staff are the people assigned to shift requirements. Each carries
//! weekly hour bounds, a qualification set, and display metadata that
//! passes through the engine untouched.

use serde::{Deserialize, Serialize};

/// A staff member who can be assigned to shifts.
///
/// Immutable during a solve. `max_hours_per_week` is a hard bound the
/// engine never exceeds; `min_hours_per_week` is a soft target reported
/// through `undertime` warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Unique staff identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color (pass-through).
    pub color: String,
    /// Qualification ids held by this staff member.
    #[serde(default)]
    pub qualifications: Vec<String>,
    /// Hard weekly hour ceiling.
    pub max_hours_per_week: u32,
    /// Soft weekly hour floor.
    #[serde(default)]
    pub min_hours_per_week: u32,
    /// Employment classification (pass-through).
    #[serde(default)]
    pub employment_type: EmploymentType,
    /// Contact email (pass-through).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone (pass-through).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Avatar URL (pass-through).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Employment classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    /// Full-time employment.
    #[default]
    FullTime,
    /// Part-time employment.
    PartTime,
}

impl Staff {
    /// Creates a new full-time staff member with the given hour ceiling.
    pub fn new(id: impl Into<String>, max_hours_per_week: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            color: String::new(),
            qualifications: Vec::new(),
            max_hours_per_week,
            min_hours_per_week: 0,
            employment_type: EmploymentType::FullTime,
            email: None,
            phone: None,
            avatar: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the weekly hour floor.
    pub fn with_min_hours(mut self, min_hours_per_week: u32) -> Self {
        self.min_hours_per_week = min_hours_per_week;
        self
    }

    /// Adds a qualification.
    pub fn with_qualification(mut self, qualification_id: impl Into<String>) -> Self {
        self.qualifications.push(qualification_id.into());
        self
    }

    /// Marks this staff member as part-time.
    pub fn part_time(mut self) -> Self {
        self.employment_type = EmploymentType::PartTime;
        self
    }

    /// Whether this staff member holds a given qualification.
    pub fn has_qualification(&self, qualification_id: &str) -> bool {
        self.qualifications.iter().any(|q| q == qualification_id)
    }

    /// Whether this staff member holds *every* required qualification.
    pub fn is_qualified_for(&self, required: &[String]) -> bool {
        required.iter().all(|q| self.has_qualification(q))
    }
}

//! Schedule statistics, coverage gaps, and warnings.
//!
//! Stats are computed once from the final assignment list and never
//! modified after return. Warnings are advisory: no kind is fatal, and
//! the engine always returns a result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Schedule;

/// A maximal contiguous hour range of a requirement where coverage is
/// below `min_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncoveredGap {
    /// The under-covered requirement.
    pub requirement_id: String,
    /// Day of week of the requirement.
    pub day_of_week: u8,
    /// First uncovered hour (inclusive).
    pub start_hour: u8,
    /// Last uncovered hour (exclusive).
    pub end_hour: u8,
    /// Location of the requirement.
    pub location_id: String,
}

/// Classification of schedule warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A requirement ended below its minimum headcount.
    Unfilled,
    /// A staff member exceeds their weekly hour ceiling.
    Overtime,
    /// A staff member falls short of their weekly hour floor.
    Undertime,
    /// A stated preference was not honored.
    PreferenceIgnored,
    /// An assignee lacks a required qualification.
    QualificationMismatch,
}

/// An advisory finding about a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWarning {
    /// Warning classification.
    #[serde(rename = "type")]
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
    /// Related staff member, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    /// Related requirement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
}

impl ScheduleWarning {
    /// Creates an unfilled-requirement warning.
    pub fn unfilled(requirement_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Unfilled,
            message: message.into(),
            staff_id: None,
            requirement_id: Some(requirement_id.into()),
        }
    }

    /// Creates an overtime warning.
    pub fn overtime(staff_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Overtime,
            message: message.into(),
            staff_id: Some(staff_id.into()),
            requirement_id: None,
        }
    }

    /// Creates an undertime warning.
    pub fn undertime(staff_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Undertime,
            message: message.into(),
            staff_id: Some(staff_id.into()),
            requirement_id: None,
        }
    }
}

/// Hour-level coverage statistics for a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    /// Total number of requirements.
    pub total_shifts: usize,
    /// Requirements whose every hour reaches `min_staff` coverage.
    pub filled_shifts: usize,
    /// Sum of assigned hours across staff.
    pub total_hours: u32,
    /// Assigned hours per staff id (every staff has an entry).
    pub hours_per_staff: HashMap<String, u32>,
    /// `100 * covered_hours / required_hours` (100 when nothing is required).
    pub coverage_percentage: f64,
    /// `Σ duration * min_staff` over requirements.
    pub required_hours: u32,
    /// `Σ_h min(coverage(h), min_staff)` over requirement hours.
    pub covered_hours: u32,
    /// Maximal contiguous under-covered ranges, merged per requirement.
    pub uncovered_gaps: Vec<UncoveredGap>,
}

/// A complete solve outcome: the schedule plus its stats and warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// The generated schedule.
    pub schedule: Schedule,
    /// Advisory findings.
    pub warnings: Vec<ScheduleWarning>,
    /// Coverage statistics.
    pub stats: ScheduleStats,
}

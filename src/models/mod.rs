//! Staffing domain models.
//!
//! Core data types for weekly staff scheduling problems and their
//! solutions. All wire-facing types serialize as camelCase JSON with
//! ISO-8601 dates; ids are opaque strings.
//!
//! # Domain Vocabulary
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Staff` | A person with weekly hour bounds and qualifications |
//! | `AvailabilityWindow` | A `(day, startHour, endHour)` the staff can work |
//! | `ShiftRequirement` | A slot to cover: interval, location, headcount |
//! | `ScheduledShift` | One staff covering one requirement |
//! | `Schedule` | A complete week of assignments |
//! | `ScheduleStats` | Hour-level coverage numbers and gaps |

mod problem;
mod requirement;
mod shift;
mod staff;
mod stats;
mod window;

pub use problem::{Problem, SolveConstraints};
pub use requirement::{Location, Qualification, ShiftRequirement};
pub use shift::{Schedule, ScheduledShift};
pub use staff::{EmploymentType, Staff};
pub use stats::{ScheduleResult, ScheduleStats, ScheduleWarning, UncoveredGap, WarningKind};
pub use window::{best_window, max_overlap, AvailabilityWindow, HourSpan};

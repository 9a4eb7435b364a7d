//! Weekly staff scheduling engine.
//!
//! Given a staff roster with weekly hour bounds and qualifications,
//! per-staff availability windows, and shift requirements (day, hour
//! interval, location, qualification set, headcount), produces complete
//! candidate schedules that maximize hour-level coverage without ever
//! violating the hard constraints (weekly hour ceilings, availability,
//! qualifications, no double-booking).
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Staff`, `AvailabilityWindow`,
//!   `ShiftRequirement`, `ScheduledShift`, `Schedule`, `ScheduleStats`,
//!   `Problem`, `SolveConstraints`
//! - **`solver`**: The engine — greedy assignment, swap-repair,
//!   gap-fill, scoring, and seeded variant generation
//! - **`validation`**: Structural input checks (duplicate ids, bad
//!   intervals, dangling references)
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use roster_core::models::{AvailabilityWindow, Problem, ShiftRequirement, Staff};
//! use roster_core::solver::solve;
//!
//! let problem = Problem::new(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
//!     .with_staff(vec![Staff::new("ada", 40).with_name("Ada")])
//!     .with_availability(vec![AvailabilityWindow::new("a1", "ada", 1, 9, 17)])
//!     .with_requirements(vec![ShiftRequirement::new("r1", "front-desk", 1, 9, 17)]);
//!
//! let result = solve(&problem, 42);
//! assert_eq!(result.schedule.shift_count(), 1);
//! assert_eq!(result.stats.coverage_percentage, 100.0);
//! ```
//!
//! # Scope
//!
//! This crate is the in-process scheduling core. Persistence, UI, HTTP
//! transport, and the drop-in CP-SAT solver service are separate
//! collaborators that consume the same problem and result shapes.

pub mod models;
pub mod solver;
pub mod validation;

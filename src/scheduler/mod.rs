//! Daily scheduler and school KPIs.
//!
//! # Algorithm
//!
//! [`DailyScheduler`] runs a greedy, registry-ordered pass once per
//! simulated day: form courses, staff them, teach, certify, graduate.
//! It is deterministic and consumes no randomness.
//!
//! # KPI
//!
//! [`SchoolKpi`] summarises population, course and certification state.

mod engine;
mod kpi;
mod policy;

pub use engine::{CompletedCourse, DailyScheduler, DayOutcome};
pub use kpi::SchoolKpi;
pub use policy::GraduationPolicy;

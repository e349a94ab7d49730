//! Day-by-day school simulation.
//!
//! Students and instructors come and go; once per simulated day a
//! deterministic scheduler opens courses for subjects with enough idle
//! students, staffs them with qualified instructors, teaches them, issues
//! certificates, and promotes students who hold the whole catalog.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Subject`, `Student`, `Instructor`,
//!   `Graduate`, `Course`, and the `School` aggregate that owns them
//! - **`scheduler`**: The daily pass (`DailyScheduler`), graduation policy
//!   and KPIs
//! - **`validation`**: Catalog checks and cross-entity invariant checks
//! - **`config`**: Loader for the line-oriented initial-population format
//! - **`simulation`**: Stochastic churn driver and status rendering
//!
//! # Example
//!
//! ```
//! use school_sim::config::parse_school;
//!
//! let text = "school:Demo\nsubject:Maths,1,2,2\nstudent:Ann,F,19\nTeacher:Ross,M,32\n";
//! let mut school = parse_school(text).unwrap().school;
//!
//! school.advance_one_day(1);
//! school.advance_one_day(2);
//! assert_eq!(school.graduates()[0].graduation_day(), 2);
//! ```

pub mod config;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod validation;

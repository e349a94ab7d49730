//! School domain models.
//!
//! Provides the data types the daily scheduler works on. People refer to
//! courses (and courses to people) by id; the [`School`] aggregate owns
//! every entity and resolves those ids.
//!
//! # Domain Mappings
//!
//! | school-sim | Scheduling term |
//! |------------|-----------------|
//! | Subject | Job template |
//! | Course | Job instance |
//! | Instructor | Skilled resource |
//! | Student | Consumer of a job slot |

mod course;
mod person;
mod school;
mod subject;

pub use course::{Course, CourseId, CourseStatus};
pub use person::{Gender, Graduate, Instructor, InstructorId, Profile, Specialization, Student, StudentId};
pub use school::School;
pub use subject::{Capability, Subject, SubjectId};

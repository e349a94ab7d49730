//! School performance indicators (KPIs).
//!
//! Computes headline metrics from the current state of a [`School`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Instructor utilization | busy instructors / all instructors |
//! | Catalog completion | mean fraction of the catalog each student holds |
//! | Awaiting courses | active courses without an instructor |
//! | Certificates held | sum of certificates across active students |

use serde::{Deserialize, Serialize};

use crate::models::School;

/// Snapshot of school metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolKpi {
    /// Active students.
    pub students: usize,
    /// Students not enrolled in a course.
    pub idle_students: usize,
    /// Registered instructors.
    pub instructors: usize,
    /// Instructors not assigned to a course.
    pub idle_instructors: usize,
    /// Promoted graduates.
    pub graduates: usize,
    /// Active courses.
    pub active_courses: usize,
    /// Active courses still waiting for an instructor.
    pub awaiting_courses: usize,
    /// Certificates held by active students.
    pub certificates_held: usize,
    /// Fraction of instructors currently teaching (0.0..1.0).
    pub instructor_utilization: f64,
    /// Mean fraction of the catalog certified per student (0.0..1.0).
    pub catalog_completion: f64,
}

impl SchoolKpi {
    /// Computes KPIs from the current school state.
    pub fn calculate(school: &School) -> Self {
        let students = school.student_count();
        let instructors = school.instructor_count();
        let idle_instructors = school.idle_instructors().count();
        let certificates_held: usize = school.students().map(|s| s.certificates.len()).sum();

        let instructor_utilization = if instructors > 0 {
            (instructors - idle_instructors) as f64 / instructors as f64
        } else {
            0.0
        };

        let catalog_size = school.subjects().len();
        let catalog_completion = if students > 0 && catalog_size > 0 {
            certificates_held as f64 / (students * catalog_size) as f64
        } else {
            0.0
        };

        Self {
            students,
            idle_students: school.idle_students().count(),
            instructors,
            idle_instructors,
            graduates: school.graduates().len(),
            active_courses: school.course_count(),
            awaiting_courses: school.courses().filter(|c| c.instructor.is_none()).count(),
            certificates_held,
            instructor_utilization,
            catalog_completion,
        }
    }
}

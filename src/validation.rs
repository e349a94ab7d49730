//! Validation for school catalogs and school state.
//!
//! Two layers:
//! - [`validate_catalog`] checks subject descriptors before a simulation
//!   starts (duplicate descriptions, empty or inverted class-size bands,
//!   zero durations).
//! - [`check_invariants`] checks the cross-entity invariants the daily
//!   scheduler maintains: referential consistency between people and
//!   courses, roster capacity, and instructor qualification.
//!
//! Both collect every problem found rather than stopping at the first.

use crate::models::{CourseStatus, School, Subject};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two subjects share the same description.
    DuplicateSubject,
    /// `max_class_size` is zero or below `min_class_size`.
    InvalidClassSize,
    /// A subject lasts zero days.
    ZeroDuration,
    /// A person and a course disagree about enrollment or assignment.
    BrokenReference,
    /// A course roster is empty or larger than its subject allows.
    CapacityExceeded,
    /// An instructor teaches a subject outside its specialization.
    SkillMismatch,
    /// A course refers to a subject missing from the catalog.
    UnknownSubject,
    /// A subject has more than one active course, or a course is marked
    /// completed while still active.
    InvalidCourseState,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a subject catalog.
///
/// Checks:
/// 1. No duplicate descriptions
/// 2. `max_class_size >= max(min_class_size, 1)`
/// 3. `duration_days > 0`
pub fn validate_catalog(subjects: &[Subject]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for subject in subjects {
        if !seen.insert(subject.description.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSubject,
                format!("Duplicate subject: {}", subject.description),
            ));
        }

        if subject.max_class_size < subject.opening_threshold() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidClassSize,
                format!(
                    "Subject '{}' has class size {}..={}",
                    subject.description, subject.min_class_size, subject.max_class_size
                ),
            ));
        }

        if subject.duration_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Subject '{}' has zero duration", subject.description),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks the structural invariants of a school.
///
/// Checks:
/// 1. Every enrolled student is on its course's roster, and every rostered
///    student points back at the course
/// 2. Every assigned instructor is bound to its course, and every course
///    instructor points back at the course
/// 3. Rosters are non-empty and within `max_class_size`
/// 4. Instructors only teach subjects their specialization covers
/// 5. At most one active course per subject; none marked completed
pub fn check_invariants(school: &School) -> ValidationResult {
    let mut errors = Vec::new();

    for student in school.students() {
        let Some(course_id) = student.enrolled_course else {
            continue;
        };
        let on_roster = school
            .course(course_id)
            .is_some_and(|c| c.has_student(student.id));
        if !on_roster {
            errors.push(ValidationError::new(
                ValidationErrorKind::BrokenReference,
                format!(
                    "Student '{}' enrolled in {:?} but not on its roster",
                    student.name(),
                    course_id
                ),
            ));
        }
    }

    for instructor in school.instructors() {
        let Some(course_id) = instructor.assigned_course else {
            continue;
        };
        let bound = school
            .course(course_id)
            .is_some_and(|c| c.instructor == Some(instructor.id));
        if !bound {
            errors.push(ValidationError::new(
                ValidationErrorKind::BrokenReference,
                format!(
                    "Instructor '{}' assigned to {:?} but not bound to it",
                    instructor.name(),
                    course_id
                ),
            ));
        }
    }

    let mut per_subject: HashMap<_, usize> = HashMap::new();
    for course in school.courses() {
        *per_subject.entry(course.subject).or_insert(0) += 1;

        if course.status() == CourseStatus::Completed {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCourseState,
                format!("Course {:?} is completed but still active", course.id),
            ));
        }

        for sid in &course.students {
            let linked = school
                .student(*sid)
                .is_some_and(|s| s.enrolled_course == Some(course.id));
            if !linked {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BrokenReference,
                    format!("Course {:?} lists {:?} who is not enrolled in it", course.id, sid),
                ));
            }
        }

        let Some(subject) = school.subject(course.subject) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSubject,
                format!("Course {:?} refers to unknown {:?}", course.id, course.subject),
            ));
            continue;
        };

        if course.students.is_empty() || course.size() > subject.max_class_size {
            errors.push(ValidationError::new(
                ValidationErrorKind::CapacityExceeded,
                format!(
                    "Course {:?} ({}) holds {} students, allowed 1..={}",
                    course.id,
                    subject.description,
                    course.size(),
                    subject.max_class_size
                ),
            ));
        }

        if let Some(iid) = course.instructor {
            match school.instructor(iid) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::BrokenReference,
                    format!("Course {:?} refers to unknown {:?}", course.id, iid),
                )),
                Some(instructor) => {
                    if instructor.assigned_course != Some(course.id) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::BrokenReference,
                            format!(
                                "Course {:?} taught by '{}' who is not assigned to it",
                                course.id,
                                instructor.name()
                            ),
                        ));
                    }
                    if !instructor.can_teach(subject.required_capability) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::SkillMismatch,
                            format!(
                                "{} '{}' cannot teach '{}' ({})",
                                instructor.specialization,
                                instructor.name(),
                                subject.description,
                                subject.required_capability
                            ),
                        ));
                    }
                }
            }
        }
    }

    for (subject, count) in per_subject {
        if count > 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCourseState,
                format!("{subject:?} backs {count} active courses"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

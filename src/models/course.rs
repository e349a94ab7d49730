//! Course model.
//!
//! A course is a live instance of a subject: a roster of students, at most
//! one instructor, a status and a count of taught days.
//!
//! # State machine
//!
//! ```text
//! AwaitingInstructor ──begin──▶ InProgress ──complete──▶ Completed
//! ```
//!
//! Transitions never skip a state and never go backwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{InstructorId, StudentId, SubjectId};

/// Identifier of an active course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u32);

/// Lifecycle status of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    /// Roster filled, no instructor has been found yet.
    AwaitingInstructor,
    /// Being taught; `elapsed_days` advances each day an instructor is present.
    InProgress,
    /// All days taught, certificates issued.
    Completed,
}

/// A course run for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier.
    pub id: CourseId,
    /// Subject being taught.
    pub subject: SubjectId,
    /// Instructor currently teaching, if any.
    pub instructor: Option<InstructorId>,
    /// Enrolled students, in enrollment order.
    pub students: Vec<StudentId>,
    status: CourseStatus,
    elapsed_days: u32,
}

impl CourseStatus {
    /// Upper-case label used in status output.
    pub fn label(self) -> &'static str {
        match self {
            CourseStatus::AwaitingInstructor => "AWAITING_INSTRUCTOR",
            CourseStatus::InProgress => "IN_PROGRESS",
            CourseStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Course {
    /// Opens a course awaiting an instructor.
    pub fn new(id: CourseId, subject: SubjectId, students: Vec<StudentId>) -> Self {
        Self {
            id,
            subject,
            instructor: None,
            students,
            status: CourseStatus::AwaitingInstructor,
            elapsed_days: 0,
        }
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> CourseStatus {
        self.status
    }

    /// Days taught so far.
    #[inline]
    pub fn elapsed_days(&self) -> u32 {
        self.elapsed_days
    }

    /// Number of enrolled students.
    #[inline]
    pub fn size(&self) -> usize {
        self.students.len()
    }

    /// Whether `student` is on the roster.
    pub fn has_student(&self, student: StudentId) -> bool {
        self.students.contains(&student)
    }

    /// Whether the course has no instructor right now.
    #[inline]
    pub fn needs_instructor(&self) -> bool {
        self.instructor.is_none() && self.status != CourseStatus::Completed
    }

    /// Binds an instructor.
    ///
    /// An awaiting course moves to `InProgress`; a course that lost its
    /// instructor mid-way keeps its status and progress. Returns `false`
    /// (and changes nothing) if an instructor is already bound or the course
    /// is completed.
    pub fn begin(&mut self, instructor: InstructorId) -> bool {
        if !self.needs_instructor() {
            return false;
        }
        self.instructor = Some(instructor);
        self.status = CourseStatus::InProgress;
        true
    }

    /// Teaches one day. Only an in-progress course with an instructor
    /// advances; returns whether it did.
    pub fn advance(&mut self) -> bool {
        if self.status == CourseStatus::InProgress && self.instructor.is_some() {
            self.elapsed_days += 1;
            true
        } else {
            false
        }
    }

    /// Whether the course has been taught for at least `duration_days`.
    pub fn is_due(&self, duration_days: u32) -> bool {
        self.status == CourseStatus::InProgress && self.elapsed_days >= duration_days
    }

    /// Marks the course completed. Only valid from `InProgress`.
    pub fn complete(&mut self) -> bool {
        if self.status != CourseStatus::InProgress {
            return false;
        }
        self.status = CourseStatus::Completed;
        true
    }

    /// Takes a student off the roster. Returns whether it was enrolled.
    pub fn withdraw(&mut self, student: StudentId) -> bool {
        let before = self.students.len();
        self.students.retain(|&s| s != student);
        self.students.len() != before
    }

    /// Unbinds the instructor, returning it. Status and progress are kept.
    pub fn release_instructor(&mut self) -> Option<InstructorId> {
        self.instructor.take()
    }
}

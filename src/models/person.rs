//! Person models: students, instructors and graduates.
//!
//! Students and instructors are the entities the daily scheduler matches
//! to courses. Each carries at most one course back-reference, held as a
//! [`CourseId`] and resolved through the owning [`School`](super::School).
//! Instructor kinds are a closed [`Specialization`] enum with a capability
//! predicate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{Capability, CourseId, SubjectId};

/// Registry identifier of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u32);

/// Registry identifier of an instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstructorId(pub u32);

/// Gender as recorded in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Identity attributes shared by every kind of person. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
}

/// A student working toward certificates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Registry identifier.
    pub id: StudentId,
    /// Identity attributes.
    pub profile: Profile,
    /// Subjects this student holds a certificate for.
    pub certificates: BTreeSet<SubjectId>,
    /// Course the student is currently enrolled in, if any.
    pub enrolled_course: Option<CourseId>,
}

/// Instructor specialization.
///
/// Each variant declares which subject capabilities it may teach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialization {
    /// General teacher.
    Teacher,
    /// Lab demonstrator.
    Demonstrator,
    /// Object-oriented programming trainer.
    OoTrainer,
    /// GUI development trainer.
    GuiTrainer,
}

/// An instructor who can be assigned to one course at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Registry identifier.
    pub id: InstructorId,
    /// Identity attributes.
    pub profile: Profile,
    /// Which subjects this instructor may teach.
    pub specialization: Specialization,
    /// Course currently taught, if any.
    pub assigned_course: Option<CourseId>,
}

/// A former student who certified the whole catalog.
///
/// The graduation day is fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graduate {
    profile: Profile,
    certificates: BTreeSet<SubjectId>,
    graduation_day: u32,
}

impl Gender {
    /// Parses the first character of `value`: `M`/`m` or `F`/`f`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().chars().next()?.to_ascii_uppercase() {
            'M' => Some(Gender::Male),
            'F' => Some(Gender::Female),
            _ => None,
        }
    }

    /// Single-letter code.
    pub fn code(self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }
}

impl Profile {
    /// Creates a profile.
    pub fn new(name: impl Into<String>, gender: Gender, age: u32) -> Self {
        Self {
            name: name.into(),
            gender,
            age,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.gender.code(), self.age)
    }
}

impl Student {
    /// Creates an idle student without certificates.
    pub fn new(id: StudentId, profile: Profile) -> Self {
        Self {
            id,
            profile,
            certificates: BTreeSet::new(),
            enrolled_course: None,
        }
    }

    /// Student name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Whether the student is not enrolled in any course.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.enrolled_course.is_none()
    }

    /// Whether the student holds a certificate for `subject`.
    #[inline]
    pub fn has_certificate(&self, subject: SubjectId) -> bool {
        self.certificates.contains(&subject)
    }

    /// Whether the student may join a new course of `subject`.
    pub fn can_enroll_in(&self, subject: SubjectId) -> bool {
        self.is_idle() && !self.has_certificate(subject)
    }

    /// Records a certificate. Returns `false` if it was already held.
    pub fn award_certificate(&mut self, subject: SubjectId) -> bool {
        self.certificates.insert(subject)
    }

    /// Whether certificates cover every subject in a non-empty catalog.
    pub fn holds_all<'a, I>(&self, catalog: I) -> bool
    where
        I: IntoIterator<Item = &'a SubjectId>,
    {
        let mut any = false;
        for id in catalog {
            any = true;
            if !self.certificates.contains(id) {
                return false;
            }
        }
        any
    }
}

impl Specialization {
    /// All specializations, in config order.
    pub const ALL: [Specialization; 4] = [
        Specialization::Teacher,
        Specialization::Demonstrator,
        Specialization::OoTrainer,
        Specialization::GuiTrainer,
    ];

    /// Whether this specialization may teach subjects requiring `capability`.
    pub fn can_teach(self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Specialization::Teacher => matches!(capability, Teaching | Demonstrating),
            Specialization::Demonstrator => matches!(capability, Demonstrating),
            Specialization::OoTrainer => {
                matches!(capability, Teaching | Demonstrating | ObjectOriented)
            }
            Specialization::GuiTrainer => matches!(capability, Teaching | Demonstrating | Gui),
        }
    }

    /// Config tag (`Teacher`, `Demonstrator`, `OOTrainer`, `GUITrainer`).
    pub fn tag(self) -> &'static str {
        match self {
            Specialization::Teacher => "Teacher",
            Specialization::Demonstrator => "Demonstrator",
            Specialization::OoTrainer => "OOTrainer",
            Specialization::GuiTrainer => "GUITrainer",
        }
    }

    /// Looks up a specialization by config tag (exact match).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Instructor {
    /// Creates an idle instructor.
    pub fn new(id: InstructorId, profile: Profile, specialization: Specialization) -> Self {
        Self {
            id,
            profile,
            specialization,
            assigned_course: None,
        }
    }

    /// Instructor name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Whether the instructor is not assigned to any course.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.assigned_course.is_none()
    }

    /// Whether this instructor's specialization covers `capability`.
    #[inline]
    pub fn can_teach(&self, capability: Capability) -> bool {
        self.specialization.can_teach(capability)
    }
}

impl Graduate {
    /// Promotes a student, stamping the graduation day.
    pub fn from_student(student: Student, day: u32) -> Self {
        Self {
            profile: student.profile,
            certificates: student.certificates,
            graduation_day: day,
        }
    }

    /// Identity attributes carried over from the student record.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Graduate name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Certificates held at promotion.
    pub fn certificates(&self) -> &BTreeSet<SubjectId> {
        &self.certificates
    }

    /// Simulated day of promotion.
    pub fn graduation_day(&self) -> u32 {
        self.graduation_day
    }
}

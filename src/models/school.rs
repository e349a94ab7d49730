//! School aggregate.
//!
//! The school owns the subject catalog, the person registry and the
//! active course list. Every mutation goes through it so that removing a
//! person also detaches the course that referenced them: no course ever
//! names a student or instructor absent from the registry.
//!
//! Registries are `BTreeMap`s keyed by monotonically issued ids, so map
//! order is registry (insertion) order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use super::{
    Capability, Course, CourseId, Graduate, Instructor, InstructorId, Profile, Specialization,
    Student, StudentId, Subject, SubjectId,
};
use crate::scheduler::{DailyScheduler, DayOutcome};

/// A school: catalog, people and active courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct School {
    name: String,
    pub(crate) subjects: Vec<Subject>,
    pub(crate) students: BTreeMap<StudentId, Student>,
    pub(crate) instructors: BTreeMap<InstructorId, Instructor>,
    pub(crate) graduates: Vec<Graduate>,
    pub(crate) courses: BTreeMap<CourseId, Course>,
    next_student: u32,
    next_instructor: u32,
    next_course: u32,
}

impl School {
    /// Creates an empty school.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// School name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ======================== Catalog ========================

    /// Adds a subject to the catalog, assigning its id.
    pub fn add_subject(&mut self, mut subject: Subject) -> SubjectId {
        let id = SubjectId(self.subjects.len() as u32);
        subject.id = id;
        self.subjects.push(subject);
        id
    }

    /// Catalog in insertion order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Looks up a subject.
    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.get(id.0 as usize).filter(|s| s.id == id)
    }

    /// Looks up a subject by description.
    pub fn subject_named(&self, description: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.description == description)
    }

    /// Ids of every catalog subject.
    pub fn subject_ids(&self) -> impl Iterator<Item = &SubjectId> + '_ {
        self.subjects.iter().map(|s| &s.id)
    }

    // ======================== Registry ========================

    /// Registers a new idle student.
    pub fn add_student(&mut self, profile: Profile) -> StudentId {
        let id = StudentId(self.next_student);
        self.next_student += 1;
        self.students.insert(id, Student::new(id, profile));
        id
    }

    /// Registers a new idle instructor.
    pub fn add_instructor(
        &mut self,
        profile: Profile,
        specialization: Specialization,
    ) -> InstructorId {
        let id = InstructorId(self.next_instructor);
        self.next_instructor += 1;
        self.instructors
            .insert(id, Instructor::new(id, profile, specialization));
        id
    }

    /// Removes a student, first taking it off any roster.
    ///
    /// A course left without students is abandoned.
    pub fn remove_student(&mut self, id: StudentId) -> Option<Student> {
        let mut student = self.students.remove(&id)?;
        if let Some(course_id) = student.enrolled_course.take() {
            let emptied = match self.courses.get_mut(&course_id) {
                Some(course) => {
                    course.withdraw(id);
                    course.students.is_empty()
                }
                None => false,
            };
            if emptied {
                self.abandon_course(course_id);
            }
        }
        debug!("removed student {}", student.profile.name);
        Some(student)
    }

    /// Removes an instructor, first unbinding it from its course.
    ///
    /// The course keeps its status and progress and waits for a
    /// replacement.
    pub fn remove_instructor(&mut self, id: InstructorId) -> Option<Instructor> {
        let mut instructor = self.instructors.remove(&id)?;
        if let Some(course_id) = instructor.assigned_course.take() {
            if let Some(course) = self.courses.get_mut(&course_id) {
                course.release_instructor();
            }
        }
        debug!("removed instructor {}", instructor.profile.name);
        Some(instructor)
    }

    /// Drops an active course without issuing certificates, freeing its
    /// students and instructor.
    pub fn abandon_course(&mut self, id: CourseId) -> Option<Course> {
        let course = self.courses.remove(&id)?;
        self.detach_course(&course);
        debug!("abandoned course {:?} ({} students)", id, course.size());
        Some(course)
    }

    /// Clears every back-reference to `course`.
    pub(crate) fn detach_course(&mut self, course: &Course) {
        for sid in &course.students {
            if let Some(student) = self.students.get_mut(sid) {
                if student.enrolled_course == Some(course.id) {
                    student.enrolled_course = None;
                }
            }
        }
        if let Some(iid) = course.instructor {
            if let Some(instructor) = self.instructors.get_mut(&iid) {
                if instructor.assigned_course == Some(course.id) {
                    instructor.assigned_course = None;
                }
            }
        }
    }

    /// Opens a course for `subject` and enrolls `students`.
    pub(crate) fn open_course(&mut self, subject: SubjectId, students: Vec<StudentId>) -> CourseId {
        let id = CourseId(self.next_course);
        self.next_course += 1;
        for sid in &students {
            if let Some(student) = self.students.get_mut(sid) {
                student.enrolled_course = Some(id);
            }
        }
        self.courses.insert(id, Course::new(id, subject, students));
        id
    }

    /// Moves a student to the graduate list.
    pub(crate) fn promote(&mut self, id: StudentId, day: u32) -> Option<&Graduate> {
        let student = self.remove_student(id)?;
        self.graduates.push(Graduate::from_student(student, day));
        self.graduates.last()
    }

    /// All students in registry order.
    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.values()
    }

    /// Looks up a student.
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Number of active students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Students not enrolled in any course.
    pub fn idle_students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.values().filter(|s| s.is_idle())
    }

    /// All instructors in registry order.
    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> + '_ {
        self.instructors.values()
    }

    /// Looks up an instructor.
    pub fn instructor(&self, id: InstructorId) -> Option<&Instructor> {
        self.instructors.get(&id)
    }

    /// Number of instructors.
    pub fn instructor_count(&self) -> usize {
        self.instructors.len()
    }

    /// Instructors not assigned to any course.
    pub fn idle_instructors(&self) -> impl Iterator<Item = &Instructor> + '_ {
        self.instructors.values().filter(|i| i.is_idle())
    }

    /// Instructors (busy or idle) able to teach `capability`.
    pub fn instructors_for(
        &self,
        capability: Capability,
    ) -> impl Iterator<Item = &Instructor> + '_ {
        self.instructors
            .values()
            .filter(move |i| i.can_teach(capability))
    }

    /// Graduates in promotion order.
    pub fn graduates(&self) -> &[Graduate] {
        &self.graduates
    }

    // ======================== Courses ========================

    /// Active courses in opening order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.values()
    }

    /// Looks up an active course.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Number of active courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Active course backing `subject`, if any.
    pub fn course_for_subject(&self, subject: SubjectId) -> Option<&Course> {
        self.courses.values().find(|c| c.subject == subject)
    }

    /// Subject description of the student's current course.
    pub fn enrolled_subject(&self, student: &Student) -> Option<&Subject> {
        let course = self.course(student.enrolled_course?)?;
        self.subject(course.subject)
    }

    /// Subject description of the instructor's current course.
    pub fn assigned_subject(&self, instructor: &Instructor) -> Option<&Subject> {
        let course = self.course(instructor.assigned_course?)?;
        self.subject(course.subject)
    }

    /// Runs one simulated day with the default scheduler.
    ///
    /// `day` stamps any graduations that happen during the pass.
    pub fn advance_one_day(&mut self, day: u32) -> DayOutcome {
        DailyScheduler::new().advance(self, day)
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} students, {} instructors, {} courses, {} graduates",
            self.name,
            self.students.len(),
            self.instructors.len(),
            self.courses.len(),
            self.graduates.len()
        )
    }
}

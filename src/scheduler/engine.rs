//! Daily scheduling pass.
//!
//! # Algorithm
//!
//! One deterministic pass per simulated day, in fixed order:
//!
//! 1. **Formation**: each subject without an active course collects idle,
//!    uncertified students (registry order). If the pool reaches the
//!    subject's opening threshold a course opens with the first
//!    `max_class_size` of them.
//! 2. **Assignment**: each course without an instructor takes the first
//!    idle instructor (registry order) able to teach its subject.
//! 3. **Advancement**: in-progress courses with an instructor count a day.
//! 4. **Completion**: courses taught for `duration_days` issue certificates,
//!    free their people and leave the active list.
//! 5. **Graduation**: students certified in the whole catalog become
//!    graduates, as many per pass as the [`GraduationPolicy`] allows.
//!
//! Later steps observe earlier steps of the same day: a course formed and
//! staffed today is taught today.
//!
//! The pass consumes no randomness and never fails; a missing reference is
//! an idle person, and a course that cannot be staffed waits.
//!
//! # Complexity
//! O(s * p + c * i) where s=subjects, p=students, c=courses, i=instructors.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::GraduationPolicy;
use crate::models::{Capability, CourseId, InstructorId, School, StudentId, SubjectId};

/// A course that finished during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCourse {
    /// Former course id.
    pub course: CourseId,
    /// Subject certified.
    pub subject: SubjectId,
    /// Students who received the certificate.
    pub students: Vec<StudentId>,
    /// Instructor who taught the final day.
    pub instructor: Option<InstructorId>,
}

/// What happened during one daily pass.
///
/// Informational only: the authoritative result is the mutated [`School`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOutcome {
    /// Simulated day number of the pass.
    pub day: u32,
    /// Courses opened in step 1.
    pub opened: Vec<CourseId>,
    /// Instructor bindings made in step 2.
    pub assigned: Vec<(CourseId, InstructorId)>,
    /// Courses finished in step 4.
    pub completed: Vec<CompletedCourse>,
    /// Names of students promoted in step 5.
    pub graduated: Vec<String>,
}

impl DayOutcome {
    fn new(day: u32) -> Self {
        Self {
            day,
            ..Default::default()
        }
    }

    /// Whether nothing changed during the pass besides course progress.
    pub fn is_quiet(&self) -> bool {
        self.opened.is_empty()
            && self.assigned.is_empty()
            && self.completed.is_empty()
            && self.graduated.is_empty()
    }
}

/// Runs the daily pass on a [`School`].
///
/// # Example
///
/// ```
/// use school_sim::models::{Gender, Profile, School, Specialization, Subject};
/// use school_sim::scheduler::DailyScheduler;
///
/// let mut school = School::new("Demo");
/// school.add_subject(Subject::new("Maths").with_class_size(1, 2).with_duration(1));
/// school.add_student(Profile::new("Ann", Gender::Female, 19));
/// school.add_instructor(Profile::new("Ross", Gender::Male, 32), Specialization::Teacher);
///
/// let outcome = DailyScheduler::new().advance(&mut school, 1);
/// assert_eq!(outcome.completed.len(), 1);
/// assert_eq!(school.graduates().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DailyScheduler {
    graduation_policy: GraduationPolicy,
}

impl DailyScheduler {
    /// Creates a scheduler promoting all eligible students each day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the graduation policy.
    pub fn with_graduation_policy(mut self, policy: GraduationPolicy) -> Self {
        self.graduation_policy = policy;
        self
    }

    /// Current graduation policy.
    pub fn graduation_policy(&self) -> GraduationPolicy {
        self.graduation_policy
    }

    /// Runs one simulated day.
    ///
    /// Calling twice runs two days; there is no same-day guard.
    pub fn advance(&self, school: &mut School, day: u32) -> DayOutcome {
        let mut outcome = DayOutcome::new(day);

        self.form_courses(school, &mut outcome);
        self.assign_instructors(school, &mut outcome);
        self.teach(school);
        self.complete_courses(school, &mut outcome);
        self.graduate(school, &mut outcome);

        outcome
    }

    fn form_courses(&self, school: &mut School, outcome: &mut DayOutcome) {
        for index in 0..school.subjects.len() {
            let subject = &school.subjects[index];
            let (subject_id, threshold, max) = (
                subject.id,
                subject.opening_threshold(),
                subject.max_class_size,
            );

            if max < threshold || school.course_for_subject(subject_id).is_some() {
                continue;
            }

            let mut pool: Vec<StudentId> = school
                .students
                .values()
                .filter(|s| s.can_enroll_in(subject_id))
                .map(|s| s.id)
                .collect();

            if pool.len() < threshold {
                continue;
            }
            pool.truncate(max);

            let course_id = school.open_course(subject_id, pool);
            debug!(
                "day {}: opened course {:?} for {}",
                outcome.day, course_id, school.subjects[index].description
            );
            outcome.opened.push(course_id);
        }
    }

    fn assign_instructors(&self, school: &mut School, outcome: &mut DayOutcome) {
        let waiting: Vec<(CourseId, Capability)> = school
            .courses
            .values()
            .filter(|c| c.needs_instructor())
            .filter_map(|c| {
                school
                    .subject(c.subject)
                    .map(|s| (c.id, s.required_capability))
            })
            .collect();

        for (course_id, capability) in waiting {
            let Some(instructor_id) = school
                .idle_instructors()
                .find(|i| i.can_teach(capability))
                .map(|i| i.id)
            else {
                continue;
            };

            let begun = school
                .courses
                .get_mut(&course_id)
                .is_some_and(|c| c.begin(instructor_id));
            if !begun {
                continue;
            }
            if let Some(instructor) = school.instructors.get_mut(&instructor_id) {
                instructor.assigned_course = Some(course_id);
                debug!(
                    "day {}: {} assigned to course {:?}",
                    outcome.day, instructor.profile.name, course_id
                );
            }
            outcome.assigned.push((course_id, instructor_id));
        }
    }

    fn teach(&self, school: &mut School) {
        for course in school.courses.values_mut() {
            course.advance();
        }
    }

    fn complete_courses(&self, school: &mut School, outcome: &mut DayOutcome) {
        let due: Vec<CourseId> = school
            .courses
            .values()
            .filter(|c| {
                school
                    .subject(c.subject)
                    .is_some_and(|s| c.is_due(s.duration_days))
            })
            .map(|c| c.id)
            .collect();

        for course_id in due {
            let Some(mut course) = school.courses.remove(&course_id) else {
                continue;
            };
            course.complete();
            school.detach_course(&course);

            for student_id in &course.students {
                if let Some(student) = school.students.get_mut(student_id) {
                    student.award_certificate(course.subject);
                }
            }

            debug!(
                "day {}: course {:?} completed, {} certificates issued",
                outcome.day,
                course_id,
                course.size()
            );
            outcome.completed.push(CompletedCourse {
                course: course.id,
                subject: course.subject,
                students: course.students,
                instructor: course.instructor,
            });
        }
    }

    fn graduate(&self, school: &mut School, outcome: &mut DayOutcome) {
        let catalog: Vec<SubjectId> = school.subject_ids().copied().collect();
        let limit = self.graduation_policy.limit().unwrap_or(usize::MAX);

        let eligible: Vec<StudentId> = school
            .students
            .values()
            .filter(|s| s.holds_all(&catalog))
            .map(|s| s.id)
            .take(limit)
            .collect();

        for student_id in eligible {
            if let Some(graduate) = school.promote(student_id, outcome.day) {
                info!("day {}: {} graduated", outcome.day, graduate.name());
                outcome.graduated.push(graduate.name().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseStatus, Gender, Profile, Specialization, Subject};
    use crate::validation::check_invariants;

    fn person(name: &str) -> Profile {
        Profile::new(name, Gender::Male, 20)
    }

    fn maths_school() -> School {
        let mut school = School::new("Test");
        school.add_subject(Subject::new("Math").with_class_size(1, 2).with_duration(2));
        school.add_student(person("A"));
        school.add_student(person("B"));
        school.add_instructor(person("T"), Specialization::Teacher);
        school
    }

    #[test]
    fn test_two_day_course_lifecycle() {
        let mut school = maths_school();
        let scheduler = DailyScheduler::new();

        // Day 1: course opens, teacher assigned, one day taught
        let day1 = scheduler.advance(&mut school, 1);
        assert_eq!(day1.opened.len(), 1);
        assert_eq!(day1.assigned.len(), 1);
        assert!(day1.completed.is_empty());

        let course = school.courses().next().unwrap();
        assert_eq!(course.status(), CourseStatus::InProgress);
        assert_eq!(course.elapsed_days(), 1);
        assert_eq!(course.students, vec![StudentId(0), StudentId(1)]);
        assert_eq!(course.instructor, Some(InstructorId(0)));
        assert!(check_invariants(&school).is_ok());

        // Day 2: course completes, certificates issued, everybody idle
        let day2 = scheduler.advance(&mut school, 2);
        assert_eq!(day2.completed.len(), 1);
        assert_eq!(school.course_count(), 0);

        // Single-subject catalog: both students graduate the same day
        assert_eq!(day2.graduated, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(school.student_count(), 0);
        assert!(school.graduates().iter().all(|g| g.graduation_day() == 2));
        assert!(school.graduates()[0].certificates().contains(&SubjectId(0)));
        assert!(school.instructor(InstructorId(0)).unwrap().is_idle());
        assert!(check_invariants(&school).is_ok());
    }

    #[test]
    fn test_certificates_without_graduation() {
        let mut school = maths_school();
        school.add_subject(Subject::new("Art").with_class_size(5, 6));
        let scheduler = DailyScheduler::new();

        scheduler.advance(&mut school, 1);
        scheduler.advance(&mut school, 2);

        for student in school.students() {
            assert!(student.has_certificate(SubjectId(0)));
            assert!(!student.has_certificate(SubjectId(1)));
            assert!(student.is_idle());
        }
        assert!(school.graduates().is_empty());

        // Certified students are never re-enrolled in Math
        scheduler.advance(&mut school, 3);
        assert!(school.course_for_subject(SubjectId(0)).is_none());
    }

    #[test]
    fn test_no_matching_instructor_waits() {
        let mut school = School::new("Test");
        school.add_subject(
            Subject::new("GUI")
                .with_capability(Capability::Gui)
                .with_class_size(1, 3)
                .with_duration(1),
        );
        school.add_student(person("A"));
        school.add_instructor(person("T"), Specialization::Teacher);
        let scheduler = DailyScheduler::new();

        for day in 1..=5 {
            scheduler.advance(&mut school, day);
        }
        let course = school.courses().next().unwrap();
        assert_eq!(course.status(), CourseStatus::AwaitingInstructor);
        assert_eq!(course.elapsed_days(), 0);
        assert!(school.instructor(InstructorId(0)).unwrap().is_idle());

        // A matching instructor arrives and the course starts that day
        let g = school.add_instructor(person("G"), Specialization::GuiTrainer);
        let outcome = scheduler.advance(&mut school, 6);
        assert_eq!(outcome.assigned, vec![(CourseId(0), g)]);
        assert_eq!(outcome.completed.len(), 1);
        assert_eq!(school.graduates().len(), 1);
    }

    #[test]
    fn test_pool_below_minimum_does_not_open() {
        let mut school = School::new("Test");
        school.add_subject(
            Subject::new("Seminar")
                .with_class_size(3, 4)
                .with_duration(2),
        );
        school.add_student(person("A"));
        school.add_student(person("B"));
        school.add_instructor(person("T"), Specialization::Teacher);

        let outcome = DailyScheduler::new().advance(&mut school, 1);
        assert!(outcome.is_quiet());
        assert_eq!(school.course_count(), 0);

        school.add_student(person("C"));
        let outcome = DailyScheduler::new().advance(&mut school, 2);
        assert_eq!(outcome.opened.len(), 1);
        assert_eq!(school.courses().next().unwrap().size(), 3);
    }

    #[test]
    fn test_enrollment_capped_at_max_in_registry_order() {
        let mut school = School::new("Test");
        school.add_subject(Subject::new("Math").with_class_size(1, 2).with_duration(3));
        for name in ["A", "B", "C", "D"] {
            school.add_student(person(name));
        }
        school.add_instructor(person("T"), Specialization::Teacher);

        DailyScheduler::new().advance(&mut school, 1);
        let course = school.courses().next().unwrap();
        assert_eq!(course.students, vec![StudentId(0), StudentId(1)]);
        assert!(school.student(StudentId(2)).unwrap().is_idle());
        // Only one course per subject at a time
        assert_eq!(school.course_count(), 1);
    }

    #[test]
    fn test_student_enrolls_in_one_course_per_day() {
        let mut school = School::new("Test");
        school.add_subject(Subject::new("Math").with_class_size(1, 3).with_duration(2));
        school.add_subject(Subject::new("Physics").with_class_size(1, 3).with_duration(2));
        school.add_student(person("A"));
        school.add_instructor(person("T1"), Specialization::Teacher);
        school.add_instructor(person("T2"), Specialization::Teacher);

        let outcome = DailyScheduler::new().advance(&mut school, 1);
        // A joins Math; Physics has no idle students left
        assert_eq!(outcome.opened.len(), 1);
        assert_eq!(school.courses().next().unwrap().subject, SubjectId(0));
    }

    #[test]
    fn test_instructor_first_match_in_registry_order() {
        let mut school = School::new("Test");
        school.add_subject(
            Subject::new("Lab")
                .with_capability(Capability::Demonstrating)
                .with_class_size(1, 1),
        );
        school.add_student(person("A"));
        school.add_instructor(person("G"), Specialization::GuiTrainer);
        school.add_instructor(person("D"), Specialization::Demonstrator);

        let outcome = DailyScheduler::new().advance(&mut school, 1);
        // GUI trainers can demonstrate too, and came first
        assert_eq!(outcome.assigned, vec![(CourseId(0), InstructorId(0))]);
    }

    #[test]
    fn test_instructor_teaches_one_course_at_a_time() {
        let mut school = School::new("Test");
        school.add_subject(Subject::new("Math").with_class_size(1, 1).with_duration(3));
        school.add_subject(Subject::new("Physics").with_class_size(1, 1).with_duration(3));
        school.add_student(person("A"));
        school.add_student(person("B"));
        school.add_instructor(person("T"), Specialization::Teacher);

        DailyScheduler::new().advance(&mut school, 1);
        let statuses: Vec<_> = school.courses().map(|c| c.status()).collect();
        assert_eq!(
            statuses,
            vec![CourseStatus::InProgress, CourseStatus::AwaitingInstructor]
        );
        assert!(check_invariants(&school).is_ok());
    }

    #[test]
    fn test_freed_instructor_picks_up_waiting_course_next_day() {
        let mut school = School::new("Test");
        school.add_subject(Subject::new("Math").with_class_size(1, 1).with_duration(1));
        school.add_subject(Subject::new("Physics").with_class_size(1, 1).with_duration(1));
        school.add_student(person("A"));
        school.add_student(person("B"));
        school.add_instructor(person("T"), Specialization::Teacher);
        let scheduler = DailyScheduler::new();

        let day1 = scheduler.advance(&mut school, 1);
        assert_eq!(day1.completed.len(), 1);
        assert_eq!(school.course_count(), 1);

        let day2 = scheduler.advance(&mut school, 2);
        assert_eq!(day2.assigned, vec![(CourseId(1), InstructorId(0))]);
        assert_eq!(day2.completed.len(), 1);
    }

    #[test]
    fn test_first_eligible_policy_throttles_graduation() {
        let mut school = School::new("Test");
        school.add_subject(Subject::new("Math").with_class_size(1, 3).with_duration(1));
        for name in ["A", "B", "C"] {
            school.add_student(person(name));
        }
        school.add_instructor(person("T"), Specialization::Teacher);
        let scheduler =
            DailyScheduler::new().with_graduation_policy(GraduationPolicy::FirstEligible);

        let day1 = scheduler.advance(&mut school, 1);
        assert_eq!(day1.graduated, vec!["A".to_string()]);
        assert_eq!(school.student_count(), 2);

        let day2 = scheduler.advance(&mut school, 2);
        assert_eq!(day2.graduated, vec!["B".to_string()]);
        // Certified students are not re-enrolled while they wait
        assert!(day2.opened.is_empty());

        scheduler.advance(&mut school, 3);
        let days: Vec<_> = school.graduates().iter().map(|g| g.graduation_day()).collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_catalog_never_graduates() {
        let mut school = School::new("Test");
        school.add_student(person("A"));
        let outcome = DailyScheduler::new().advance(&mut school, 1);
        assert!(outcome.is_quiet());
        assert_eq!(school.student_count(), 1);
        assert!(school.graduates().is_empty());
    }

    #[test]
    fn test_idle_people_untouched() {
        let mut school = School::new("Test");
        school.add_subject(
            Subject::new("OO")
                .with_capability(Capability::ObjectOriented)
                .with_class_size(2, 2),
        );
        school.add_student(person("A"));
        school.add_instructor(person("T"), Specialization::Teacher);
        let before_student = school.student(StudentId(0)).unwrap().clone();

        for day in 1..=3 {
            let outcome = DailyScheduler::new().advance(&mut school, day);
            assert!(outcome.is_quiet());
        }
        let after = school.student(StudentId(0)).unwrap();
        assert_eq!(after.certificates, before_student.certificates);
        assert!(after.is_idle());
        assert!(school.instructor(InstructorId(0)).unwrap().is_idle());
    }

    #[test]
    fn test_stalled_course_resumes_with_replacement() {
        let mut school = maths_school();
        let scheduler = DailyScheduler::new();
        scheduler.advance(&mut school, 1);
        school.remove_instructor(InstructorId(0));

        scheduler.advance(&mut school, 2);
        let course = school.courses().next().unwrap();
        assert_eq!(course.elapsed_days(), 1);

        school.add_instructor(person("R"), Specialization::OoTrainer);
        let outcome = scheduler.advance(&mut school, 3);
        assert_eq!(outcome.completed.len(), 1);
        assert_eq!(outcome.graduated.len(), 2);
    }
}

//! Per-day status text.

use std::fmt;

use crate::models::{School, SubjectId};

/// Status block for one simulated day.
///
/// ```text
/// Day 3:
/// Course (Programming) : IN_PROGRESS [Alice, Bob]
/// Student (Alice) : [Programming] Programming
/// Student (Carl) : [] No course
/// Instructor (Ross) : Programming
/// Brunel: 3 students, 1 instructors, 1 courses, 0 graduates
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DayStatus<'a> {
    day: u32,
    school: &'a School,
}

impl<'a> DayStatus<'a> {
    /// Captures the status of `school` after `day`.
    pub fn new(day: u32, school: &'a School) -> Self {
        Self { day, school }
    }

    fn description(&self, subject: SubjectId) -> &'a str {
        self.school
            .subject(subject)
            .map(|s| s.description.as_str())
            .unwrap_or("?")
    }
}

impl fmt::Display for DayStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let school = self.school;
        writeln!(f, "Day {}:", self.day)?;

        for course in school.courses() {
            let names: Vec<&str> = course
                .students
                .iter()
                .filter_map(|id| school.student(*id))
                .map(|s| s.name())
                .collect();
            writeln!(
                f,
                "Course ({}) : {} [{}]",
                self.description(course.subject),
                course.status(),
                names.join(", ")
            )?;
        }

        for student in school.students() {
            let certificates: Vec<&str> = student
                .certificates
                .iter()
                .map(|id| self.description(*id))
                .collect();
            let current = school
                .enrolled_subject(student)
                .map(|s| s.description.as_str())
                .unwrap_or("No course");
            writeln!(
                f,
                "Student ({}) : [{}] {}",
                student.name(),
                certificates.join(", "),
                current
            )?;
        }

        for instructor in school.instructors() {
            let current = school
                .assigned_subject(instructor)
                .map(|s| s.description.as_str())
                .unwrap_or("No course");
            writeln!(f, "Instructor ({}) : {}", instructor.name(), current)?;
        }

        write!(f, "{school}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Profile, Specialization, Subject};

    #[test]
    fn test_day_status_text() {
        let mut school = School::new("Brunel");
        school.add_subject(Subject::new("Maths").with_class_size(1, 1).with_duration(1));
        school.add_subject(Subject::new("Physics").with_class_size(1, 2).with_duration(4));
        school.add_student(Profile::new("Alice", Gender::Female, 19));
        school.add_student(Profile::new("Bob", Gender::Male, 20));
        school.add_instructor(
            Profile::new("Ross", Gender::Male, 32),
            Specialization::Teacher,
        );
        school.add_instructor(
            Profile::new("Rachael", Gender::Female, 30),
            Specialization::Demonstrator,
        );
        school.advance_one_day(1);

        let text = DayStatus::new(1, &school).to_string();
        let expected = "\
Day 1:
Course (Physics) : AWAITING_INSTRUCTOR [Bob]
Student (Alice) : [Maths] No course
Student (Bob) : [] Physics
Instructor (Ross) : No course
Instructor (Rachael) : No course
Brunel: 2 students, 2 instructors, 1 courses, 0 graduates";
        assert_eq!(text, expected);
    }
}

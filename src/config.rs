//! Initial school configuration.
//!
//! Reads the line-oriented `tag:value` format that seeds a simulation:
//!
//! ```text
//! school:Brunel
//! subject:Programming,1,3,5,1
//! student:Alice,F,19
//! Teacher:Ross,M,32
//! Demonstrator:Rachel,F,30
//! OOTrainer:Monica,F,28
//! GUITrainer:Chandler,M,29
//! ```
//!
//! - `subject:description,minSize,maxSize,duration[,capability]`, where the
//!   capability is a code `1..=4` or a name and defaults to teaching.
//! - `student` and the four instructor tags take `name,gender,age`.
//! - Blank lines and lines starting with `#` are ignored.
//!
//! A malformed line is reported as a [`LineError`] and skipped; only I/O
//! failures and an invalid catalog abort loading.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::models::{Capability, Gender, Profile, School, Specialization, Subject};
use crate::validation::{validate_catalog, ValidationError};

/// Default school name when the file has no `school:` header.
pub const DEFAULT_SCHOOL_NAME: &str = "School";

/// Errors that abort loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The subjects parsed into an unusable catalog.
    #[error("invalid catalog: {}", join_messages(.0))]
    InvalidCatalog(Vec<ValidationError>),
}

/// Alias for Result with `ConfigError`
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A config line that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// No `:` separating tag and value.
    #[error("line {line}: missing ':' separator")]
    MissingSeparator { line: usize },

    /// Tag is not one of the known object kinds.
    #[error("line {line}: unknown object '{tag}'")]
    UnknownTag { line: usize, tag: String },

    /// Wrong number of comma-separated fields.
    #[error("line {line}: '{tag}' expects {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        tag: String,
        expected: &'static str,
        found: usize,
    },

    /// A numeric field did not parse.
    #[error("line {line}: '{value}' is not a valid {field}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Gender was not `M` or `F`.
    #[error("line {line}: unknown gender '{value}'")]
    InvalidGender { line: usize, value: String },

    /// Capability was not a known code or name.
    #[error("line {line}: unknown capability '{value}'")]
    InvalidCapability { line: usize, value: String },
}

/// A parsed configuration.
#[derive(Debug)]
pub struct LoadedSchool {
    /// The populated school.
    pub school: School,
    /// Lines that were skipped, in file order.
    pub skipped: Vec<LineError>,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reads and parses a config file.
pub fn load_school(path: impl AsRef<Path>) -> Result<LoadedSchool> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_school(&text)
}

/// Parses config text.
///
/// Skipped lines are logged at `warn` and returned in
/// [`LoadedSchool::skipped`].
pub fn parse_school(text: &str) -> Result<LoadedSchool> {
    let mut name: Option<String> = None;
    let mut subjects = Vec::new();
    let mut people = Vec::new();
    let mut skipped = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_line(line, trimmed) {
            Ok(Entry::School(value)) => {
                if name.is_none() {
                    name = Some(value);
                }
            }
            Ok(Entry::Subject(subject)) => subjects.push(subject),
            Ok(Entry::Person(profile, role)) => people.push((profile, role)),
            Err(err) => {
                warn!("skipping config {err}");
                skipped.push(err);
            }
        }
    }

    validate_catalog(&subjects).map_err(ConfigError::InvalidCatalog)?;

    let mut school = School::new(name.unwrap_or_else(|| DEFAULT_SCHOOL_NAME.to_string()));
    for subject in subjects {
        school.add_subject(subject);
    }
    for (profile, role) in people {
        match role {
            None => {
                school.add_student(profile);
            }
            Some(specialization) => {
                school.add_instructor(profile, specialization);
            }
        }
    }

    Ok(LoadedSchool { school, skipped })
}

enum Entry {
    School(String),
    Subject(Subject),
    /// `None` = student.
    Person(Profile, Option<Specialization>),
}

fn parse_line(line: usize, text: &str) -> std::result::Result<Entry, LineError> {
    let (tag, value) = text
        .split_once(':')
        .ok_or(LineError::MissingSeparator { line })?;
    let tag = tag.trim();
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();

    match tag {
        "school" => Ok(Entry::School(value.trim().to_string())),
        "subject" => parse_subject(line, &fields).map(Entry::Subject),
        "student" => parse_profile(line, tag, &fields).map(|p| Entry::Person(p, None)),
        _ => match Specialization::from_tag(tag) {
            Some(spec) => parse_profile(line, tag, &fields).map(|p| Entry::Person(p, Some(spec))),
            None => Err(LineError::UnknownTag {
                line,
                tag: tag.to_string(),
            }),
        },
    }
}

fn parse_subject(line: usize, fields: &[&str]) -> std::result::Result<Subject, LineError> {
    if !(4..=5).contains(&fields.len()) {
        return Err(LineError::FieldCount {
            line,
            tag: "subject".to_string(),
            expected: "4 or 5",
            found: fields.len(),
        });
    }

    let min: usize = parse_number(line, "minimum class size", fields[1])?;
    let max: usize = parse_number(line, "maximum class size", fields[2])?;
    let duration: u32 = parse_number(line, "duration", fields[3])?;
    let capability = match fields.get(4) {
        Some(value) => Capability::parse(value).ok_or_else(|| LineError::InvalidCapability {
            line,
            value: value.to_string(),
        })?,
        None => Capability::Teaching,
    };

    Ok(Subject::new(fields[0])
        .with_class_size(min, max)
        .with_duration(duration)
        .with_capability(capability))
}

fn parse_profile(
    line: usize,
    tag: &str,
    fields: &[&str],
) -> std::result::Result<Profile, LineError> {
    if fields.len() != 3 {
        return Err(LineError::FieldCount {
            line,
            tag: tag.to_string(),
            expected: "3",
            found: fields.len(),
        });
    }

    let gender = Gender::parse(fields[1]).ok_or_else(|| LineError::InvalidGender {
        line,
        value: fields[1].to_string(),
    })?;
    let age: u32 = parse_number(line, "age", fields[2])?;

    Ok(Profile::new(fields[0], gender, age))
}

fn parse_number<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    value: &str,
) -> std::result::Result<T, LineError> {
    value.parse().map_err(|_| LineError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    const SAMPLE: &str = "\
school:Brunel
subject:Programming,1,3,5,1
subject:GUI Design,2,4,3,gui
student:Alice,F,19
student:Bob,M,20
Teacher:Ross,M,32
GUITrainer:Chandler,M,29
";

    #[test]
    fn test_parse_sample() {
        let loaded = parse_school(SAMPLE).unwrap();
        let school = loaded.school;
        assert!(loaded.skipped.is_empty());

        assert_eq!(school.name(), "Brunel");
        assert_eq!(school.subjects().len(), 2);
        let gui = school.subject_named("GUI Design").unwrap();
        assert_eq!(gui.required_capability, Capability::Gui);
        assert_eq!((gui.min_class_size, gui.max_class_size), (2, 4));
        assert_eq!(gui.duration_days, 3);

        let students: Vec<_> = school.students().map(|s| s.name().to_string()).collect();
        assert_eq!(students, vec!["Alice", "Bob"]);
        let kinds: Vec<_> = school.instructors().map(|i| i.specialization).collect();
        assert_eq!(
            kinds,
            vec![Specialization::Teacher, Specialization::GuiTrainer]
        );
    }

    #[test]
    fn test_default_name_and_capability() {
        let loaded = parse_school("subject:Maths,1,2,3\n").unwrap();
        assert_eq!(loaded.school.name(), DEFAULT_SCHOOL_NAME);
        assert_eq!(
            loaded.school.subjects()[0].required_capability,
            Capability::Teaching
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# staff\n\n  Teacher:Ross,M,32  \n";
        let loaded = parse_school(text).unwrap();
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.school.instructor_count(), 1);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = "\
school:Test
nonsense
janitor:Willie,M,50
student:Alice,F
student:Bob,X,20
student:Carl,M,old
subject:Maths,1,2,3,9
student:Dana,F,22
";
        let loaded = parse_school(text).unwrap();
        assert_eq!(loaded.school.student_count(), 1);
        assert_eq!(loaded.skipped.len(), 6);
        assert_eq!(loaded.skipped[0], LineError::MissingSeparator { line: 2 });
        assert!(matches!(
            loaded.skipped[1],
            LineError::UnknownTag { line: 3, .. }
        ));
        assert!(matches!(
            loaded.skipped[2],
            LineError::FieldCount { found: 2, .. }
        ));
        assert!(matches!(loaded.skipped[3], LineError::InvalidGender { .. }));
        assert!(matches!(
            loaded.skipped[4],
            LineError::InvalidNumber { field: "age", .. }
        ));
        assert!(matches!(
            loaded.skipped[5],
            LineError::InvalidCapability { line: 7, .. }
        ));
    }

    #[test]
    fn test_line_error_messages() {
        let err = LineError::UnknownTag {
            line: 3,
            tag: "janitor".into(),
        };
        assert_eq!(err.to_string(), "line 3: unknown object 'janitor'");
    }

    #[test]
    fn test_invalid_catalog_is_fatal() {
        let err = parse_school("subject:Maths,3,1,2\n").unwrap_err();
        match err {
            ConfigError::InvalidCatalog(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidClassSize);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_school("/nonexistent/school.txt").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/school.txt"));
    }
}

//! Subject (curriculum unit) model.
//!
//! A subject is a static descriptor of something the school can teach:
//! which instructor capability it needs, how many students a class may
//! hold, and how many days a course of it runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a subject.
///
/// Issued by the [`School`](super::School) in insertion order, so ordering
/// by id equals catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub u32);

/// Instructor capability a subject requires.
///
/// Config files refer to capabilities by code (`1..=4`) or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// General classroom teaching (code 1).
    Teaching,
    /// Practical lab demonstration (code 2).
    Demonstrating,
    /// Object-oriented programming (code 3).
    ObjectOriented,
    /// Graphical user interface development (code 4).
    Gui,
}

/// A teachable subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Catalog identifier (assigned when added to a school).
    pub id: SubjectId,
    /// Human-readable description (e.g. "Programming").
    pub description: String,
    /// Capability an instructor needs to teach this subject.
    pub required_capability: Capability,
    /// Fewest idle students needed before a course opens.
    pub min_class_size: usize,
    /// Most students a single course may enroll.
    pub max_class_size: usize,
    /// Days of instruction until the course completes.
    pub duration_days: u32,
}

impl Capability {
    /// All capabilities, in code order.
    pub const ALL: [Capability; 4] = [
        Capability::Teaching,
        Capability::Demonstrating,
        Capability::ObjectOriented,
        Capability::Gui,
    ];

    /// Numeric config code.
    pub fn code(self) -> u8 {
        match self {
            Capability::Teaching => 1,
            Capability::Demonstrating => 2,
            Capability::ObjectOriented => 3,
            Capability::Gui => 4,
        }
    }

    /// Looks up a capability by numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Parses a code (`"3"`) or a case-insensitive name (`"oo"`, `"gui"`).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(code) = value.parse::<u8>() {
            return Self::from_code(code);
        }
        match value.to_ascii_lowercase().as_str() {
            "teaching" | "teacher" => Some(Capability::Teaching),
            "demonstrating" | "demonstrator" | "lab" => Some(Capability::Demonstrating),
            "objectoriented" | "oo" => Some(Capability::ObjectOriented),
            "gui" => Some(Capability::Gui),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Teaching => "Teaching",
            Capability::Demonstrating => "Demonstrating",
            Capability::ObjectOriented => "ObjectOriented",
            Capability::Gui => "GUI",
        };
        f.write_str(name)
    }
}

impl Subject {
    /// Creates a subject requiring general teaching, class size `1..=1`,
    /// lasting one day. The id is replaced when the subject joins a school.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: SubjectId(0),
            description: description.into(),
            required_capability: Capability::Teaching,
            min_class_size: 1,
            max_class_size: 1,
            duration_days: 1,
        }
    }

    /// Sets the required instructor capability.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.required_capability = capability;
        self
    }

    /// Sets the class-size band (inclusive).
    pub fn with_class_size(mut self, min: usize, max: usize) -> Self {
        self.min_class_size = min;
        self.max_class_size = max;
        self
    }

    /// Sets the course duration in days.
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Smallest pool that opens a course. Never zero: an empty course
    /// cannot exist.
    #[inline]
    pub fn opening_threshold(&self) -> usize {
        self.min_class_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("Programming")
            .with_capability(Capability::ObjectOriented)
            .with_class_size(2, 4)
            .with_duration(5);

        assert_eq!(s.description, "Programming");
        assert_eq!(s.required_capability, Capability::ObjectOriented);
        assert_eq!(s.min_class_size, 2);
        assert_eq!(s.max_class_size, 4);
        assert_eq!(s.duration_days, 5);
        assert_eq!(s.opening_threshold(), 2);
    }

    #[test]
    fn test_opening_threshold_never_zero() {
        let s = Subject::new("Drop-in").with_class_size(0, 3);
        assert_eq!(s.opening_threshold(), 1);
    }

    #[test]
    fn test_capability_codes() {
        for cap in Capability::ALL {
            assert_eq!(Capability::from_code(cap.code()), Some(cap));
        }
        assert_eq!(Capability::from_code(0), None);
        assert_eq!(Capability::from_code(5), None);
    }

    #[test]
    fn test_capability_parse() {
        assert_eq!(Capability::parse("1"), Some(Capability::Teaching));
        assert_eq!(Capability::parse(" 4 "), Some(Capability::Gui));
        assert_eq!(Capability::parse("OO"), Some(Capability::ObjectOriented));
        assert_eq!(Capability::parse("lab"), Some(Capability::Demonstrating));
        assert_eq!(Capability::parse("cooking"), None);
        assert_eq!(Capability::parse("9"), None);
    }

    #[test]
    fn test_subject_serde() {
        let s = Subject::new("Maths").with_duration(3);
        let json = serde_json::to_string(&s).unwrap();
        let back: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(back.description, "Maths");
        assert_eq!(back.duration_days, 3);
    }
}

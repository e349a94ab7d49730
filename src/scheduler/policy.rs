//! Graduation policy.

use serde::{Deserialize, Serialize};

/// How many fully certified students are promoted per daily pass.
///
/// `FirstEligible` throttles promotion to one student per day (the first
/// in registry order), so a backlog of `n` eligible students takes `n`
/// days to clear. `AllEligible` promotes everyone in the same pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraduationPolicy {
    /// Promote every eligible student.
    #[default]
    AllEligible,
    /// Promote at most one student per pass.
    FirstEligible,
}

impl GraduationPolicy {
    /// Maximum promotions per pass (`None` = unbounded).
    pub fn limit(self) -> Option<usize> {
        match self {
            GraduationPolicy::AllEligible => None,
            GraduationPolicy::FirstEligible => Some(1),
        }
    }
}

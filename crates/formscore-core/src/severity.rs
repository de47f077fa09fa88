//! Severity definitions
//!
//! Every violation carries a severity that drives two things:
//! - Priority: the order feedback is shown in (critical first)
//! - Weight: the multiplier applied to the raw penalty when scoring
//!
//! | severity | priority | weight |
//! |----------|----------|--------|
//! | Critical | 0        | 1.5    |
//! | High     | 1        | 1.2    |
//! | Medium   | 2        | 1.0    |
//! | Low      | 3        | 0.5    |

use std::fmt;

use serde::{Deserialize, Serialize};

/// How severe a form violation is
///
/// Ordered by priority: `Critical < High < Medium < Low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Dangerous, must fix immediately
    Critical = 0,
    /// Significant form issue
    High = 1,
    /// Should improve
    Medium = 2,
    /// Minor optimization
    Low = 3,
}

impl Severity {
    /// All severities, highest priority first
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ]
    }

    /// Priority for feedback ordering (lower = shown first)
    #[inline]
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Multiplier applied to a violation's raw penalty
    pub fn weight(self) -> f64 {
        match self {
            Severity::Critical => 1.5,
            Severity::High => 1.2,
            Severity::Medium => 1.0,
            Severity::Low => 0.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_priority_ordering() {
        assert!(Severity::Critical.priority() < Severity::High.priority());
        assert!(Severity::High.priority() < Severity::Medium.priority());
        assert!(Severity::Medium.priority() < Severity::Low.priority());
        assert_eq!(Severity::Low.priority(), 3);
    }

    #[test]
    fn test_severity_weights() {
        assert_eq!(Severity::Critical.weight(), 1.5);
        assert_eq!(Severity::High.weight(), 1.2);
        assert_eq!(Severity::Medium.weight(), 1.0);
        assert_eq!(Severity::Low.weight(), 0.5);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");

        let back: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(back, Severity::Medium);
    }

    #[test]
    fn test_all_is_priority_sorted() {
        let all = Severity::all();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].priority() < w[1].priority()));
    }

    #[test]
    fn test_ord_follows_priority() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::Medium < Severity::Low);

        let mut shuffled = vec![Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        shuffled.sort();
        assert_eq!(shuffled, Severity::all());
        assert_eq!(Severity::all().iter().max(), Some(&Severity::Low));
    }
}

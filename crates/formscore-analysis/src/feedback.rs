//! Feedback prioritization
//!
//! Failed violations are shown most severe first. Equal severities keep the
//! order the rule engine produced them in, which is rule priority order.

use formscore_core::{Severity, Violation};
use serde::Serialize;

pub use formscore_core::MAX_FEEDBACK_ITEMS;

/// Maximum positive feedback items shown
pub const MAX_POSITIVE_ITEMS: usize = 3;

/// Summary used whenever a critical violation failed
pub const CRITICAL_SUMMARY: &str = "Critical safety issues detected - address immediately";

/// Top `max_items` failed feedback messages, most severe first
pub fn generate_feedback(violations: &[Violation], max_items: usize) -> Vec<String> {
    let mut failed: Vec<&Violation> = violations.iter().filter(|v| v.failed()).collect();

    // Stable: ties stay in emission order
    failed.sort_by_key(|v| v.severity().priority());

    failed
        .into_iter()
        .take(max_items)
        .map(|v| v.feedback().to_string())
        .collect()
}

/// One-line overall message
pub fn generate_summary(violations: &[Violation], score: u8) -> &'static str {
    if violations.iter().any(Violation::is_critical_failure) {
        return CRITICAL_SUMMARY;
    }

    match score {
        90.. => "Excellent form! Keep it up.",
        75..=89 => "Good form with room for improvement.",
        60..=74 => "Fair form - address the issues below.",
        _ => "Form needs significant improvement for safety.",
    }
}

/// Up to three messages from checks that passed, in emission order
pub fn generate_positive_feedback(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .filter(|v| v.passed())
        .take(MAX_POSITIVE_ITEMS)
        .map(|v| v.feedback().to_string())
        .collect()
}

/// Prefix each line with its 1-based position
pub fn format_numbered(feedback: &[String]) -> Vec<String> {
    feedback
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect()
}

/// Failed feedback grouped by urgency
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategorizedFeedback {
    /// Critical severity
    pub critical_issues: Vec<String>,
    /// High and medium severity
    pub improvements: Vec<String>,
    /// Low severity
    pub optimizations: Vec<String>,
}

impl CategorizedFeedback {
    pub fn is_empty(&self) -> bool {
        self.critical_issues.is_empty() && self.improvements.is_empty() && self.optimizations.is_empty()
    }
}

pub fn categorize_feedback(violations: &[Violation]) -> CategorizedFeedback {
    let mut categorized = CategorizedFeedback::default();

    for violation in violations.iter().filter(|v| v.failed()) {
        let bucket = match violation.severity() {
            Severity::Critical => &mut categorized.critical_issues,
            Severity::High | Severity::Medium => &mut categorized.improvements,
            Severity::Low => &mut categorized.optimizations,
        };
        bucket.push(violation.feedback().to_string());
    }

    categorized
}

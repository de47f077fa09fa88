//! Violations - the outcome of a single form check
//!
//! Despite the name, a violation also records checks that passed (for example
//! "ideal depth"), so reports can show positive feedback. Only failed
//! violations cost points.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{FormscoreError, FormscoreResult, Severity};

/// Upper bound of a raw score penalty
pub const MAX_PENALTY: u32 = 100;

/// A single form rule outcome
///
/// Immutable once built. The penalty is validated on construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    rule_name: String,
    severity: Severity,
    passed: bool,
    score_penalty: u32,
    feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, f64>>,
}

impl Violation {
    /// Create a violation, failing if the penalty is outside [0, 100]
    pub fn new(
        rule_name: impl Into<String>,
        severity: Severity,
        passed: bool,
        score_penalty: u32,
        feedback: impl Into<String>,
    ) -> FormscoreResult<Self> {
        if score_penalty > MAX_PENALTY {
            return Err(FormscoreError::PenaltyOutOfRange(score_penalty));
        }

        Ok(Self {
            rule_name: rule_name.into(),
            severity,
            passed,
            score_penalty,
            feedback: feedback.into(),
            frames: None,
            details: None,
        })
    }

    /// A passing check (no penalty)
    pub fn pass(
        rule_name: impl Into<String>,
        severity: Severity,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            severity,
            passed: true,
            score_penalty: 0,
            feedback: feedback.into(),
            frames: None,
            details: None,
        }
    }

    /// Attach the frame indices where the issue occurred
    pub fn with_frames(mut self, frames: Vec<usize>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Attach a diagnostic value
    pub fn with_detail(mut self, key: &str, value: f64) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value);
        self
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    #[inline]
    pub fn failed(&self) -> bool {
        !self.passed
    }

    pub fn score_penalty(&self) -> u32 {
        self.score_penalty
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn frames(&self) -> Option<&[usize]> {
        self.frames.as_deref()
    }

    pub fn details(&self) -> Option<&BTreeMap<String, f64>> {
        self.details.as_ref()
    }

    /// Look up one diagnostic value
    pub fn detail(&self, key: &str) -> Option<f64> {
        self.details.as_ref()?.get(key).copied()
    }

    /// Points this violation removes from the score
    pub fn weighted_penalty(&self) -> f64 {
        if self.passed {
            0.0
        } else {
            f64::from(self.score_penalty) * self.severity.weight()
        }
    }

    pub fn is_critical_failure(&self) -> bool {
        self.failed() && self.severity == Severity::Critical
    }
}

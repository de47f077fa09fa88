//! Scoring
//!
//! Start at 100, subtract `penalty × weight(severity)` for every failed
//! violation, clamp to [0, 100] and truncate toward zero.

use std::fmt;

use formscore_core::{Severity, Violation};
use serde::Serialize;

pub use formscore_core::PASSING_SCORE;

/// Overall form score (0 - 100)
pub fn calculate_score(violations: &[Violation]) -> u8 {
    let mut score = 100.0;

    for violation in violations.iter().filter(|v| v.failed()) {
        score -= violation.weighted_penalty();
    }

    score.clamp(0.0, 100.0).trunc() as u8
}

pub fn is_passing(score: u8) -> bool {
    score >= PASSING_SCORE
}

/// Letter grade view of a score
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Grade {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable description of a score
pub fn describe_score(score: u8) -> &'static str {
    match score {
        90.. => "Excellent form",
        75..=89 => "Good form",
        60..=74 => "Fair form",
        40..=59 => "Poor form - needs improvement",
        _ => "Dangerous form - high injury risk",
    }
}

/// Violation counts: failed ones by severity, passed ones together
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ViolationSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub passed: usize,
}

impl ViolationSummary {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut summary = ViolationSummary {
            total: violations.len(),
            ..Default::default()
        };

        for violation in violations {
            if violation.passed() {
                summary.passed += 1;
                continue;
            }
            match violation.severity() {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }

        summary
    }

    pub fn failed(&self) -> usize {
        self.total - self.passed
    }
}

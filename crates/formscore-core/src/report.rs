//! Form report - the terminal result of one analysis run

use serde::Serialize;

use crate::{FormscoreError, FormscoreResult, Severity, Violation};

/// Maximum score
pub const MAX_SCORE: u32 = 100;

/// Minimum passing score
pub const PASSING_SCORE: u8 = 70;

/// Maximum feedback lines in a report
pub const MAX_FEEDBACK_ITEMS: usize = 5;

/// Frame bookkeeping supplied by the angle-extraction stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameCounts {
    /// Frames read from the video
    pub frames_processed: usize,
    /// Frames where a pose was found
    pub poses_detected: usize,
}

impl FrameCounts {
    pub fn new(frames_processed: usize, poses_detected: usize) -> Self {
        Self {
            frames_processed,
            poses_detected,
        }
    }

    /// Fraction of frames with a detected pose (0.0 - 1.0)
    pub fn detection_rate(&self) -> f64 {
        if self.frames_processed == 0 {
            0.0
        } else {
            self.poses_detected as f64 / self.frames_processed as f64
        }
    }
}

/// Report metadata
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportDetails {
    /// One-line overall message
    pub summary: String,
    pub frames_processed: usize,
    pub poses_detected: usize,
}

impl ReportDetails {
    pub fn new(summary: impl Into<String>, counts: FrameCounts) -> Self {
        Self {
            summary: summary.into(),
            frames_processed: counts.frames_processed,
            poses_detected: counts.poses_detected,
        }
    }
}

/// Overall form assessment for one video
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormReport {
    score: u8,
    violations: Vec<Violation>,
    passed: bool,
    feedback_summary: Vec<String>,
    details: ReportDetails,
}

impl FormReport {
    /// Build a report.
    ///
    /// Fails if the score is outside [0, 100] or if there are more than
    /// [`MAX_FEEDBACK_ITEMS`] feedback lines. `passed` follows from the score.
    pub fn new(
        score: u32,
        violations: Vec<Violation>,
        feedback_summary: Vec<String>,
        details: ReportDetails,
    ) -> FormscoreResult<Self> {
        if score > MAX_SCORE {
            return Err(FormscoreError::ScoreOutOfRange(score));
        }
        if feedback_summary.len() > MAX_FEEDBACK_ITEMS {
            return Err(FormscoreError::TooManyFeedbackItems {
                got: feedback_summary.len(),
                max: MAX_FEEDBACK_ITEMS,
            });
        }

        let score = score as u8;
        Ok(Self {
            score,
            violations,
            passed: score >= PASSING_SCORE,
            feedback_summary,
            details,
        })
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Every rule outcome, in rule evaluation order, passed ones included
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Prioritized feedback lines
    pub fn feedback_summary(&self) -> &[String] {
        &self.feedback_summary
    }

    pub fn details(&self) -> &ReportDetails {
        &self.details
    }

    pub fn summary(&self) -> &str {
        &self.details.summary
    }

    /// Failed violations with critical severity
    pub fn critical_violations(&self) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.is_critical_failure())
            .collect()
    }

    /// All failed violations
    pub fn failed_violations(&self) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.failed()).collect()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.violations.iter().any(Violation::is_critical_failure)
    }

    /// Failed violations at a given severity
    pub fn count_failed(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.failed() && v.severity() == severity)
            .count()
    }
}

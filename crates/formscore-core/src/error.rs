//! Error types for form analysis

use thiserror::Error;

/// Core formscore errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormscoreError {
    // Invariant errors (defects in a rule implementation)
    #[error("score_penalty must be 0-100, got {0}")]
    PenaltyOutOfRange(u32),

    #[error("score must be 0-100, got {0}")]
    ScoreOutOfRange(u32),

    #[error("feedback_summary holds at most {max} items, got {got}")]
    TooManyFeedbackItems { got: usize, max: usize },

    // Signal errors
    #[error("Bilateral length mismatch: left has {left} frames, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Trim fraction must be in [0, 0.5), got {0}")]
    InvalidTrimFraction(f64),

    // Input errors
    #[error("Unknown angle name: {0}")]
    UnknownAngle(String),
}

/// Result type for formscore operations
pub type FormscoreResult<T> = Result<T, FormscoreError>;

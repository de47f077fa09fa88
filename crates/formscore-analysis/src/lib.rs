//! Formscore Analysis - From violations to a form report
//!
//! This crate implements the last stages of the pipeline:
//! - Scoring: severity-weighted deduction from 100
//! - Feedback: failed violations sorted by severity, top N messages
//! - Assembly: the immutable [`FormReport`](formscore_core::FormReport)
//!
//! Scoring and feedback read the same violation list independently.

pub mod analyzer;
pub mod feedback;
pub mod scoring;

pub use analyzer::*;
pub use feedback::*;
pub use scoring::*;

//! Formscore Core - Fundamental types for form assessment
//!
//! This crate defines the types shared by every stage of the analysis:
//! - Angle names and per-frame angle series (with gaps)
//! - Severity levels with their priority and penalty weight
//! - Violations produced by form rules
//! - The final form report
//! - Rule threshold configuration

pub mod config;
pub mod error;
pub mod report;
pub mod series;
pub mod severity;
pub mod violation;

pub use config::*;
pub use error::*;
pub use report::*;
pub use series::*;
pub use severity::*;
pub use violation::*;

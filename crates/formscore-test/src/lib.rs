//! Formscore Test Harness - Synthetic clips and capture noise
//!
//! This crate provides:
//! - Synthetic squat clips with known form faults
//! - Capture noise simulation (jitter, spikes, dropouts)
//! - End-to-end analysis scenarios

pub mod clip;
pub mod noise;
pub mod scenario;

pub use clip::*;
pub use noise::*;
pub use scenario::*;

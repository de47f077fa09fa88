//! Formscore Signal - Cleaning noisy per-frame angle signals
//!
//! Pose detectors glitch: a landmark jumps for a frame and the derived angle
//! spikes. This crate provides:
//! - Percentile trimming that turns extreme values into gaps
//! - Bilateral fusion of left/right measurements tolerant of one-sided gaps
//! - A conditioner combining both under a [`SignalConfig`](formscore_core::SignalConfig)

pub mod conditioner;

pub use conditioner::*;

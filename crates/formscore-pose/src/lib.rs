//! Formscore Pose - From detected landmarks to angle series
//!
//! This is NOT a pose estimator. A detector upstream finds body landmarks in
//! each video frame; this crate turns them into the named joint angle series
//! the form rules consume.
//!
//! # Flow
//!
//! Landmarks (per frame) → joint angles (per frame) → angle series (per angle)

pub mod angles;
pub mod frames;
pub mod landmark;

pub use angles::*;
pub use frames::*;
pub use landmark::*;

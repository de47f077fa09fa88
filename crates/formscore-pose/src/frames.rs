//! Per-frame angle rows and their conversion into per-angle series

use std::collections::BTreeMap;

use formscore_core::{AngleName, AngleSeries, AngleSet, FrameCounts};
use tracing::debug;

use crate::{joint_angle, PoseLandmarks};

/// Visibility commonly required before trusting a landmark
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.7;

/// Angles measured in one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameAngles {
    /// 1-based frame number within the processed video
    pub frame: usize,
    /// `None` where the landmarks were not visible enough
    pub angles: BTreeMap<AngleName, Option<f64>>,
}

impl FrameAngles {
    pub fn new(frame: usize) -> Self {
        Self {
            frame,
            angles: BTreeMap::new(),
        }
    }

    /// Measure every named angle from a detected pose
    pub fn from_landmarks(frame: usize, pose: &PoseLandmarks, min_visibility: f32) -> Self {
        let angles = AngleName::all()
            .iter()
            .map(|&name| (name, joint_angle(pose, name, min_visibility)))
            .collect();

        Self { frame, angles }
    }

    pub fn with(mut self, name: AngleName, value: Option<f64>) -> Self {
        self.angles.insert(name, value);
        self
    }

    pub fn get(&self, name: AngleName) -> Option<f64> {
        self.angles.get(&name).copied().flatten()
    }
}

/// Pivot per-frame rows into per-angle series.
///
/// The angle names of the first row decide which series exist. A row lacking
/// one of those names contributes a gap.
pub fn transform_angles(rows: &[FrameAngles]) -> AngleSet {
    let Some(first) = rows.first() else {
        return AngleSet::new();
    };

    let mut set = AngleSet::new();
    for &name in first.angles.keys() {
        let series: AngleSeries = rows.iter().map(|row| row.get(name)).collect();
        set.insert(name, series);
    }
    set
}

/// Collects angle rows while frames are processed
#[derive(Debug, Clone)]
pub struct AngleRecorder {
    min_visibility: f32,
    rows: Vec<FrameAngles>,
    counts: FrameCounts,
}

impl AngleRecorder {
    pub fn new(min_visibility: f32) -> Self {
        Self {
            min_visibility,
            rows: Vec::new(),
            counts: FrameCounts::default(),
        }
    }

    /// Record one processed frame. `None` means no pose was detected.
    pub fn record(&mut self, pose: Option<&PoseLandmarks>) {
        self.counts.frames_processed += 1;

        let Some(pose) = pose else {
            return;
        };

        self.counts.poses_detected += 1;
        self.rows.push(FrameAngles::from_landmarks(
            self.counts.frames_processed,
            pose,
            self.min_visibility,
        ));
    }

    /// Record a row measured elsewhere
    pub fn record_angles(&mut self, angles: BTreeMap<AngleName, Option<f64>>) {
        self.counts.frames_processed += 1;
        self.counts.poses_detected += 1;
        self.rows.push(FrameAngles {
            frame: self.counts.frames_processed,
            angles,
        });
    }

    pub fn rows(&self) -> &[FrameAngles] {
        &self.rows
    }

    pub fn counts(&self) -> FrameCounts {
        self.counts
    }

    /// Finish recording
    pub fn finish(self) -> (AngleSet, FrameCounts) {
        let set = transform_angles(&self.rows);
        debug!(
            frames = self.counts.frames_processed,
            poses = self.counts.poses_detected,
            angles = set.len(),
            "angle recording finished"
        );
        (set, self.counts)
    }
}

impl Default for AngleRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VISIBILITY)
    }
}

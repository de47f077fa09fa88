//! Synthetic squat clips
//!
//! Generates the joint angles of an idealized squat: every rep descends from
//! standing to the bottom position and back along a cosine curve.

use std::f64::consts::PI;

use formscore_core::{AngleName, AngleSet, FrameCounts};
use formscore_pose::{transform_angles, AngleRecorder, FrameAngles};

/// Joint angles at the top and bottom of a rep, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepProfile {
    pub standing_knee: f64,
    pub bottom_knee: f64,
    pub standing_hip: f64,
    pub bottom_hip: f64,
    pub standing_back: f64,
    pub bottom_back: f64,
}

impl RepProfile {
    /// Thighs parallel, neutral spine
    pub fn parallel() -> Self {
        RepProfile {
            standing_knee: 170.0,
            bottom_knee: 80.0,
            standing_hip: 170.0,
            bottom_hip: 85.0,
            standing_back: 175.0,
            bottom_back: 160.0,
        }
    }

    /// Quarter squat
    pub fn shallow() -> Self {
        RepProfile {
            standing_knee: 170.0,
            bottom_knee: 125.0,
            standing_hip: 170.0,
            bottom_hip: 120.0,
            standing_back: 175.0,
            bottom_back: 168.0,
        }
    }

    /// Squatting past hip mobility: the pelvis tucks and the back angle collapses
    pub fn butt_wink() -> Self {
        RepProfile {
            standing_knee: 170.0,
            bottom_knee: 55.0,
            standing_hip: 170.0,
            bottom_hip: 45.0,
            standing_back: 175.0,
            bottom_back: 125.0,
        }
    }

    /// Angles at a given depth (0.0 standing, 1.0 bottom)
    fn at(&self, depth: f64) -> [f64; 3] {
        [
            (self.standing_knee, self.bottom_knee),
            (self.standing_hip, self.bottom_hip),
            (self.standing_back, self.bottom_back),
        ]
        .map(|(top, bottom)| top + (bottom - top) * depth)
    }
}

/// A clip of one or more identical reps
#[derive(Clone, Debug)]
pub struct SquatClip {
    profile: RepProfile,
    frames_per_rep: usize,
    reps: usize,
    /// Right side minus left side, in degrees
    asymmetry: f64,
}

impl SquatClip {
    pub fn new(profile: RepProfile) -> Self {
        SquatClip {
            profile,
            frames_per_rep: 30,
            reps: 1,
            asymmetry: 0.0,
        }
    }

    pub fn with_frames_per_rep(mut self, frames: usize) -> Self {
        self.frames_per_rep = frames.max(2);
        self
    }

    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    pub fn with_asymmetry(mut self, degrees: f64) -> Self {
        self.asymmetry = degrees;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames_per_rep * self.reps
    }

    /// Depth at a frame: 0.0 standing, 1.0 at the bottom
    pub fn depth_at(&self, frame: usize) -> f64 {
        let phase = (frame % self.frames_per_rep) as f64 / (self.frames_per_rep - 1) as f64;
        (1.0 - (2.0 * PI * phase).cos()) / 2.0
    }

    /// Angle row for one frame (0-based)
    pub fn angles_at(&self, frame: usize) -> FrameAngles {
        let [knee, hip, back] = self.profile.at(self.depth_at(frame));
        let right = |value: f64| Some(value + self.asymmetry);

        FrameAngles::new(frame + 1)
            .with(AngleName::KneeLeft, Some(knee))
            .with(AngleName::KneeRight, right(knee))
            .with(AngleName::HipLeft, Some(hip))
            .with(AngleName::HipRight, right(hip))
            .with(AngleName::BackLeft, Some(back))
            .with(AngleName::BackRight, right(back))
    }

    pub fn rows(&self) -> Vec<FrameAngles> {
        (0..self.frame_count()).map(|f| self.angles_at(f)).collect()
    }

    /// Per-angle series for the whole clip
    pub fn angle_set(&self) -> AngleSet {
        transform_angles(&self.rows())
    }

    pub fn counts(&self) -> FrameCounts {
        FrameCounts::new(self.frame_count(), self.frame_count())
    }

    /// A recorder that has seen every frame of the clip
    pub fn recorder(&self) -> AngleRecorder {
        let mut recorder = AngleRecorder::default();
        for row in self.rows() {
            recorder.record_angles(row.angles);
        }
        recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_starts_and_ends_standing() {
        let clip = SquatClip::new(RepProfile::parallel()).with_frames_per_rep(21);

        assert!(clip.depth_at(0).abs() < 1e-9);
        assert!((clip.depth_at(10) - 1.0).abs() < 1e-9);
        assert!(clip.depth_at(20).abs() < 1e-9);

        let bottom = clip.angles_at(10);
        assert!((bottom.get(AngleName::KneeLeft).unwrap() - 80.0).abs() < 1e-9);
        assert_eq!(bottom.frame, 11);
    }

    #[test]
    fn test_angle_set_shape() {
        let clip = SquatClip::new(RepProfile::shallow()).with_reps(3);
        let set = clip.angle_set();

        assert_eq!(set.len(), 6);
        assert_eq!(set.frame_count(), 90);
        assert_eq!(clip.counts(), FrameCounts::new(90, 90));
    }

    #[test]
    fn test_asymmetry_applies_to_right_side() {
        let clip = SquatClip::new(RepProfile::parallel()).with_asymmetry(6.0);
        let row = clip.angles_at(5);

        let left = row.get(AngleName::HipLeft).unwrap();
        let right = row.get(AngleName::HipRight).unwrap();
        assert!((right - left - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_recorder_matches_angle_set() {
        let clip = SquatClip::new(RepProfile::butt_wink());
        let (set, counts) = clip.recorder().finish();

        assert_eq!(set, clip.angle_set());
        assert_eq!(counts, clip.counts());
    }
}

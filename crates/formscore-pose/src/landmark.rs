//! Landmarks - body points reported by the pose detector
//!
//! Indices follow the 33-point BlazePose topology.

/// Number of landmarks in a full detection
pub const LANDMARK_COUNT: usize = 33;

/// Body landmarks used for joint angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLandmark {
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyLandmark {
    /// All used landmarks in index order
    pub fn all() -> &'static [BodyLandmark] {
        &[
            BodyLandmark::LeftShoulder,
            BodyLandmark::RightShoulder,
            BodyLandmark::LeftHip,
            BodyLandmark::RightHip,
            BodyLandmark::LeftKnee,
            BodyLandmark::RightKnee,
            BodyLandmark::LeftAnkle,
            BodyLandmark::RightAnkle,
        ]
    }

    /// Position in the detector output
    pub fn index(self) -> usize {
        match self {
            BodyLandmark::LeftShoulder => 11,
            BodyLandmark::RightShoulder => 12,
            BodyLandmark::LeftHip => 23,
            BodyLandmark::RightHip => 24,
            BodyLandmark::LeftKnee => 25,
            BodyLandmark::RightKnee => 26,
            BodyLandmark::LeftAnkle => 27,
            BodyLandmark::RightAnkle => 28,
        }
    }
}

/// 3D position (normalized image coordinates, z relative to hips)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector from `origin` to this point, widened to f64
    pub fn relative_to(&self, origin: &Position3D) -> [f64; 3] {
        [
            f64::from(self.x) - f64::from(origin.x),
            f64::from(self.y) - f64::from(origin.y),
            f64::from(self.z) - f64::from(origin.z),
        ]
    }
}

/// A detected landmark with its visibility score (0.0 - 1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub position: Position3D,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            position: Position3D::new(x, y, z),
            visibility,
        }
    }

    pub fn is_visible(&self, min_visibility: f32) -> bool {
        self.visibility >= min_visibility
    }
}

/// All landmarks of one detected pose
#[derive(Debug, Clone, Default)]
pub struct PoseLandmarks {
    landmarks: Vec<Landmark>,
}

impl PoseLandmarks {
    /// Wrap detector output. A short list simply leaves later landmarks unavailable.
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, landmark: BodyLandmark) -> Option<&Landmark> {
        self.landmarks.get(landmark.index())
    }

    /// Set a landmark, growing the list if needed
    pub fn set(&mut self, landmark: BodyLandmark, value: Landmark) {
        let idx = landmark.index();
        if idx >= self.landmarks.len() {
            self.landmarks.resize(idx + 1, Landmark::default());
        }
        self.landmarks[idx] = value;
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices_within_layout() {
        for lm in BodyLandmark::all() {
            assert!(lm.index() < LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_set_grows_list() {
        let mut pose = PoseLandmarks::default();
        assert!(pose.get(BodyLandmark::LeftKnee).is_none());

        pose.set(BodyLandmark::LeftKnee, Landmark::new(0.5, 0.5, 0.0, 0.9));
        assert_eq!(pose.len(), 26);
        assert_eq!(pose.get(BodyLandmark::LeftKnee).unwrap().visibility, 0.9);
        // Filled slots are invisible
        assert!(!pose.get(BodyLandmark::LeftHip).unwrap().is_visible(0.5));
    }
}

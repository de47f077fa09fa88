//! Joint angles from landmark triplets

use formscore_core::AngleName;

use crate::{BodyLandmark, PoseLandmarks, Position3D};

/// Angle at `b` formed by the segments b→a and b→c, in degrees (0 - 180).
///
/// Returns `None` if either segment has zero length.
pub fn calculate_angle(a: &Position3D, b: &Position3D, c: &Position3D) -> Option<f64> {
    let ba = a.relative_to(b);
    let bc = c.relative_to(b);

    let dot = ba[0] * bc[0] + ba[1] * bc[1] + ba[2] * bc[2];
    let norm_ba = (ba[0] * ba[0] + ba[1] * ba[1] + ba[2] * ba[2]).sqrt();
    let norm_bc = (bc[0] * bc[0] + bc[1] * bc[1] + bc[2] * bc[2]).sqrt();

    if norm_ba == 0.0 || norm_bc == 0.0 {
        return None;
    }

    // Clamp for floating point error
    let cos_theta = (dot / (norm_ba * norm_bc)).clamp(-1.0, 1.0);
    Some(cos_theta.acos().to_degrees())
}

/// Landmarks forming an angle, vertex in the middle
pub fn landmark_triplet(name: AngleName) -> [BodyLandmark; 3] {
    use BodyLandmark::*;

    match name {
        // Hip → Knee → Ankle
        AngleName::KneeLeft => [LeftHip, LeftKnee, LeftAnkle],
        AngleName::KneeRight => [RightHip, RightKnee, RightAnkle],
        // Shoulder → Hip → Knee
        AngleName::HipLeft => [LeftShoulder, LeftHip, LeftKnee],
        AngleName::HipRight => [RightShoulder, RightHip, RightKnee],
        // Shoulder → Hip → Ankle
        AngleName::BackLeft => [LeftShoulder, LeftHip, LeftAnkle],
        AngleName::BackRight => [RightShoulder, RightHip, RightAnkle],
    }
}

/// Measure one named angle, `None` unless all three landmarks reach `min_visibility`
pub fn joint_angle(pose: &PoseLandmarks, name: AngleName, min_visibility: f32) -> Option<f64> {
    let [a, b, c] = landmark_triplet(name);
    let a = pose.get(a).filter(|lm| lm.is_visible(min_visibility))?;
    let b = pose.get(b).filter(|lm| lm.is_visible(min_visibility))?;
    let c = pose.get(c).filter(|lm| lm.is_visible(min_visibility))?;

    calculate_angle(&a.position, &b.position, &c.position)
}

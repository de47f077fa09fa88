//! Threshold configuration
//!
//! Angles are in degrees. Thresholds follow Straub & Powers,
//! "A Biomechanical Review of the Squat Exercise", IJSPT 2024;19(4):490-501.
//! Each structure has a `DEFAULT` constant so rules can be built in const context.

use serde::{Deserialize, Serialize};

/// How to pair left and right series of different lengths
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BilateralPolicy {
    /// Pair frames up to the shorter series and drop the tail
    #[default]
    Truncate,
    /// Refuse to fuse; the caller skips the signal
    Strict,
}

/// Signal conditioning parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Fraction trimmed from each tail of the present values
    pub trim_fraction: f64,
    /// Fewer present values than this and trimming is skipped
    pub min_trim_samples: usize,
    pub bilateral_policy: BilateralPolicy,
}

impl SignalConfig {
    pub const DEFAULT: SignalConfig = SignalConfig {
        trim_fraction: 0.1,
        min_trim_samples: 10,
        bilateral_policy: BilateralPolicy::Truncate,
    };
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Spine neutrality thresholds (back angle used as a proxy)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpineNeutralConfig {
    /// Max change between adjacent frames
    pub max_sudden_change: f64,
    /// Max spread of the back angle over the clip
    pub max_total_range: f64,
    /// Hip angle below which butt wink becomes possible
    pub butt_wink_hip_threshold: f64,
    /// Back angle spread that, with deep hips, indicates butt wink
    pub butt_wink_back_change: f64,
    /// Consecutive flagged frames needed to report a sudden change
    pub min_consecutive_frames: usize,
}

impl SpineNeutralConfig {
    pub const DEFAULT: SpineNeutralConfig = SpineNeutralConfig {
        max_sudden_change: 20.0,
        max_total_range: 35.0,
        butt_wink_hip_threshold: 60.0,
        butt_wink_back_change: 30.0,
        min_consecutive_frames: 2,
    };
}

impl Default for SpineNeutralConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Squat depth thresholds (minimum knee angle)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquatDepthConfig {
    pub ideal_min: f64,
    pub ideal_max: f64,
    pub acceptable_min: f64,
    pub acceptable_max: f64,
    pub danger_threshold: f64,
}

impl SquatDepthConfig {
    pub const DEFAULT: SquatDepthConfig = SquatDepthConfig {
        ideal_min: 60.0,
        ideal_max: 100.0,
        acceptable_min: 40.0,
        acceptable_max: 120.0,
        danger_threshold: 40.0,
    };
}

impl Default for SquatDepthConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hip flexion thresholds (minimum hip angle)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HipAngleConfig {
    pub ideal_min: f64,
    pub ideal_max: f64,
    pub watch_threshold: f64,
    pub danger_threshold: f64,
}

impl HipAngleConfig {
    pub const DEFAULT: HipAngleConfig = HipAngleConfig {
        ideal_min: 70.0,
        ideal_max: 110.0,
        watch_threshold: 60.0,
        danger_threshold: 40.0,
    };
}

impl Default for HipAngleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Trunk lean thresholds (from vertical)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrunkInclinationConfig {
    pub good_max: f64,
    pub moderate_max: f64,
    pub excessive: f64,
}

impl TrunkInclinationConfig {
    pub const DEFAULT: TrunkInclinationConfig = TrunkInclinationConfig {
        good_max: 45.0,
        moderate_max: 60.0,
        excessive: 60.0,
    };
}

impl Default for TrunkInclinationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tibia forward lean thresholds (from vertical)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TibiaInclinationConfig {
    pub upright_max: f64,
    pub moderate_max: f64,
    pub high_forward: f64,
}

impl TibiaInclinationConfig {
    pub const DEFAULT: TibiaInclinationConfig = TibiaInclinationConfig {
        upright_max: 15.0,
        moderate_max: 30.0,
        high_forward: 30.0,
    };
}

impl Default for TibiaInclinationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Thresholds for every rule
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub spine_neutral: SpineNeutralConfig,
    pub squat_depth: SquatDepthConfig,
    pub hip_angle: HipAngleConfig,
    pub trunk_inclination: TrunkInclinationConfig,
    pub tibia_inclination: TibiaInclinationConfig,
}

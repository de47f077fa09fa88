//! Squat depth, judged by the deepest knee angle of either leg

use formscore_core::{
    AngleName, AngleSet, FormscoreResult, Severity, SquatDepthConfig, Violation,
};
use formscore_signal::SignalConditioner;
use tracing::debug;

use crate::FormRule;

/// Depth classification of the minimum knee angle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthZone {
    /// Thigh around parallel
    Ideal,
    /// Below parallel, still acceptable
    Deep,
    /// Slightly above parallel
    Shallow,
    /// Joint stress risk
    Excessive,
    /// Barely squatting
    VeryShallow,
}

impl DepthZone {
    /// Classify a minimum knee angle. Every angle maps to exactly one zone.
    pub fn classify(min_knee: f64, config: &SquatDepthConfig) -> DepthZone {
        if (config.ideal_min..=config.ideal_max).contains(&min_knee) {
            DepthZone::Ideal
        } else if (config.acceptable_min..config.ideal_min).contains(&min_knee) {
            DepthZone::Deep
        } else if min_knee > config.ideal_max && min_knee <= config.acceptable_max {
            DepthZone::Shallow
        } else if min_knee < config.danger_threshold {
            DepthZone::Excessive
        } else {
            DepthZone::VeryShallow
        }
    }

    pub fn rule_name(self) -> &'static str {
        match self {
            DepthZone::Ideal => "depth_ideal",
            DepthZone::Deep => "depth_deep",
            DepthZone::Shallow => "depth_shallow",
            DepthZone::Excessive => "depth_excessive",
            DepthZone::VeryShallow => "depth_very_shallow",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DepthZone::Ideal | DepthZone::Deep => Severity::Low,
            DepthZone::Shallow => Severity::Medium,
            DepthZone::Excessive | DepthZone::VeryShallow => Severity::High,
        }
    }

    pub fn passed(self) -> bool {
        matches!(self, DepthZone::Ideal | DepthZone::Deep)
    }

    /// Raw score penalty
    pub fn penalty(self) -> u32 {
        match self {
            DepthZone::Ideal | DepthZone::Deep => 0,
            DepthZone::Shallow => 10,
            DepthZone::Excessive => 15,
            DepthZone::VeryShallow => 20,
        }
    }

    fn feedback(self, min_knee: f64) -> String {
        match self {
            DepthZone::Ideal => format!("Perfect depth - thigh parallel to floor ({:.0}°)", min_knee),
            DepthZone::Deep => format!("Deep squat ({:.0}°) - ensure spine stays neutral", min_knee),
            DepthZone::Shallow => format!(
                "Squat slightly shallow ({:.0}°) - try to reach thigh parallel if comfortable",
                min_knee
            ),
            DepthZone::Excessive => format!(
                "Squat too deep ({:.0}°) - risk of form breakdown and joint stress",
                min_knee
            ),
            DepthZone::VeryShallow => format!(
                "Squat very shallow ({:.0}°) - increase depth to get benefits",
                min_knee
            ),
        }
    }
}

/// Checks that the squat reaches a useful and safe depth
///
/// Left and right knees are trimmed independently and not fused: the single
/// deepest angle reached by either leg decides the zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquatDepthRule {
    config: SquatDepthConfig,
}

impl SquatDepthRule {
    pub fn new(config: SquatDepthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SquatDepthConfig {
        &self.config
    }

    /// Deepest knee angle over both legs after trimming
    pub fn min_knee(&self, angles: &AngleSet, signal: &SignalConditioner) -> Option<f64> {
        [AngleName::KneeLeft, AngleName::KneeRight]
            .into_iter()
            .filter_map(|name| angles.signal(name))
            .filter_map(|series| signal.trim(series).min())
            .reduce(f64::min)
    }
}

impl FormRule for SquatDepthRule {
    fn name(&self) -> &'static str {
        "squat_depth"
    }

    fn evaluate(
        &self,
        angles: &AngleSet,
        signal: &SignalConditioner,
    ) -> FormscoreResult<Vec<Violation>> {
        let Some(min_knee) = self.min_knee(angles, signal) else {
            debug!(rule = self.name(), "no knee angle signal");
            return Ok(Vec::new());
        };

        let zone = DepthZone::classify(min_knee, &self.config);
        debug!(rule = self.name(), min_knee, ?zone, "rule evaluated");

        let violation = Violation::new(
            zone.rule_name(),
            zone.severity(),
            zone.passed(),
            zone.penalty(),
            zone.feedback(min_knee),
        )?
        .with_detail("min_knee", min_knee);

        Ok(vec![violation])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscore_core::AngleSeries;

    fn evaluate(left: &[f64], right: &[f64]) -> Vec<Violation> {
        let mut angles = AngleSet::new();
        if !left.is_empty() {
            angles.insert(AngleName::KneeLeft, AngleSeries::from_values(left));
        }
        if !right.is_empty() {
            angles.insert(AngleName::KneeRight, AngleSeries::from_values(right));
        }
        SquatDepthRule::default()
            .evaluate(&angles, &SignalConditioner::default())
            .unwrap()
    }

    #[test]
    fn test_zone_boundaries() {
        let cfg = SquatDepthConfig::DEFAULT;
        assert_eq!(DepthZone::classify(60.0, &cfg), DepthZone::Ideal);
        assert_eq!(DepthZone::classify(100.0, &cfg), DepthZone::Ideal);
        assert_eq!(DepthZone::classify(59.9, &cfg), DepthZone::Deep);
        assert_eq!(DepthZone::classify(40.0, &cfg), DepthZone::Deep);
        assert_eq!(DepthZone::classify(39.9, &cfg), DepthZone::Excessive);
        assert_eq!(DepthZone::classify(100.1, &cfg), DepthZone::Shallow);
        assert_eq!(DepthZone::classify(120.0, &cfg), DepthZone::Shallow);
        assert_eq!(DepthZone::classify(120.1, &cfg), DepthZone::VeryShallow);
    }

    #[test]
    fn test_ideal_depth_passes() {
        let violations = evaluate(&[130.0, 100.0, 75.0, 100.0, 130.0], &[]);
        assert_eq!(violations.len(), 1);

        let v = &violations[0];
        assert_eq!(v.rule_name(), "depth_ideal");
        assert_eq!(v.severity(), Severity::Low);
        assert!(v.passed());
        assert_eq!(v.score_penalty(), 0);
        assert_eq!(v.detail("min_knee"), Some(75.0));
    }

    #[test]
    fn test_shallow_depth_fails() {
        let violations = evaluate(&[150.0, 130.0, 110.0, 130.0], &[150.0, 125.0, 115.0, 140.0]);
        assert_eq!(violations.len(), 1);

        let v = &violations[0];
        assert_eq!(v.rule_name(), "depth_shallow");
        assert_eq!(v.severity(), Severity::Medium);
        assert!(!v.passed());
        assert_eq!(v.score_penalty(), 10);
        assert!((v.weighted_penalty() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_deepest_leg_decides() {
        let violations = evaluate(&[150.0, 130.0], &[140.0, 35.0]);
        assert_eq!(violations[0].rule_name(), "depth_excessive");
        assert_eq!(violations[0].score_penalty(), 15);
    }

    #[test]
    fn test_very_shallow() {
        let violations = evaluate(&[170.0, 150.0, 130.0], &[]);
        assert_eq!(violations[0].rule_name(), "depth_very_shallow");
        assert_eq!(violations[0].severity(), Severity::High);
        assert_eq!(violations[0].score_penalty(), 20);
    }

    #[test]
    fn test_no_knee_data() {
        assert!(evaluate(&[], &[]).is_empty());

        let angles = AngleSet::new().with(AngleName::KneeLeft, AngleSeries::new(vec![None, None]));
        let violations = SquatDepthRule::default()
            .evaluate(&angles, &SignalConditioner::default())
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_glitch_trimmed_before_minimum() {
        let mut left = vec![90.0; 12];
        left[5] = 5.0; // detector spike
        let violations = evaluate(&left, &[]);
        assert_eq!(violations[0].rule_name(), "depth_ideal");
        assert_eq!(violations[0].detail("min_knee"), Some(90.0));
    }
}

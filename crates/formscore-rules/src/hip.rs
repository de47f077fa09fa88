//! Hip flexion, judged by the minimum fused hip angle

use formscore_core::{AngleName, AngleSet, FormscoreResult, HipAngleConfig, Severity, Violation};
use formscore_signal::SignalConditioner;
use tracing::debug;

use crate::{bilateral_signal, FormRule};

/// Hip flexion classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HipZone {
    Good,
    /// Posterior pelvic tilt becomes likely
    Deep,
    /// Likely causing spine rounding
    Excessive,
}

impl HipZone {
    /// Classify a minimum hip angle.
    ///
    /// The band `[watch_threshold, ideal_min)` (60° - 70° by default) has no
    /// zone and produces no outcome at all.
    pub fn classify(min_hip: f64, config: &HipAngleConfig) -> Option<HipZone> {
        if min_hip >= config.ideal_min {
            Some(HipZone::Good)
        } else if (config.danger_threshold..config.watch_threshold).contains(&min_hip) {
            Some(HipZone::Deep)
        } else if min_hip < config.danger_threshold {
            Some(HipZone::Excessive)
        } else {
            None
        }
    }

    pub fn rule_name(self) -> &'static str {
        match self {
            HipZone::Good => "hip_angle_good",
            HipZone::Deep => "hip_angle_deep",
            HipZone::Excessive => "hip_angle_excessive",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            HipZone::Good => Severity::Low,
            HipZone::Deep => Severity::Medium,
            HipZone::Excessive => Severity::High,
        }
    }

    pub fn penalty(self) -> u32 {
        match self {
            HipZone::Good => 0,
            HipZone::Deep => 5,
            HipZone::Excessive => 15,
        }
    }

    fn feedback(self, min_hip: f64) -> String {
        match self {
            HipZone::Good => format!("Good hip depth ({:.0}°)", min_hip),
            HipZone::Deep => format!(
                "Deep hip flexion ({:.0}°) - watch for posterior pelvic tilt",
                min_hip
            ),
            HipZone::Excessive => format!(
                "Excessive hip flexion ({:.0}°) - likely causing spine rounding",
                min_hip
            ),
        }
    }
}

/// Checks that hip flexion stays in a safe range
#[derive(Clone, Copy, Debug, Default)]
pub struct HipAngleRule {
    config: HipAngleConfig,
}

impl HipAngleRule {
    pub fn new(config: HipAngleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HipAngleConfig {
        &self.config
    }
}

impl FormRule for HipAngleRule {
    fn name(&self) -> &'static str {
        "hip_angle"
    }

    fn evaluate(
        &self,
        angles: &AngleSet,
        signal: &SignalConditioner,
    ) -> FormscoreResult<Vec<Violation>> {
        let min_hip = bilateral_signal(
            self.name(),
            angles,
            signal,
            AngleName::HipLeft,
            AngleName::HipRight,
        )
        .and_then(|hip| hip.min());

        let Some(min_hip) = min_hip else {
            debug!(rule = self.name(), "no hip angle signal");
            return Ok(Vec::new());
        };

        let Some(zone) = HipZone::classify(min_hip, &self.config) else {
            debug!(rule = self.name(), min_hip, "hip angle in unclassified band");
            return Ok(Vec::new());
        };

        debug!(rule = self.name(), min_hip, ?zone, "rule evaluated");

        let violation = Violation::new(
            zone.rule_name(),
            zone.severity(),
            zone == HipZone::Good,
            zone.penalty(),
            zone.feedback(min_hip),
        )?
        .with_detail("min_hip", min_hip);

        Ok(vec![violation])
    }
}

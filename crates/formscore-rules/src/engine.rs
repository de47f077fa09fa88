//! Rule engine - runs the fixed rule set in priority order

use formscore_core::{AngleSet, FormscoreResult, RuleConfig, Violation};
use formscore_signal::SignalConditioner;
use tracing::debug;

use crate::{
    FormRule, HipAngleRule, SpineNeutralRule, SquatDepthRule, TibiaInclinationRule,
    TrunkInclinationRule,
};

/// Ordered, fixed set of form rules
pub struct RuleEngine {
    rules: Vec<Box<dyn FormRule>>,
    signal: SignalConditioner,
}

impl RuleEngine {
    /// Build the rule set. Order is priority order and never changes.
    pub fn new(config: &RuleConfig, signal: SignalConditioner) -> Self {
        let rules: Vec<Box<dyn FormRule>> = vec![
            Box::new(SpineNeutralRule::new(config.spine_neutral)),
            Box::new(SquatDepthRule::new(config.squat_depth)),
            Box::new(HipAngleRule::new(config.hip_angle)),
            Box::new(TrunkInclinationRule::new(config.trunk_inclination)),
            Box::new(TibiaInclinationRule::new(config.tibia_inclination)),
        ];

        Self { rules, signal }
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn signal(&self) -> &SignalConditioner {
        &self.signal
    }

    /// Run every rule and concatenate their outcomes in rule order
    pub fn evaluate(&self, angles: &AngleSet) -> FormscoreResult<Vec<Violation>> {
        let mut all = Vec::new();

        for rule in &self.rules {
            let violations = rule.evaluate(angles, &self.signal)?;
            debug!(
                rule = rule.name(),
                emitted = violations.len(),
                failed = violations.iter().filter(|v| v.failed()).count(),
                "rule finished"
            );
            all.extend(violations);
        }

        Ok(all)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&RuleConfig::default(), SignalConditioner::default())
    }
}

/// Run the default rule set
pub fn evaluate_form(angles: &AngleSet) -> FormscoreResult<Vec<Violation>> {
    RuleEngine::default().evaluate(angles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscore_core::{AngleName, AngleSeries, Severity};

    fn uniform(knee: &[f64], hip: f64, back: f64) -> AngleSet {
        let n = knee.len();
        AngleSet::new()
            .with(AngleName::KneeLeft, AngleSeries::from_values(knee))
            .with(AngleName::KneeRight, AngleSeries::from_values(knee))
            .with(AngleName::HipLeft, AngleSeries::from_values(&vec![hip; n]))
            .with(AngleName::HipRight, AngleSeries::from_values(&vec![hip; n]))
            .with(AngleName::BackLeft, AngleSeries::from_values(&vec![back; n]))
            .with(AngleName::BackRight, AngleSeries::from_values(&vec![back; n]))
    }

    #[test]
    fn test_rule_order() {
        let engine = RuleEngine::default();
        assert_eq!(
            engine.rule_names(),
            vec![
                "spine_neutral",
                "squat_depth",
                "hip_angle",
                "trunk_inclination",
                "tibia_inclination"
            ]
        );
    }

    #[test]
    fn test_clean_rep() {
        let knee = [130.0, 120.0, 90.0, 65.0, 65.0, 90.0, 120.0, 130.0];
        let violations = evaluate_form(&uniform(&knee, 90.0, 90.0)).unwrap();

        let names: Vec<_> = violations.iter().map(|v| v.rule_name()).collect();
        assert_eq!(names, vec!["depth_ideal", "hip_angle_good"]);
        assert!(violations.iter().all(|v| v.passed()));
    }

    #[test]
    fn test_outcomes_concatenated_in_rule_order() {
        // Shallow knees, excessive hip flexion, drifting back
        let mut angles = uniform(&[170.0, 150.0, 130.0, 150.0, 170.0], 30.0, 90.0);
        angles.insert(
            AngleName::BackLeft,
            AngleSeries::from_values(&[90.0, 100.0, 110.0, 120.0, 130.0]),
        );
        angles.insert(
            AngleName::BackRight,
            AngleSeries::from_values(&[90.0, 100.0, 110.0, 120.0, 130.0]),
        );

        let violations = evaluate_form(&angles).unwrap();
        let names: Vec<_> = violations.iter().map(|v| v.rule_name()).collect();
        assert_eq!(
            names,
            vec![
                "butt_wink",
                "excessive_spine_movement",
                "depth_very_shallow",
                "hip_angle_excessive"
            ]
        );
        assert_eq!(violations[0].severity(), Severity::Critical);
    }

    #[test]
    fn test_empty_input() {
        assert!(evaluate_form(&AngleSet::new()).unwrap().is_empty());
    }
}

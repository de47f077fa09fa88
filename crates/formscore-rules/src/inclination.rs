//! Trunk and tibia inclination
//!
//! Both checks need segment angles measured from vertical, which the angle
//! extraction stage does not produce yet. Until it does, they report nothing.

use formscore_core::{
    AngleSet, FormscoreResult, TibiaInclinationConfig, TrunkInclinationConfig, Violation,
};
use formscore_signal::SignalConditioner;

use crate::FormRule;

/// Forward trunk lean (shoulder-hip line from vertical)
#[derive(Clone, Copy, Debug, Default)]
pub struct TrunkInclinationRule {
    config: TrunkInclinationConfig,
}

impl TrunkInclinationRule {
    pub fn new(config: TrunkInclinationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrunkInclinationConfig {
        &self.config
    }
}

impl FormRule for TrunkInclinationRule {
    fn name(&self) -> &'static str {
        "trunk_inclination"
    }

    // TODO: classify against `config` once a trunk-from-vertical series is extracted
    fn evaluate(&self, _angles: &AngleSet, _signal: &SignalConditioner) -> FormscoreResult<Vec<Violation>> {
        Ok(Vec::new())
    }
}

/// Forward tibia lean (knee-ankle line from vertical), mostly informational
#[derive(Clone, Copy, Debug, Default)]
pub struct TibiaInclinationRule {
    config: TibiaInclinationConfig,
}

impl TibiaInclinationRule {
    pub fn new(config: TibiaInclinationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TibiaInclinationConfig {
        &self.config
    }
}

impl FormRule for TibiaInclinationRule {
    fn name(&self) -> &'static str {
        "tibia_inclination"
    }

    // TODO: classify against `config` once a tibia-from-vertical series is extracted
    fn evaluate(&self, _angles: &AngleSet, _signal: &SignalConditioner) -> FormscoreResult<Vec<Violation>> {
        Ok(Vec::new())
    }
}

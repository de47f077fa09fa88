//! End-to-end scenarios
//!
//! A synthetic clip is corrupted with capture noise and pushed through the
//! full analysis pipeline:
//! - Clean reps must score perfectly
//! - Known faults must be reported with the right severity
//! - Outlier trimming must absorb typical detector noise

use formscore_analysis::FormAnalyzer;
use formscore_core::{FormReport, FormscoreResult};

use crate::clip::SquatClip;
use crate::noise::{CaptureNoise, NoiseStats, NoisyCapture};

/// Result of one scenario run
#[derive(Clone, Debug)]
pub struct ScenarioOutcome {
    pub report: FormReport,
    pub noise: NoiseStats,
}

/// One clip under one noise model
pub struct Scenario {
    clip: SquatClip,
    noise: CaptureNoise,
    seed: u64,
}

impl Scenario {
    pub fn new(clip: SquatClip) -> Self {
        Scenario {
            clip,
            noise: CaptureNoise::clean(),
            seed: 0,
        }
    }

    pub fn with_noise(mut self, noise: CaptureNoise, seed: u64) -> Self {
        self.noise = noise;
        self.seed = seed;
        self
    }

    /// Run with the default analyzer
    pub fn run(&self) -> FormscoreResult<ScenarioOutcome> {
        self.run_with(&FormAnalyzer::default())
    }

    pub fn run_with(&self, analyzer: &FormAnalyzer) -> FormscoreResult<ScenarioOutcome> {
        let mut capture = NoisyCapture::new(self.noise.clone(), self.seed);
        let angles = capture.apply_set(&self.clip.angle_set());
        let report = analyzer.analyze(&angles, self.clip.counts())?;

        Ok(ScenarioOutcome {
            report,
            noise: capture.stats(),
        })
    }
}

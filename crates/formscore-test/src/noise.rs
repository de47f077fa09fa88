//! Capture noise simulation
//!
//! Simulates what a pose detector does to clean joint angles:
//! - Jitter
//! - Single-frame spikes (a landmark snapping to the wrong limb)
//! - Dropouts, alone or in bursts (occlusion, low visibility)

use formscore_core::{AngleSeries, AngleSet};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest joint angle a detector reports
const MAX_ANGLE: f64 = 180.0;

/// Jitter distribution type
#[derive(Clone, Debug, PartialEq)]
pub enum JitterDistribution {
    /// No jitter
    None,
    /// Uniform in [-max_deg, max_deg]
    Uniform { max_deg: f64 },
    /// Normal distribution around zero
    Normal { stddev_deg: f64 },
}

impl JitterDistribution {
    /// Sample a jitter offset in degrees
    pub fn sample(&self, rng: &mut StdRng) -> f64 {
        match self {
            JitterDistribution::None => 0.0,
            JitterDistribution::Uniform { max_deg } if *max_deg > 0.0 => {
                Uniform::new_inclusive(-max_deg, *max_deg).sample(rng)
            }
            JitterDistribution::Uniform { .. } => 0.0,
            JitterDistribution::Normal { stddev_deg } => {
                // Box-Muller; 1 - u keeps ln away from zero
                let u1: f64 = 1.0 - rng.gen::<f64>();
                let u2: f64 = rng.gen();
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
                stddev_deg * z
            }
        }
    }
}

/// Capture noise configuration
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureNoise {
    /// Per-sample jitter
    pub jitter: JitterDistribution,
    /// Spike probability per sample (0.0 - 1.0)
    pub spike_prob: f64,
    /// Spike magnitude range in degrees, applied up or down
    pub spike_deg: (f64, f64),
    /// Isolated dropout probability per sample
    pub dropout_rate: f64,
    /// Probability that a dropout starts a burst
    pub burst_dropout_prob: f64,
    /// Burst length range in frames
    pub burst_length: (u32, u32),
}

impl Default for CaptureNoise {
    fn default() -> Self {
        Self::typical()
    }
}

impl CaptureNoise {
    /// Perfect capture
    pub fn clean() -> Self {
        CaptureNoise {
            jitter: JitterDistribution::None,
            spike_prob: 0.0,
            spike_deg: (0.0, 0.0),
            dropout_rate: 0.0,
            burst_dropout_prob: 0.0,
            burst_length: (0, 0),
        }
    }

    /// Good lighting, whole body in frame
    pub fn typical() -> Self {
        CaptureNoise {
            jitter: JitterDistribution::Normal { stddev_deg: 1.5 },
            spike_prob: 0.02,
            spike_deg: (30.0, 60.0),
            dropout_rate: 0.02,
            burst_dropout_prob: 0.1,
            burst_length: (2, 4),
        }
    }

    /// Poor lighting, partial occlusion, loose clothing
    pub fn hostile() -> Self {
        CaptureNoise {
            jitter: JitterDistribution::Normal { stddev_deg: 4.0 },
            spike_prob: 0.06,
            spike_deg: (40.0, 90.0),
            dropout_rate: 0.08,
            burst_dropout_prob: 0.3,
            burst_length: (3, 8),
        }
    }
}

/// Counts of what the simulator did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoiseStats {
    pub samples: u64,
    pub spiked: u64,
    pub dropped: u64,
}

impl NoiseStats {
    pub fn dropout_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.dropped as f64 / self.samples as f64
        }
    }
}

/// Seeded capture noise simulator
pub struct NoisyCapture {
    config: CaptureNoise,
    rng: StdRng,
    burst_remaining: u32,
    stats: NoiseStats,
}

impl NoisyCapture {
    /// Create a simulator with seed
    pub fn new(config: CaptureNoise, seed: u64) -> Self {
        NoisyCapture {
            config,
            rng: StdRng::seed_from_u64(seed),
            burst_remaining: 0,
            stats: NoiseStats::default(),
        }
    }

    pub fn stats(&self) -> NoiseStats {
        self.stats
    }

    fn should_drop(&mut self) -> bool {
        if self.burst_remaining > 0 {
            self.burst_remaining -= 1;
            return true;
        }

        if self.rng.gen::<f64>() >= self.config.dropout_rate {
            return false;
        }

        if self.rng.gen::<f64>() < self.config.burst_dropout_prob {
            let (min, max) = self.config.burst_length;
            if max > 0 {
                // This sample is the first of the burst
                self.burst_remaining = self.rng.gen_range(min.min(max)..=max).saturating_sub(1);
            }
        }
        true
    }

    fn spike(&mut self) -> f64 {
        let (min, max) = self.config.spike_deg;
        let magnitude = if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        };
        if self.rng.gen::<bool>() {
            magnitude
        } else {
            -magnitude
        }
    }

    fn corrupt(&mut self, value: Option<f64>) -> Option<f64> {
        self.stats.samples += 1;

        if self.should_drop() {
            self.stats.dropped += 1;
            return None;
        }

        let mut value = value? + self.config.jitter.sample(&mut self.rng);

        if self.rng.gen::<f64>() < self.config.spike_prob {
            self.stats.spiked += 1;
            value += self.spike();
        }

        Some(value.clamp(0.0, MAX_ANGLE))
    }

    /// Corrupt one series. Existing gaps stay gaps.
    pub fn apply(&mut self, series: &AngleSeries) -> AngleSeries {
        // Bursts never span two series
        self.burst_remaining = 0;
        series.iter().map(|value| self.corrupt(value)).collect()
    }

    /// Corrupt every series of a set independently
    pub fn apply_set(&mut self, angles: &AngleSet) -> AngleSet {
        let mut noisy = AngleSet::new();
        for name in angles.names() {
            if let Some(series) = angles.get(name) {
                noisy.insert(name, self.apply(series));
            }
        }
        noisy
    }
}

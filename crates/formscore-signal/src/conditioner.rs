//! Signal conditioner - outlier trimming and bilateral fusion

use formscore_core::{
    AngleSeries, BilateralPolicy, FormscoreError, FormscoreResult, SignalConfig,
};
use tracing::{trace, warn};

/// Default fraction trimmed from each tail
pub const DEFAULT_TRIM_FRACTION: f64 = 0.1;

/// Fewer present values than this and trimming is skipped
pub const MIN_TRIM_SAMPLES: usize = 10;

/// Replace values outside the central percentile band with gaps.
///
/// Uses the default minimum sample count. See [`trim_with`].
pub fn trim(series: &AngleSeries, fraction: f64) -> AngleSeries {
    trim_with(series, fraction, MIN_TRIM_SAMPLES)
}

/// Replace values outside the central percentile band with gaps.
///
/// Only present values take part. With `n` present values sorted ascending,
/// the kept band is `[sorted[floor(n*f)], sorted[floor(n*(1-f)) - 1]]`.
/// Frame positions never move: gaps stay gaps and rejected values become gaps.
/// The input is returned unchanged when there are fewer than `min_samples`
/// present values or the band is empty.
pub fn trim_with(series: &AngleSeries, fraction: f64, min_samples: usize) -> AngleSeries {
    let mut sorted: Vec<f64> = series.present().collect();
    let n = sorted.len();

    if n < min_samples {
        return series.clone();
    }

    sorted.sort_by(f64::total_cmp);

    let lower_idx = (n as f64 * fraction).floor() as usize;
    let upper_idx = ((n as f64 * (1.0 - fraction)).floor() as usize).min(n);

    if lower_idx >= upper_idx {
        return series.clone();
    }

    let lower = sorted[lower_idx];
    let upper = sorted[upper_idx - 1];

    let trimmed: AngleSeries = series
        .iter()
        .map(|v| v.filter(|x| (lower..=upper).contains(x)))
        .collect();

    trace!(
        present = n,
        rejected = n - trimmed.present_count(),
        lower,
        upper,
        "trimmed angle series"
    );

    trimmed
}

/// Fuse left and right measurements frame by frame.
///
/// Both present gives the mean, one present gives that value, neither gives a gap.
/// Series of different lengths are paired up to the shorter one and the tail is dropped.
pub fn fuse(left: &AngleSeries, right: &AngleSeries) -> AngleSeries {
    if left.len() != right.len() {
        warn!(
            left = left.len(),
            right = right.len(),
            "bilateral series differ in length, truncating to shorter"
        );
    }

    left.iter()
        .zip(right.iter())
        .map(|pair| match pair {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        })
        .collect()
}

/// Fuse under an explicit length policy
pub fn fuse_with(
    left: &AngleSeries,
    right: &AngleSeries,
    policy: BilateralPolicy,
) -> FormscoreResult<AngleSeries> {
    match policy {
        BilateralPolicy::Strict if left.len() != right.len() => {
            Err(FormscoreError::LengthMismatch {
                left: left.len(),
                right: right.len(),
            })
        }
        _ => Ok(fuse(left, right)),
    }
}

/// Applies trimming and fusion with one configuration
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalConditioner {
    config: SignalConfig,
}

impl SignalConditioner {
    /// Create a conditioner, validating the trim fraction
    pub fn new(config: SignalConfig) -> FormscoreResult<Self> {
        if !(0.0..0.5).contains(&config.trim_fraction) {
            return Err(FormscoreError::InvalidTrimFraction(config.trim_fraction));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn trim(&self, series: &AngleSeries) -> AngleSeries {
        trim_with(series, self.config.trim_fraction, self.config.min_trim_samples)
    }

    pub fn fuse(&self, left: &AngleSeries, right: &AngleSeries) -> FormscoreResult<AngleSeries> {
        fuse_with(left, right, self.config.bilateral_policy)
    }

    /// Condition a left/right pair into one signal.
    ///
    /// Each available side is trimmed on its own; two sides are then fused.
    /// Returns `Ok(None)` when neither side is available.
    pub fn bilateral(
        &self,
        left: Option<&AngleSeries>,
        right: Option<&AngleSeries>,
    ) -> FormscoreResult<Option<AngleSeries>> {
        match (left, right) {
            (Some(l), Some(r)) => self.fuse(&self.trim(l), &self.trim(r)).map(Some),
            (Some(side), None) | (None, Some(side)) => Ok(Some(self.trim(side))),
            (None, None) => Ok(None),
        }
    }
}

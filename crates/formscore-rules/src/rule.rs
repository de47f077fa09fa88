//! The form rule capability

use formscore_core::{AngleName, AngleSeries, AngleSet, FormscoreResult, Violation};
use formscore_signal::SignalConditioner;
use tracing::warn;

/// A form check over named angle series
///
/// Rules are pure: the same angles always give the same violations.
/// An `Err` means a rule built an invalid violation, which is a defect.
pub trait FormRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        angles: &AngleSet,
        signal: &SignalConditioner,
    ) -> FormscoreResult<Vec<Violation>>;
}

/// Trim and fuse a left/right pair into one signal.
///
/// Returns `None` if neither side exists, or if the conditioner refuses the
/// pair (strict length policy). The refusal is logged and the caller
/// treats the signal as absent.
pub fn bilateral_signal(
    rule: &str,
    angles: &AngleSet,
    signal: &SignalConditioner,
    left: AngleName,
    right: AngleName,
) -> Option<AngleSeries> {
    match signal.bilateral(angles.signal(left), angles.signal(right)) {
        Ok(series) => series,
        Err(err) => {
            warn!(rule, %left, %right, error = %err, "skipping bilateral signal");
            None
        }
    }
}

//! Spine neutrality
//!
//! True spinal curvature is not measurable from body landmarks, so the back
//! angle (shoulder → hip → ankle) stands in for it. Three independent checks:
//! - Sustained sudden changes between adjacent frames
//! - Butt wink: deep hip flexion together with a large back angle spread
//! - Excessive back angle spread over the whole clip

use formscore_core::{
    AngleName, AngleSeries, AngleSet, FormscoreResult, Severity, SpineNeutralConfig, Violation,
};
use formscore_signal::SignalConditioner;
use tracing::debug;

use crate::{bilateral_signal, FormRule};

pub const SPINE_SUDDEN_CHANGE: &str = "spine_sudden_change";
pub const BUTT_WINK: &str = "butt_wink";
pub const EXCESSIVE_SPINE_MOVEMENT: &str = "excessive_spine_movement";

const SUDDEN_CHANGE_PENALTY: u32 = 30;
const BUTT_WINK_PENALTY: u32 = 25;
const EXCESSIVE_RANGE_PENALTY: u32 = 20;

/// Absolute change from `frame` to `frame + 1`, if both are present
fn adjacent_delta(series: &AngleSeries, frame: usize) -> Option<f64> {
    Some((series.get(frame + 1)? - series.get(frame)?).abs())
}

/// Split ascending indices into maximal runs of consecutive integers
pub fn consecutive_runs(indices: &[usize]) -> Vec<Vec<usize>> {
    let mut runs: Vec<Vec<usize>> = Vec::new();

    for &idx in indices {
        match runs.last_mut() {
            Some(run) if run.last().map_or(false, |&last| idx == last + 1) => run.push(idx),
            _ => runs.push(vec![idx]),
        }
    }

    runs
}

/// Checks that the spine stays neutral through the movement
#[derive(Clone, Copy, Debug, Default)]
pub struct SpineNeutralRule {
    config: SpineNeutralConfig,
}

impl SpineNeutralRule {
    pub fn new(config: SpineNeutralConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpineNeutralConfig {
        &self.config
    }

    /// One critical violation per sustained run of large frame-to-frame changes
    fn sudden_changes(&self, spine: &AngleSeries) -> FormscoreResult<Vec<Violation>> {
        let flagged: Vec<usize> = (0..spine.len().saturating_sub(1))
            .filter(|&i| {
                adjacent_delta(spine, i).map_or(false, |d| d > self.config.max_sudden_change)
            })
            .collect();

        let mut violations = Vec::new();

        for run in consecutive_runs(&flagged) {
            if run.len() < self.config.min_consecutive_frames {
                continue;
            }

            let max_change = run
                .iter()
                .filter_map(|&i| adjacent_delta(spine, i))
                .fold(0.0, f64::max);

            let mut frames = run.clone();
            if let Some(&last) = run.last() {
                frames.push(last + 1);
            }

            violations.push(
                Violation::new(
                    SPINE_SUDDEN_CHANGE,
                    Severity::Critical,
                    false,
                    SUDDEN_CHANGE_PENALTY,
                    format!(
                        "Sustained spine movement detected ({} consecutive frames) - maintain neutral spine",
                        run.len()
                    ),
                )?
                .with_frames(frames)
                .with_detail("max_change", max_change)
                .with_detail("threshold", self.config.max_sudden_change)
                .with_detail("num_frames", run.len() as f64),
            );
        }

        Ok(violations)
    }

    fn butt_wink(&self, min_hip: f64, back_range: f64) -> FormscoreResult<Option<Violation>> {
        if min_hip >= self.config.butt_wink_hip_threshold
            || back_range <= self.config.butt_wink_back_change
        {
            return Ok(None);
        }

        let violation = Violation::new(
            BUTT_WINK,
            Severity::Critical,
            false,
            BUTT_WINK_PENALTY,
            format!(
                "Butt wink detected - squatting beyond hip mobility (hip: {:.0}°, back change: {:.0}°)",
                min_hip, back_range
            ),
        )?
        .with_detail("min_hip_angle", min_hip)
        .with_detail("back_range", back_range)
        .with_detail("hip_threshold", self.config.butt_wink_hip_threshold)
        .with_detail("back_threshold", self.config.butt_wink_back_change);

        Ok(Some(violation))
    }

    fn excessive_range(&self, back_range: f64) -> FormscoreResult<Option<Violation>> {
        if back_range <= self.config.max_total_range {
            return Ok(None);
        }

        let violation = Violation::new(
            EXCESSIVE_SPINE_MOVEMENT,
            Severity::High,
            false,
            EXCESSIVE_RANGE_PENALTY,
            format!(
                "Excessive spine movement throughout squat ({:.0}° total range) - maintain more stable spine position",
                back_range
            ),
        )?
        .with_detail("back_range", back_range)
        .with_detail("threshold", self.config.max_total_range);

        Ok(Some(violation))
    }
}

impl FormRule for SpineNeutralRule {
    fn name(&self) -> &'static str {
        "spine_neutral"
    }

    fn evaluate(
        &self,
        angles: &AngleSet,
        signal: &SignalConditioner,
    ) -> FormscoreResult<Vec<Violation>> {
        let Some(spine) = bilateral_signal(
            self.name(),
            angles,
            signal,
            AngleName::BackLeft,
            AngleName::BackRight,
        ) else {
            debug!(rule = self.name(), "no back angle signal");
            return Ok(Vec::new());
        };

        let mut violations = self.sudden_changes(&spine)?;

        let back_range = spine.range();
        let min_hip = bilateral_signal(
            self.name(),
            angles,
            signal,
            AngleName::HipLeft,
            AngleName::HipRight,
        )
        .and_then(|hip| hip.min());

        if let (Some(min_hip), Some(back_range)) = (min_hip, back_range) {
            violations.extend(self.butt_wink(min_hip, back_range)?);
        }

        if let Some(back_range) = back_range {
            violations.extend(self.excessive_range(back_range)?);
        }

        debug!(
            rule = self.name(),
            back_range = back_range.unwrap_or_default(),
            violations = violations.len(),
            "rule evaluated"
        );

        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(angles: &AngleSet) -> Vec<Violation> {
        SpineNeutralRule::default()
            .evaluate(angles, &SignalConditioner::default())
            .unwrap()
    }

    fn back(values: &[f64]) -> AngleSet {
        AngleSet::new()
            .with(AngleName::BackLeft, AngleSeries::from_values(values))
            .with(AngleName::BackRight, AngleSeries::from_values(values))
    }

    #[test]
    fn test_consecutive_runs() {
        assert!(consecutive_runs(&[]).is_empty());
        assert_eq!(
            consecutive_runs(&[1, 2, 3, 7, 9, 10]),
            vec![vec![1, 2, 3], vec![7], vec![9, 10]]
        );
    }

    #[test]
    fn test_no_back_signal_emits_nothing() {
        let angles = AngleSet::new().with(AngleName::HipLeft, AngleSeries::from_values(&[30.0]));
        assert!(evaluate(&angles).is_empty());
    }

    #[test]
    fn test_steady_back_emits_nothing() {
        assert!(evaluate(&back(&[90.0; 8])).is_empty());
    }

    #[test]
    fn test_isolated_jump_is_ignored() {
        // One adjacent delta of 25°, run of length 1, range 25 below 35
        let angles = back(&[90.0, 90.0, 115.0, 115.0, 115.0]);
        assert!(evaluate(&angles).is_empty());
    }

    #[test]
    fn test_sustained_changes_emit_one_critical() {
        // Deltas 0→1, 1→2 and 2→3 each exceed 20°
        let angles = back(&[100.0, 125.0, 100.0, 125.0, 125.0]);
        let violations = evaluate(&angles);

        let sudden: Vec<_> = violations
            .iter()
            .filter(|v| v.rule_name() == SPINE_SUDDEN_CHANGE)
            .collect();
        assert_eq!(sudden.len(), 1);

        let v = sudden[0];
        assert_eq!(v.severity(), Severity::Critical);
        assert!(!v.passed());
        assert_eq!(v.score_penalty(), 30);
        assert_eq!(v.frames(), Some(&[0, 1, 2, 3][..]));
        assert_eq!(v.detail("max_change"), Some(25.0));
        assert_eq!(v.detail("num_frames"), Some(3.0));
    }

    #[test]
    fn test_gap_breaks_adjacent_pairs() {
        let series = AngleSeries::new(vec![
            Some(100.0),
            Some(125.0),
            None,
            Some(100.0),
            Some(125.0),
        ]);
        let angles = AngleSet::new().with(AngleName::BackLeft, series);

        let violations = evaluate(&angles);
        assert!(violations.iter().all(|v| v.rule_name() != SPINE_SUDDEN_CHANGE));
    }

    #[test]
    fn test_separate_runs_each_reported() {
        let angles = back(&[
            100.0, 125.0, 100.0, 100.0, 100.0, 100.0, 125.0, 100.0, 100.0,
        ]);
        let sudden: Vec<_> = evaluate(&angles)
            .into_iter()
            .filter(|v| v.rule_name() == SPINE_SUDDEN_CHANGE)
            .collect();

        assert_eq!(sudden.len(), 2);
        assert_eq!(sudden[0].frames(), Some(&[0, 1, 2][..]));
        assert_eq!(sudden[1].frames(), Some(&[5, 6, 7][..]));
    }

    #[test]
    fn test_excessive_range() {
        // Gradual drift: no sudden changes, range 40°
        let angles = back(&[90.0, 100.0, 110.0, 120.0, 130.0]);
        let violations = evaluate(&angles);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_name(), EXCESSIVE_SPINE_MOVEMENT);
        assert_eq!(violations[0].severity(), Severity::High);
        assert_eq!(violations[0].score_penalty(), 20);
        assert_eq!(violations[0].detail("back_range"), Some(40.0));
    }

    #[test]
    fn test_butt_wink_needs_deep_hip_and_back_change() {
        let mut angles = back(&[150.0, 160.0, 170.0, 182.0]);
        angles.insert(AngleName::HipLeft, AngleSeries::from_values(&[80.0, 65.0, 55.0, 70.0]));

        let violations = evaluate(&angles);
        let names: Vec<_> = violations.iter().map(|v| v.rule_name()).collect();
        assert_eq!(names, vec![BUTT_WINK]);
        assert_eq!(violations[0].detail("min_hip_angle"), Some(55.0));
        assert_eq!(violations[0].score_penalty(), 25);

        // Hip never below 60: no wink
        angles.insert(AngleName::HipLeft, AngleSeries::from_values(&[80.0, 65.0, 61.0, 70.0]));
        assert!(evaluate(&angles).is_empty());
    }

    #[test]
    fn test_all_three_checks_fire_in_order() {
        let mut angles = back(&[100.0, 125.0, 150.0, 175.0, 175.0]);
        angles.insert(AngleName::HipRight, AngleSeries::from_values(&[50.0; 5]));

        let names: Vec<_> = evaluate(&angles)
            .iter()
            .map(|v| v.rule_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![SPINE_SUDDEN_CHANGE, BUTT_WINK, EXCESSIVE_SPINE_MOVEMENT]
        );
    }

    #[test]
    fn test_one_sided_back_signal() {
        let angles = AngleSet::new()
            .with(AngleName::BackRight, AngleSeries::from_values(&[90.0, 100.0, 110.0, 120.0, 130.0]));
        let violations = evaluate(&angles);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_name(), EXCESSIVE_SPINE_MOVEMENT);
    }
}

//! Form analyzer - angle series in, form report out

use formscore_core::{
    AngleSet, FormReport, FormscoreResult, FrameCounts, ReportDetails, RuleConfig, SignalConfig,
    MAX_FEEDBACK_ITEMS,
};
use formscore_pose::AngleRecorder;
use formscore_rules::RuleEngine;
use formscore_signal::SignalConditioner;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{calculate_score, generate_feedback, generate_summary, is_passing};

/// Analyzer configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub signal: SignalConfig,
    pub rules: RuleConfig,
    /// Feedback lines kept in the report, at most [`MAX_FEEDBACK_ITEMS`]
    pub max_feedback_items: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            rules: RuleConfig::default(),
            max_feedback_items: MAX_FEEDBACK_ITEMS,
        }
    }
}

/// Runs the rule engine, scores the outcome and assembles the report
pub struct FormAnalyzer {
    engine: RuleEngine,
    max_feedback_items: usize,
}

impl FormAnalyzer {
    /// Create an analyzer, validating the signal parameters.
    ///
    /// A feedback limit above [`MAX_FEEDBACK_ITEMS`] is clamped to it.
    pub fn new(config: AnalysisConfig) -> FormscoreResult<Self> {
        let signal = SignalConditioner::new(config.signal)?;

        if config.max_feedback_items > MAX_FEEDBACK_ITEMS {
            warn!(
                requested = config.max_feedback_items,
                max = MAX_FEEDBACK_ITEMS,
                "feedback limit clamped"
            );
        }

        Ok(Self {
            engine: RuleEngine::new(&config.rules, signal),
            max_feedback_items: config.max_feedback_items.min(MAX_FEEDBACK_ITEMS),
        })
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Analyze one clip's angle series
    pub fn analyze(&self, angles: &AngleSet, counts: FrameCounts) -> FormscoreResult<FormReport> {
        let violations = self.engine.evaluate(angles)?;

        let score = calculate_score(&violations);
        let passed = is_passing(score);
        let feedback = generate_feedback(&violations, self.max_feedback_items);
        let summary = generate_summary(&violations, score);

        info!(
            score,
            passed,
            violations = violations.len(),
            frames = counts.frames_processed,
            poses = counts.poses_detected,
            "form analysis complete"
        );

        FormReport::new(
            u32::from(score),
            violations,
            feedback,
            ReportDetails::new(summary, counts),
        )
    }

    /// Analyze everything a recorder has collected
    pub fn analyze_recording(&self, recorder: AngleRecorder) -> FormscoreResult<FormReport> {
        let (angles, counts) = recorder.finish();
        self.analyze(&angles, counts)
    }
}

impl Default for FormAnalyzer {
    fn default() -> Self {
        Self {
            engine: RuleEngine::default(),
            max_feedback_items: MAX_FEEDBACK_ITEMS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use formscore_core::{AngleName, AngleSeries, FormscoreError, Severity};

    fn clip(knee: &[f64], hip: &[f64], back: &[f64]) -> AngleSet {
        AngleSet::new()
            .with(AngleName::KneeLeft, AngleSeries::from_values(knee))
            .with(AngleName::KneeRight, AngleSeries::from_values(knee))
            .with(AngleName::HipLeft, AngleSeries::from_values(hip))
            .with(AngleName::HipRight, AngleSeries::from_values(hip))
            .with(AngleName::BackLeft, AngleSeries::from_values(back))
            .with(AngleName::BackRight, AngleSeries::from_values(back))
    }

    #[test]
    fn test_clean_rep_scores_perfect() {
        let knee = [130.0, 120.0, 90.0, 65.0, 65.0, 90.0, 120.0, 130.0];
        let angles = clip(&knee, &[90.0; 8], &[90.0; 8]);

        let report = FormAnalyzer::default()
            .analyze(&angles, FrameCounts::new(8, 8))
            .unwrap();

        assert_eq!(report.score(), 100);
        assert!(report.passed());
        assert!(report.feedback_summary().is_empty());
        assert_eq!(report.violations().len(), 2);
        assert_eq!(report.summary(), "Excellent form! Keep it up.");
        assert_eq!(report.details().frames_processed, 8);
    }

    #[test]
    fn test_butt_wink_fails() {
        // Deep hips with a back angle that jumps 25° per frame
        let knee = [150.0, 120.0, 90.0, 70.0, 90.0, 120.0];
        let hip = [120.0, 90.0, 60.0, 50.0, 60.0, 90.0];
        let back = [90.0, 100.0, 125.0, 150.0, 125.0, 100.0];

        let report = FormAnalyzer::default()
            .analyze(&clip(&knee, &hip, &back), FrameCounts::new(6, 6))
            .unwrap();

        assert!(report.has_critical_issues());
        assert!(!report.passed());
        assert_eq!(
            report.summary(),
            "Critical safety issues detected - address immediately"
        );
        assert_eq!(report.count_failed(Severity::Critical), 2);
        // Critical feedback always comes first
        let first = report.feedback_summary().first().unwrap();
        assert!(report
            .critical_violations()
            .iter()
            .any(|v| v.feedback() == first));
    }

    #[test]
    fn test_feedback_limit_configurable() {
        let knee = [150.0, 120.0, 90.0, 70.0, 90.0, 120.0];
        let hip = [120.0, 90.0, 60.0, 50.0, 60.0, 90.0];
        let back = [90.0, 100.0, 125.0, 150.0, 125.0, 100.0];

        let analyzer = FormAnalyzer::new(AnalysisConfig {
            max_feedback_items: 1,
            ..Default::default()
        })
        .unwrap();
        let report = analyzer
            .analyze(&clip(&knee, &hip, &back), FrameCounts::new(6, 6))
            .unwrap();

        assert_eq!(report.feedback_summary().len(), 1);
    }

    #[test]
    fn test_feedback_limit_clamped() {
        // Three sudden-change runs, butt wink, excessive spine range,
        // excessive depth and excessive hip flexion: seven failures
        let knee = [150.0, 130.0, 100.0, 60.0, 30.0, 60.0, 100.0, 130.0, 150.0];
        let hip = [150.0, 130.0, 100.0, 60.0, 30.0, 60.0, 100.0, 130.0, 150.0];
        let back = [90.0, 115.0, 140.0, 140.0, 115.0, 90.0, 90.0, 115.0, 140.0];

        let analyzer = FormAnalyzer::new(AnalysisConfig {
            max_feedback_items: 50,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(analyzer.max_feedback_items, MAX_FEEDBACK_ITEMS);

        let report = analyzer
            .analyze(&clip(&knee, &hip, &back), FrameCounts::new(9, 9))
            .unwrap();

        assert_eq!(report.failed_violations().len(), 7);
        assert_eq!(report.feedback_summary().len(), MAX_FEEDBACK_ITEMS);
        assert!(!report.passed());
    }

    #[test]
    fn test_empty_clip() {
        let report = FormAnalyzer::default()
            .analyze(&AngleSet::new(), FrameCounts::default())
            .unwrap();

        assert_eq!(report.score(), 100);
        assert!(report.violations().is_empty());
    }

    #[test]
    fn test_invalid_signal_config() {
        let config = AnalysisConfig {
            signal: SignalConfig {
                trim_fraction: 0.6,
                ..SignalConfig::DEFAULT
            },
            ..Default::default()
        };

        assert!(matches!(
            FormAnalyzer::new(config),
            Err(FormscoreError::InvalidTrimFraction(_))
        ));
    }

    #[test]
    fn test_analyze_recording() {
        let mut recorder = AngleRecorder::default();
        for knee in [130.0, 90.0, 65.0, 90.0, 130.0] {
            let row: BTreeMap<_, _> = [
                (AngleName::KneeLeft, Some(knee)),
                (AngleName::KneeRight, Some(knee)),
                (AngleName::HipLeft, Some(90.0)),
                (AngleName::HipRight, Some(90.0)),
            ]
            .into_iter()
            .collect();
            recorder.record_angles(row);
        }
        recorder.record(None);

        let report = FormAnalyzer::default().analyze_recording(recorder).unwrap();
        assert_eq!(report.score(), 100);
        assert_eq!(report.details().frames_processed, 6);
        assert_eq!(report.details().poses_detected, 5);
    }

    #[test]
    fn test_report_serializes() {
        let knee = [130.0, 120.0, 90.0, 65.0, 65.0, 90.0, 120.0, 130.0];
        let report = FormAnalyzer::default()
            .analyze(&clip(&knee, &[90.0; 8], &[90.0; 8]), FrameCounts::new(8, 8))
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"], 100);
        assert_eq!(json["passed"], true);
        assert_eq!(json["violations"][0]["rule_name"], "depth_ideal");
        assert_eq!(json["violations"][0]["severity"], "low");
        assert_eq!(json["details"]["poses_detected"], 8);
    }

    #[test]
    fn test_config_partial_json() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"max_feedback_items":3}"#).unwrap();
        assert_eq!(config.max_feedback_items, 3);
        assert_eq!(config.signal, SignalConfig::DEFAULT);
    }
}

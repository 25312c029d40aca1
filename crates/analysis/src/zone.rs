//! Zone comparison: is the latest action unusually long or slow?
//!
//! The most recent action (the *candidate*) is compared against every
//! action before it (the *baseline*), each set measured as one combined run.
//! Two ratios come out of the comparison and each is checked against its own
//! threshold; there is no combined score.

use std::slice;

use dawdle_common::config::AnalysisConfig;
use dawdle_model::signal::ZoneVerdict;

use crate::metrics::Metrics;
use crate::segment::Action;

/// Why a comparison produced no verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// Fewer than one baseline plus one candidate action.
    #[error("insufficient history: {actions} completed action(s), need at least 2")]
    InsufficientHistory { actions: usize },

    /// A ratio would divide by zero or by a missing velocity.
    #[error("degenerate metrics: {detail}")]
    DegenerateMetrics { detail: &'static str },
}

/// Reduced metrics of both sides plus the verdict, or why there is none.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub baseline: Option<Metrics>,
    pub candidate: Option<Metrics>,
    pub verdict: Result<ZoneVerdict, SkipReason>,
}

/// Compares candidate metrics against a baseline.
#[derive(Debug, Clone, Copy)]
pub struct ZoneComparator {
    emotional_distance: f64,
    emotional_velocity: f64,
}

impl Default for ZoneComparator {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl ZoneComparator {
    /// Create a comparator with explicit thresholds.
    pub fn new(emotional_distance: f64, emotional_velocity: f64) -> Self {
        Self {
            emotional_distance,
            emotional_velocity,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.emotional_distance, config.emotional_velocity)
    }

    /// Compare the last action against all actions before it.
    pub fn compare_latest(&self, actions: &[Action<'_>]) -> Comparison {
        match actions.split_last() {
            Some((candidate, baseline)) => self.compare(baseline, slice::from_ref(candidate)),
            None => self.compare(&[], &[]),
        }
    }

    /// Compare a candidate set against a baseline set.
    ///
    /// Each non-empty set is reduced to metrics even when no verdict can be
    /// produced.
    pub fn compare(&self, baseline: &[Action<'_>], candidate: &[Action<'_>]) -> Comparison {
        let baseline_metrics = (!baseline.is_empty()).then(|| Metrics::of_actions(baseline));
        let candidate_metrics = (!candidate.is_empty()).then(|| Metrics::of_actions(candidate));

        let verdict = match (&baseline_metrics, &candidate_metrics) {
            (Some(b), Some(c)) => self.compare_metrics(b, c),
            _ => Err(SkipReason::InsufficientHistory {
                actions: baseline.len() + candidate.len(),
            }),
        };

        Comparison {
            baseline: baseline_metrics,
            candidate: candidate_metrics,
            verdict,
        }
    }

    /// Compare already-reduced metrics.
    pub fn compare_metrics(
        &self,
        baseline: &Metrics,
        candidate: &Metrics,
    ) -> Result<ZoneVerdict, SkipReason> {
        if baseline.distance <= 0.0 {
            return Err(SkipReason::DegenerateMetrics {
                detail: "baseline distance is zero",
            });
        }
        let baseline_velocity = match baseline.velocity {
            Some(v) if v > 0.0 => v,
            _ => {
                return Err(SkipReason::DegenerateMetrics {
                    detail: "baseline has no velocity",
                })
            }
        };
        let candidate_velocity = candidate.velocity.ok_or(SkipReason::DegenerateMetrics {
            detail: "candidate has no velocity",
        })?;

        let distance_ratio = candidate.distance / baseline.distance;
        let velocity_ratio = candidate_velocity / baseline_velocity;
        if !(distance_ratio.is_finite() && velocity_ratio.is_finite()) {
            return Err(SkipReason::DegenerateMetrics {
                detail: "ratio is not finite",
            });
        }

        Ok(ZoneVerdict {
            distance_ratio,
            velocity_ratio,
            distance_in_zone: distance_ratio > self.emotional_distance,
            velocity_in_zone: velocity_ratio < self.emotional_velocity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dawdle_model::sample::Sample;

    fn metrics(distance: f64, duration_ms: u64) -> Metrics {
        Metrics {
            distance,
            duration_ms,
            velocity: (duration_ms > 0).then(|| distance / duration_ms as f64),
        }
    }

    #[test]
    fn test_longer_path_is_in_distance_zone() {
        let verdict = ZoneComparator::default()
            .compare_metrics(&metrics(100.0, 1000), &metrics(140.0, 1000))
            .unwrap();

        assert!((verdict.distance_ratio - 1.4).abs() < 1e-12);
        assert!(verdict.distance_in_zone);
        assert!((verdict.velocity_ratio - 1.4).abs() < 1e-12);
        assert!(!verdict.velocity_in_zone);
    }

    #[test]
    fn test_slower_motion_is_in_velocity_zone() {
        let verdict = ZoneComparator::default()
            .compare_metrics(&metrics(200.0, 1000), &metrics(150.0, 1000))
            .unwrap();

        assert!((verdict.velocity_ratio - 0.75).abs() < 1e-12);
        assert!(verdict.velocity_in_zone);
        assert!(!verdict.distance_in_zone);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let comparator = ZoneComparator::new(1.5, 0.5);
        let verdict = comparator
            .compare_metrics(&metrics(100.0, 1000), &metrics(150.0, 3000))
            .unwrap();
        assert_eq!(verdict.distance_ratio, 1.5);
        assert_eq!(verdict.velocity_ratio, 0.5);
        assert!(!verdict.distance_in_zone);
        assert!(!verdict.velocity_in_zone);
    }

    #[test]
    fn test_degenerate_baseline_is_skipped() {
        let comparator = ZoneComparator::default();

        let err = comparator
            .compare_metrics(&Metrics::EMPTY, &metrics(10.0, 100))
            .unwrap_err();
        assert!(matches!(err, SkipReason::DegenerateMetrics { .. }));

        let still = metrics(0.0, 500);
        let err = comparator.compare_metrics(&still, &metrics(10.0, 100));
        assert!(err.is_err());

        let teleport = Metrics {
            distance: 50.0,
            duration_ms: 0,
            velocity: None,
        };
        let err = comparator.compare_metrics(&teleport, &metrics(10.0, 100));
        assert!(err.is_err());
    }

    #[test]
    fn test_single_sample_candidate_is_skipped() {
        let err = ZoneComparator::default()
            .compare_metrics(&metrics(100.0, 1000), &Metrics::EMPTY)
            .unwrap_err();
        assert_eq!(
            err,
            SkipReason::DegenerateMetrics {
                detail: "candidate has no velocity"
            }
        );
    }

    #[test]
    fn test_compare_latest_needs_two_actions() {
        let data = vec![Sample::new(0.0, 0.0, 0), Sample::new(60.0, 80.0, 1000)];
        let only = [Action::new(&data)];

        let comparison = ZoneComparator::default().compare_latest(&only);
        assert_eq!(
            comparison.verdict,
            Err(SkipReason::InsufficientHistory { actions: 1 })
        );
        assert_eq!(comparison.baseline, None);
        assert_eq!(comparison.candidate.unwrap().distance, 100.0);

        let empty = ZoneComparator::default().compare_latest(&[]);
        assert_eq!(
            empty.verdict,
            Err(SkipReason::InsufficientHistory { actions: 0 })
        );
        assert_eq!(empty.candidate, None);
    }

    #[test]
    fn test_compare_latest_uses_all_previous_actions_as_baseline() {
        let data = vec![
            Sample::new(0.0, 0.0, 0),
            Sample::new(60.0, 80.0, 1000),
            Sample::new(60.0, 80.0, 2000),
            Sample::new(120.0, 160.0, 3000),
            Sample::new(0.0, 0.0, 5000),
            Sample::new(84.0, 112.0, 6000),
        ];
        let actions = [
            Action::new(&data[0..2]),
            Action::new(&data[2..4]),
            Action::new(&data[4..6]),
        ];

        // Baseline runs 0..4 as one path: 100 + 0 + 100 over 3000ms.
        let comparison = ZoneComparator::default().compare_latest(&actions);
        assert_eq!(comparison.baseline.unwrap().distance, 200.0);
        assert_eq!(comparison.baseline.unwrap().duration_ms, 3000);
        let verdict = comparison.verdict.unwrap();
        assert!((verdict.distance_ratio - 0.7).abs() < 1e-12);
        assert!((verdict.velocity_ratio - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_skip_reason_messages() {
        let reason = SkipReason::InsufficientHistory { actions: 1 };
        assert_eq!(
            reason.to_string(),
            "insufficient history: 1 completed action(s), need at least 2"
        );
    }
}

//! Segment → measure → compare, as one pass over a buffer snapshot.

use dawdle_common::config::AnalysisConfig;
use dawdle_model::sample::Sample;
use dawdle_model::signal::ZoneVerdict;

use crate::metrics::Metrics;
use crate::segment::ActionSegmenter;
use crate::zone::{Comparison, SkipReason, ZoneComparator};

/// Result of one pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Number of settled actions found in the snapshot.
    pub actions: usize,

    /// Combined metrics of every action before the latest, if any.
    pub baseline: Option<Metrics>,

    /// Metrics of the latest action, if any.
    pub candidate: Option<Metrics>,

    /// The verdict, or why none was produced.
    pub verdict: Result<ZoneVerdict, SkipReason>,
}

impl PipelineOutcome {
    /// The verdict if one was produced.
    pub fn verdict(&self) -> Option<&ZoneVerdict> {
        self.verdict.as_ref().ok()
    }
}

/// The full analysis pass run when the debounced trigger fires.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    segmenter: ActionSegmenter,
    comparator: ZoneComparator,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            segmenter: ActionSegmenter::new(config.action_delay_ms),
            comparator: ZoneComparator::from_config(config),
        }
    }

    pub fn segmenter(&self) -> &ActionSegmenter {
        &self.segmenter
    }

    /// Run the pipeline over a settled snapshot.
    ///
    /// The caller guarantees that motion has been quiet for longer than the
    /// action delay, so the trailing run is treated as a completed action.
    pub fn run(&self, samples: &[Sample]) -> PipelineOutcome {
        let actions = self.segmenter.segment_settled(samples);

        let Comparison {
            baseline,
            candidate,
            verdict,
        } = self.comparator.compare_latest(&actions);

        match &verdict {
            Ok(v) => tracing::debug!(
                actions = actions.len(),
                distance_ratio = v.distance_ratio,
                velocity_ratio = v.velocity_ratio,
                distance_in_zone = v.distance_in_zone,
                velocity_in_zone = v.velocity_in_zone,
                "Zone verdict produced"
            ),
            Err(reason) => tracing::debug!(
                actions = actions.len(),
                reason = %reason,
                "No zone verdict"
            ),
        }

        PipelineOutcome {
            actions: actions.len(),
            baseline,
            candidate,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(f64, f64, u64)]) -> Vec<Sample> {
        points
            .iter()
            .map(|&(x, y, t)| Sample::new(x, y, t))
            .collect()
    }

    #[test]
    fn test_empty_snapshot() {
        let outcome = Pipeline::default().run(&[]);
        assert_eq!(outcome.actions, 0);
        assert_eq!(outcome.baseline, None);
        assert_eq!(outcome.candidate, None);
        assert_eq!(
            outcome.verdict,
            Err(SkipReason::InsufficientHistory { actions: 0 })
        );
    }

    #[test]
    fn test_single_action_has_no_verdict() {
        let data = samples(&[(0.0, 0.0, 0), (10.0, 0.0, 16), (20.0, 0.0, 32)]);
        let outcome = Pipeline::default().run(&data);
        assert_eq!(outcome.actions, 1);
        assert!(outcome.candidate.is_some());
        assert!(outcome.verdict().is_none());
    }

    #[test]
    fn test_two_actions_produce_verdict() {
        // Baseline: 100px in 400ms. Candidate, after a pause: 140px in 400ms.
        let data = samples(&[
            (0.0, 0.0, 0),
            (30.0, 40.0, 200),
            (60.0, 80.0, 400),
            (0.0, 0.0, 2000),
            (42.0, 56.0, 2200),
            (84.0, 112.0, 2400),
        ]);
        let outcome = Pipeline::default().run(&data);

        assert_eq!(outcome.actions, 2);
        let verdict = outcome.verdict().copied().unwrap();
        assert!((verdict.distance_ratio - 1.4).abs() < 1e-9);
        assert!(verdict.distance_in_zone);
        assert!(!verdict.velocity_in_zone);
        assert_eq!(outcome.baseline.unwrap().duration_ms, 400);
        assert_eq!(outcome.candidate.unwrap().duration_ms, 400);
    }
}

//! Movement metrics for actions and sets of actions.

use dawdle_model::sample::Sample;

use crate::segment::Action;

/// Path length, elapsed time, and average speed of a run of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Summed Euclidean distance between consecutive samples (pixels).
    pub distance: f64,

    /// Summed timestamp deltas between consecutive samples (ms).
    pub duration_ms: u64,

    /// `distance / duration_ms` in pixels per ms; `None` when no time elapsed.
    pub velocity: Option<f64>,
}

impl Metrics {
    /// Metrics of a run with fewer than two samples.
    pub const EMPTY: Metrics = Metrics {
        distance: 0.0,
        duration_ms: 0,
        velocity: None,
    };

    /// Reduce consecutive sample pairs into metrics.
    ///
    /// Velocity is total distance over total duration, not a mean of
    /// per-step speeds.
    pub fn from_samples<'s, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'s Sample>,
    {
        let mut distance = 0.0;
        let mut duration_ms: u64 = 0;
        let mut previous: Option<&Sample> = None;

        for sample in samples {
            if let Some(prev) = previous {
                distance += prev.distance_to(sample);
                duration_ms = duration_ms.saturating_add(prev.gap_to(sample));
            }
            previous = Some(sample);
        }

        let velocity = (duration_ms > 0).then(|| distance / duration_ms as f64);

        Self {
            distance,
            duration_ms,
            velocity,
        }
    }

    /// Metrics of a single action.
    pub fn of_action(action: &Action<'_>) -> Self {
        Self::from_samples(action.samples())
    }

    /// Metrics of a set of actions treated as one combined action.
    ///
    /// Samples are concatenated in order, so the step from one action's last
    /// sample to the next action's first sample (including the pause) counts
    /// towards distance and duration.
    pub fn of_actions(actions: &[Action<'_>]) -> Self {
        Self::from_samples(actions.iter().flat_map(|action| action.samples()))
    }

    /// Whether this run carries a usable speed.
    pub fn has_velocity(&self) -> bool {
        self.velocity.is_some()
    }
}

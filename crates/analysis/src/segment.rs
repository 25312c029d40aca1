//! Action segmentation: splitting the sample stream at inactivity gaps.
//!
//! # Algorithm
//!
//! 1. Walk the samples in arrival order, remembering the previous
//!    timestamp (0 before the first sample) and where the current action
//!    started.
//! 2. When the gap to the previous sample exceeds the action delay, the run
//!    `[start, i)` becomes a completed action and a new run starts at `i`.
//!    Empty runs are dropped, so the sentinel gap before the first sample
//!    never produces an action.
//! 3. The run still open at the end of the buffer is the *pending tail*.
//!    Whether it counts as complete is the caller's decision: the debounced
//!    trigger only runs after a quiet period longer than the action delay,
//!    so it uses [`ActionSegmenter::segment_settled`].

use std::ops::Range;

use dawdle_model::sample::{Sample, TimestampMs};

/// A contiguous run of samples treated as one gesture.
///
/// Borrowed view into the sample buffer, bounded by two buffer indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action<'a> {
    samples: &'a [Sample],
    start: usize,
}

impl<'a> Action<'a> {
    /// View an entire slice as a single action starting at index 0.
    pub fn new(samples: &'a [Sample]) -> Self {
        Self { samples, start: 0 }
    }

    fn within(buffer: &'a [Sample], range: Range<usize>) -> Self {
        Self {
            start: range.start,
            samples: &buffer[range],
        }
    }

    /// The samples of this action, oldest first.
    pub fn samples(&self) -> &'a [Sample] {
        self.samples
    }

    /// Buffer indices covered by this action.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.samples.len()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the first sample.
    pub fn start_ms(&self) -> Option<TimestampMs> {
        self.samples.first().map(|s| s.timestamp_ms)
    }

    /// Timestamp of the last sample.
    pub fn end_ms(&self) -> Option<TimestampMs> {
        self.samples.last().map(|s| s.timestamp_ms)
    }
}

/// Splits a sample stream into actions using an inactivity gap.
#[derive(Debug, Clone, Copy)]
pub struct ActionSegmenter {
    action_delay_ms: u64,
}

impl ActionSegmenter {
    /// Create a segmenter that splits on gaps strictly longer than `action_delay_ms`.
    pub fn new(action_delay_ms: u64) -> Self {
        Self { action_delay_ms }
    }

    /// Gap threshold in milliseconds.
    pub fn action_delay_ms(&self) -> u64 {
        self.action_delay_ms
    }

    /// Actions closed by an observed gap, oldest first.
    ///
    /// The trailing run is left out; see [`Self::pending_tail`].
    pub fn segment<'a>(&self, samples: &'a [Sample]) -> Vec<Action<'a>> {
        let (closed, _) = self.scan(samples);
        closed
            .into_iter()
            .map(|range| Action::within(samples, range))
            .collect()
    }

    /// All actions, treating the trailing run as complete.
    pub fn segment_settled<'a>(&self, samples: &'a [Sample]) -> Vec<Action<'a>> {
        let (closed, tail_start) = self.scan(samples);
        let mut actions: Vec<Action<'a>> = closed
            .into_iter()
            .map(|range| Action::within(samples, range))
            .collect();
        if tail_start < samples.len() {
            actions.push(Action::within(samples, tail_start..samples.len()));
        }
        actions
    }

    /// The run still open at the end of the buffer, if any.
    pub fn pending_tail<'a>(&self, samples: &'a [Sample]) -> Option<Action<'a>> {
        let (_, tail_start) = self.scan(samples);
        (tail_start < samples.len()).then(|| Action::within(samples, tail_start..samples.len()))
    }

    /// Closed action ranges plus the start index of the open tail.
    fn scan(&self, samples: &[Sample]) -> (Vec<Range<usize>>, usize) {
        let mut closed = Vec::new();
        let mut start = 0;
        let mut previous_ms: TimestampMs = 0;

        for (i, sample) in samples.iter().enumerate() {
            let gap = sample.timestamp_ms.saturating_sub(previous_ms);
            if gap > self.action_delay_ms {
                if i > start {
                    closed.push(start..i);
                }
                start = i;
            }
            previous_ms = sample.timestamp_ms;
        }

        (closed, start)
    }
}

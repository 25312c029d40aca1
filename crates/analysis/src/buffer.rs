//! Append-only sample buffer for one session.

use dawdle_model::sample::Sample;

/// Ordered pointer samples in arrival order.
///
/// The buffer only grows for the lifetime of the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
}

impl SampleBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample, preserving arrival order.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Read-only view of every sample recorded so far.
    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recently appended sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

impl Extend<Sample> for SampleBuffer {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl FromIterator<Sample> for SampleBuffer {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

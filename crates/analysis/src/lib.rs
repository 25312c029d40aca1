//! Dawdle Analysis
//!
//! Turns a session's pointer samples into a zone verdict:
//! - **Buffer:** Append-only store of samples in arrival order
//! - **Segmentation:** Split the stream into actions at inactivity gaps
//! - **Metrics:** Distance, duration, and velocity of an action or set of actions
//! - **Zone comparison:** Latest action versus the baseline of all earlier ones
//!
//! This crate is pure computation. It does no I/O and keeps no timers.
//! All inputs are data; all outputs are data.

pub mod buffer;
pub mod metrics;
pub mod pipeline;
pub mod segment;
pub mod zone;

pub use buffer::SampleBuffer;
pub use metrics::Metrics;
pub use pipeline::{Pipeline, PipelineOutcome};
pub use segment::{Action, ActionSegmenter};
pub use zone::{Comparison, SkipReason, ZoneComparator};

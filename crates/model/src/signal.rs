//! Zone verdicts and the `dawdle` signal that carries them.

use serde::{Deserialize, Serialize};

use crate::sample::TimestampMs;

/// Name of the signal emitted when a verdict is produced.
pub const SIGNAL_NAME: &str = "dawdle";

/// Outcome of comparing the latest action against the baseline.
///
/// The two flags are independent; consumers decide how to read the pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneVerdict {
    /// Candidate distance over baseline distance.
    pub distance_ratio: f64,

    /// Candidate velocity over baseline velocity.
    pub velocity_ratio: f64,

    /// The candidate travelled notably farther than the baseline.
    pub distance_in_zone: bool,

    /// The candidate moved notably slower than the baseline.
    pub velocity_in_zone: bool,
}

impl ZoneVerdict {
    /// Whether either metric crossed its threshold.
    pub fn any_in_zone(&self) -> bool {
        self.distance_in_zone || self.velocity_in_zone
    }
}

/// A named signal delivered to outside observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name, always [`SIGNAL_NAME`] for verdicts.
    pub name: String,

    /// Session time at which the pipeline fired.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    /// The verdict payload.
    pub verdict: ZoneVerdict,
}

impl Signal {
    /// Wrap a verdict in a `dawdle` signal.
    pub fn dawdle(timestamp_ms: TimestampMs, verdict: ZoneVerdict) -> Self {
        Self {
            name: SIGNAL_NAME.to_string(),
            timestamp_ms,
            verdict,
        }
    }
}

//! Pointer samples and the raw events they are built from.
//!
//! Samples are recorded in append-only JSONL form, one object per line,
//! optionally preceded by a `#`-prefixed header line.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in milliseconds since session start.
pub type TimestampMs = u64;

/// A single recorded pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Horizontal position in pixels.
    pub x: f64,

    /// Vertical position in pixels.
    pub y: f64,

    /// Monotonic milliseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,
}

impl Sample {
    /// Create a sample.
    pub fn new(x: f64, y: f64, timestamp_ms: TimestampMs) -> Self {
        Self { x, y, timestamp_ms }
    }

    /// Euclidean distance to another sample, in pixels.
    pub fn distance_to(&self, other: &Sample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Milliseconds from this sample to a later one.
    ///
    /// Out-of-order pairs yield zero rather than wrapping.
    pub fn gap_to(&self, later: &Sample) -> u64 {
        later.timestamp_ms.saturating_sub(self.timestamp_ms)
    }
}

/// A raw pointer-movement event as delivered by an input source.
///
/// Either coordinate may be missing; such events never become samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// Why a pointer event was refused at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("pointer event is missing the {0} coordinate")]
    MissingCoordinate(Axis),

    #[error("pointer event has a non-finite {0} coordinate")]
    NonFinite(Axis),
}

/// Coordinate axis, for rejection diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

impl PointerEvent {
    /// Create an event with both coordinates present.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Extract the pointer position if both coordinates are usable numbers.
    pub fn position(&self) -> Result<(f64, f64), RejectReason> {
        let x = self.x.ok_or(RejectReason::MissingCoordinate(Axis::X))?;
        let y = self.y.ok_or(RejectReason::MissingCoordinate(Axis::Y))?;
        if !x.is_finite() {
            return Err(RejectReason::NonFinite(Axis::X));
        }
        if !y.is_finite() {
            return Err(RejectReason::NonFinite(Axis::Y));
        }
        Ok((x, y))
    }

    /// Stamp the event with its receipt time, producing a sample.
    pub fn into_sample(self, timestamp_ms: TimestampMs) -> Result<Sample, RejectReason> {
        let (x, y) = self.position()?;
        Ok(Sample::new(x, y, timestamp_ms))
    }
}

/// Metadata written as the first (`#`-prefixed) line of a sample recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (RFC 3339).
    pub epoch_wall: String,

    /// Action delay in effect while recording (ms).
    pub action_delay_ms: u64,
}

/// Parse samples from JSONL content (one JSON object per line).
///
/// Blank lines and `#` header/comment lines are skipped.
pub fn parse_samples(jsonl: &str) -> Result<Vec<Sample>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_wire_format() {
        let sample = Sample::new(3.0, 4.0, 50);
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"x":3.0,"y":4.0,"t":50}"#);
    }

    #[test]
    fn test_distance_and_gap() {
        let a = Sample::new(0.0, 0.0, 0);
        let b = Sample::new(3.0, 4.0, 50);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.gap_to(&b), 50);
        assert_eq!(b.gap_to(&a), 0);
    }

    #[test]
    fn test_pointer_event_rejections() {
        let missing: PointerEvent = serde_json::from_str(r#"{"x": 10.0}"#).unwrap();
        assert_eq!(
            missing.position(),
            Err(RejectReason::MissingCoordinate(Axis::Y))
        );

        let nan = PointerEvent {
            x: Some(f64::NAN),
            y: Some(1.0),
        };
        assert_eq!(nan.into_sample(0), Err(RejectReason::NonFinite(Axis::X)));

        let ok = PointerEvent::at(1.0, 2.0).into_sample(7).unwrap();
        assert_eq!(ok, Sample::new(1.0, 2.0, 7));
    }

    #[test]
    fn test_reject_reason_message() {
        let reason = RejectReason::MissingCoordinate(Axis::X);
        assert_eq!(
            reason.to_string(),
            "pointer event is missing the x coordinate"
        );
    }

    #[test]
    fn test_parse_samples_skips_header_and_blanks() {
        let content = concat!(
            "# {\"schema_version\":\"1.0\"}\n",
            "\n",
            "{\"t\":0,\"x\":0,\"y\":0}\n",
            "{\"t\":50,\"x\":3,\"y\":4}\n",
        );
        let samples = parse_samples(content).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Sample::new(3.0, 4.0, 50));
    }

    #[test]
    fn test_parse_samples_reports_bad_line() {
        assert!(parse_samples("{\"t\":0,\"x\":\"left\",\"y\":0}").is_err());
    }
}

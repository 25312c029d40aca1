//! Session clock for sample timestamps.
//!
//! Every Dawdle session is anchored to a monotonic epoch captured when the
//! session starts. Pointer samples are stamped with whole milliseconds
//! elapsed since that epoch, at the moment the core receives them.
//!
//! The clock is built on `tokio::time::Instant` so that paused-time tests
//! drive timestamps and debounce deadlines from the same source.

use std::time::Duration;

use tokio::time::Instant;

/// A session clock that provides monotonic millisecond timestamps relative
/// to a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a clock from a known epoch.
    pub fn from_epoch(epoch: Instant, wall: String) -> Self {
        Self {
            epoch,
            epoch_wall: wall,
        }
    }

    /// Milliseconds elapsed since session start.
    pub fn elapsed_ms(&self) -> u64 {
        Self::duration_to_ms(self.epoch.elapsed())
    }

    /// Session-relative timestamp of an arbitrary instant.
    ///
    /// Instants before the epoch clamp to zero.
    pub fn timestamp_of(&self, instant: Instant) -> u64 {
        Self::duration_to_ms(instant.saturating_duration_since(self.epoch))
    }

    /// The instant corresponding to a session-relative timestamp.
    pub fn instant_at(&self, timestamp_ms: u64) -> Instant {
        self.epoch + Duration::from_millis(timestamp_ms)
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    fn duration_to_ms(duration: Duration) -> u64 {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }
}

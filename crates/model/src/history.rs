//! Persisted session history.
//!
//! Each finished session appends one [`SessionRecord`] to the
//! [`SessionHistory`] stored under [`HISTORY_KEY`]. History is a record of
//! past sessions only; it never feeds the baseline of a live comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::signal::ZoneVerdict;

/// Stable key under which the history document is stored.
pub const HISTORY_KEY: &str = "dawdle.history";

/// Current history schema version.
pub const HISTORY_SCHEMA_VERSION: &str = "1.0";

/// Summary of one finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Wall-clock session start.
    pub started_at: DateTime<Utc>,

    /// Wall-clock session end.
    pub ended_at: DateTime<Utc>,

    /// Samples accepted into the buffer.
    pub samples: usize,

    /// Pointer events refused at ingestion.
    #[serde(default)]
    pub rejected: usize,

    /// Completed actions at the last pipeline run.
    pub actions: usize,

    /// Every verdict produced during the session, in order.
    #[serde(default)]
    pub verdicts: Vec<ZoneVerdict>,
}

impl SessionRecord {
    /// Number of verdicts with at least one metric in the zone.
    pub fn zone_hits(&self) -> usize {
        self.verdicts.iter().filter(|v| v.any_in_zone()).count()
    }
}

/// All recorded sessions, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    pub schema_version: String,

    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self {
            schema_version: HISTORY_SCHEMA_VERSION.to_string(),
            sessions: Vec::new(),
        }
    }
}

impl SessionHistory {
    /// Append a finished session.
    pub fn push(&mut self, record: SessionRecord) {
        self.sessions.push(record);
    }

    /// Parse a stored history document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

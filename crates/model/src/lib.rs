//! Dawdle Model
//!
//! Defines the core data contracts for Dawdle sessions:
//! - **Samples:** Timestamped pointer positions and the raw events they come from
//! - **Signals:** Zone verdicts and the named `dawdle` signal that carries them
//! - **History:** Per-session records persisted across sessions
//!
//! Coordinates are pixels as reported by the input source; timestamps are
//! monotonic milliseconds since session start.

pub mod history;
pub mod sample;
pub mod signal;

pub use history::*;
pub use sample::*;
pub use signal::*;

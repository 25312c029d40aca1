//! Signal emitters: where `dawdle` signals go once a verdict exists.
//!
//! Delivery is fire-and-forget. An emitter that cannot deliver logs the
//! failure and carries on; the session never sees an error.

use std::io::Write;

use tokio::sync::mpsc;

use dawdle_model::signal::Signal;

use crate::writer::JsonlWriter;

/// Consumer of `dawdle` signals.
pub trait SignalEmitter: Send {
    /// Deliver a signal. Must not block on the receiver.
    fn emit(&mut self, signal: &Signal);

    /// Emitter name for logging.
    fn name(&self) -> &str;
}

/// Discards every signal.
#[derive(Debug, Default)]
pub struct NullEmitter;

impl SignalEmitter for NullEmitter {
    fn emit(&mut self, _signal: &Signal) {}

    fn name(&self) -> &str {
        "null"
    }
}

/// Logs verdicts through `tracing`.
#[derive(Debug, Default)]
pub struct LogEmitter;

impl SignalEmitter for LogEmitter {
    fn emit(&mut self, signal: &Signal) {
        let v = &signal.verdict;
        tracing::info!(
            signal = %signal.name,
            t = signal.timestamp_ms,
            distance_ratio = v.distance_ratio,
            velocity_ratio = v.velocity_ratio,
            distance_in_zone = v.distance_in_zone,
            velocity_in_zone = v.velocity_in_zone,
            "Signal emitted"
        );
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Forwards signals to an unbounded tokio channel.
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<Signal>,
}

impl ChannelEmitter {
    /// Create an emitter together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Signal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SignalEmitter for ChannelEmitter {
    fn emit(&mut self, signal: &Signal) {
        if self.tx.send(signal.clone()).is_err() {
            tracing::debug!("Signal receiver dropped, discarding signal");
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}

/// Writes each signal as a JSON line, flushing immediately.
pub struct JsonlEmitter<W: Write + Send> {
    writer: JsonlWriter<W>,
}

impl<W: Write + Send> JsonlEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: JsonlWriter::new(sink, 1),
        }
    }
}

impl<W: Write + Send> SignalEmitter for JsonlEmitter<W> {
    fn emit(&mut self, signal: &Signal) {
        if let Err(e) = self.writer.write_line(signal) {
            tracing::warn!(error = %e, "Failed to write signal");
        }
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

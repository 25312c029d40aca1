//! Dawdle Tracker
//!
//! Runs a pointer session end to end: raw events come in, samples are
//! buffered, and the analysis pipeline runs once motion has settled.
//!
//! - **Session:** owns the sample buffer, pipeline, emitter, and history store
//! - **Debounce:** one pending deadline, replaced on every accepted sample
//! - **Emitters:** where `dawdle` signals go (channel, log, JSONL)
//! - **Stores:** key-value persistence for per-session records
//!
//! A single worker task owns the session. Producers only send events over a
//! channel, so the buffer has exactly one writer and one reader.

pub mod debounce;
pub mod emitter;
pub mod session;
pub mod store;
pub mod writer;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use dawdle_common::clock::SessionClock;
use dawdle_common::error::{DawdleError, DawdleResult};
use dawdle_model::history::SessionRecord;
use dawdle_model::sample::{PointerEvent, TimestampMs};

pub use debounce::Debouncer;
pub use emitter::{ChannelEmitter, JsonlEmitter, LogEmitter, NullEmitter, SignalEmitter};
pub use session::{Firing, Session};
pub use store::{HistoryStore, JsonFileStore, MemoryStore};

/// A pointer event stamped with the session time it reached the core.
#[derive(Debug, Clone, Copy)]
struct Received {
    event: PointerEvent,
    timestamp_ms: TimestampMs,
}

/// Producer-side handle to a running session worker.
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Received>,
    task: JoinHandle<SessionRecord>,
    clock: SessionClock,
}

impl SessionHandle {
    /// Hand a pointer event to the session, stamped now.
    ///
    /// Returns the receipt timestamp, or `None` if the worker has stopped.
    pub fn record(&self, event: PointerEvent) -> Option<TimestampMs> {
        let timestamp_ms = self.clock.elapsed_ms();
        self.tx
            .send(Received {
                event,
                timestamp_ms,
            })
            .ok()
            .map(|_| timestamp_ms)
    }

    /// The clock samples are stamped against.
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Stop accepting events, run any pending analysis, and finish the session.
    pub async fn finish(self) -> DawdleResult<SessionRecord> {
        drop(self.tx);
        self.task
            .await
            .map_err(|e| DawdleError::Other(anyhow::anyhow!("Session worker failed: {e}")))
    }
}

/// Spawn the worker that owns `session` for its whole lifetime.
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(session: Session) -> SessionHandle {
    let clock = SessionClock::start();
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_worker(session, clock.clone(), rx));
    SessionHandle { tx, task, clock }
}

async fn run_worker(
    mut session: Session,
    clock: SessionClock,
    mut rx: mpsc::UnboundedReceiver<Received>,
) -> SessionRecord {
    let mut debouncer = Debouncer::new(session.config().debounce_window_ms);
    tracing::info!(
        debounce_window_ms = debouncer.window_ms(),
        epoch = %clock.epoch_wall(),
        "Session worker started"
    );

    loop {
        let deadline = debouncer.deadline().map(|ms| clock.instant_at(ms));

        // Queued events are stamped before any deadline that is also ready.
        tokio::select! {
            biased;

            received = rx.recv() => match received {
                Some(Received { event, timestamp_ms }) => {
                    session.arrive(&mut debouncer, event, timestamp_ms);
                }
                None => break,
            },
            _ = wait_until(deadline), if deadline.is_some() => {
                session.fire_due(&mut debouncer, clock.elapsed_ms());
            }
        }
    }

    // Input closed: the last gesture is as complete as it will ever be.
    if let Some(deadline) = debouncer.deadline() {
        if debouncer.poll(deadline) {
            session.fire(clock.elapsed_ms());
        }
    }

    session.finish()
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

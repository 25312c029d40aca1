//! Session ownership: the buffer, the pipeline, and where results go.

use chrono::{DateTime, Utc};

use dawdle_analysis::{Pipeline, PipelineOutcome, SampleBuffer};
use dawdle_common::config::AnalysisConfig;
use dawdle_model::history::SessionRecord;
use dawdle_model::sample::{PointerEvent, Sample, TimestampMs};
use dawdle_model::signal::{Signal, ZoneVerdict};

use crate::debounce::Debouncer;
use crate::emitter::SignalEmitter;
use crate::store::{append_session, HistoryStore};

/// One pipeline run triggered by the debouncer.
#[derive(Debug, Clone, PartialEq)]
pub struct Firing {
    /// Session time at which the pipeline ran.
    pub timestamp_ms: TimestampMs,
    pub outcome: PipelineOutcome,
}

/// A single pointer session, created at start and consumed by [`Session::finish`].
pub struct Session {
    config: AnalysisConfig,
    pipeline: Pipeline,
    buffer: SampleBuffer,
    emitter: Box<dyn SignalEmitter>,
    store: Option<Box<dyn HistoryStore>>,
    started_at: DateTime<Utc>,
    rejected: usize,
    last_action_count: usize,
    verdicts: Vec<ZoneVerdict>,
}

impl Session {
    /// Start a session that delivers signals to `emitter`.
    pub fn new(config: AnalysisConfig, emitter: Box<dyn SignalEmitter>) -> Self {
        tracing::debug!(
            emitter = emitter.name(),
            action_delay_ms = config.action_delay_ms,
            debounce_window_ms = config.debounce_window_ms,
            "Session started"
        );
        Self {
            pipeline: Pipeline::new(&config),
            config,
            buffer: SampleBuffer::new(),
            emitter,
            store: None,
            started_at: Utc::now(),
            rejected: 0,
            last_action_count: 0,
            verdicts: Vec::new(),
        }
    }

    /// Append the finished session record to `store` on [`Session::finish`].
    pub fn with_history(mut self, store: Box<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Pointer events refused at ingestion so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Verdicts produced so far, oldest first.
    pub fn verdicts(&self) -> &[ZoneVerdict] {
        &self.verdicts
    }

    /// Validate a raw pointer event and append it as a sample.
    ///
    /// Returns false when the event was rejected; rejection is never an error.
    pub fn ingest(&mut self, event: PointerEvent, timestamp_ms: TimestampMs) -> bool {
        match event.into_sample(timestamp_ms) {
            Ok(sample) => {
                self.buffer.append(sample);
                true
            }
            Err(reason) => {
                self.rejected += 1;
                tracing::debug!(reason = %reason, t = timestamp_ms, "Pointer event rejected");
                false
            }
        }
    }

    /// Append an already-stamped sample (recorded streams).
    pub fn push_sample(&mut self, sample: Sample) {
        self.buffer.append(sample);
    }

    /// Run the pipeline over the current buffer and emit a signal if a
    /// verdict comes out.
    pub fn fire(&mut self, timestamp_ms: TimestampMs) -> PipelineOutcome {
        let outcome = self.pipeline.run(self.buffer.snapshot());
        self.last_action_count = outcome.actions;

        if let Some(verdict) = outcome.verdict() {
            self.verdicts.push(*verdict);
            self.emitter.emit(&Signal::dawdle(timestamp_ms, *verdict));
        }

        outcome
    }

    /// Run the pipeline if the pending countdown has elapsed by `now_ms`.
    ///
    /// The firing is stamped with the deadline, not with `now_ms`.
    pub fn fire_due(&mut self, debouncer: &mut Debouncer, now_ms: TimestampMs) -> Option<Firing> {
        let deadline = debouncer.deadline()?;
        debouncer.poll(now_ms).then(|| Firing {
            timestamp_ms: deadline,
            outcome: self.fire(deadline),
        })
    }

    /// Deliver one stamped pointer event under the debounce rule.
    ///
    /// A countdown that elapsed at or before `timestamp_ms` fires before the
    /// event is ingested. Only accepted events restart the countdown.
    pub fn arrive(
        &mut self,
        debouncer: &mut Debouncer,
        event: PointerEvent,
        timestamp_ms: TimestampMs,
    ) -> Option<Firing> {
        let firing = self.fire_due(debouncer, timestamp_ms);
        if self.ingest(event, timestamp_ms) {
            debouncer.schedule(timestamp_ms);
        }
        firing
    }

    /// Feed a recorded stream through the debounce rule.
    ///
    /// The countdown fires whenever the next sample arrives at or after the
    /// pending deadline, and once more after the final sample.
    pub fn replay(&mut self, samples: &[Sample]) -> Vec<Firing> {
        let mut debouncer = Debouncer::new(self.config.debounce_window_ms);
        let mut firings = Vec::new();

        for sample in samples {
            firings.extend(self.fire_due(&mut debouncer, sample.timestamp_ms));
            self.push_sample(*sample);
            debouncer.schedule(sample.timestamp_ms);
        }

        if let Some(deadline) = debouncer.deadline() {
            firings.extend(self.fire_due(&mut debouncer, deadline));
        }

        firings
    }

    /// End the session, persisting its record when a history store is set.
    ///
    /// Store failures are logged and do not affect the returned record.
    pub fn finish(self) -> SessionRecord {
        let record = SessionRecord {
            started_at: self.started_at,
            ended_at: Utc::now(),
            samples: self.buffer.len(),
            rejected: self.rejected,
            actions: self.last_action_count,
            verdicts: self.verdicts,
        };

        if let Some(mut store) = self.store {
            match append_session(store.as_mut(), record.clone()) {
                Ok(history) => tracing::debug!(
                    sessions = history.sessions.len(),
                    "Session appended to history"
                ),
                Err(e) => tracing::warn!(error = %e, "Failed to persist session history"),
            }
        }

        tracing::info!(
            samples = record.samples,
            rejected = record.rejected,
            actions = record.actions,
            verdicts = record.verdicts.len(),
            zone_hits = record.zone_hits(),
            "Session finished"
        );
        record
    }
}

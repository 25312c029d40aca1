//! Analyze live pointer events read from stdin.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use dawdle_common::config::AppConfig;
use dawdle_model::sample::{PointerEvent, SampleStreamHeader};
use dawdle_tracker::writer::JsonlWriter;
use dawdle_tracker::{spawn_session, JsonFileStore, JsonlEmitter, Session};

pub async fn run(config: AppConfig, record: Option<PathBuf>) -> anyhow::Result<()> {
    config.analysis.validate()?;

    let emitter = JsonlEmitter::new(std::io::stdout());
    let mut session = Session::new(config.analysis, Box::new(emitter));
    if config.history.enabled {
        let path = &config.history.path;
        match JsonFileStore::open(path) {
            Ok(store) => {
                tracing::info!(path = %path.display(), "Appending session to history");
                session = session.with_history(Box::new(store));
            }
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "History unavailable, session will not be recorded"
            ),
        }
    }

    let handle = spawn_session(session);

    let mut recorder = match record {
        Some(path) => {
            let header = SampleStreamHeader {
                schema_version: "1.0".to_string(),
                epoch_wall: handle.clock().epoch_wall().to_string(),
                action_delay_ms: config.analysis.action_delay_ms,
            };
            Some(JsonlWriter::create(&path, &header)?)
        }
        None => None,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut unparsed = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: PointerEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                unparsed += 1;
                tracing::debug!(error = %e, "Skipping unparseable input line");
                continue;
            }
        };

        let Some(timestamp_ms) = handle.record(event) else {
            tracing::warn!("Session worker stopped, no longer reading input");
            break;
        };

        if let Some(writer) = recorder.as_mut() {
            if let Ok(sample) = event.into_sample(timestamp_ms) {
                writer.write_line(&sample)?;
            }
        }
    }

    if let Some(mut writer) = recorder {
        writer.flush()?;
    }

    let record = handle.finish().await?;
    tracing::info!(
        samples = record.samples,
        rejected = record.rejected + unparsed,
        verdicts = record.verdicts.len(),
        zone_hits = record.zone_hits(),
        "Watch finished"
    );

    Ok(())
}

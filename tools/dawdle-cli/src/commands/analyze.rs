//! Replay a recorded sample stream.

use std::path::PathBuf;

use dawdle_common::config::AnalysisConfig;
use dawdle_common::error::DawdleError;
use dawdle_model::sample::parse_samples;
use dawdle_tracker::{JsonlEmitter, NullEmitter, Session, SignalEmitter};

pub fn run(path: PathBuf, config: AnalysisConfig, json: bool) -> anyhow::Result<()> {
    config.validate()?;

    let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DawdleError::FileNotFound { path: path.clone() },
        _ => DawdleError::Io(e),
    })?;
    let samples = parse_samples(&content)
        .map_err(|e| DawdleError::ingest(format!("Failed to parse samples: {e}")))?;
    if let Some(i) = samples
        .windows(2)
        .position(|w| w[1].timestamp_ms < w[0].timestamp_ms)
    {
        return Err(DawdleError::analysis(format!(
            "Timestamps go backwards after sample {i} ({}ms -> {}ms)",
            samples[i].timestamp_ms,
            samples[i + 1].timestamp_ms
        ))
        .into());
    }

    let emitter: Box<dyn SignalEmitter> = if json {
        Box::new(JsonlEmitter::new(std::io::stdout()))
    } else {
        Box::new(NullEmitter)
    };
    let mut session = Session::new(config, emitter);
    let firings = session.replay(&samples);

    if !json {
        println!("Analyzing samples from: {}", path.display());
        println!("  Loaded {} samples", samples.len());
        println!(
            "  Action delay {}ms, debounce window {}ms",
            config.action_delay_ms, config.debounce_window_ms
        );
        println!();

        for firing in &firings {
            let outcome = &firing.outcome;
            match &outcome.verdict {
                Ok(v) => println!(
                    "  t={:>8}ms  actions={:<4} distance x{:.3}{}  velocity x{:.3}{}",
                    firing.timestamp_ms,
                    outcome.actions,
                    v.distance_ratio,
                    if v.distance_in_zone { " [ZONE]" } else { "" },
                    v.velocity_ratio,
                    if v.velocity_in_zone { " [ZONE]" } else { "" },
                ),
                Err(reason) => println!(
                    "  t={:>8}ms  actions={:<4} no verdict: {reason}",
                    firing.timestamp_ms, outcome.actions
                ),
            }
        }
    }

    let record = session.finish();
    if !json {
        println!();
        println!(
            "  {} firing(s), {} verdict(s), {} in zone",
            firings.len(),
            record.verdicts.len(),
            record.zone_hits()
        );
        println!("\nAnalysis complete.");
    }

    Ok(())
}

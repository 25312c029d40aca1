use std::path::PathBuf;

use dawdle_analysis::zone::SkipReason;
use dawdle_common::config::AnalysisConfig;
use dawdle_model::sample::{parse_samples, Sample};
use dawdle_tracker::{ChannelEmitter, Session};

fn load_fixture_samples() -> Vec<Sample> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("samples.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture samples should be readable");
    parse_samples(&content).expect("fixture samples should parse")
}

#[test]
fn fixture_replay_fires_after_each_gesture() {
    let samples = load_fixture_samples();
    assert_eq!(samples.len(), 220);

    let (emitter, _rx) = ChannelEmitter::channel();
    let mut session = Session::new(AnalysisConfig::default(), Box::new(emitter));
    let firings = session.replay(&samples);

    let times: Vec<_> = firings.iter().map(|f| f.timestamp_ms).collect();
    assert_eq!(times, vec![1304, 3304, 7084, 10264]);

    let actions: Vec<_> = firings.iter().map(|f| f.outcome.actions).collect();
    assert_eq!(actions, vec![1, 2, 3, 4]);

    assert_eq!(
        firings[0].outcome.verdict,
        Err(SkipReason::InsufficientHistory { actions: 1 })
    );
}

#[test]
fn fixture_replay_verdicts_are_stable() {
    let samples = load_fixture_samples();
    let (emitter, mut rx) = ChannelEmitter::channel();
    let mut session = Session::new(AnalysisConfig::default(), Box::new(emitter));
    session.replay(&samples);

    let mut signals = Vec::new();
    while let Ok(signal) = rx.try_recv() {
        signals.push(signal);
    }
    assert_eq!(signals.len(), 3);

    // Identical repeat of the first gesture.
    let repeat = &signals[0].verdict;
    assert!((repeat.distance_ratio - 1.0).abs() < 1e-9);
    assert!((repeat.velocity_ratio - 1.0).abs() < 1e-9);
    assert!(!repeat.any_in_zone());

    // Long fast sweep: farther, not slower.
    let sweep = &signals[1].verdict;
    assert!((sweep.distance_ratio - 792.0 / 570.0).abs() < 1e-9);
    assert!(sweep.distance_in_zone);
    assert!(!sweep.velocity_in_zone);

    // Short slow crawl: slower, not farther.
    let crawl = &signals[2].verdict;
    assert!(!crawl.distance_in_zone);
    assert!(crawl.velocity_in_zone);
    assert!((crawl.velocity_ratio - 0.489_352_724_824_309_6).abs() < 1e-6);

    let record = session.finish();
    assert_eq!(record.samples, 220);
    assert_eq!(record.actions, 4);
    assert_eq!(record.zone_hits(), 2);
}

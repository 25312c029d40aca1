use std::time::Duration;

use dawdle_common::config::AnalysisConfig;
use dawdle_model::sample::PointerEvent;
use dawdle_tracker::{spawn_session, ChannelEmitter, MemoryStore, Session, SessionHandle};

const STEP: Duration = Duration::from_millis(16);

/// Move in a straight line, one event per 16ms step.
async fn gesture(handle: &SessionHandle, from: (f64, f64), step: (f64, f64), count: usize) {
    for i in 0..count {
        let k = i as f64;
        handle.record(PointerEvent::at(from.0 + step.0 * k, from.1 + step.1 * k));
        tokio::time::sleep(STEP).await;
    }
}

#[tokio::test(start_paused = true)]
async fn burst_of_samples_triggers_pipeline_once() {
    let (emitter, mut rx) = ChannelEmitter::channel();
    let handle = spawn_session(Session::new(AnalysisConfig::default(), Box::new(emitter)));

    // Baseline gesture, then a long pause so it settles on its own.
    gesture(&handle, (0.0, 0.0), (3.0, 4.0), 10).await;
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(rx.try_recv().is_err(), "one action alone must not signal");

    // 50 samples well within the window of each other.
    for i in 0..50 {
        handle.record(PointerEvent::at(i as f64 * 6.0, i as f64 * 8.0));
        if i < 49 {
            tokio::time::sleep(STEP).await;
        }
    }
    let last_ms = handle.clock().elapsed_ms();

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(rx.try_recv().is_err(), "fired before the window elapsed");

    tokio::time::sleep(Duration::from_millis(2000)).await;
    let signal = rx.try_recv().expect("settled burst should signal");
    assert_eq!(signal.name, "dawdle");
    assert_eq!(signal.timestamp_ms, last_ms + 1000);
    assert!(rx.try_recv().is_err(), "burst must fire exactly once");

    let record = handle.finish().await.unwrap();
    assert_eq!(record.samples, 60);
    assert_eq!(record.actions, 2);
    assert_eq!(record.verdicts.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn farther_slower_gesture_is_in_both_zones() {
    let (emitter, mut rx) = ChannelEmitter::channel();
    let handle = spawn_session(Session::new(AnalysisConfig::default(), Box::new(emitter)));

    // Baseline: 10px per step.
    gesture(&handle, (0.0, 0.0), (6.0, 8.0), 20).await;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // Candidate: 5px per step for three times as many steps.
    gesture(&handle, (0.0, 0.0), (3.0, 4.0), 60).await;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    let verdict = rx.try_recv().expect("candidate should signal").verdict;
    assert!(verdict.distance_in_zone, "ratio {}", verdict.distance_ratio);
    assert!(verdict.velocity_in_zone, "ratio {}", verdict.velocity_ratio);

    handle.finish().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn malformed_events_never_reach_the_buffer() {
    let handle = spawn_session(Session::new(
        AnalysisConfig::default(),
        Box::new(dawdle_tracker::NullEmitter),
    ));

    handle.record(PointerEvent::at(1.0, 1.0));
    handle.record(PointerEvent {
        x: Some(2.0),
        y: None,
    });
    handle.record(PointerEvent {
        x: Some(f64::NAN),
        y: Some(2.0),
    });
    handle.record(PointerEvent::at(3.0, 3.0));

    let record = handle.finish().await.unwrap();
    assert_eq!(record.samples, 2);
    assert_eq!(record.rejected, 2);
}

#[tokio::test(start_paused = true)]
async fn finishing_flushes_pending_analysis() {
    let (emitter, mut rx) = ChannelEmitter::channel();
    let session = Session::new(AnalysisConfig::default(), Box::new(emitter))
        .with_history(Box::new(MemoryStore::new()));
    let handle = spawn_session(session);

    gesture(&handle, (0.0, 0.0), (6.0, 8.0), 10).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    gesture(&handle, (0.0, 0.0), (6.0, 8.0), 10).await;

    // Finish before the debounce window elapses.
    let record = handle.finish().await.unwrap();
    assert_eq!(record.actions, 2);
    assert_eq!(record.verdicts.len(), 1);
    assert!(rx.try_recv().is_ok());
}

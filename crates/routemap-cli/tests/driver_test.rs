//! Animation driver tests on paused tokio time.

use routemap_cli::{run_animation_loop, TokioClock};
use routemap_core::{
    AnimationConfig, AnimationEvent, Coordinate, FixedPicker, MotionSample, Route, Scheduler,
    TimingModel,
};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

fn mumbai_delhi() -> Route {
    Route::between(
        "VABB",
        Coordinate::new(19.09, 72.86),
        "VIDP",
        Coordinate::new(28.56, 77.10),
    )
}

fn shutdown_after(after: Duration) -> broadcast::Receiver<()> {
    let (tx, rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        let _ = tx.send(());
    });
    rx
}

#[tokio::test(start_paused = true)]
async fn stepped_loop_spawns_on_interval() {
    let config = AnimationConfig {
        steps: 10,
        spawn_interval_ms: 500,
        ..AnimationConfig::default()
    };
    let mut scheduler = Scheduler::new(config, FixedPicker(mumbai_delhi()), TokioClock::new());
    let (_toggle_tx, toggle_rx) = watch::channel(true);

    let summary = run_animation_loop(
        &mut scheduler,
        Duration::from_millis(60),
        toggle_rx,
        shutdown_after(Duration::from_millis(2_000)),
        |_| {},
    )
    .await;

    // spawns at 540, 1020, 1500 and 1980ms; 11 ticks per flight
    assert_eq!(summary.started, 4);
    assert_eq!(summary.finished, 2);
    assert_eq!(summary.cancelled, 0);
    assert_eq!(scheduler.active_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn frame_synced_flight_lands_faded_out() {
    let config = AnimationConfig {
        timing: TimingModel::FrameSynced { duration_ms: 1_000 },
        spawn_interval_ms: 60_000,
        ..AnimationConfig::default()
    };
    let mut scheduler = Scheduler::new(config, FixedPicker(mumbai_delhi()), TokioClock::new());
    scheduler.spawn(mumbai_delhi()).unwrap();
    let (_toggle_tx, toggle_rx) = watch::channel(true);

    let mut samples: Vec<MotionSample> = Vec::new();
    let summary = run_animation_loop(
        &mut scheduler,
        Duration::from_millis(16),
        toggle_rx,
        shutdown_after(Duration::from_millis(1_500)),
        |event| {
            if let AnimationEvent::Moved { sample, .. } = event {
                samples.push(*sample);
            }
        },
    )
    .await;

    assert_eq!(summary.finished, 1);
    let first = samples.first().unwrap();
    let last = samples.last().unwrap();
    assert_eq!(first.position, mumbai_delhi().origin);
    assert_eq!(first.opacity, 0.0);
    assert!((last.position.lat - 28.56).abs() < 1e-9);
    assert_eq!(last.opacity, 0.0);
    assert!(samples.iter().all(|s| s.heading_deg == first.heading_deg));
}

#[tokio::test(start_paused = true)]
async fn toggle_off_suppresses_new_planes() {
    let config = AnimationConfig {
        steps: 10,
        spawn_interval_ms: 500,
        ..AnimationConfig::default()
    };
    let mut scheduler = Scheduler::new(config, FixedPicker(mumbai_delhi()), TokioClock::new());
    let (toggle_tx, toggle_rx) = watch::channel(true);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(700)).await;
        let _ = toggle_tx.send(false);
    });

    let summary = run_animation_loop(
        &mut scheduler,
        Duration::from_millis(60),
        toggle_rx,
        shutdown_after(Duration::from_millis(3_000)),
        |_| {},
    )
    .await;

    // the plane launched at 540ms still lands
    assert_eq!(summary.started, 1);
    assert_eq!(summary.finished, 1);
    assert!(!scheduler.is_enabled());
}

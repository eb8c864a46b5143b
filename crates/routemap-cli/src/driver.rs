//! Async animation driver.
//!
//! Ticks a scheduler on a tokio interval until shutdown is signalled. The tick
//! period is the step interval for stepped animations and the frame interval
//! for frame-synced ones. A watch channel plays the role of the map's
//! animation toggle.

use routemap_core::{AnimationEvent, Clock, RoutePicker, Scheduler};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::{interval, Instant};

/// Clock backed by tokio's time source, so paused test time applies.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    start: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub started: usize,
    pub finished: usize,
    pub cancelled: usize,
}

/// Run the animation loop, handing every event to `on_event`.
///
/// Values sent on `toggle` enable or disable random spawns; a dropped sender
/// leaves the scheduler as it is.
pub async fn run_animation_loop<P, C, F>(
    scheduler: &mut Scheduler<P, C>,
    tick_every: Duration,
    mut toggle: watch::Receiver<bool>,
    mut shutdown: broadcast::Receiver<()>,
    mut on_event: F,
) -> RunSummary
where
    P: RoutePicker,
    C: Clock,
    F: FnMut(&AnimationEvent),
{
    let mut ticker = interval(tick_every);
    let mut summary = RunSummary::default();
    let mut toggle_open = true;
    scheduler.set_enabled(*toggle.borrow_and_update());

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Animation loop shutting down");
                break;
            }
            changed = toggle.changed(), if toggle_open => {
                match changed {
                    Ok(()) => scheduler.set_enabled(*toggle.borrow_and_update()),
                    Err(_) => toggle_open = false,
                }
            }
            _ = ticker.tick() => {
                summary.ticks += 1;
                for event in scheduler.tick() {
                    match &event {
                        AnimationEvent::Started { id, route } => {
                            summary.started += 1;
                            tracing::info!("{} departing {}", id, route.label());
                        }
                        AnimationEvent::Finished { id } => {
                            summary.finished += 1;
                            tracing::info!("{} arrived", id);
                        }
                        AnimationEvent::Cancelled { id } => {
                            summary.cancelled += 1;
                            tracing::info!("{} cancelled", id);
                        }
                        AnimationEvent::Moved { .. } => {}
                    }
                    on_event(&event);
                }
            }
        }
    }

    tracing::debug!(
        "Animation loop stopped after {} ticks with {} plane(s) in flight",
        summary.ticks,
        scheduler.active_count()
    );
    summary
}

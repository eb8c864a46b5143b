//! Scheduler for "animate a random route every few seconds".
//!
//! The scheduler owns its in-flight animations and is driven by explicit
//! `tick()` calls. Time comes from a [`Clock`] and routes from a
//! [`RoutePicker`], so tests can inject a fixed route and advance time by hand.

use crate::animation::{Animation, CancellationToken};
use crate::catalog::Catalog;
use crate::config::{AnimationConfig, ToggleBehavior};
use crate::error::PathError;
use crate::models::{Route, RouteGroup};
use crate::motion::MotionSample;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of monotonic time, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saturates at `u64::MAX` microseconds instead of wrapping.
    pub fn advance(&self, by: Duration) {
        let by = micros(by);
        let _ = self
            .micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| Some(now.saturating_add(by)));
    }

    pub fn set(&self, to: Duration) {
        self.micros.store(micros(to), Ordering::SeqCst);
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

/// Strategy choosing the next route to animate.
pub trait RoutePicker {
    /// `None` means nothing to animate this round.
    fn pick(&mut self) -> Option<Route>;
}

impl<P: RoutePicker + ?Sized> RoutePicker for Box<P> {
    fn pick(&mut self) -> Option<Route> {
        (**self).pick()
    }
}

/// Uniform pick over the catalog's regular route records.
///
/// A record that fails to resolve yields `None` for that round, same as the
/// browser map which simply skipped the animation.
pub struct RandomPicker<R> {
    catalog: Arc<Catalog>,
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(catalog: Arc<Catalog>, rng: R) -> Self {
        Self { catalog, rng }
    }
}

impl<R: Rng> RoutePicker for RandomPicker<R> {
    fn pick(&mut self) -> Option<Route> {
        let count = self.catalog.records_in(RouteGroup::Regular).count();
        if count == 0 {
            return None;
        }
        let index = self.rng.random_range(0..count);
        let record = self.catalog.records_in(RouteGroup::Regular).nth(index)?;
        self.catalog.resolve(record)
    }
}

/// Always the same route.
#[derive(Debug, Clone)]
pub struct FixedPicker(pub Route);

impl RoutePicker for FixedPicker {
    fn pick(&mut self) -> Option<Route> {
        Some(self.0.clone())
    }
}

/// Round robin over a fixed list.
#[derive(Debug, Clone)]
pub struct SequencePicker {
    routes: Vec<Route>,
    next: usize,
}

impl SequencePicker {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes, next: 0 }
    }
}

impl RoutePicker for SequencePicker {
    fn pick(&mut self) -> Option<Route> {
        if self.routes.is_empty() {
            return None;
        }
        let route = self.routes[self.next % self.routes.len()].clone();
        self.next = (self.next + 1) % self.routes.len();
        Some(route)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnimationId(pub u64);

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim-{}", self.0)
    }
}

/// What the rendering layer should do after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnimationEvent {
    /// Create a plane marker for the route.
    Started { id: AnimationId, route: Route },
    /// Move and rotate the marker.
    Moved { id: AnimationId, sample: MotionSample },
    /// Remove the marker, the plane arrived.
    Finished { id: AnimationId },
    /// Remove the marker, the animation was cancelled.
    Cancelled { id: AnimationId },
}

impl AnimationEvent {
    pub fn id(&self) -> AnimationId {
        match self {
            Self::Started { id, .. }
            | Self::Moved { id, .. }
            | Self::Finished { id }
            | Self::Cancelled { id } => *id,
        }
    }
}

/// Caller-owned handle to one running animation.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    pub id: AnimationId,
    token: CancellationToken,
}

impl AnimationHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Active {
    id: AnimationId,
    animation: Animation,
    token: CancellationToken,
}

pub struct Scheduler<P, C> {
    config: AnimationConfig,
    picker: P,
    clock: C,
    enabled: bool,
    next_spawn_at: Duration,
    next_id: u64,
    active: Vec<Active>,
    pending: Vec<AnimationEvent>,
}

impl<P: RoutePicker, C: Clock> Scheduler<P, C> {
    /// The first random animation starts one spawn interval after creation.
    pub fn new(config: AnimationConfig, picker: P, clock: C) -> Self {
        let next_spawn_at = clock.now() + config.spawn_interval();
        Self {
            config,
            picker,
            clock,
            enabled: true,
            next_spawn_at,
            next_id: 1,
            active: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle random animations. What happens to running planes depends on
    /// the configured [`ToggleBehavior`].
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        tracing::debug!("Random route animations {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
        if enabled {
            self.next_spawn_at = self.clock.now() + self.config.spawn_interval();
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn active_ids(&self) -> Vec<AnimationId> {
        self.active.iter().map(|a| a.id).collect()
    }

    /// Start animating `route` now, independent of the random spawn timer.
    pub fn spawn(&mut self, route: Route) -> Result<AnimationHandle, PathError> {
        let animation = Animation::for_timing(route.clone(), &self.config, self.clock.now())?;
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let token = CancellationToken::new();
        self.active.push(Active {
            id,
            animation,
            token: token.clone(),
        });
        tracing::debug!("Started {} on {}", id, route.label());
        self.pending.push(AnimationEvent::Started { id, route });

        Ok(AnimationHandle { id, token })
    }

    /// Cancel a running animation by id. Returns false if it is not running.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        match self.active.iter().find(|a| a.id == id) {
            Some(active) => {
                active.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Advance every animation by one tick and spawn a new one if due.
    pub fn tick(&mut self) -> Vec<AnimationEvent> {
        let now = self.clock.now();

        if self.enabled && now >= self.next_spawn_at {
            // keep the cadence of the schedule, not of late ticks
            self.next_spawn_at += self.config.spawn_interval();
            if self.next_spawn_at <= now {
                self.next_spawn_at = now + self.config.spawn_interval();
            }
            self.spawn_random();
        }

        if !self.enabled && self.config.toggle_behavior == ToggleBehavior::HaltInFlight {
            for active in &self.active {
                active.token.cancel();
            }
        }

        let mut events = std::mem::take(&mut self.pending);

        self.active.retain_mut(|active| {
            if active.token.is_cancelled() {
                tracing::debug!("Cancelled {}", active.id);
                events.push(AnimationEvent::Cancelled { id: active.id });
                return false;
            }

            if let Some(sample) = active.animation.advance(now) {
                events.push(AnimationEvent::Moved {
                    id: active.id,
                    sample,
                });
            }

            if active.animation.is_finished() {
                tracing::debug!("Finished {}", active.id);
                events.push(AnimationEvent::Finished { id: active.id });
                return false;
            }

            true
        });

        events
    }

    fn spawn_random(&mut self) {
        let Some(route) = self.picker.pick() else {
            tracing::debug!("No resolvable route picked, skipping spawn");
            return;
        };

        let label = route.label();
        if let Err(e) = self.spawn(route) {
            tracing::warn!("Skipping animation for {}: {}", label, e);
        }
    }
}

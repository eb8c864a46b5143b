//! Per-animation state for planes flying a route.
//!
//! Each animation owns its progress and a cancellation token; nothing is shared
//! between concurrent animations.

use crate::config::AnimationConfig;
use crate::curve::generate_curve;
use crate::error::PathError;
use crate::models::Route;
use crate::motion::{EasedMotion, MotionSample, MotionSampler, SteppedMotion};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How animation progress is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimingModel {
    /// A repeating timer advances a step counter by exactly one per tick.
    FixedInterval { step_interval_ms: u64 },
    /// Per-frame callbacks compute elapsed time against the start timestamp.
    FrameSynced { duration_ms: u64 },
}

impl TimingModel {
    pub fn is_stepped(&self) -> bool {
        matches!(self, Self::FixedInterval { .. })
    }
}

impl Default for TimingModel {
    fn default() -> Self {
        Self::FixedInterval {
            step_interval_ms: 60,
        }
    }
}

/// Cancels one animation before it reaches its terminal state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
enum Progress {
    Stepped {
        motion: SteppedMotion,
        index: usize,
    },
    Eased {
        motion: EasedMotion,
        started_at: Duration,
        duration: Duration,
        t: f64,
        finished: bool,
    },
}

/// One plane in flight.
#[derive(Debug, Clone)]
pub struct Animation {
    route: Route,
    progress: Progress,
}

impl Animation {
    /// Stepped animation over a freshly generated curve.
    pub fn stepped(route: Route, config: &AnimationConfig) -> Result<Self, PathError> {
        let path = generate_curve(route.origin, route.destination, config.steps, config.arc_height)?;
        Ok(Self {
            route,
            progress: Progress::Stepped {
                motion: SteppedMotion::new(path, config.step_opacity),
                index: 0,
            },
        })
    }

    /// Eased animation that starts at `now` and lasts `duration`.
    pub fn eased(
        route: Route,
        config: &AnimationConfig,
        now: Duration,
        duration: Duration,
    ) -> Result<Self, PathError> {
        if duration.is_zero() {
            return Err(PathError::ZeroDuration);
        }
        let arc_height = config.arc_height.resolve(route.origin, route.destination);
        let motion = EasedMotion::new(route.origin, route.destination, arc_height)?;
        Ok(Self {
            route,
            progress: Progress::Eased {
                motion,
                started_at: now,
                duration,
                t: 0.0,
                finished: false,
            },
        })
    }

    /// Build the animation kind selected by the config's timing model.
    pub fn for_timing(route: Route, config: &AnimationConfig, now: Duration) -> Result<Self, PathError> {
        match config.timing {
            TimingModel::FixedInterval { .. } => Self::stepped(route, config),
            TimingModel::FrameSynced { duration_ms } => {
                Self::eased(route, config, now, Duration::from_millis(duration_ms))
            }
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f64 {
        match &self.progress {
            Progress::Stepped { motion, index } => {
                let steps = motion.path().steps().max(1);
                (*index as f64 / steps as f64).min(1.0)
            }
            Progress::Eased { t, .. } => *t,
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.progress {
            Progress::Stepped { motion, index } => *index >= motion.path().len(),
            Progress::Eased { finished, .. } => *finished,
        }
    }

    /// Advance one tick and return the sample to render.
    ///
    /// Stepped animations move exactly one step regardless of `now`; eased
    /// animations recompute their fraction from `now`. Returns `None` once the
    /// animation has terminated.
    pub fn advance(&mut self, now: Duration) -> Option<MotionSample> {
        match &mut self.progress {
            Progress::Stepped { motion, index } => {
                let sample = motion.sample(*index)?;
                *index += 1;
                Some(sample)
            }
            Progress::Eased {
                motion,
                started_at,
                duration,
                t,
                finished,
            } => {
                if *finished {
                    return None;
                }
                let elapsed = now.saturating_sub(*started_at);
                let fraction = (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0);
                // never move backwards if the clock does
                *t = t.max(fraction);
                if *t >= 1.0 {
                    *finished = true;
                }
                motion.sample(*t)
            }
        }
    }
}

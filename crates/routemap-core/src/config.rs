//! Tunables for curve generation and plane animation.

use crate::animation::TimingModel;
use crate::curve::{ArcHeight, DEFAULT_STEPS};
use crate::motion::StepOpacity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What disabling animations does to planes already in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleBehavior {
    /// Only new spawns are suppressed
    #[default]
    FinishInFlight,
    /// Running animations are cancelled on the next tick
    HaltInFlight,
}

/// Configuration for curves and animations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Segments per curve; a curve has `steps + 1` points
    pub steps: usize,
    pub arc_height: ArcHeight,
    pub timing: TimingModel,
    /// Delay between random route animations
    pub spawn_interval_ms: u64,
    pub step_opacity: StepOpacity,
    pub toggle_behavior: ToggleBehavior,
}

impl AnimationConfig {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            arc_height: ArcHeight::default(),
            timing: TimingModel::default(),
            spawn_interval_ms: 6_000,
            step_opacity: StepOpacity::default(),
            toggle_behavior: ToggleBehavior::default(),
        }
    }
}

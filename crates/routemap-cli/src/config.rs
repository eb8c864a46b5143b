//! CLI configuration from environment.

use anyhow::{Context, Result};
use routemap_core::{AnimationConfig, TimingModel};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding airports.json, flights.json and hon-circle.json
    pub data_dir: PathBuf,
    /// Tick period used for frame-synced animations
    pub frame_interval: Duration,
    pub animation: AnimationConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let animation = match env::var("ROUTEMAP_ANIMATION_CONFIG") {
            Ok(path) => load_animation_config(&path)?,
            Err(_) => AnimationConfig::default(),
        };

        Ok(Self {
            data_dir: env::var("ROUTEMAP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            frame_interval: Duration::from_millis(
                env::var("ROUTEMAP_FRAME_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(16),
            ),
            animation,
        })
    }

    /// Period between scheduler ticks for the configured timing model.
    pub fn tick_interval(&self) -> Duration {
        match self.animation.timing {
            TimingModel::FixedInterval { step_interval_ms } => {
                Duration::from_millis(step_interval_ms.max(1))
            }
            TimingModel::FrameSynced { .. } => self.frame_interval.max(Duration::from_millis(1)),
        }
    }
}

fn load_animation_config(path: &str) -> Result<AnimationConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading animation config {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing animation config {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_interval_follows_timing_model() {
        let mut config = Config {
            data_dir: PathBuf::from("data"),
            frame_interval: Duration::from_millis(16),
            animation: AnimationConfig::default(),
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(60));

        config.animation.timing = TimingModel::FrameSynced { duration_ms: 3_000 };
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
    }
}

//! Route map core: curved routes between airports and animated planes along them.

pub mod animation;
pub mod catalog;
pub mod config;
pub mod curve;
pub mod error;
pub mod geo;
pub mod models;
pub mod motion;
pub mod scheduler;

pub use animation::{Animation, CancellationToken, TimingModel};
pub use catalog::Catalog;
pub use config::{AnimationConfig, ToggleBehavior};
pub use curve::{generate_curve, ArcHeight, Path};
pub use error::PathError;
pub use geo::{heading_between, Coordinate};
pub use models::{
    Airport, Destination, DestinationStatus, Price, Route, RouteGroup, RouteMetadata, RouteRecord,
};
pub use motion::{
    ease_in_out_quad, fade_opacity, EasedMotion, MotionSample, MotionSampler, StepOpacity,
    SteppedMotion,
};
pub use scheduler::{
    AnimationEvent, AnimationHandle, AnimationId, Clock, FixedPicker, ManualClock, RandomPicker,
    RoutePicker, Scheduler, SequencePicker,
};

//! Errors for degenerate curve and motion input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A curve needs at least one step between origin and destination.
    #[error("curve requires at least one step")]
    ZeroSteps,

    #[error("origin and destination coincide at ({lat}, {lng})")]
    DegenerateRoute { lat: f64, lng: f64 },

    #[error("coordinate ({lat}, {lng}) is not finite")]
    NonFinite { lat: f64, lng: f64 },

    #[error("arc height {height} is not finite")]
    NonFiniteArc { height: f64 },

    /// Eased animations divide elapsed time by their duration.
    #[error("animation duration must be greater than zero")]
    ZeroDuration,
}

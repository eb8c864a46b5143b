//! Route map CLI - tools for drawing and animating airline routes.
//!
//! Binaries:
//! - route_paths: curved route overlays departing an airport
//! - destinations: served airports classified by status
//! - animate_routes: random plane animations on tokio timers

pub mod config;
pub mod data;
pub mod driver;
pub mod overlay;

pub use config::Config;
pub use data::load_catalog;
pub use driver::{run_animation_loop, RunSummary, TokioClock};
pub use overlay::{route_overlays, RouteOverlay};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for the binaries. `RUST_LOG` directives are combined
/// with the defaults given here.
pub fn init_tracing(default_directives: &[&str]) -> anyhow::Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in default_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

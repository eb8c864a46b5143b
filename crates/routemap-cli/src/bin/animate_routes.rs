//! CLI tool that animates planes along random routes.
//!
//! Every spawn interval a route is picked and a plane flies along its curve,
//! either stepping one curve point per tick or easing by elapsed time.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use routemap_cli::{init_tracing, load_catalog, run_animation_loop, Config, TokioClock};
use routemap_core::{
    AnimationEvent, ArcHeight, FixedPicker, RandomPicker, RoutePicker, RouteRecord, Scheduler,
    TimingModel, ToggleBehavior,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// One curve point per fixed-interval tick
    Stepped,
    /// Eased interpolation driven by elapsed time
    Eased,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    /// Cancel planes in flight
    Halt,
    /// Let planes in flight land
    Finish,
}

impl From<Toggle> for ToggleBehavior {
    fn from(toggle: Toggle) -> Self {
        match toggle {
            Toggle::Halt => ToggleBehavior::HaltInFlight,
            Toggle::Finish => ToggleBehavior::FinishInFlight,
        }
    }
}

const DEFAULT_STEP_INTERVAL_MS: u64 = 60;
const DEFAULT_FLIGHT_MS: u64 = 3_000;

/// Animate planes along airline routes
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory with airports.json and flights.json (overrides ROUTEMAP_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Timing model (defaults to the configured one)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Curve steps
    #[arg(long)]
    steps: Option<usize>,

    /// Fixed arc height in degrees
    #[arg(long, conflicts_with = "proportional_arc")]
    arc_height: Option<f64>,

    /// Scale the arc with the route's latitude span, capped at 0.25 degrees
    #[arg(long)]
    proportional_arc: bool,

    /// Milliseconds between curve steps in stepped mode
    #[arg(long)]
    step_interval_ms: Option<u64>,

    /// Flight duration in milliseconds in eased mode
    #[arg(long)]
    flight_ms: Option<u64>,

    /// What stopping the spawns does to planes in flight
    #[arg(long, value_enum)]
    toggle_behavior: Option<Toggle>,

    /// Milliseconds between random route animations
    #[arg(long)]
    spawn_interval_ms: Option<u64>,

    /// Always fly this route, e.g. VABB-VIDP
    #[arg(long)]
    route: Option<String>,

    /// Seed for the random route picker
    #[arg(long)]
    seed: Option<u64>,

    /// Stop spawning after this many seconds
    #[arg(long)]
    stop_spawning_after: Option<u64>,

    /// Total run time in seconds
    #[arg(long, default_value_t = 30)]
    duration: u64,

    /// Print every event as a JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&["routemap_cli=info", "animate_routes=info"])?;
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir.clone() {
        config.data_dir = dir;
    }
    apply_overrides(&mut config, &args);

    let catalog = Arc::new(load_catalog(&config.data_dir)?);

    let picker: Box<dyn RoutePicker> = match &args.route {
        Some(arg) => {
            let (origin, destination) = arg
                .split_once('-')
                .with_context(|| format!("route must look like ORIG-DEST, got {}", arg))?;
            let route = catalog
                .resolve(&RouteRecord::new(origin, destination))
                .with_context(|| format!("unknown airport in route {}", arg))?;
            Box::new(FixedPicker(route))
        }
        None => {
            let rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            Box::new(RandomPicker::new(catalog.clone(), rng))
        }
    };

    let tick_every = config.tick_interval();
    tracing::info!(
        "Animating routes every {}ms (tick {}ms, {:?})",
        config.animation.spawn_interval_ms,
        tick_every.as_millis(),
        config.animation.timing
    );

    let mut scheduler = Scheduler::new(config.animation.clone(), picker, TokioClock::new());

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let run_for = Duration::from_secs(args.duration);
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(run_for) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        let _ = shutdown_tx.send(());
    });

    let (toggle_tx, toggle_rx) = watch::channel(true);
    if let Some(after) = args.stop_spawning_after {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(after)).await;
            tracing::info!("No new planes from now on");
            let _ = toggle_tx.send(false);
        });
    }

    let json = args.json;
    let summary = run_animation_loop(&mut scheduler, tick_every, toggle_rx, shutdown_rx, |event| {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to encode event: {}", e),
            }
        } else if let AnimationEvent::Moved { id, sample } = event {
            println!(
                "{} ({:.4}, {:.4}) heading {:6.1} opacity {:.2}",
                id, sample.position.lat, sample.position.lng, sample.heading_deg, sample.opacity
            );
        }
    })
    .await;

    println!(
        "\nDone after {} ticks: {} started, {} arrived, {} cancelled",
        summary.ticks, summary.started, summary.finished, summary.cancelled
    );
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    let animation = &mut config.animation;

    // switching modes keeps the configured values when the mode already matches
    match (args.mode, animation.timing) {
        (Some(Mode::Stepped), TimingModel::FrameSynced { .. }) => {
            animation.timing = TimingModel::FixedInterval {
                step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            }
        }
        (Some(Mode::Eased), TimingModel::FixedInterval { .. }) => {
            animation.timing = TimingModel::FrameSynced {
                duration_ms: DEFAULT_FLIGHT_MS,
            }
        }
        _ => {}
    }
    match &mut animation.timing {
        TimingModel::FixedInterval { step_interval_ms } => {
            if let Some(ms) = args.step_interval_ms {
                *step_interval_ms = ms;
            }
        }
        TimingModel::FrameSynced { duration_ms } => {
            if let Some(ms) = args.flight_ms {
                *duration_ms = ms;
            }
        }
    }
    if let Some(steps) = args.steps {
        animation.steps = steps;
    }
    if let Some(height) = args.arc_height {
        animation.arc_height = ArcHeight::fixed(height);
    }
    if args.proportional_arc {
        animation.arc_height = ArcHeight::Proportional {
            factor: 0.3,
            max: 0.25,
        };
    }
    if let Some(ms) = args.spawn_interval_ms {
        animation.spawn_interval_ms = ms;
    }
    if let Some(toggle) = args.toggle_behavior {
        animation.toggle_behavior = toggle.into();
    }
}

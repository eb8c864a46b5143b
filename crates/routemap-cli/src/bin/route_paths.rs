//! CLI tool that prints the curved routes departing an airport as JSON.
//!
//! Mirrors clicking an airport on the map: every route from it is drawn as an
//! arc, HON Circle routes tagged by group.

use clap::Parser;
use routemap_cli::{init_tracing, load_catalog, route_overlays, Config};
use routemap_core::ArcHeight;
use std::path::PathBuf;

/// Print curved route overlays for one airport
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Departure airport ICAO code
    #[arg(long)]
    airport: String,

    /// Directory with airports.json and flights.json (overrides ROUTEMAP_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Curve steps (defaults to the configured value)
    #[arg(long)]
    steps: Option<usize>,

    /// Fixed arc height in degrees
    #[arg(long, conflicts_with = "proportional_arc")]
    arc_height: Option<f64>,

    /// Scale the arc with the route's latitude span, capped at 0.25 degrees
    #[arg(long)]
    proportional_arc: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing(&["routemap_cli=info"])?;
    let args = Args::parse();

    let config = Config::from_env()?;
    let data_dir = args.data_dir.unwrap_or(config.data_dir);
    let catalog = load_catalog(&data_dir)?;

    if catalog.airport(&args.airport).is_none() {
        anyhow::bail!("airport {} is not in {}", args.airport, data_dir.display());
    }

    let steps = args.steps.unwrap_or(config.animation.steps);
    let arc = if args.proportional_arc {
        ArcHeight::Proportional {
            factor: 0.3,
            max: 0.25,
        }
    } else {
        args.arc_height
            .map(ArcHeight::fixed)
            .unwrap_or(config.animation.arc_height)
    };

    let overlays = route_overlays(&catalog, &args.airport, steps, arc);
    tracing::info!("{} route(s) from {}", overlays.len(), args.airport);

    let out = if args.pretty {
        serde_json::to_string_pretty(&overlays)?
    } else {
        serde_json::to_string(&overlays)?
    };
    println!("{}", out);
    Ok(())
}

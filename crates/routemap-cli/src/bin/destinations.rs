//! CLI tool that lists every served airport with its destination status.

use clap::{Parser, ValueEnum};
use routemap_cli::{init_tracing, load_catalog, Config};
use routemap_core::DestinationStatus;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusFilter {
    Operating,
    Planned,
    Other,
}

impl From<StatusFilter> for DestinationStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Operating => DestinationStatus::Operating,
            StatusFilter::Planned => DestinationStatus::Planned,
            StatusFilter::Other => DestinationStatus::Other,
        }
    }
}

/// List destinations classified by route status
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory with airports.json and flights.json (overrides ROUTEMAP_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Only list destinations with this status
    #[arg(long, value_enum)]
    status: Option<StatusFilter>,
}

fn main() -> anyhow::Result<()> {
    init_tracing(&["routemap_cli=info"])?;
    let args = Args::parse();

    let config = Config::from_env()?;
    let data_dir = args.data_dir.unwrap_or(config.data_dir);
    let catalog = load_catalog(&data_dir)?;

    let wanted = args.status.map(DestinationStatus::from);
    let destinations: Vec<_> = catalog
        .destinations()
        .into_values()
        .filter(|d| wanted.is_none_or(|status| d.status == status))
        .collect();

    println!("{}", serde_json::to_string_pretty(&destinations)?);
    Ok(())
}

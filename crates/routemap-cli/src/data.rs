//! Loading airport and route data from the JSON files in the data directory.

use anyhow::{Context, Result};
use routemap_core::{Airport, Catalog, RouteGroup, RouteRecord};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

pub const AIRPORTS_FILE: &str = "airports.json";
pub const FLIGHTS_FILE: &str = "flights.json";
pub const HON_CIRCLE_FILE: &str = "hon-circle.json";

/// Load airports, regular flights and (if present) HON Circle flights.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let airports: HashMap<String, Airport> = read_json(&dir.join(AIRPORTS_FILE))?;
    let flights: Vec<RouteRecord> = read_json(&dir.join(FLIGHTS_FILE))?;

    let mut catalog = Catalog::new(airports);
    catalog.add_records(flights, RouteGroup::Regular);

    let hon_path = dir.join(HON_CIRCLE_FILE);
    if hon_path.exists() {
        let hon: Vec<RouteRecord> = read_json(&hon_path)?;
        catalog.add_records(hon, RouteGroup::HonCircle);
    }

    let resolved = catalog.routes().count();
    tracing::info!(
        "Loaded {} airports, {} route records ({} resolvable) from {}",
        catalog.airports().len(),
        catalog.records().len(),
        resolved,
        dir.display()
    );
    if resolved < catalog.records().len() {
        tracing::debug!(
            "{} record(s) skipped (header rows or unknown airports)",
            catalog.records().len() - resolved
        );
    }

    Ok(catalog)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("routemap-data-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_both_route_groups() {
        let dir = scratch_dir("groups");
        fs::write(
            dir.join(AIRPORTS_FILE),
            r#"{"VABB": {"lat": 19.09, "lng": 72.86, "city": "Mumbai"},
                "VIDP": {"lat": 28.56, "lng": 77.10, "city": "Delhi"}}"#,
        )
        .unwrap();
        fs::write(
            dir.join(FLIGHTS_FILE),
            r#"[{"ORIGIN ICAO": "VABB", "DESTINATION ICAO": "VIDP"}]"#,
        )
        .unwrap();
        fs::write(
            dir.join(HON_CIRCLE_FILE),
            r#"[{"origin": "VIDP", "destination": "VABB"}]"#,
        )
        .unwrap();

        let catalog = load_catalog(&dir).unwrap();
        let groups: Vec<RouteGroup> = catalog.routes().map(|r| r.group).collect();
        assert_eq!(groups, vec![RouteGroup::Regular, RouteGroup::HonCircle]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn hon_circle_file_is_optional() {
        let dir = scratch_dir("optional");
        fs::write(dir.join(AIRPORTS_FILE), "{}").unwrap();
        fs::write(dir.join(FLIGHTS_FILE), "[]").unwrap();

        let catalog = load_catalog(&dir).unwrap();
        assert!(catalog.records().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_airports_file_reports_path() {
        let dir = scratch_dir("missing");
        let err = load_catalog(&dir).unwrap_err();
        assert!(format!("{:#}", err).contains(AIRPORTS_FILE));

        fs::remove_dir_all(&dir).unwrap();
    }
}

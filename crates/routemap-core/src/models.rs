//! Data models for airports, route records and resolved routes.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Literal origin value of a spreadsheet header row that leaked into the data.
pub const HEADER_ORIGIN: &str = "ORIGIN ICAO";

/// An airport entry keyed by ICAO code in `airports.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Airport {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Which data file a route record was loaded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteGroup {
    #[default]
    Regular,
    /// Routes flown for the HON Circle program, drawn in their own color.
    HonCircle,
}

/// Ticket price as found in the data: some exports carry numbers, some text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

/// A route record as stored in `flights.json` / `hon-circle.json`.
///
/// Both the snake_case keys and the spreadsheet column names are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(default, alias = "ORIGIN ICAO")]
    pub origin: Option<String>,
    #[serde(default, alias = "DESTINATION ICAO")]
    pub destination: Option<String>,
    #[serde(default, alias = "ROUTE FLIGHT NO.")]
    pub flight_number: Option<String>,
    #[serde(default, alias = "ASSIGNED AIRCRAFTS")]
    pub aircraft: Option<String>,
    #[serde(default, alias = "Ticket Price")]
    pub price: Option<Price>,
    #[serde(default, alias = "Status")]
    pub status: Option<String>,
    /// Set by the loader, never read from the record itself.
    #[serde(skip)]
    pub group: RouteGroup,
}

impl RouteRecord {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            ..Self::default()
        }
    }

    /// True for rows that repeat the column header instead of carrying data.
    pub fn is_header(&self) -> bool {
        self.origin.as_deref() == Some(HEADER_ORIGIN)
    }
}

/// Display metadata carried alongside a route; irrelevant to the curve math.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMetadata {
    pub flight_number: Option<String>,
    pub aircraft: Option<String>,
    pub price: Option<Price>,
    pub status: Option<String>,
}

/// A route whose airport codes were resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin_code: String,
    pub destination_code: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub group: RouteGroup,
    pub metadata: RouteMetadata,
}

impl Route {
    /// Build a route directly from coordinates, mostly for fixed pickers and tests.
    pub fn between(
        origin_code: impl Into<String>,
        origin: Coordinate,
        destination_code: impl Into<String>,
        destination: Coordinate,
    ) -> Self {
        Self {
            origin_code: origin_code.into(),
            destination_code: destination_code.into(),
            origin,
            destination,
            group: RouteGroup::Regular,
            metadata: RouteMetadata::default(),
        }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.origin_code, self.destination_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationStatus {
    /// Status mentions "operating"
    Operating,
    /// Status mentions "planned" or "contention"
    Planned,
    Other,
}

impl DestinationStatus {
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("operating") {
            Self::Operating
        } else if status.contains("planned") || status.contains("contention") {
            Self::Planned
        } else {
            Self::Other
        }
    }
}

/// An airport served by at least one route, with the status of the first
/// route that referenced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub code: String,
    pub airport: Airport,
    pub status: DestinationStatus,
}

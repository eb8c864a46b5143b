//! Airport lookup and route resolution.
//!
//! Records that reference an unknown airport are skipped without error so the
//! remaining routes keep working.

use crate::models::{
    Airport, Destination, DestinationStatus, Route, RouteGroup, RouteMetadata, RouteRecord,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    airports: HashMap<String, Airport>,
    records: Vec<RouteRecord>,
}

impl Catalog {
    pub fn new(airports: HashMap<String, Airport>) -> Self {
        Self {
            airports,
            records: Vec::new(),
        }
    }

    /// Append records, tagging each with the group of the file it came from.
    pub fn add_records(&mut self, records: impl IntoIterator<Item = RouteRecord>, group: RouteGroup) {
        self.records.extend(records.into_iter().map(|mut record| {
            record.group = group;
            record
        }));
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn airports(&self) -> &HashMap<String, Airport> {
        &self.airports
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Records of one group, in load order.
    pub fn records_in(&self, group: RouteGroup) -> impl Iterator<Item = &RouteRecord> {
        self.records.iter().filter(move |r| r.group == group)
    }

    /// Resolve airport codes to coordinates.
    ///
    /// Returns `None` for header rows and for records whose origin or
    /// destination is missing from the airport table.
    pub fn resolve(&self, record: &RouteRecord) -> Option<Route> {
        if record.is_header() {
            return None;
        }
        let origin_code = record.origin.as_deref()?;
        let destination_code = record.destination.as_deref()?;
        let from = self.airports.get(origin_code)?;
        let to = self.airports.get(destination_code)?;

        Some(Route {
            origin_code: origin_code.to_string(),
            destination_code: destination_code.to_string(),
            origin: from.coordinate(),
            destination: to.coordinate(),
            group: record.group,
            metadata: RouteMetadata {
                flight_number: record.flight_number.clone(),
                aircraft: record.aircraft.clone(),
                price: record.price.clone(),
                status: record.status.clone(),
            },
        })
    }

    /// Every record that resolves, in load order.
    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.records.iter().filter_map(|r| self.resolve(r))
    }

    /// Resolved routes departing `code`, regular routes before HON routes.
    pub fn routes_from(&self, code: &str) -> Vec<Route> {
        let mut routes: Vec<Route> = self
            .records
            .iter()
            .filter(|r| r.origin.as_deref() == Some(code))
            .filter_map(|r| self.resolve(r))
            .collect();
        routes.sort_by_key(|r| r.group == RouteGroup::HonCircle);
        routes
    }

    /// Airports referenced by any route, keyed by code.
    ///
    /// The first record to mention an airport decides its status.
    pub fn destinations(&self) -> BTreeMap<String, Destination> {
        let mut destinations = BTreeMap::new();

        for record in &self.records {
            let Some(origin) = record.origin.as_deref() else {
                continue;
            };
            if record.is_header() {
                continue;
            }
            let status = DestinationStatus::classify(record.status.as_deref().unwrap_or(""));

            for code in [Some(origin), record.destination.as_deref()].into_iter().flatten() {
                let Some(airport) = self.airports.get(code) else {
                    continue;
                };
                destinations.entry(code.to_string()).or_insert_with(|| Destination {
                    code: code.to_string(),
                    airport: airport.clone(),
                    status,
                });
            }
        }

        destinations
    }
}

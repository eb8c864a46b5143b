//! Static route overlays: the curves drawn when an airport is selected.

use routemap_core::{generate_curve, ArcHeight, Catalog, Path, Route};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RouteOverlay {
    pub route: Route,
    pub path: Path,
}

/// Curves for every resolvable route departing `airport`.
///
/// Routes whose geometry is degenerate are logged and left out.
pub fn route_overlays(catalog: &Catalog, airport: &str, steps: usize, arc: ArcHeight) -> Vec<RouteOverlay> {
    catalog
        .routes_from(airport)
        .into_iter()
        .filter_map(|route| match generate_curve(route.origin, route.destination, steps, arc) {
            Ok(path) => Some(RouteOverlay { route, path }),
            Err(e) => {
                tracing::warn!("Skipping overlay for {}: {}", route.label(), e);
                None
            }
        })
        .collect()
}

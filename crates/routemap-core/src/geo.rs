//! Coordinates and the small amount of planar math shared by curves and motion.

use crate::error::PathError;
use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Heading from `from` towards `to` in degrees.
///
/// Uses `atan2(Δlng, Δlat)`, so 0° points north and 90° east. The result is
/// the raw arctangent range (-180°, 180°]; a zero-length segment yields 0°.
pub fn heading_between(from: Coordinate, to: Coordinate) -> f64 {
    let dlat = to.lat - from.lat;
    let dlng = to.lng - from.lng;

    if dlat.abs() < 1e-10 && dlng.abs() < 1e-10 {
        return 0.0;
    }

    dlng.atan2(dlat).to_degrees()
}

/// Reject endpoints that cannot produce a meaningful arc.
pub(crate) fn validate_endpoints(origin: Coordinate, destination: Coordinate) -> Result<(), PathError> {
    for c in [origin, destination] {
        if !c.is_finite() {
            return Err(PathError::NonFinite { lat: c.lat, lng: c.lng });
        }
    }

    if origin == destination {
        return Err(PathError::DegenerateRoute {
            lat: origin.lat,
            lng: origin.lng,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_follows_lng_lat_axis_order() {
        let origin = Coordinate::new(0.0, 0.0);

        assert!((heading_between(origin, Coordinate::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((heading_between(origin, Coordinate::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((heading_between(origin, Coordinate::new(0.0, -1.0)) + 90.0).abs() < 1e-9);
        assert!((heading_between(origin, Coordinate::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn heading_of_zero_length_segment_is_zero() {
        let p = Coordinate::new(19.09, 72.86);
        assert_eq!(heading_between(p, p), 0.0);
    }

    #[test]
    fn validate_rejects_coincident_and_nan() {
        let p = Coordinate::new(10.0, 20.0);
        assert_eq!(
            validate_endpoints(p, p),
            Err(PathError::DegenerateRoute { lat: 10.0, lng: 20.0 })
        );
        assert!(matches!(
            validate_endpoints(Coordinate::new(f64::NAN, 0.0), p),
            Err(PathError::NonFinite { .. })
        ));
        assert!(validate_endpoints(p, Coordinate::new(11.0, 20.0)).is_ok());
    }

    #[test]
    fn coordinate_accepts_lon_alias() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 1.5, "lon": 2.5}"#).unwrap();
        assert_eq!(c, Coordinate::new(1.5, 2.5));
    }
}

//! Curve generator: a visual arc between two coordinates.
//!
//! The arc is not a geodesic. Latitude gets a sinusoidal bump that peaks at the
//! midpoint, longitude is interpolated linearly.

use crate::error::PathError;
use crate::geo::{lerp, validate_endpoints, Coordinate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_STEPS: usize = 80;
pub const DEFAULT_ARC_HEIGHT_DEG: f64 = 2.0;

/// Peak latitude displacement of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArcHeight {
    /// Constant height in degrees.
    Fixed { degrees: f64 },
    /// `min(max, |Δlat| * factor)`, keeps short routes from bulging.
    Proportional { factor: f64, max: f64 },
}

impl ArcHeight {
    pub const fn fixed(degrees: f64) -> Self {
        Self::Fixed { degrees }
    }

    pub fn resolve(&self, origin: Coordinate, destination: Coordinate) -> f64 {
        match *self {
            Self::Fixed { degrees } => degrees,
            Self::Proportional { factor, max } => {
                ((destination.lat - origin.lat).abs() * factor).min(max)
            }
        }
    }
}

impl Default for ArcHeight {
    fn default() -> Self {
        Self::fixed(DEFAULT_ARC_HEIGHT_DEG)
    }
}

/// Ordered points from origin to destination inclusive.
///
/// Generated once per route or animation and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Coordinate>,
}

impl Path {
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of steps the path was generated with (`len() - 1`).
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }

    pub fn origin(&self) -> Coordinate {
        self.points[0]
    }

    pub fn destination(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.points.iter()
    }
}

/// Latitude bump at progress `t`, zero at both ends and `arc_height` at `t = 0.5`.
pub fn arc_offset(t: f64, arc_height: f64) -> f64 {
    (PI * t).sin() * arc_height
}

/// Generate `steps + 1` points along the arc from `origin` to `destination`.
pub fn generate_curve(
    origin: Coordinate,
    destination: Coordinate,
    steps: usize,
    arc: ArcHeight,
) -> Result<Path, PathError> {
    if steps == 0 {
        return Err(PathError::ZeroSteps);
    }
    validate_endpoints(origin, destination)?;

    let arc_height = arc.resolve(origin, destination);
    if !arc_height.is_finite() {
        return Err(PathError::NonFiniteArc { height: arc_height });
    }
    let mut points = Vec::with_capacity(steps + 1);

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        points.push(Coordinate::new(
            lerp(origin.lat, destination.lat, t) + arc_offset(t, arc_height),
            lerp(origin.lng, destination.lng, t),
        ));
    }

    // sin(PI) is not exactly zero and lerp may miss by an ulp
    points[0] = origin;
    points[steps] = destination;

    Ok(Path { points })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUMBAI: Coordinate = Coordinate::new(19.09, 72.86);
    const DELHI: Coordinate = Coordinate::new(28.56, 77.10);

    #[test]
    fn curve_has_steps_plus_one_points_and_exact_endpoints() {
        let path = generate_curve(MUMBAI, DELHI, 80, ArcHeight::default()).unwrap();

        assert_eq!(path.len(), 81);
        assert_eq!(path.steps(), 80);
        assert_eq!(path.origin(), MUMBAI);
        assert_eq!(path.destination(), DELHI);
    }

    #[test]
    fn midpoint_is_lifted_by_arc_height() {
        let path = generate_curve(MUMBAI, DELHI, 80, ArcHeight::fixed(2.0)).unwrap();
        let mid = path.get(40).unwrap();
        let linear_lat = (MUMBAI.lat + DELHI.lat) / 2.0;

        assert!((mid.lat - (linear_lat + 2.0)).abs() < 1e-9);
        assert!((mid.lng - (MUMBAI.lng + DELHI.lng) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_is_monotonic_in_travel_direction() {
        let east = generate_curve(MUMBAI, DELHI, 37, ArcHeight::default()).unwrap();
        assert!(east.points().windows(2).all(|w| w[1].lng >= w[0].lng));

        let west = generate_curve(DELHI, MUMBAI, 37, ArcHeight::default()).unwrap();
        assert!(west.points().windows(2).all(|w| w[1].lng <= w[0].lng));
    }

    #[test]
    fn single_step_is_just_the_endpoints() {
        let path = generate_curve(MUMBAI, DELHI, 1, ArcHeight::default()).unwrap();
        assert_eq!(path.points(), &[MUMBAI, DELHI]);
    }

    #[test]
    fn proportional_arc_is_clamped() {
        let arc = ArcHeight::Proportional { factor: 0.3, max: 0.25 };

        // |Δlat| = 9.47, 9.47 * 0.3 > 0.25
        assert_eq!(arc.resolve(MUMBAI, DELHI), 0.25);

        let near = Coordinate::new(19.49, 73.0);
        assert!((arc.resolve(MUMBAI, near) - 0.4 * 0.3).abs() < 1e-9);
    }

    #[test]
    fn zero_steps_is_an_error() {
        assert_eq!(
            generate_curve(MUMBAI, DELHI, 0, ArcHeight::default()),
            Err(PathError::ZeroSteps)
        );
    }

    #[test]
    fn coincident_endpoints_are_rejected() {
        assert!(matches!(
            generate_curve(MUMBAI, MUMBAI, 10, ArcHeight::default()),
            Err(PathError::DegenerateRoute { .. })
        ));
    }

    #[test]
    fn non_finite_arc_height_is_rejected() {
        for height in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                generate_curve(MUMBAI, DELHI, 4, ArcHeight::fixed(height)),
                Err(PathError::NonFiniteArc { .. })
            ));
        }
    }

    #[test]
    fn arc_height_serializes_with_kind_tag() {
        let arc: ArcHeight =
            serde_json::from_str(r#"{"kind": "proportional", "factor": 0.3, "max": 0.25}"#).unwrap();
        assert_eq!(arc, ArcHeight::Proportional { factor: 0.3, max: 0.25 });
    }
}

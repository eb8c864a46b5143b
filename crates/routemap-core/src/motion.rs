//! Motion sampling: where a plane is, which way it points and how visible it is.

use crate::curve::{arc_offset, Path};
use crate::error::PathError;
use crate::geo::{heading_between, lerp, validate_endpoints, Coordinate};
use serde::{Deserialize, Serialize};

/// One rendered position of an animated plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionSample {
    pub position: Coordinate,
    /// Rotation for the plane icon, degrees (0 = north).
    pub heading_deg: f64,
    pub opacity: f64,
}

/// Quadratic ease-in/ease-out.
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Linear fade in over the first 10% of progress and out over the last 10%.
pub fn fade_opacity(p: f64) -> f64 {
    if p < 0.1 {
        p * 10.0
    } else if p > 0.9 {
        (1.0 - p) * 10.0
    } else {
        1.0
    }
}

/// How a stepped animation dims its plane near the ends of the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOpacity {
    /// `fade_opacity` over the normalized step index.
    Fade,
    /// Constant `dimmed` opacity within `edge_steps` of either end.
    EdgeDim { edge_steps: usize, dimmed: f64 },
}

impl StepOpacity {
    pub fn at(&self, index: usize, len: usize) -> f64 {
        match *self {
            Self::Fade => {
                let steps = len.saturating_sub(1).max(1);
                fade_opacity(index as f64 / steps as f64)
            }
            Self::EdgeDim { edge_steps, dimmed } => {
                if index < edge_steps || index + edge_steps > len {
                    dimmed
                } else {
                    1.0
                }
            }
        }
    }
}

impl Default for StepOpacity {
    fn default() -> Self {
        Self::EdgeDim {
            edge_steps: 10,
            dimmed: 0.3,
        }
    }
}

/// Sampling strategy for a plane moving along a route.
pub trait MotionSampler {
    /// Step index or time fraction, depending on the strategy.
    type Progress: Copy;

    /// Position at `progress`, or `None` once the motion has run past its end.
    fn position(&self, progress: Self::Progress) -> Option<Coordinate>;

    fn heading(&self, progress: Self::Progress) -> f64;

    fn opacity(&self, progress: Self::Progress) -> f64;

    fn sample(&self, progress: Self::Progress) -> Option<MotionSample> {
        let position = self.position(progress)?;
        Some(MotionSample {
            position,
            heading_deg: self.heading(progress),
            opacity: self.opacity(progress),
        })
    }
}

/// Discrete stepping over a precomputed curve.
#[derive(Debug, Clone)]
pub struct SteppedMotion {
    path: Path,
    opacity: StepOpacity,
}

impl SteppedMotion {
    pub fn new(path: Path, opacity: StepOpacity) -> Self {
        Self { path, opacity }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MotionSampler for SteppedMotion {
    type Progress = usize;

    fn position(&self, index: usize) -> Option<Coordinate> {
        self.path.get(index)
    }

    /// Heading towards the next point; at the last index next == current.
    fn heading(&self, index: usize) -> f64 {
        let last = self.path.len().saturating_sub(1);
        let index = index.min(last);
        match (self.path.get(index), self.path.get((index + 1).min(last))) {
            (Some(curr), Some(next)) => heading_between(curr, next),
            _ => 0.0,
        }
    }

    fn opacity(&self, index: usize) -> f64 {
        self.opacity.at(index, self.path.len())
    }
}

/// Continuous eased interpolation computed straight from the endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EasedMotion {
    origin: Coordinate,
    destination: Coordinate,
    arc_height: f64,
    heading: f64,
}

impl EasedMotion {
    pub fn new(origin: Coordinate, destination: Coordinate, arc_height: f64) -> Result<Self, PathError> {
        validate_endpoints(origin, destination)?;
        if !arc_height.is_finite() {
            return Err(PathError::NonFiniteArc { height: arc_height });
        }

        // Heading is fixed for the whole flight
        Ok(Self {
            origin,
            destination,
            arc_height,
            heading: heading_between(origin, destination),
        })
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }
}

impl MotionSampler for EasedMotion {
    type Progress = f64;

    fn position(&self, t: f64) -> Option<Coordinate> {
        let p = ease_in_out_quad(t.clamp(0.0, 1.0));
        Some(Coordinate::new(
            lerp(self.origin.lat, self.destination.lat, p) + arc_offset(p, self.arc_height),
            lerp(self.origin.lng, self.destination.lng, p),
        ))
    }

    fn heading(&self, _t: f64) -> f64 {
        self.heading
    }

    fn opacity(&self, t: f64) -> f64 {
        fade_opacity(ease_in_out_quad(t.clamp(0.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{generate_curve, ArcHeight};

    const MUMBAI: Coordinate = Coordinate::new(19.09, 72.86);
    const DELHI: Coordinate = Coordinate::new(28.56, 77.10);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easing_fixed_points() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!(close(ease_in_out_quad(0.5), 0.5));
        assert!(close(ease_in_out_quad(0.25), 0.125));
        assert!(close(ease_in_out_quad(0.75), 0.875));
    }

    #[test]
    fn easing_is_monotonic() {
        let values: Vec<f64> = (0..=100).map(|i| ease_in_out_quad(i as f64 / 100.0)).collect();
        assert!(values.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn fade_opacity_profile() {
        assert!(close(fade_opacity(0.0), 0.0));
        assert!(close(fade_opacity(0.05), 0.5));
        assert!(close(fade_opacity(0.5), 1.0));
        assert!(close(fade_opacity(0.95), 0.5));
        assert!(close(fade_opacity(1.0), 0.0));
    }

    #[test]
    fn edge_dim_matches_stepped_variant() {
        let opacity = StepOpacity::default();
        // 81 points: dimmed for i < 10 and i > 71
        assert_eq!(opacity.at(0, 81), 0.3);
        assert_eq!(opacity.at(9, 81), 0.3);
        assert_eq!(opacity.at(10, 81), 1.0);
        assert_eq!(opacity.at(71, 81), 1.0);
        assert_eq!(opacity.at(72, 81), 0.3);
        assert_eq!(opacity.at(80, 81), 0.3);
    }

    #[test]
    fn stepped_endpoints_and_final_heading() {
        let path = generate_curve(MUMBAI, DELHI, 80, ArcHeight::default()).unwrap();
        let motion = SteppedMotion::new(path, StepOpacity::Fade);

        let first = motion.sample(0).unwrap();
        assert_eq!(first.position, MUMBAI);
        assert_eq!(first.opacity, 0.0);

        let last = motion.sample(80).unwrap();
        assert_eq!(last.position, DELHI);
        // next falls back to the current point
        assert_eq!(last.heading_deg, 0.0);

        assert!(motion.sample(81).is_none());
    }

    #[test]
    fn stepped_heading_uses_next_point() {
        let path = generate_curve(MUMBAI, DELHI, 4, ArcHeight::fixed(0.0)).unwrap();
        let motion = SteppedMotion::new(path, StepOpacity::default());
        let expected = (DELHI.lng - MUMBAI.lng).atan2(DELHI.lat - MUMBAI.lat).to_degrees();

        assert!((motion.heading(1) - expected).abs() < 1e-6);
    }

    #[test]
    fn eased_motion_hits_endpoints_and_arc_peak() {
        let motion = EasedMotion::new(MUMBAI, DELHI, 2.0).unwrap();

        assert_eq!(motion.position(0.0), Some(MUMBAI));
        let end = motion.position(1.0).unwrap();
        assert!(close(end.lat, DELHI.lat));
        assert!(close(end.lng, DELHI.lng));

        let mid = motion.position(0.5).unwrap();
        assert!(close(mid.lat, lerp(MUMBAI.lat, DELHI.lat, 0.5) + 2.0));
    }

    #[test]
    fn eased_heading_is_constant() {
        let motion = EasedMotion::new(MUMBAI, DELHI, 2.0).unwrap();
        let expected = heading_between(MUMBAI, DELHI);

        for t in [0.0, 0.3, 0.5, 0.9, 1.0] {
            assert_eq!(motion.heading(t), expected);
        }
    }

    #[test]
    fn eased_progress_is_clamped() {
        let motion = EasedMotion::new(MUMBAI, DELHI, 2.0).unwrap();
        assert_eq!(motion.position(-0.5), motion.position(0.0));
        assert_eq!(motion.position(1.5), motion.position(1.0));
        assert_eq!(motion.opacity(1.5), 0.0);
    }

    #[test]
    fn eased_motion_rejects_non_finite_arc() {
        assert!(matches!(
            EasedMotion::new(MUMBAI, DELHI, f64::NAN),
            Err(PathError::NonFiniteArc { .. })
        ));
        assert!(matches!(
            EasedMotion::new(MUMBAI, DELHI, f64::INFINITY),
            Err(PathError::NonFiniteArc { .. })
        ));
    }
}

use glam::DVec3;

use crate::error::OrbiterError;

/// Closed analytic flight path: a horizontal circle of radius `R` centred on
/// the origin, `(R·sin t, 0, R·cos t)`.
///
/// Sampling is a pure function of absolute elapsed time, so the body's
/// position never drifts no matter how irregular the frame cadence is. Only
/// orientation is accumulated incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    radius: f64,
}

impl OrbitPath {
    /// Build a path with the given orbit radius.
    ///
    /// # Errors
    ///
    /// Returns [`OrbiterError::InvalidOptions`] when `radius` is not a
    /// finite positive number. A zero radius would pin the body to the
    /// origin and leave every displacement degenerate.
    pub fn new(radius: f64) -> Result<Self, OrbiterError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(OrbiterError::InvalidOptions(format!(
                "orbit radius must be finite and positive, got {radius}"
            )));
        }
        Ok(Self { radius })
    }

    /// Orbit radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Absolute position at elapsed time `t` (seconds, also radians of
    /// travel around the circle).
    #[must_use]
    pub fn sample(&self, t: f64) -> DVec3 {
        let (sin, cos) = t.sin_cos();
        DVec3::new(self.radius * sin, 0.0, self.radius * cos)
    }

    /// Time for one full revolution.
    #[must_use]
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU
    }
}

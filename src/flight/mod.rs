//! Flight core: the orbiting body and the per-frame math that moves and
//! orients it.
//!
//! Each frame runs [`sampler::OrbitPath::sample`] for the new position and
//! then [`orientation::OrientationTracker::update`] for the new heading.
//! Nothing here touches the renderer; see [`crate::engine`] for the loop
//! that glues these to the scene.

/// Per-frame heading and accumulated orientation tracking.
pub mod orientation;
/// Closed analytic flight path sampled from absolute time.
pub mod sampler;

use glam::{DQuat, DVec3};

/// The moving body. The only state that survives from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Absolute position on the flight path.
    pub position: DVec3,
    /// Unit direction of travel.
    pub forward: DVec3,
    /// Accumulated rotation applied to the body's visual (unit quaternion).
    pub orientation: DQuat,
}

impl Body {
    /// Create a body at `position` heading along `forward` with identity
    /// orientation. `forward` is normalised; a zero vector falls back to
    /// `+Z`.
    #[must_use]
    pub fn new(position: DVec3, forward: DVec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(DVec3::Z),
            orientation: DQuat::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_body_normalises_forward() {
        let body = Body::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0));
        assert_eq!(body.forward, DVec3::Z);
        assert_eq!(body.orientation, DQuat::IDENTITY);
    }

    #[test]
    fn zero_forward_falls_back_to_z() {
        let body = Body::new(DVec3::X, DVec3::ZERO);
        assert_eq!(body.forward, DVec3::Z);
        assert_eq!(body.position, DVec3::X);
    }
}

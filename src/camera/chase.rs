use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::core::Camera;

/// Where the chase camera takes its up vector from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ChaseUp {
    /// Use the body's absolute position as the up direction. On a circular
    /// orbit this is the outward radial direction rather than world up.
    /// Known oddity, kept as the default.
    #[default]
    BodyPosition,
    /// Use world `+Y`.
    WorldY,
}

/// Camera pose derived from the body for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChasePose {
    /// Eye position.
    pub position: DVec3,
    /// Point the camera is aimed at (the body).
    pub look_at: DVec3,
    /// Up vector handed to the view matrix.
    pub up: DVec3,
}

/// Trailing camera that sits behind the body along the reverse of its
/// forward vector and stays aimed at it.
///
/// The pose is recomputed from scratch every frame; no state carries over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    /// Distance behind the body along `-forward`.
    pub follow_distance: f64,
    /// Extra lift along world `+Y` (0 keeps the camera level with the body).
    pub follow_height: f64,
    /// Up vector source.
    pub up_mode: ChaseUp,
}

impl ChaseCamera {
    /// Chase camera with no height offset and the body-position up vector.
    #[must_use]
    pub fn new(follow_distance: f64) -> Self {
        Self {
            follow_distance,
            follow_height: 0.0,
            up_mode: ChaseUp::BodyPosition,
        }
    }

    /// Compute the pose for a body at `body_position` travelling along
    /// `body_forward`.
    #[must_use]
    pub fn pose(&self, body_position: DVec3, body_forward: DVec3) -> ChasePose {
        let back = -body_forward;
        let position = body_position
            + back * self.follow_distance
            + DVec3::Y * self.follow_height;
        let up = match self.up_mode {
            ChaseUp::BodyPosition => body_position,
            ChaseUp::WorldY => DVec3::Y,
        };
        ChasePose {
            position,
            look_at: body_position,
            up,
        }
    }

    /// Write a pose through the camera's mutation surface.
    pub fn apply(pose: &ChasePose, camera: &mut Camera) {
        camera.set_position(pose.position.as_vec3());
        camera.set_look_at(pose.look_at.as_vec3());
        camera.set_up(pose.up.as_vec3());
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn sits_behind_body_at_follow_distance() {
        let chase = ChaseCamera::new(2.0);
        let pose = chase.pose(DVec3::new(0.0, 0.0, 1.0), DVec3::Z);

        assert!(pose.position.abs_diff_eq(DVec3::new(0.0, 0.0, -1.0), EPS));
        assert_eq!(pose.look_at, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn up_is_body_position_by_default() {
        let body = DVec3::new(2.75, 0.0, 0.0);
        let pose = ChaseCamera::new(2.0).pose(body, DVec3::NEG_Z);
        assert_eq!(pose.up, body);
    }

    #[test]
    fn height_and_world_up_are_opt_in() {
        let chase = ChaseCamera {
            follow_distance: 1.0,
            follow_height: 0.5,
            up_mode: ChaseUp::WorldY,
        };
        let pose = chase.pose(DVec3::new(1.0, 0.0, 0.0), DVec3::X);
        assert!(pose.position.abs_diff_eq(DVec3::new(0.0, 0.5, 0.0), EPS));
        assert_eq!(pose.up, DVec3::Y);
    }

    #[test]
    fn apply_writes_camera() {
        let mut camera = Camera {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 60.0,
            znear: 0.1,
            zfar: 20.0,
        };
        let pose = ChaseCamera::new(2.0).pose(DVec3::new(0.0, 0.0, 3.0), DVec3::X);
        ChaseCamera::apply(&pose, &mut camera);

        assert_eq!(camera.eye, Vec3::new(-2.0, 0.0, 3.0));
        assert_eq!(camera.target, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.up, Vec3::new(0.0, 0.0, 3.0));
    }
}

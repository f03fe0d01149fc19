use glam::{Mat4, Quat, Vec3};

use super::MeshHandle;

/// Stable index of a node inside a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A renderable instance of a mesh with its own transform and flat colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Mesh drawn for this node.
    pub mesh: MeshHandle,
    /// World-space translation.
    pub position: Vec3,
    /// World-space rotation.
    pub orientation: Quat,
    /// Uniform scale.
    pub scale: f32,
    /// Linear RGB base colour.
    pub color: [f32; 3],
}

impl Node {
    /// Untransformed white node drawing `mesh`.
    #[must_use]
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            mesh,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
            color: [1.0; 3],
        }
    }

    /// Builder-style scale override.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style colour override.
    #[must_use]
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Move the node.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Uniform scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Rotate the node.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    /// Object-to-world matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.orientation,
            self.position,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn model_matrix_scales_then_rotates_then_translates() {
        let mut node = Node::new(MeshHandle(0));
        node.set_scale(2.0);
        node.set_orientation(Quat::from_rotation_y(FRAC_PI_2));
        node.set_position(Vec3::new(0.0, 1.0, 0.0));

        let p = node.model_matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0), 1e-5), "{p}");
    }
}

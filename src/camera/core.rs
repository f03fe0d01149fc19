use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU-side camera block: view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position (w unused).
    pub position: [f32; 4],
}

impl Camera {
    /// Move the eye.
    pub fn set_position(&mut self, position: Vec3) {
        self.eye = position;
    }

    /// Re-aim the camera at `target`.
    pub fn set_look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Replace the up vector. Not normalised here; `look_at_rh` only needs
    /// its direction.
    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// Set the width / height ratio. Non-positive or non-finite values are
    /// ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Update the aspect ratio from a viewport size. Zero-sized viewports
    /// are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.set_aspect(width as f32 / height as f32);
        }
    }

    /// Build the view matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.extend(1.0).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 1.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.5,
            fovy: 60.0,
            znear: 0.1,
            zfar: 20.0,
        }
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let cam = camera();
        let clip = cam.build_matrix() * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn viewport_updates_aspect_and_ignores_zero() {
        let mut cam = camera();
        cam.set_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(0, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect(0.5);
        assert_eq!(cam.aspect, 0.5);
    }

    #[test]
    fn uniform_tracks_eye() {
        let mut cam = camera();
        cam.set_position(Vec3::new(1.0, 2.0, 3.0));
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 1.0]);
    }
}

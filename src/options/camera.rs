use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Camera projection parameters and the pose used before the first frame.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(extend("exclusiveMinimum" = 0.0, "exclusiveMaximum" = 180.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(extend("exclusiveMinimum" = 0.0))]
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Eye position before the chase camera takes over.
    pub initial_eye: [f32; 3],
    /// Look-at target before the chase camera takes over.
    pub initial_target: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 20.0,
            initial_eye: [0.0, 1.0, 10.0],
            initial_target: [0.0, 0.0, 0.0],
        }
    }
}

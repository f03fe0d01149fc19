use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Linear distance fog.
pub struct FogOptions {
    /// Fog colour (linear RGB).
    pub color: [f32; 3],
    /// Distance where fog begins.
    pub near: f32,
    /// Distance where fog is fully opaque.
    pub far: f32,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            near: 10.0,
            far: 20.0,
        }
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// One directional key light plus a flat ambient term.
pub struct LightingOptions {
    /// Directional light colour (linear RGB).
    pub directional_color: [f32; 3],
    /// Directional light intensity.
    pub directional_intensity: f32,
    /// Direction towards the light; normalised on use.
    pub directional_direction: [f32; 3],
    /// Ambient colour (linear RGB).
    pub ambient_color: [f32; 3],
    /// Ambient intensity.
    pub ambient_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            directional_color: [1.0, 1.0, 1.0],
            directional_intensity: 1.0,
            directional_direction: [1.0, 1.0, 1.0],
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.2,
        }
    }
}

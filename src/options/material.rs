use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Flat base colours for the two scene objects.
pub struct MaterialOptions {
    /// Body colour (linear RGB).
    pub body_color: [f32; 3],
    /// Planet colour (linear RGB).
    pub planet_color: [f32; 3],
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            body_color: [1.0, 1.0, 1.0],
            planet_color: [0.35, 0.55, 0.9],
        }
    }
}

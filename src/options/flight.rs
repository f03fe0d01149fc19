use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::chase::ChaseUp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Flight path, chase camera and scene object parameters.
pub struct FlightOptions {
    /// Radius of the circular orbit.
    #[schemars(extend("exclusiveMinimum" = 0.0))]
    pub orbit_radius: f64,
    /// Distance the camera trails behind the body.
    #[schemars(extend("exclusiveMinimum" = 0.0))]
    pub follow_distance: f64,
    /// Extra camera lift along world up.
    pub follow_height: f64,
    /// Source of the chase camera's up vector.
    pub up_mode: ChaseUp,
    /// Body heading before the first movement. Must match the body mesh's
    /// nose axis for the visual to line up.
    pub initial_forward: [f64; 3],
    /// Planet sphere radius.
    pub planet_radius: f32,
    /// Uniform scale applied to the body mesh.
    pub body_scale: f32,
    /// Mesh path for the planet (`builtin:` name, `.gltf` or `.glb`).
    pub planet_mesh: String,
    /// Mesh path for the body (`builtin:` name, `.gltf` or `.glb`).
    pub body_mesh: String,
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self {
            orbit_radius: 2.75,
            follow_distance: 2.0,
            follow_height: 0.0,
            up_mode: ChaseUp::BodyPosition,
            initial_forward: [0.0, 0.0, 1.0],
            planet_radius: 2.5,
            body_scale: 0.2,
            planet_mesh: "builtin:sphere".to_owned(),
            body_mesh: "builtin:dart".to_owned(),
        }
    }
}

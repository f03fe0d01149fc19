//! Centralized scene and flight options with TOML preset support.
//!
//! Every tweakable constant (camera projection, lights, fog, materials,
//! orbit radius, chase distance) lives here. Options serialize to/from TOML
//! so a viewer can be started from a preset file.

mod camera;
mod flight;
mod fog;
mod lighting;
mod material;
mod renderer;

use std::path::Path;

pub use camera::CameraOptions;
pub use flight::FlightOptions;
pub use fog::FogOptions;
pub use lighting::LightingOptions;
pub use material::MaterialOptions;
pub use renderer::{PowerPreference, PresentMode, RendererOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbiterError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[flight]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Framebuffer settings.
    pub renderer: RendererOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Object colours.
    pub material: MaterialOptions,
    /// Distance fog.
    pub fog: FogOptions,
    /// Flight path and chase camera.
    pub flight: FlightOptions,
}

impl Options {
    /// JSON Schema for options files, field docs included.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Write [`json_schema`](Self::json_schema) as pretty JSON, for editors
    /// that validate TOML against a schema.
    ///
    /// # Errors
    ///
    /// Serialization or I/O failure.
    pub fn write_schema(path: &Path) -> Result<(), OrbiterError> {
        let content = serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| OrbiterError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbiterError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbiterError::Io)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failures, malformed TOML, and values rejected by
    /// [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, OrbiterError> {
        let content = std::fs::read_to_string(path).map_err(OrbiterError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| OrbiterError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization or I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), OrbiterError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbiterError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbiterError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbiterError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject values the flight core or projection cannot work with.
    ///
    /// # Errors
    ///
    /// [`OrbiterError::InvalidOptions`] naming the first offending field.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        let invalid = |msg: &str| Err(OrbiterError::InvalidOptions(msg.to_owned()));
        let flight = &self.flight;
        if !(flight.orbit_radius.is_finite() && flight.orbit_radius > 0.0) {
            return invalid("flight.orbit_radius must be positive");
        }
        if !(flight.follow_distance.is_finite() && flight.follow_distance > 0.0) {
            return invalid("flight.follow_distance must be positive");
        }
        if !flight.follow_height.is_finite() {
            return invalid("flight.follow_height must be finite");
        }
        if flight.initial_forward.iter().all(|&c| c == 0.0) {
            return invalid("flight.initial_forward must be non-zero");
        }
        let camera = &self.camera;
        if !(camera.znear > 0.0 && camera.zfar > camera.znear) {
            return invalid("camera clip planes must satisfy 0 < znear < zfar");
        }
        if !(camera.fovy > 0.0 && camera.fovy < 180.0) {
            return invalid("camera.fovy must be within (0, 180) degrees");
        }
        if self.fog.far < self.fog.near {
            return invalid("fog.far must not be less than fog.near");
        }
        Ok(())
    }
}

//! Scene construction: load the meshes and place the planet and body.

use super::FlightEngine;
use crate::error::OrbiterError;
use crate::options::Options;
use crate::scene::{AssetLoader, Node, Scene, SceneEnvironment, SceneHandle};

/// Load both meshes and build the scene the flight loop drives.
///
/// The planet sits at the origin scaled to `planet_radius`; the body node is
/// created at the origin and gets its transform from the first
/// [`FlightEngine::sync_scene`].
///
/// # Errors
///
/// Propagates [`OrbiterError::MeshLoad`] from either mesh. The caller may
/// retry with different paths or abort startup.
pub async fn build_scene(
    options: &Options,
    loader: &AssetLoader,
) -> Result<(Scene, SceneHandle), OrbiterError> {
    let flight = &options.flight;
    let planet_mesh = loader.load_mesh(&flight.planet_mesh).await?;
    let body_mesh = loader.load_mesh(&flight.body_mesh).await?;

    let mut scene = Scene::new(SceneEnvironment::from_options(options));
    let planet_mesh = scene.insert_mesh(planet_mesh);
    let body_mesh = scene.insert_mesh(body_mesh);

    let planet = scene.add(
        Node::new(planet_mesh)
            .with_scale(flight.planet_radius)
            .with_color(options.material.planet_color),
    );
    let body = scene.add(
        Node::new(body_mesh)
            .with_scale(flight.body_scale)
            .with_color(options.material.body_color),
    );

    log::info!(
        "scene built: planet `{}` r={}, body `{}` scale={}",
        flight.planet_mesh,
        flight.planet_radius,
        flight.body_mesh,
        flight.body_scale
    );

    Ok((scene, SceneHandle { body, planet }))
}

impl FlightEngine {
    /// Build the engine and its scene together, with the body node already
    /// placed at its starting pose.
    ///
    /// # Errors
    ///
    /// Invalid options or a failed mesh load.
    pub async fn with_scene(
        options: &Options,
        loader: &AssetLoader,
        aspect: f32,
    ) -> Result<(Self, Scene, SceneHandle), OrbiterError> {
        let engine = Self::new(options, aspect)?;
        let (mut scene, handle) = build_scene(options, loader).await?;
        engine.sync_scene(&mut scene, &handle);
        Ok((engine, scene, handle))
    }
}

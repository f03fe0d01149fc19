//! Writing flight state into the scene and drawing it.

use super::{FlightEngine, FrameReport};
use crate::scene::{Renderer, Scene, SceneHandle};

impl FlightEngine {
    /// Copy the body pose onto its scene node.
    pub fn sync_scene(&self, scene: &mut Scene, handle: &SceneHandle) {
        let Some(node) = scene.node_mut(handle.body) else {
            log::warn!("body node {:?} missing from scene", handle.body);
            return;
        };
        node.set_position(self.body.position.as_vec3());
        node.set_orientation(self.body.orientation.as_quat());
    }

    /// Run one complete frame: advance the flight, sync the body node and
    /// render through `renderer`.
    ///
    /// # Errors
    ///
    /// Whatever the renderer reports. The flight state has already advanced
    /// when this fails, so the next frame continues from the new pose.
    pub fn frame<R: Renderer>(
        &mut self,
        elapsed: f64,
        scene: &mut Scene,
        handle: &SceneHandle,
        renderer: &mut R,
    ) -> Result<FrameReport, R::Error> {
        let report = self.advance(elapsed);
        self.sync_scene(scene, handle);
        renderer.render(scene, &self.camera)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::FlightEngine;
    use crate::options::Options;
    use crate::scene::{AssetLoader, HeadlessRenderer};
    use crate::util::clock::{Clock, ManualClock};

    #[test]
    fn frames_drive_node_and_renderer() {
        let options = Options::default();
        let loader = AssetLoader::new(".");
        let (mut engine, mut scene, handle) = pollster::block_on(
            FlightEngine::with_scene(&options, &loader, 1.0),
        )
        .unwrap();
        let mut renderer = HeadlessRenderer::new();
        let mut clock = ManualClock::new();

        for _ in 0..120 {
            clock.advance(1.0 / 60.0);
            let report = engine
                .frame(clock.elapsed(), &mut scene, &handle, &mut renderer)
                .unwrap();
            let node = scene.node(handle.body).unwrap();
            assert_eq!(node.position, report.body.position.as_vec3());
            assert_eq!(node.orientation, report.body.orientation.as_quat());
        }

        assert_eq!(renderer.frames(), 120);
        assert_eq!(renderer.last_node_count(), 2);
        assert_eq!(renderer.last_camera(), Some(engine.camera()));
    }
}

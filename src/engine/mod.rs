//! The per-frame flight loop.
//!
//! [`FlightEngine`] owns the body, the render camera and the three flight
//! components, and exposes a single [`advance`](FlightEngine::advance)
//! entry point the host calls once per tick with absolute elapsed time:
//!
//! ```text
//! OrbitPath::sample → OrientationTracker::update → ChaseCamera::pose → Camera
//! ```
//!
//! Writing the result into a [`Scene`](crate::scene::Scene) and rendering
//! are separate steps (see `scene_sync`), so the loop can be tested without
//! a GPU.

mod construction;
mod scene_sync;

use glam::{DVec3, Vec3};

pub use construction::build_scene;

use crate::camera::chase::{ChaseCamera, ChasePose};
use crate::camera::core::Camera;
use crate::error::OrbiterError;
use crate::flight::orientation::{Degeneracy, OrientationTracker};
use crate::flight::sampler::OrbitPath;
use crate::flight::Body;
use crate::options::Options;

/// Frames between periodic debug summaries.
const LOG_INTERVAL: u64 = 600;

/// What one call to [`FlightEngine::advance`] produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Elapsed time the frame was computed for.
    pub elapsed: f64,
    /// Body state after the frame.
    pub body: Body,
    /// Camera pose after the frame.
    pub pose: ChasePose,
    /// Edge case recovered this frame, if any.
    pub degeneracy: Option<Degeneracy>,
}

/// Drives the orbiting body and its chase camera.
#[derive(Debug, Clone)]
pub struct FlightEngine {
    path: OrbitPath,
    tracker: OrientationTracker,
    chase: ChaseCamera,
    body: Body,
    camera: Camera,
    frames: u64,
    degenerate_frames: u64,
}

impl FlightEngine {
    /// Create the engine from options. The body starts at `sample(0)` with
    /// the configured initial heading and identity orientation; the camera
    /// starts at the configured initial pose until the first frame.
    ///
    /// # Errors
    ///
    /// [`OrbiterError::InvalidOptions`] when the options fail validation.
    pub fn new(options: &Options, aspect: f32) -> Result<Self, OrbiterError> {
        options.validate()?;
        let flight = &options.flight;
        let path = OrbitPath::new(flight.orbit_radius)?;
        let body = Body::new(
            path.sample(0.0),
            DVec3::from_array(flight.initial_forward),
        );
        let chase = ChaseCamera {
            follow_distance: flight.follow_distance,
            follow_height: flight.follow_height,
            up_mode: flight.up_mode,
        };
        let camera = Camera {
            eye: Vec3::from_array(options.camera.initial_eye),
            target: Vec3::from_array(options.camera.initial_target),
            up: Vec3::Y,
            aspect,
            fovy: options.camera.fovy,
            znear: options.camera.znear,
            zfar: options.camera.zfar,
        };

        log::info!(
            "flight engine: orbit radius {}, follow distance {}, up {:?}",
            path.radius(),
            chase.follow_distance,
            chase.up_mode
        );

        Ok(Self {
            path,
            tracker: OrientationTracker::new(),
            chase,
            body,
            camera,
            frames: 0,
            degenerate_frames: 0,
        })
    }

    /// Advance to absolute elapsed time `elapsed` (seconds since scene
    /// start): sample the path, re-orient the body, re-aim the camera.
    pub fn advance(&mut self, elapsed: f64) -> FrameReport {
        let new_position = self.path.sample(elapsed);
        let step = self.tracker.update(
            self.body.forward,
            new_position,
            self.body.position,
            self.body.orientation,
        );
        if let Some(degeneracy) = step.degeneracy {
            self.degenerate_frames += 1;
            log::trace!(
                "frame {}: {degeneracy:?} at t={elapsed:.4}",
                self.frames
            );
        }

        self.body = Body {
            position: new_position,
            forward: step.forward,
            orientation: step.orientation,
        };

        let pose = self.chase.pose(self.body.position, self.body.forward);
        ChaseCamera::apply(&pose, &mut self.camera);

        self.frames += 1;
        if self.frames % LOG_INTERVAL == 0 {
            log::debug!(
                "frame {}: t={elapsed:.2} pos={:.3} fwd={:.3} ({} degenerate)",
                self.frames,
                self.body.position,
                self.body.forward,
                self.degenerate_frames
            );
        }

        FrameReport {
            elapsed,
            body: self.body,
            pose,
            degeneracy: step.degeneracy,
        }
    }

    /// Current body state.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Render camera as of the last frame.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The flight path.
    #[must_use]
    pub fn path(&self) -> &OrbitPath {
        &self.path
    }

    /// Chase camera parameters.
    #[must_use]
    pub fn chase(&self) -> &ChaseCamera {
        &self.chase
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that hit a recovered numeric edge case.
    #[must_use]
    pub fn degenerate_frames(&self) -> u64 {
        self.degenerate_frames
    }

    /// Update the camera aspect ratio after a resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use glam::DQuat;

    use super::*;
    use crate::camera::chase::ChaseUp;

    fn engine_with(options: &Options) -> FlightEngine {
        FlightEngine::new(options, 1.5).unwrap()
    }

    #[test]
    fn body_starts_on_path_with_identity_orientation() {
        let engine = engine_with(&Options::default());
        assert!(engine
            .body()
            .position
            .abs_diff_eq(DVec3::new(0.0, 0.0, 2.75), 1e-12));
        assert_eq!(engine.body().forward, DVec3::Z);
        assert_eq!(engine.body().orientation, DQuat::IDENTITY);
        assert_eq!(engine.camera().eye, Vec3::new(0.0, 1.0, 10.0));
    }

    #[test]
    fn first_frame_at_zero_holds_state() {
        let mut engine = engine_with(&Options::default());
        let before = *engine.body();
        let report = engine.advance(0.0);

        assert_eq!(report.degeneracy, Some(Degeneracy::DegenerateDisplacement));
        assert_eq!(report.body, before);
        assert_eq!(engine.frames(), 1);
        assert_eq!(engine.degenerate_frames(), 1);
    }

    #[test]
    fn camera_trails_body_every_frame() {
        let options = Options::default();
        let mut engine = engine_with(&options);
        for i in 1..=50 {
            let report = engine.advance(f64::from(i) * 0.02);
            let expected = report.body.position
                - report.body.forward * options.flight.follow_distance;
            assert!(report.pose.position.abs_diff_eq(expected, 1e-12));
            assert_eq!(report.pose.look_at, report.body.position);
            assert_eq!(report.pose.up, report.body.position);

            let camera = engine.camera();
            assert_eq!(camera.eye, report.pose.position.as_vec3());
            assert_eq!(camera.target, report.body.position.as_vec3());
        }
    }

    #[test]
    fn irregular_frame_times_keep_invariants() {
        let mut engine = engine_with(&Options::default());
        let mut t = 0.0;
        let steps = [0.016, 0.016, 0.1, 0.0, 0.033, 0.5, 0.001, 0.25];
        for i in 0..400 {
            t += steps[i % steps.len()];
            let report = engine.advance(t);
            let body = report.body;

            assert_eq!(body.position, engine.path().sample(t));
            assert!((body.forward.length() - 1.0).abs() < 1e-9);
            assert!((body.orientation.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn full_orbit_completes_one_revolution() {
        const STEPS: u32 = 1000;
        let dt = TAU / f64::from(STEPS);

        // Start heading along the chord that leads into t = 0 so every step,
        // including the first, turns by exactly `dt`.
        let mut options = Options::default();
        let path = OrbitPath::new(options.flight.orbit_radius).unwrap();
        let initial_forward = (path.sample(0.0) - path.sample(-dt)).normalize();
        options.flight.initial_forward = initial_forward.to_array();

        let mut engine = engine_with(&options);
        for i in 1..=STEPS {
            let report = engine.advance(f64::from(i) * dt);
            let body = report.body;

            // Orientation always carries the initial heading onto the
            // current one.
            assert!((body.orientation * initial_forward)
                .abs_diff_eq(body.forward, 1e-9));

            if i == STEPS / 2 {
                let (axis, angle) = body.orientation.to_axis_angle();
                assert!(axis.abs_diff_eq(DVec3::Y, 1e-9));
                assert!((angle - TAU / 2.0).abs() < 1e-6, "angle {angle}");
            }
        }

        let body = engine.body();
        assert!(body.position.abs_diff_eq(path.sample(0.0), 1e-9));
        assert!(body.forward.abs_diff_eq(initial_forward, 1e-9));
        // A full 2π turn lands on the antipodal quaternion: the same
        // rotation, reached by turning once around rather than not at all.
        assert!(body.orientation.abs_diff_eq(-DQuat::IDENTITY, 1e-6));
        assert_eq!(engine.degenerate_frames(), 0);
    }

    #[test]
    fn world_up_option_reaches_camera() {
        let mut options = Options::default();
        options.flight.up_mode = ChaseUp::WorldY;
        let mut engine = engine_with(&options);
        let _ = engine.advance(0.1);
        assert_eq!(engine.camera().up, Vec3::Y);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut options = Options::default();
        options.flight.follow_distance = -1.0;
        assert!(FlightEngine::new(&options, 1.0).is_err());
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut engine = engine_with(&Options::default());
        engine.set_viewport(1000, 500);
        assert_eq!(engine.camera().aspect, 2.0);
    }
}

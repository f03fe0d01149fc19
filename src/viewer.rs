//! Standalone flight window backed by winit.
//!
//! ```no_run
//! # use orbiter::Viewer;
//! Viewer::builder()
//!     .with_title("Orbiter")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc};

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::FlightEngine,
    error::OrbiterError,
    gpu::render_context::RenderContext,
    input::{InputCommand, InputEvent, InputProcessor, Key},
    options::Options,
    renderer::SceneRenderer,
    scene::{AssetLoader, Scene, SceneHandle},
    util::clock::{Clock, FrameTiming, SystemClock},
};

/// How often the smoothed frame rate is logged.
const FPS_LOG_PERIOD: Duration = Duration::from_secs(5);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    asset_root: PathBuf,
    title: String,
    target_fps: u32,
}

impl ViewerBuilder {
    /// Defaults: title "Orbiter", assets resolved against the working
    /// directory, default options, no frame cap beyond vsync.
    fn new() -> Self {
        Self {
            options: None,
            asset_root: PathBuf::from("."),
            title: "Orbiter".into(),
            target_fps: 0,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Directory that relative mesh paths are resolved against.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Cap the frame rate (0 = unlimited).
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            asset_root: self.asset_root,
            title: self.title,
            target_fps: self.target_fps,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the body orbiting the planet, seen from the chase
/// camera.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    asset_root: PathBuf,
    title: String,
    target_fps: u32,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or Escape is pressed.
    ///
    /// # Errors
    ///
    /// Invalid options, event-loop failure, or any startup failure inside
    /// the loop (window, GPU context, mesh loading).
    pub fn run(self) -> Result<(), OrbiterError> {
        self.options.validate()?;

        let event_loop =
            EventLoop::new().map_err(|e| OrbiterError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            input: InputProcessor::new((1, 1)),
            timing: FrameTiming::new(self.target_fps),
            clock: SystemClock::start(),
            last_fps_log: Instant::now(),
            options: self.options,
            asset_root: self.asset_root,
            title: self.title,
            running: None,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrbiterError::Viewer(e.to_string()))?;

        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    renderer: SceneRenderer,
    engine: FlightEngine,
    scene: Scene,
    handle: SceneHandle,
}

/// Internal winit application handler.
struct ViewerApp {
    input: InputProcessor,
    timing: FrameTiming,
    clock: SystemClock,
    last_fps_log: Instant,
    options: Options,
    asset_root: PathBuf,
    title: String,
    running: Option<Running>,
    /// First fatal error, returned from [`Viewer::run`].
    error: Option<OrbiterError>,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn start(
        &self,
        window: Arc<Window>,
        size: (u32, u32),
    ) -> Result<Running, OrbiterError> {
        let context = pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            size,
            &self.options.renderer,
        ))?;
        let renderer = SceneRenderer::new(context);

        let loader = AssetLoader::new(self.asset_root.clone());
        let aspect = size.0 as f32 / size.1 as f32;
        let (engine, scene, handle) = pollster::block_on(
            FlightEngine::with_scene(&self.options, &loader, aspect),
        )?;

        Ok(Running {
            window,
            renderer,
            engine,
            scene,
            handle,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: OrbiterError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        match self.input.handle_event(event) {
            Some(InputCommand::Resize { width, height }) => {
                if let Some(running) = &mut self.running {
                    running.renderer.resize(width, height);
                    running.engine.set_viewport(width, height);
                }
            }
            Some(InputCommand::Quit) => event_loop.exit(),
            None => {}
        }
    }

    fn redraw(&mut self) {
        let Some(running) = &mut self.running else {
            return;
        };
        if !self.timing.should_render() {
            running.window.request_redraw();
            return;
        }

        let elapsed = self.clock.elapsed();
        match running.engine.frame(
            elapsed,
            &mut running.scene,
            &running.handle,
            &mut running.renderer,
        ) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = viewport_size(running.window.inner_size());
                running.renderer.resize(width, height);
                running.engine.set_viewport(width, height);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        self.timing.end_frame();
        if self.last_fps_log.elapsed() >= FPS_LOG_PERIOD {
            log::debug!(
                "{:.1} fps, space held: {}",
                self.timing.fps(),
                self.input.state().space_held
            );
            self.last_fps_log = Instant::now();
        }
        running.window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, OrbiterError::Viewer(e.to_string()));
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        match self.start(Arc::clone(&window), size) {
            Ok(running) => {
                self.input = InputProcessor::new(size);
                // Flight time starts when the scene is ready, not when the
                // event loop was created.
                self.clock = SystemClock::start();
                window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                self.handle_input(
                    event_loop,
                    InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    },
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_input(
                    event_loop,
                    InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    },
                );
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                self.handle_input(
                    event_loop,
                    InputEvent::Key {
                        key: Key::from(event.physical_key),
                        pressed: event.state == ElementState::Pressed,
                    },
                );
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => (),
        }
    }
}

//! Window surface bring-up driven by [`RendererOptions`].

use std::fmt;

use crate::options::{PowerPreference, PresentMode, RendererOptions};

/// Reasons the viewer window could not get a GPU to draw with.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    Device(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::NoAdapter(e) => write!(f, "no GPU adapter for surface: {e}"),
            Self::Device(e) => write!(f, "GPU device request failed: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "window surface has no usable texture format")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::NoAdapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

impl From<PresentMode> for wgpu::PresentMode {
    fn from(mode: PresentMode) -> Self {
        match mode {
            PresentMode::Fifo => Self::Fifo,
            PresentMode::Mailbox => Self::Mailbox,
            PresentMode::Immediate => Self::Immediate,
        }
    }
}

impl From<PowerPreference> for wgpu::PowerPreference {
    fn from(preference: PowerPreference) -> Self {
        match preference {
            PowerPreference::HighPerformance => Self::HighPerformance,
            PowerPreference::LowPower => Self::LowPower,
        }
    }
}

/// The requested mode if the surface lists it, otherwise `Fifo`, which
/// every surface supports.
#[must_use]
pub fn resolve_present_mode(
    requested: wgpu::PresentMode,
    supported: &[wgpu::PresentMode],
) -> wgpu::PresentMode {
    if supported.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// sRGB if the surface offers one, so the shader can write linear colour.
fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// Device, queue and the configured window surface.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Command queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a surface on `window` and configure it for `size` using the
    /// adapter preference and present mode from `options`.
    ///
    /// # Errors
    ///
    /// [`RenderContextError`] for each bring-up step that can fail.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &RendererOptions,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: options.power_preference.into(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::NoAdapter)?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Orbiter Device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        let requested = options.present_mode.into();
        let present_mode = resolve_present_mode(requested, &caps.present_modes);
        if present_mode != requested {
            log::warn!(
                "present mode {requested:?} unsupported, using {present_mode:?}"
            );
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);
        log::debug!("surface {format:?} {}x{}", config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Surface texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Present mode actually in use.
    pub fn present_mode(&self) -> wgpu::PresentMode {
        self.config.present_mode
    }

    /// Reconfigure for a new window size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture.
    ///
    /// # Errors
    ///
    /// [`wgpu::SurfaceError`] when the surface is lost, outdated or timed
    /// out; the caller resizes and tries again next frame.
    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Fresh command encoder.
    pub fn encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish `encoder` and queue it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let supported = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate];
        assert_eq!(
            resolve_present_mode(wgpu::PresentMode::Immediate, &supported),
            wgpu::PresentMode::Immediate
        );
        assert_eq!(
            resolve_present_mode(wgpu::PresentMode::Mailbox, &supported),
            wgpu::PresentMode::Fifo
        );
        assert_eq!(
            resolve_present_mode(wgpu::PresentMode::Mailbox, &[]),
            wgpu::PresentMode::Fifo
        );
    }

    #[test]
    fn options_map_onto_wgpu() {
        let options = RendererOptions {
            present_mode: PresentMode::Mailbox,
            power_preference: PowerPreference::LowPower,
            ..RendererOptions::default()
        };
        assert_eq!(
            wgpu::PresentMode::from(options.present_mode),
            wgpu::PresentMode::Mailbox
        );
        assert_eq!(
            wgpu::PowerPreference::from(options.power_preference),
            wgpu::PowerPreference::LowPower
        );
        assert_eq!(
            wgpu::PresentMode::from(RendererOptions::default().present_mode),
            wgpu::PresentMode::Fifo
        );
    }

    #[test]
    fn srgb_format_is_preferred() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            pick_format(&formats),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
        assert_eq!(
            pick_format(&[wgpu::TextureFormat::Rgba16Float]),
            Some(wgpu::TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_format(&[]), None);
    }

    #[test]
    fn unsupported_surface_has_no_source() {
        let err = RenderContextError::UnsupportedSurface;
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().contains("texture format"));
    }
}

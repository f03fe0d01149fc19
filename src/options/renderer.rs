use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Swapchain presentation behaviour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PresentMode {
    /// Vsync; supported everywhere.
    #[default]
    Fifo,
    /// Vsync without blocking on a full queue, where available.
    Mailbox,
    /// No vsync, may tear.
    Immediate,
}

/// Which adapter to ask for when several are present.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    /// Discrete GPU if there is one.
    #[default]
    HighPerformance,
    /// Integrated GPU if there is one.
    LowPower,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Framebuffer and GPU selection settings.
pub struct RendererOptions {
    /// Clear colour (linear RGB).
    pub clear_color: [f32; 3],
    /// Requested present mode; falls back to `fifo` when the surface does
    /// not support it.
    pub present_mode: PresentMode,
    /// Adapter power preference.
    pub power_preference: PowerPreference,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            clear_color: [1.0, 1.0, 1.0],
            present_mode: PresentMode::Fifo,
            power_preference: PowerPreference::HighPerformance,
        }
    }
}

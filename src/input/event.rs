/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor), which
/// folds them into an [`InputState`](super::InputState) and emits
/// [`InputCommand`](super::InputCommand)s for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Key pressed or released.
    Key {
        /// Which key changed.
        key: Key,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Viewport resized.
    Resized {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// The keys the viewer distinguishes. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Any other key.
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::PhysicalKey> for Key {
    fn from(key: winit::keyboard::PhysicalKey) -> Self {
        use winit::keyboard::{KeyCode, PhysicalKey};
        match key {
            PhysicalKey::Code(KeyCode::Space) => Self::Space,
            PhysicalKey::Code(KeyCode::Escape) => Self::Escape,
            _ => Self::Other,
        }
    }
}

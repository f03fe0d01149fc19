//! Converts raw platform events into input state and host commands.
//!
//! The `InputProcessor` owns all transient input state (pointer direction,
//! held keys, viewport size). It is the only thing that sits between raw
//! window events and the host's frame loop.

use glam::Vec2;

use super::event::{InputEvent, Key};

/// Actions the host should perform in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Resize the surface and update the camera aspect.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// Close the viewer.
    Quit,
}

/// Snapshot of the input the host can poll each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Whether space is held. Any key release clears it.
    pub space_held: bool,
    /// Unit direction from the viewport centre to the cursor, in
    /// `[-1, 1]` viewport space with `+y` pointing down. Zero at the centre.
    pub pointer: Vec2,
    /// Current viewport size in physical pixels.
    pub viewport: (u32, u32),
}

/// Folds [`InputEvent`]s into an [`InputState`].
///
/// # Usage
///
/// ```
/// use orbiter::input::{InputCommand, InputEvent, InputProcessor, Key};
///
/// let mut input = InputProcessor::new((800, 600));
/// let cmd = input.handle_event(InputEvent::Key { key: Key::Escape, pressed: true });
/// assert_eq!(cmd, Some(InputCommand::Quit));
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    state: InputState,
}

impl InputProcessor {
    /// Create a processor for a viewport of the given size.
    #[must_use]
    pub fn new(viewport: (u32, u32)) -> Self {
        Self {
            state: InputState {
                space_held: false,
                pointer: Vec2::ZERO,
                viewport,
            },
        }
    }

    /// Current input snapshot.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Process an event, returning a command for the host if one results.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<InputCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(x, y);
                None
            }
            InputEvent::Key { key, pressed } => self.handle_key(key, pressed),
            InputEvent::Resized { width, height } => {
                self.state.viewport = (width, height);
                (width > 0 && height > 0)
                    .then_some(InputCommand::Resize { width, height })
            }
        }
    }

    fn handle_key(&mut self, key: Key, pressed: bool) -> Option<InputCommand> {
        if !pressed {
            // Releasing any key, not just space, drops the hold.
            self.state.space_held = false;
            return None;
        }
        match key {
            Key::Space => {
                self.state.space_held = true;
                None
            }
            Key::Escape => Some(InputCommand::Quit),
            Key::Other => None,
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) {
        let (width, height) = self.state.viewport;
        if width == 0 || height == 0 {
            return;
        }
        let scaled = Vec2::new(
            x / width as f32 * 2.0 - 1.0,
            y / height as f32 * 2.0 - 1.0,
        );
        self.state.pointer = scaled.normalize_or_zero();
    }
}

//! Input handling: event types, the per-frame input state, and the
//! processor that folds raw window events into it.
//!
//! The flight core never reads input. The host polls [`InputState`] and
//! acts on [`InputCommand`]s between frames.

/// Platform-agnostic input events.
pub mod event;
/// Folds raw events into input state and host commands.
pub mod processor;

pub use event::{InputEvent, Key};
pub use processor::{InputCommand, InputProcessor, InputState};

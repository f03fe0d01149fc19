//! Camera system for 3D scene viewing.
//!
//! Provides the render camera and the chase camera that derives its pose
//! from the orbiting body every frame.

/// Chase camera that trails the body.
pub mod chase;
/// Core camera struct and GPU uniform types.
pub mod core;

//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orbiter crate.
///
/// Numeric degeneracies inside the flight core are never errors; they are
/// recovered per frame and reported as
/// [`Degeneracy`](crate::flight::orientation::Degeneracy) values instead.
#[derive(Debug)]
pub enum OrbiterError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to load or parse a mesh asset.
    MeshLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed fine but hold values the flight core cannot use.
    InvalidOptions(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for OrbiterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::MeshLoad(msg) => write!(f, "mesh load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for OrbiterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrbiterError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrbiterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

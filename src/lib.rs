// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Chase-camera flight viewer built on wgpu.
//!
//! A body travels a circular orbit around a planet; each frame its heading
//! and orientation are re-derived from the step it just took, and a camera
//! follows from behind.
//!
//! # Key entry points
//!
//! - [`engine::FlightEngine`] - the per-frame loop: sample the orbit,
//!   update orientation, place the chase camera
//! - [`flight`] - the numeric core ([`flight::sampler::OrbitPath`],
//!   [`flight::orientation::OrientationTracker`])
//! - [`camera::chase::ChaseCamera`] - trailing camera placement
//! - [`scene::Scene`] - meshes, nodes, lights and fog, drawn through a
//!   [`scene::Renderer`]
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! The flight core works in `f64` and knows nothing about rendering. The
//! host (the winit `Viewer` or the headless CLI loop) reads a clock, calls
//! [`engine::FlightEngine::frame`] once per tick, and the engine syncs the
//! body node and hands the scene to the renderer. Everything runs on one
//! thread.

pub mod camera;
pub mod engine;
pub mod error;
pub mod flight;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::FlightEngine;
pub use error::OrbiterError;
pub use input::InputEvent;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;

//! Portfolio site: a static-site generator for composited scene sprites and the
//! WebGL sketches that run on the generated page.
//!
//! The simulation, projection, geometry and parallax modules are plain Rust and
//! build for every target. `site` is the host-side build pipeline; the browser
//! entry points live in the wasm32-only `wasm` module.

pub mod frame;
pub mod geometry;
pub mod logging;
pub mod parallax;
pub mod projection;
pub mod sim;

#[cfg(not(target_arch = "wasm32"))]
pub mod site;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start_icons, start_parallax};

/// Id of the canvas element the icon sketch draws into.
pub const SKETCH_CANVAS_ID: &str = "c";

pub use frame::{FrameClock, FrameTime};
pub use logging::{init_logging, LoggingConfig};
pub use projection::{Projection, ProjectionKind, Viewport};
pub use sim::{FieldConfig, Icon, IconField, RotationMode};

//! Icon placement simulation.
//!
//! Icons repel each other and the viewport edges with an inverse-square law while
//! their speed relaxes toward a fixed target. Everything here is plain data so the
//! same code drives the browser sketches and the host tests.

mod field;
mod icon;
mod rotation;

pub use field::{FieldConfig, IconField};
pub use icon::Icon;
pub use rotation::RotationMode;

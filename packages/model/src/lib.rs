//! # Loaderkit Model
//!
//! The scene a user draws: canvas size, an ordered list of primitives, and the
//! colors/animation settings that end up as props on the generated
//! content loader component.
//!
//! Everything here is plain data. Generation, translation and preview all take
//! a [`ShapeModel`] by reference and hand back new values.

mod error;
mod options;
mod presets;
mod shape;

pub use error::{UnknownPresetError, UnsupportedFrameworkError};
pub use options::{defaults, Framework};
pub use presets::{preset, presets, PresetName};
pub use shape::{Canvas, Shape, ShapeKind, ShapeModel};

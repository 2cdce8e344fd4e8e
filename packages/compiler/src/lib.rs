//! # Loaderkit Compiler
//!
//! Turns a [`ShapeModel`](loaderkit_model::ShapeModel) into content loader
//! component source for React or Vue.
//!
//! ```text
//! ShapeModel ──lower──▶ LoaderDocument ──print──▶ source text
//! ```
//!
//! The printer is public so the translator can re-print parsed documents in
//! the other dialect with exactly the same layout.

mod context;
mod error;
mod generator;
mod printer;

#[cfg(test)]
mod tests;

pub use context::OutputMode;
pub use error::{CodegenError, CodegenResult};
pub use generator::{generate, generate_for, lower, GenerateOptions};
pub use printer::{format_number, print};

//! # Loaderkit Preview
//!
//! The live preview loop: hand-edited source goes in, a rendered loader (or an
//! error) and the scene read back from it come out.
//!
//! ```text
//!  source ──translate──▶ sandbox.execute ──▶ RenderOutput ──extract──▶ ShapeModel
//!   (any dialect)          (native dialect)       │
//!                                                 └──▶ last good render
//! ```
//!
//! Sandboxes are pluggable through [`Sandbox`]. [`MarkupSandbox`] is the
//! in-process reference implementation used by the CLI and the tests.
//!
//! Submissions are ordered by [`Ticket`]: a result that arrives after a newer
//! submission was issued is dropped, whatever order the executions finish in.

mod bridge;
mod error;
mod extract;
mod sandbox;
pub mod vdom;

pub use bridge::{PreviewBridge, PreviewOutcome, Ticket};
pub use error::{ExtractionError, RenderError};
pub use extract::extract;
pub use sandbox::{MarkupSandbox, RenderOutput, Sandbox, Scope};
pub use vdom::VNode;

//! Error types for the editor

use loaderkit_compiler::CodegenError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Code generation failed: {0}")]
    Codegen(#[from] CodegenError),

    #[error("Preferences error: {0}")]
    Preferences(#[from] PreferencesError),
}

/// Failures the editor cannot recover from in place. The shell answers
/// every one of them by resetting to the default state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FatalError {
    #[error("Selected item {index} does not exist ({len} primitives)")]
    InvalidSelection { index: usize, len: usize },

    #[error("Cannot render editor state: {0}")]
    Render(#[from] CodegenError),
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

pub mod generate;
pub mod init;
pub mod presets;
pub mod preview;
pub mod translate;
pub mod watch;

pub use generate::{generate, GenerateArgs};
pub use init::{init, InitArgs};
pub use presets::{presets, PresetsArgs};
pub use preview::{preview, PreviewArgs};
pub use translate::{translate, TranslateArgs};
pub use watch::{watch, WatchArgs};

use anyhow::{Context, Result};
use loaderkit_model::Framework;
use loaderkit_compiler::CodegenError;
use std::fs;
use std::path::Path;

/// Parse a user-supplied framework selector
pub(crate) fn parse_framework(selector: &str) -> Result<Framework> {
    Ok(selector.parse().map_err(CodegenError::from)?)
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
}

/// Write to `path`, or stdout when there is none
pub(crate) fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Cannot write {}", path.display()))
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

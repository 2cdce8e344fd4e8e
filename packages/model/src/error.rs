use thiserror::Error;

/// A framework selector that is neither `react` nor `vue`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported framework '{selector}': expected 'react' or 'vue'")]
pub struct UnsupportedFrameworkError {
    pub selector: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown preset '{name}'")]
pub struct UnknownPresetError {
    pub name: String,
}

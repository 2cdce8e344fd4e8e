use crate::error::UnsupportedFrameworkError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target component framework (the "dialect" of generated source)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::React, Framework::Vue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }

    /// npm package that provides the `ContentLoader` component
    pub fn package(&self) -> &'static str {
        match self {
            Framework::React => "react-content-loader",
            Framework::Vue => "vue-content-loader",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = UnsupportedFrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "react" => Ok(Framework::React),
            "vue" => Ok(Framework::Vue),
            _ => Err(UnsupportedFrameworkError {
                selector: s.to_string(),
            }),
        }
    }
}

/// Values used when the editor starts fresh or recovers from a fatal error,
/// and the props the content loader component falls back to when omitted.
pub mod defaults {
    pub const CANVAS_WIDTH: f64 = 400.0;
    pub const CANVAS_HEIGHT: f64 = 160.0;
    pub const PRIMARY_COLOR: &str = "#f3f3f3";
    pub const SECONDARY_COLOR: &str = "#ecebeb";
    pub const SPEED: f64 = 2.0;
    pub const COMPONENT_NAME: &str = "MyLoader";

    /// Height the component renders at when the `height` prop is missing
    pub const COMPONENT_HEIGHT: f64 = 130.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_framework() {
        assert_eq!("react".parse::<Framework>(), Ok(Framework::React));
        assert_eq!(" Vue ".parse::<Framework>(), Ok(Framework::Vue));

        let err = "svelte".parse::<Framework>().unwrap_err();
        assert_eq!(err.selector, "svelte");
    }

    #[test]
    fn test_framework_serde() {
        let json = serde_json::to_string(&Framework::Vue).unwrap();
        assert_eq!(json, "\"vue\"");
        let back: Framework = serde_json::from_str("\"react\"").unwrap();
        assert_eq!(back, Framework::React);
    }
}

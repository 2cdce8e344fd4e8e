use loaderkit_model::{defaults, Framework};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "loaderkit.config.json";

/// Loaderkit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Dialect used when a command is not told otherwise
    #[serde(default)]
    pub framework: Framework,

    /// Name generated components are bound to
    #[serde(default = "default_component_name")]
    pub component_name: String,

    /// Quiet period before `watch` acts on a change
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Where `watch` keeps editor preferences, relative to the config
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,
}

fn default_component_name() -> String {
    defaults::COMPONENT_NAME.to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_preferences_file() -> String {
    ".loaderkit/preferences.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn preferences_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.preferences_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            component_name: default_component_name(),
            debounce_ms: default_debounce_ms(),
            preferences_file: default_preferences_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "framework": "vue",
            "componentName": "CardSkeleton",
            "debounceMs": 250
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.framework, Framework::Vue);
        assert_eq!(config.component_name, "CardSkeleton");
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.preferences_file, ".loaderkit/preferences.json");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.framework, Framework::React);
        assert_eq!(config.component_name, "MyLoader");
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn test_rejects_unknown_framework() {
        let json = r#"{ "framework": "svelte" }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }
}

use super::parse_framework;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Default framework (react, vue)
    #[arg(short, long, default_value = "react")]
    pub framework: String,

    /// Name generated components are bound to
    #[arg(short = 'n', long, default_value = "MyLoader")]
    pub component_name: String,

    /// Force overwrite existing config
    #[arg(long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        framework: parse_framework(&args.framework)?,
        component_name: args.component_name,
        ..Config::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: loaderkit presets");
    println!("  2. Run: loaderkit generate --preset facebook --export");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            framework: "vue".to_string(),
            component_name: "CardLoader".to_string(),
            force: false,
        };

        init(args, dir.path()).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.framework, loaderkit_model::Framework::Vue);
        assert_eq!(config.component_name, "CardLoader");
    }

    #[test]
    fn test_init_rejects_unknown_framework() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            framework: "angular".to_string(),
            component_name: "MyLoader".to_string(),
            force: false,
        };

        assert!(init(args, dir.path()).is_err());
        assert!(!dir.path().join(DEFAULT_CONFIG_NAME).exists());
    }
}

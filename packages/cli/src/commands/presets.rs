use anyhow::Result;
use clap::Args;
use colored::Colorize;
use loaderkit_model::{preset, presets as all_presets, PresetName};

#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Print one preset's scene as JSON
    pub name: Option<String>,
}

pub fn presets(args: PresetsArgs) -> Result<()> {
    if let Some(name) = args.name {
        let name: PresetName = name.parse()?;
        println!("{}", serde_json::to_string_pretty(&preset(name))?);
        return Ok(());
    }

    for (name, model) in all_presets() {
        println!(
            "  {:<12} {}×{}  {} primitives",
            name.to_string().bright_white().bold(),
            model.canvas.width,
            model.canvas.height,
            model.primitives.len()
        );
    }
    Ok(())
}

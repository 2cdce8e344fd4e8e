use super::{parse_framework, read_source, write_output};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use loaderkit_compiler::{generate as generate_source, GenerateOptions, OutputMode};
use loaderkit_editor::{update, Action, AppState, OptionsPatch};
use loaderkit_model::{preset, PresetName, ShapeModel};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Preset to start from
    #[arg(short, long, conflicts_with = "model")]
    pub preset: Option<String>,

    /// JSON file containing a shape model
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Target framework (react, vue); defaults to the config
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Include the import declaration
    #[arg(short, long)]
    pub export: bool,

    /// Component name; defaults to the config
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    #[arg(long)]
    pub primary_color: Option<String>,

    #[arg(long)]
    pub secondary_color: Option<String>,

    #[arg(long)]
    pub rtl: bool,

    #[arg(long)]
    pub guideline: Option<String>,

    /// Print the resulting shape model as JSON instead of source
    #[arg(long)]
    pub json: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn patch(&self) -> OptionsPatch {
        OptionsPatch {
            width: self.width,
            height: self.height,
            speed: self.speed,
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            rtl: self.rtl.then_some(true),
            guideline: self.guideline.clone(),
        }
    }
}

pub fn generate(args: GenerateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let text = render(&args, &config)?;
    write_output(args.output.as_deref(), &text)
}

/// Build the output text for `args`
fn render(args: &GenerateArgs, config: &Config) -> Result<String> {
    let framework = match &args.framework {
        Some(selector) => parse_framework(selector)?,
        None => config.framework,
    };

    let base = match (&args.preset, &args.model) {
        (Some(name), _) => preset(name.parse::<PresetName>()?),
        (None, Some(path)) => serde_json::from_str::<ShapeModel>(&read_source(path)?)?,
        (None, None) => ShapeModel::default(),
    };

    let mut state = AppState::new(base, framework);
    let patch = args.patch();
    if !patch.is_empty() {
        state = update(&state, Action::SetFields(patch))?;
        if let Some(notice) = &state.notice {
            anyhow::bail!("{}", notice);
        }
    }

    if args.json {
        return Ok(serde_json::to_string_pretty(&state.model)? + "\n");
    }

    let mode = if args.export {
        OutputMode::Export
    } else {
        OutputMode::Preview
    };
    let options = GenerateOptions::new(framework)
        .with_mode(mode)
        .with_component_name(args.name.clone().unwrap_or_else(|| config.component_name.clone()));

    let source = generate_source(&state.model, &options)?;
    info!(%framework, bytes = source.len(), "generated component");
    Ok(source)
}

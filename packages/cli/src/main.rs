mod commands;
mod config;
mod watcher;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    generate, init, presets, preview, translate, watch, GenerateArgs, InitArgs, PresetsArgs,
    PreviewArgs, TranslateArgs, WatchArgs,
};
use tracing_subscriber::EnvFilter;

/// Loaderkit CLI - design content loader skeletons and generate their components
#[derive(Parser, Debug)]
#[command(name = "loaderkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log what the pipeline is doing
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Loaderkit project
    Init(InitArgs),

    /// List the built-in presets
    Presets(PresetsArgs),

    /// Generate component source from a preset or scene file
    Generate(GenerateArgs),

    /// Rewrite component source into the other framework
    Translate(TranslateArgs),

    /// Render component source and read the scene back
    Preview(PreviewArgs),

    /// Re-render a component file whenever it changes
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Presets(args) => presets(args),
            Command::Generate(args) => generate(args, &cwd),
            Command::Translate(args) => translate(args),
            Command::Preview(args) => preview(args, &cwd),
            Command::Watch(args) => watch(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

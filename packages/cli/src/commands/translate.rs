use super::{parse_framework, read_source, write_output};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use loaderkit_translator::translate as translate_source;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Component source file
    pub file: PathBuf,

    /// Target framework (react, vue)
    #[arg(short, long)]
    pub to: String,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn translate(args: TranslateArgs) -> Result<()> {
    let target = parse_framework(&args.to)?;
    let source = read_source(&args.file)?;

    let translation = translate_source(&source, target);
    if let Some(fallthrough) = &translation.fallthrough {
        eprintln!("{} {}", "⚠️".yellow(), fallthrough);
        eprintln!("   Source was left unchanged");
    }

    write_output(args.output.as_deref(), &translation.text)
}

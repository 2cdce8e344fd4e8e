use super::{parse_framework, read_source};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use loaderkit_model::Framework;
use loaderkit_parser::{format_report, parse};
use loaderkit_preview::{MarkupSandbox, PreviewBridge, PreviewOutcome, Sandbox, Scope};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Component source file
    pub file: PathBuf,

    /// Dialect the file is written in; detected when omitted
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Print the rendered SVG markup
    #[arg(long, conflicts_with = "json")]
    pub markup: bool,

    /// Print the rendered tree and extracted scene as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn preview(args: PreviewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = read_source(&args.file)?;
    let dialect = match &args.framework {
        Some(selector) => parse_framework(selector)?,
        None => detect_dialect(&source, config.framework),
    };

    let sandbox = MarkupSandbox::new();
    let mut bridge = PreviewBridge::new();
    let prepared = bridge.prepare(&source, dialect, &sandbox);
    let ticket = bridge.submit();
    let result = sandbox.execute(&prepared, &Scope::default());

    match bridge.complete(ticket, result) {
        PreviewOutcome::Rendered { output, model } => {
            if args.json {
                let value = json!({ "root": output.root, "model": model });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if args.markup {
                println!("{}", output.root.to_markup());
            } else {
                println!(
                    "  {} Rendered {}×{} with {} primitives",
                    "✓".green(),
                    model.canvas.width,
                    model.canvas.height,
                    model.primitives.len()
                );
            }
            Ok(())
        }
        PreviewOutcome::ExtractionFailed { output, error } => {
            if args.markup || args.json {
                println!("{}", output.root.to_markup());
            }
            eprintln!("{} {}", "⚠️".yellow(), error);
            Ok(())
        }
        PreviewOutcome::Failed(error) => {
            let filename = args.file.display().to_string();
            match error.span() {
                Some(span) => eprint!(
                    "{}",
                    format_report(&prepared, &filename, span, &error.to_string(), "here")
                ),
                None => eprintln!("{}", error),
            }
            bail!("{} could not be rendered", filename)
        }
        PreviewOutcome::Stale => bail!("preview was superseded"),
    }
}

/// Dialect `source` is written in, falling back to `default` when unrecognised
fn detect_dialect(source: &str, default: Framework) -> Framework {
    parse(source).map(|doc| doc.dialect).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VUE_SOURCE: &str = "const MyLoader = {\n  components: { ContentLoader },\n  template: `\n    <ContentLoader :width=\"300\" :height=\"80\">\n      <rect x=\"10\" y=\"10\" width=\"100\" height=\"8\" />\n    </ContentLoader>\n  `\n}\n";

    #[test]
    fn test_detect_dialect() {
        assert_eq!(detect_dialect(VUE_SOURCE, Framework::React), Framework::Vue);
        assert_eq!(detect_dialect("not a component", Framework::Vue), Framework::Vue);
    }

    #[test]
    fn test_preview_vue_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Loader.js");
        fs::write(&path, VUE_SOURCE).unwrap();

        let args = PreviewArgs {
            file: path,
            framework: None,
            markup: false,
            json: true,
        };
        assert!(preview(args, dir.path()).is_ok());
    }

    #[test]
    fn test_preview_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Loader.jsx");
        fs::write(&path, "const MyLoader = () => (\n  <Skeleton />\n)\n").unwrap();

        let args = PreviewArgs {
            file: path,
            framework: Some("react".to_string()),
            markup: false,
            json: false,
        };
        let err = preview(args, dir.path()).unwrap_err();
        assert!(err.to_string().contains("could not be rendered"));
    }
}

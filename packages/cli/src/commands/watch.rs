use super::{parse_framework, read_source, write_output};
use crate::config::Config;
use crate::watcher::SourceWatcher;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use loaderkit_model::Framework;
use loaderkit_editor::{Action, EditorShell, JsonFileStore, ShellConfig, Tick};
use loaderkit_parser::parse;
use loaderkit_preview::{MarkupSandbox, PreviewOutcome};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How often queued edits are checked while waiting for file events
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Component source file to watch
    pub file: PathBuf,

    /// Dialect the file is written in; detected on each change when omitted
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Write the regenerated component here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Re-render the file whenever it changes and print the component the
/// extracted scene generates.
pub fn watch(args: WatchArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let fixed_dialect = args.framework.as_deref().map(parse_framework).transpose()?;

    let prefs_path = config.preferences_path(cwd);
    let store = JsonFileStore::open(&prefs_path)
        .with_context(|| format!("Cannot open preferences at {}", prefs_path.display()))?;
    let mut shell = EditorShell::new(
        Box::new(MarkupSandbox::new()),
        Box::new(store),
        ShellConfig {
            debounce: config.debounce(),
            component_name: config.component_name.clone(),
        },
    );

    let watcher = SourceWatcher::new(&args.file)?;
    println!(
        "{} {} (Ctrl+C to stop)",
        "Watching".green().bold(),
        args.file.display()
    );

    load_file(&mut shell, &args.file, fixed_dialect, Instant::now())?;

    loop {
        let tick = shell.tick(Instant::now());
        if tick.fired() {
            report(&mut shell, &tick, args.output.as_deref())?;
        }

        match watcher.wait_for_change(POLL_INTERVAL) {
            Some(true) => {
                debug!(file = %args.file.display(), "source changed");
                load_file(&mut shell, &args.file, fixed_dialect, Instant::now())?;
            }
            Some(false) => {}
            None => break,
        }
    }

    info!("watcher stopped");
    Ok(())
}

/// Feed the file's current text to the shell as a source edit
fn load_file(
    shell: &mut EditorShell,
    path: &Path,
    fixed_dialect: Option<Framework>,
    now: Instant,
) -> Result<()> {
    let text = read_source(path)?;
    let dialect = fixed_dialect
        .or_else(|| parse(&text).ok().map(|doc| doc.dialect))
        .unwrap_or(shell.state().framework);

    if dialect != shell.state().framework {
        shell.dispatch(Action::SetFramework(dialect));
    }
    shell.edit_source(text, now);
    Ok(())
}

fn report(shell: &mut EditorShell, tick: &Tick, output: Option<&Path>) -> Result<()> {
    match &tick.preview {
        Some(PreviewOutcome::Rendered { model, .. }) => {
            println!(
                "  {} Rendered {} primitives",
                "✓".green(),
                model.primitives.len()
            );
        }
        Some(PreviewOutcome::ExtractionFailed { error, .. }) => {
            println!("  {} {}", "⚠️".yellow(), error);
            return Ok(());
        }
        Some(PreviewOutcome::Failed(error)) => {
            println!("  {} {}", "✗".red(), error);
            return Ok(());
        }
        Some(PreviewOutcome::Stale) | None => return Ok(()),
    }

    let view = shell.view();
    write_output(output, &view.source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loaderkit_editor::MemoryStore;
    use std::fs;

    fn shell() -> EditorShell {
        EditorShell::new(
            Box::new(MarkupSandbox::new()),
            Box::new(MemoryStore::new()),
            ShellConfig::default(),
        )
    }

    #[test]
    fn test_change_is_read_back_into_the_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Loader.js");
        fs::write(
            &path,
            "const MyLoader = {\n  components: { ContentLoader },\n  template: `\n    <ContentLoader :width=\"300\" :height=\"80\">\n      <circle cx=\"20\" cy=\"20\" r=\"10\" />\n    </ContentLoader>\n  `\n}\n",
        )
        .unwrap();

        let mut shell = shell();
        load_file(&mut shell, &path, None, Instant::now()).unwrap();
        assert_eq!(shell.state().framework, Framework::Vue);

        let tick = shell.flush();
        assert!(matches!(tick.preview, Some(PreviewOutcome::Rendered { .. })));
        assert_eq!(shell.state().model.canvas.width, 300.0);
        assert_eq!(shell.state().model.primitives.len(), 1);

        let out = dir.path().join("out.js");
        report(&mut shell, &tick, Some(&out)).unwrap();
        assert!(fs::read_to_string(out).unwrap().contains("<circle :cx=\"20\""));
    }

    #[test]
    fn test_broken_change_keeps_the_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Loader.jsx");
        fs::write(&path, "const MyLoader = () => (\n  <ContentLoader width={").unwrap();

        let mut shell = shell();
        let before = shell.state().model.clone();
        load_file(&mut shell, &path, Some(Framework::React), Instant::now()).unwrap();

        let tick = shell.flush();
        assert!(matches!(tick.preview, Some(PreviewOutcome::Failed(_))));
        assert_eq!(shell.state().model, before);
    }
}

use crate::actions::{update, Action, OptionsPatch};
use crate::debounce::{Debouncer, DEFAULT_WINDOW};
use crate::errors::{EditorError, FatalError};
use crate::preferences::{load_state, save_state, PreferencesStore};
use crate::state::AppState;
use loaderkit_compiler::OutputMode;
use loaderkit_model::{defaults, Framework};
use loaderkit_preview::{PreviewBridge, PreviewOutcome, RenderOutput, Sandbox, Scope};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub debounce: Duration,
    pub component_name: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_WINDOW,
            component_name: defaults::COMPONENT_NAME.to_string(),
        }
    }
}

/// What the UI draws after a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub framework: Framework,
    /// Code panel text
    pub source: String,
    /// Clipboard text, including the import block
    pub export_source: String,
    pub render_canvas: bool,
    pub preview: Option<RenderOutput>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// What a [`EditorShell::tick`] fired
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tick {
    /// Option edits applied in one go
    pub options: Option<OptionsPatch>,
    /// Result of re-rendering hand-edited source
    pub preview: Option<PreviewOutcome>,
}

impl Tick {
    pub fn fired(&self) -> bool {
        self.options.is_some() || self.preview.is_some()
    }
}

/// Owns the editor state and routes every event through [`update`].
///
/// Option edits and source edits each go through their own debouncer, created
/// once here and reused for the shell's lifetime. Work only happens in
/// [`EditorShell::tick`], when a debouncer's window has passed.
pub struct EditorShell {
    state: AppState,
    component_name: String,
    option_edits: Debouncer<OptionsPatch>,
    source_edits: Debouncer<String>,
    bridge: PreviewBridge,
    sandbox: Box<dyn Sandbox>,
    scope: Scope,
    preferences: Box<dyn PreferencesStore>,
}

impl EditorShell {
    /// Start from the persisted preferences
    pub fn new(
        sandbox: Box<dyn Sandbox>,
        preferences: Box<dyn PreferencesStore>,
        config: ShellConfig,
    ) -> Self {
        let state = load_state(preferences.as_ref()).with_component_name(config.component_name.clone());
        info!(framework = %state.framework, primitives = state.model.primitives.len(), "editor started");

        let mut shell = Self {
            state,
            component_name: config.component_name,
            option_edits: Debouncer::new(config.debounce),
            source_edits: Debouncer::new(config.debounce),
            bridge: PreviewBridge::new(),
            sandbox,
            scope: Scope::default(),
            preferences,
        };
        shell.refresh_preview();
        shell
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn bridge(&self) -> &PreviewBridge {
        &self.bridge
    }

    pub fn preferences(&self) -> &dyn PreferencesStore {
        self.preferences.as_ref()
    }

    /// Apply `action` right away. Actions that change the generated source
    /// also re-render the preview and drop any queued hand edit.
    pub fn dispatch(&mut self, action: Action) {
        let regenerates = action.regenerates_source();
        match update(&self.state, action) {
            Ok(next) => {
                self.state = next;
                self.persist();
                if regenerates {
                    self.source_edits.cancel();
                    self.refresh_preview();
                }
            }
            Err(fatal) => self.recover(fatal),
        }
    }

    /// Queue an option edit; bursts collapse into one `SetFields`
    pub fn edit_field(&mut self, patch: OptionsPatch, now: Instant) {
        self.option_edits
            .push_with(now, |pending| pending.unwrap_or_default().merge(patch));
    }

    /// Show edited source immediately and queue it for the preview
    pub fn edit_source(&mut self, source: impl Into<String>, now: Instant) {
        let source = source.into();
        self.dispatch(Action::EditSource(source.clone()));
        self.source_edits.push(source, now);
    }

    /// Fire whatever debounced work is due at `now`
    pub fn tick(&mut self, now: Instant) -> Tick {
        let mut tick = Tick::default();

        if let Some(patch) = self.option_edits.poll(now) {
            debug!(?patch, "applying option edits");
            self.dispatch(Action::SetFields(patch.clone()));
            tick.options = Some(patch);
        }

        if let Some(source) = self.source_edits.poll(now) {
            tick.preview = Some(self.run_preview(&source));
        }

        tick
    }

    /// Apply everything pending without waiting for the windows to pass
    pub fn flush(&mut self) -> Tick {
        let far_future = Instant::now() + self.option_edits.window() + self.source_edits.window();
        self.tick(far_future)
    }

    /// Render the current state, resetting it if it cannot be rendered
    pub fn view(&mut self) -> View {
        match self.try_view() {
            Ok(view) => view,
            Err(fatal) => {
                self.recover(fatal);
                // defaults always generate
                self.try_view().unwrap_or_else(|_| View {
                    framework: self.state.framework,
                    source: String::new(),
                    export_source: String::new(),
                    render_canvas: true,
                    preview: None,
                    error: None,
                    notice: None,
                })
            }
        }
    }

    /// Clipboard text for the current state
    pub fn export(&self) -> Result<String, EditorError> {
        Ok(self.state.source(OutputMode::Export)?)
    }

    /// Reset to the default state after an unrecoverable error
    pub fn recover(&mut self, fatal: FatalError) {
        error!(error = %fatal, "unrecoverable editor error, resetting to defaults");

        self.option_edits.cancel();
        self.source_edits.cancel();
        self.state = AppState::default().with_component_name(self.component_name.clone());
        self.state.canvas_stale = true;
        self.persist();
        if let Err(err) = self.render_generated() {
            error!(error = %err, "default state does not render");
        }
    }

    fn try_view(&self) -> Result<View, FatalError> {
        Ok(View {
            framework: self.state.framework,
            source: self.state.source(OutputMode::Preview)?,
            export_source: self.state.source(OutputMode::Export)?,
            render_canvas: self.state.should_render_canvas(),
            preview: self.bridge.last_good().cloned(),
            error: self.state.last_error.clone(),
            notice: self.state.notice.clone(),
        })
    }

    /// Run hand-edited source and feed the scene it renders back into the state
    fn run_preview(&mut self, source: &str) -> PreviewOutcome {
        let outcome = self
            .bridge
            .run(source, self.state.framework, self.sandbox.as_ref(), &self.scope);

        match &outcome {
            PreviewOutcome::Rendered { model, .. } => {
                self.dispatch(Action::PreviewRendered(model.clone()))
            }
            PreviewOutcome::ExtractionFailed { error, .. } => {
                self.dispatch(Action::ExtractionFailed(error.clone()))
            }
            PreviewOutcome::Failed(error) => self.dispatch(Action::PreviewFailed(error.clone())),
            PreviewOutcome::Stale => {}
        }
        outcome
    }

    /// Re-render generated source after the model changed. The scene is not
    /// read back: the model is already authoritative.
    fn refresh_preview(&mut self) {
        if let Err(fatal) = self.render_generated() {
            self.recover(fatal);
        }
    }

    fn render_generated(&mut self) -> Result<(), FatalError> {
        let source = self.state.generated_source()?;

        let outcome = self
            .bridge
            .run(&source, self.state.framework, self.sandbox.as_ref(), &self.scope);
        if let PreviewOutcome::Failed(error) = outcome {
            self.dispatch(Action::PreviewFailed(error));
        }
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(err) = save_state(&self.state, self.preferences.as_mut()) {
            warn!(error = %err, "failed to persist preferences");
        }
    }
}

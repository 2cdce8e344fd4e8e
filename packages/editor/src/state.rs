use loaderkit_compiler::{generate, CodegenResult, GenerateOptions, OutputMode};
use loaderkit_model::{defaults, Framework, ShapeKind, ShapeModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canvas tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Rectangle,
    Circle,
}

impl Tool {
    /// Primitive the tool draws, if any
    pub fn draws(&self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Select => f.write_str("select"),
            Tool::Rectangle => f.write_str("rectangle"),
            Tool::Circle => f.write_str("circle"),
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(Tool::Select),
            "rectangle" | "rect" => Ok(Tool::Rectangle),
            "circle" => Ok(Tool::Circle),
            other => Err(format!("Unknown tool '{}'", other)),
        }
    }
}

/// Everything the editor shows, as one immutable value.
///
/// Generated source is never stored here: [`AppState::source`] derives it
/// from the model on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub model: ShapeModel,
    pub framework: Framework,
    pub component_name: String,
    pub tool: Tool,
    /// Index into `model.primitives`
    pub selected: Option<usize>,
    /// The model changed under the canvas and it has to redraw
    pub canvas_stale: bool,
    pub editor_focused: bool,
    /// Hand-edited source, authoritative until it renders and is read back
    pub edited_source: Option<String>,
    /// Last compile/render error from the preview
    pub last_error: Option<String>,
    /// Non-fatal message, e.g. a scene that could not be read back
    pub notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ShapeModel::default(), Framework::default())
    }
}

impl AppState {
    pub fn new(model: ShapeModel, framework: Framework) -> Self {
        Self {
            model,
            framework,
            component_name: defaults::COMPONENT_NAME.to_string(),
            tool: Tool::default(),
            selected: None,
            canvas_stale: false,
            editor_focused: false,
            edited_source: None,
            last_error: None,
            notice: None,
        }
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    pub fn generate_options(&self, mode: OutputMode) -> GenerateOptions {
        GenerateOptions::new(self.framework)
            .with_mode(mode)
            .with_component_name(self.component_name.clone())
    }

    /// Source for the code panel (`Preview`) or the clipboard (`Export`).
    ///
    /// While a hand edit is pending the panel shows the edited text; export
    /// always reflects the last good model.
    pub fn source(&self, mode: OutputMode) -> CodegenResult<String> {
        match (&self.edited_source, mode) {
            (Some(edited), OutputMode::Preview) => Ok(edited.clone()),
            _ => generate(&self.model, &self.generate_options(mode)),
        }
    }

    /// Source generated from the model, ignoring any pending hand edit
    pub fn generated_source(&self) -> CodegenResult<String> {
        generate(&self.model, &self.generate_options(OutputMode::Preview))
    }

    /// The canvas redraws once it is stale and the code editor lets go of focus
    pub fn should_render_canvas(&self) -> bool {
        self.canvas_stale && !self.editor_focused
    }
}

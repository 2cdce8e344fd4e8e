//! # Actions
//!
//! Every change to [`AppState`] is an [`Action`] applied by [`update`]. The
//! reducer never mutates its input: it returns the next state, or a
//! [`FatalError`] when the action would leave the editor in a state it cannot
//! render.
//!
//! ## Who is authoritative
//!
//! - Canvas and option actions make the model authoritative and discard any
//!   pending hand edit.
//! - `EditSource` makes the edited text authoritative until the preview
//!   renders it and the scene is read back (`PreviewRendered`).
//! - Preview failures never touch the model.

use crate::errors::FatalError;
use crate::state::{AppState, Tool};
use loaderkit_model::{defaults, preset, Framework, PresetName, Shape, ShapeModel};
use loaderkit_preview::{ExtractionError, RenderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A primitive finished drawing on the canvas
    Draw(Shape),
    /// The canvas moved or resized primitives
    ReplaceShapes(Vec<Shape>),
    SelectTool(Tool),
    SelectItem(Option<usize>),
    SelectPreset(PresetName),
    /// Option fields edited in the config panel
    SetFields(OptionsPatch),
    ResetColors,
    SetFramework(Framework),
    EditSource(String),
    /// The preview rendered hand-edited source and the scene was read back
    PreviewRendered(ShapeModel),
    PreviewFailed(RenderError),
    ExtractionFailed(ExtractionError),
    CanvasRendered,
    FocusEditor(bool),
}

impl Action {
    /// True when the action changes what the generated source would say
    pub fn regenerates_source(&self) -> bool {
        matches!(
            self,
            Action::Draw(_)
                | Action::ReplaceShapes(_)
                | Action::SelectPreset(_)
                | Action::SetFields(_)
                | Action::ResetColors
                | Action::SetFramework(_)
        )
    }
}

/// Partial update to the option fields. Later patches win field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub speed: Option<f64>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub rtl: Option<bool>,
    pub guideline: Option<String>,
}

impl OptionsPatch {
    pub fn width(mut self, value: f64) -> Self {
        self.width = Some(value);
        self
    }

    pub fn height(mut self, value: f64) -> Self {
        self.height = Some(value);
        self
    }

    pub fn speed(mut self, value: f64) -> Self {
        self.speed = Some(value);
        self
    }

    pub fn primary_color(mut self, value: impl Into<String>) -> Self {
        self.primary_color = Some(value.into());
        self
    }

    pub fn secondary_color(mut self, value: impl Into<String>) -> Self {
        self.secondary_color = Some(value.into());
        self
    }

    pub fn rtl(mut self, value: bool) -> Self {
        self.rtl = Some(value);
        self
    }

    pub fn guideline(mut self, value: impl Into<String>) -> Self {
        self.guideline = Some(value.into());
        self
    }

    /// Combine with a newer patch
    pub fn merge(self, newer: OptionsPatch) -> OptionsPatch {
        OptionsPatch {
            width: newer.width.or(self.width),
            height: newer.height.or(self.height),
            speed: newer.speed.or(self.speed),
            primary_color: newer.primary_color.or(self.primary_color),
            secondary_color: newer.secondary_color.or(self.secondary_color),
            rtl: newer.rtl.or(self.rtl),
            guideline: newer.guideline.or(self.guideline),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == OptionsPatch::default()
    }

    /// Apply to `model`, returning the names of fields that were rejected
    fn apply(self, model: &mut ShapeModel) -> Vec<&'static str> {
        let mut rejected = Vec::new();
        let mut number = |name: &'static str, value: Option<f64>, slot: &mut f64| {
            match value {
                Some(v) if v.is_finite() && v >= 0.0 => *slot = v,
                Some(_) => rejected.push(name),
                None => {}
            }
        };

        number("width", self.width, &mut model.canvas.width);
        number("height", self.height, &mut model.canvas.height);
        number("speed", self.speed, &mut model.speed);

        if let Some(color) = self.primary_color {
            model.primary_color = color;
        }
        if let Some(color) = self.secondary_color {
            model.secondary_color = color;
        }
        if let Some(rtl) = self.rtl {
            model.rtl = rtl;
        }
        if let Some(guideline) = self.guideline {
            model.guideline = guideline;
        }
        rejected
    }
}

/// Compute the state that follows `state` after `action`
pub fn update(state: &AppState, action: Action) -> Result<AppState, FatalError> {
    let mut next = state.clone();

    match action {
        Action::Draw(shape) => {
            next.model.push_clamped(shape);
            next.selected = Some(next.model.primitives.len() - 1);
            discard_edit(&mut next);
        }
        Action::ReplaceShapes(shapes) => {
            next.model.primitives = shapes;
            next.selected = next
                .selected
                .filter(|&index| index < next.model.primitives.len());
            discard_edit(&mut next);
        }
        Action::SelectTool(tool) => {
            next.tool = tool;
            if tool != Tool::Select {
                next.selected = None;
            }
        }
        Action::SelectItem(item) => {
            if let Some(index) = item {
                let len = next.model.primitives.len();
                if index >= len {
                    return Err(FatalError::InvalidSelection { index, len });
                }
            }
            next.selected = item;
        }
        Action::SelectPreset(name) => {
            next.model = preset(name);
            next.selected = None;
            discard_edit(&mut next);
            next.canvas_stale = true;
        }
        Action::SetFields(patch) => {
            let rejected = patch.apply(&mut next.model);
            discard_edit(&mut next);
            next.notice = if rejected.is_empty() {
                None
            } else {
                Some(format!("Ignored invalid value for {}", rejected.join(", ")))
            };
            next.canvas_stale = true;
        }
        Action::ResetColors => {
            next.model.primary_color = defaults::PRIMARY_COLOR.to_string();
            next.model.secondary_color = defaults::SECONDARY_COLOR.to_string();
            discard_edit(&mut next);
            next.canvas_stale = true;
        }
        Action::SetFramework(framework) => {
            next.framework = framework;
            discard_edit(&mut next);
        }
        Action::EditSource(source) => {
            next.edited_source = Some(source);
        }
        Action::PreviewRendered(model) => {
            next.model = model;
            next.selected = None;
            next.canvas_stale = true;
            next.last_error = None;
            next.notice = None;
            if !next.editor_focused {
                next.edited_source = None;
            }
        }
        Action::PreviewFailed(error) => {
            next.last_error = Some(error.to_string());
        }
        Action::ExtractionFailed(error) => {
            next.last_error = None;
            next.notice = Some(error.to_string());
        }
        Action::CanvasRendered => {
            next.canvas_stale = false;
        }
        Action::FocusEditor(focused) => {
            next.editor_focused = focused;
            // leaving the editor with text that rendered hands authority back to the model
            if !focused && next.last_error.is_none() && next.notice.is_none() {
                next.edited_source = None;
            }
        }
    }

    debug!(tool = %next.tool, primitives = next.model.primitives.len(), "state updated");
    Ok(next)
}

/// The model is authoritative again: drop the hand edit and what it reported
fn discard_edit(state: &mut AppState) {
    state.edited_source = None;
    state.last_error = None;
    state.notice = None;
}

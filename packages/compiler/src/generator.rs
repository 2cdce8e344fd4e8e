use crate::context::OutputMode;
use crate::error::{CodegenError, CodegenResult};
use crate::printer::{print, round_number};
use loaderkit_model::{defaults, Framework, ShapeModel};
use loaderkit_parser::{AttrValue, Element, ImportDecl, LoaderDocument, Span};
use tracing::{debug, instrument};

const LOADER_TAG: &str = "ContentLoader";

/// Identifiers the tokenizer treats as keywords
const RESERVED: &[&str] = &["import", "from", "const", "export", "default", "true", "false"];

/// Options for code generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub framework: Framework,
    pub mode: OutputMode,
    /// Name the generated component is bound to
    pub component_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            mode: OutputMode::default(),
            component_name: defaults::COMPONENT_NAME.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }
}

/// Generate component source for `model`
#[instrument(skip(model), fields(framework = %options.framework, primitives = model.primitives.len()))]
pub fn generate(model: &ShapeModel, options: &GenerateOptions) -> CodegenResult<String> {
    check_component_name(&options.component_name)?;
    let document = lower(model, options)?;
    let output = print(&document);

    debug!(bytes = output.len(), "generated component");
    Ok(output)
}

/// Generate with the framework given as a user-facing selector (`"react"`, `"vue"`)
pub fn generate_for(model: &ShapeModel, selector: &str, mode: OutputMode) -> CodegenResult<String> {
    let framework: Framework = selector.parse()?;
    generate(model, &GenerateOptions::new(framework).with_mode(mode))
}

/// Build the component document for `model` without printing it
pub fn lower(model: &ShapeModel, options: &GenerateOptions) -> CodegenResult<LoaderDocument> {
    check_finite(model)?;

    let mut root = Element::new(LOADER_TAG);
    if model.rtl {
        root = root.with_attr("rtl", AttrValue::Bool(true));
    }
    root = root
        .with_attr("speed", number(model.speed))
        .with_attr("width", number(model.canvas.width))
        .with_attr("height", number(model.canvas.height))
        .with_attr("primaryColor", AttrValue::Str(model.primary_color.clone()))
        .with_attr("secondaryColor", AttrValue::Str(model.secondary_color.clone()));
    if !model.guideline.is_empty() {
        root = root.with_attr("title", AttrValue::Str(model.guideline.clone()));
    }

    for shape in &model.primitives {
        let child = shape
            .attributes()
            .into_iter()
            .fold(Element::new(shape.kind().tag()), |el, (name, value)| {
                el.with_attr(name, number(value))
            });
        root = root.with_child(child);
    }

    let import = match options.mode {
        OutputMode::Preview => None,
        OutputMode::Export => Some(ImportDecl::for_dialect(options.framework, LOADER_TAG)),
    };

    Ok(LoaderDocument {
        dialect: options.framework,
        import,
        component_name: options.component_name.clone(),
        root,
        span: Span::default(),
    })
}

fn number(value: f64) -> AttrValue {
    AttrValue::Number(round_number(value))
}

fn check_finite(model: &ShapeModel) -> CodegenResult<()> {
    let non_finite = |field: String| CodegenError::NonFiniteValue { field };

    if !model.canvas.width.is_finite() {
        return Err(non_finite("width".into()));
    }
    if !model.canvas.height.is_finite() {
        return Err(non_finite("height".into()));
    }
    if !model.speed.is_finite() {
        return Err(non_finite("speed".into()));
    }

    for (index, shape) in model.primitives.iter().enumerate() {
        if let Some((name, _)) = shape.attributes().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(non_finite(format!("primitives[{}].{}", index, name)));
        }
    }
    Ok(())
}

fn check_component_name(name: &str) -> CodegenResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid_start && valid_rest && !RESERVED.contains(&name) {
        Ok(())
    } else {
        Err(CodegenError::InvalidComponentName(name.to_string()))
    }
}

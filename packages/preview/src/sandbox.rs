use crate::error::RenderError;
use crate::vdom::VNode;
use loaderkit_model::{defaults, Framework};
use loaderkit_parser::names::{camel_to_kebab, is_component_tag};
use loaderkit_parser::{parse_dialect, tokenize, AttrValue, Attribute, Element};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Id prefix for the clip path and gradient the loader references
const ID_PREFIX: &str = "loaderkit";

/// Identifiers the sandbox makes available to executed source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    bindings: BTreeSet<String>,
}

impl Scope {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeSet::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.bindings.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains(name)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::empty().with("ContentLoader")
    }
}

/// What a successful execution hands back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub root: VNode,
}

/// Executes component source and renders it.
///
/// Implementations are black boxes to the bridge: they only promise to
/// understand their native dialect and to report failures as [`RenderError`].
pub trait Sandbox {
    fn native_dialect(&self) -> Framework;

    fn execute(&self, source: &str, scope: &Scope) -> Result<RenderOutput, RenderError>;
}

/// Reference sandbox: renders React-dialect loader source to the SVG tree the
/// content loader component produces.
#[derive(Debug, Clone, Default)]
pub struct MarkupSandbox;

impl MarkupSandbox {
    pub fn new() -> Self {
        Self
    }
}

impl Sandbox for MarkupSandbox {
    fn native_dialect(&self) -> Framework {
        Framework::React
    }

    #[instrument(skip(self, source, scope), fields(bytes = source.len()))]
    fn execute(&self, source: &str, scope: &Scope) -> Result<RenderOutput, RenderError> {
        if tokenize(source)?.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        let document = parse_dialect(source, Framework::React)?;
        let root = render_root(&document.root, scope)?;

        debug!(component = %document.component_name, "rendered component");
        Ok(RenderOutput { root })
    }
}

/// Props the loader understands, with defaults applied
struct LoaderProps {
    width: f64,
    height: f64,
    speed: f64,
    primary_color: String,
    secondary_color: String,
    rtl: bool,
    title: Option<String>,
}

fn render_root(element: &Element, scope: &Scope) -> Result<VNode, RenderError> {
    if !scope.contains(&element.tag) {
        return Err(RenderError::UnknownComponent {
            name: element.tag.clone(),
            span: element.span.range(),
        });
    }

    let props = loader_props(element)?;
    let primitives = element
        .children
        .iter()
        .map(render_intrinsic)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(render_loader(&props, primitives))
}

fn loader_props(element: &Element) -> Result<LoaderProps, RenderError> {
    let mut props = LoaderProps {
        width: defaults::CANVAS_WIDTH,
        height: defaults::COMPONENT_HEIGHT,
        speed: defaults::SPEED,
        primary_color: defaults::PRIMARY_COLOR.to_string(),
        secondary_color: defaults::SECONDARY_COLOR.to_string(),
        rtl: false,
        title: None,
    };

    for attr in &element.attributes {
        match attr.name.as_str() {
            "width" => props.width = number_prop(attr)?,
            "height" => props.height = number_prop(attr)?,
            "speed" => props.speed = number_prop(attr)?,
            "primaryColor" => props.primary_color = string_prop(attr)?,
            "secondaryColor" => props.secondary_color = string_prop(attr)?,
            "title" => props.title = Some(string_prop(attr)?),
            "rtl" => {
                props.rtl = attr
                    .value
                    .as_bool()
                    .ok_or_else(|| invalid_prop(attr, "expected a boolean"))?
            }
            other => debug!(prop = other, "ignoring unknown loader prop"),
        }
    }

    Ok(props)
}

fn number_prop(attr: &Attribute) -> Result<f64, RenderError> {
    match attr.value.as_number() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(invalid_prop(attr, "expected a non-negative number")),
    }
}

fn string_prop(attr: &Attribute) -> Result<String, RenderError> {
    match &attr.value {
        AttrValue::Str(s) => Ok(s.clone()),
        _ => Err(invalid_prop(attr, "expected a string")),
    }
}

fn invalid_prop(attr: &Attribute, message: &str) -> RenderError {
    RenderError::InvalidProp {
        name: attr.name.clone(),
        message: message.to_string(),
        span: attr.span.range(),
    }
}

/// Intrinsic elements are passed through as-is, components are not resolvable
/// below the loader
fn render_intrinsic(element: &Element) -> Result<VNode, RenderError> {
    if is_component_tag(&element.tag) {
        return Err(RenderError::UnknownComponent {
            name: element.tag.clone(),
            span: element.span.range(),
        });
    }

    let mut node = VNode::element(element.tag.clone());
    for attr in &element.attributes {
        node = node.with_attr(camel_to_kebab(&attr.name), attr.value.to_dom_string());
    }
    for child in &element.children {
        node = node.with_child(render_intrinsic(child)?);
    }
    Ok(node)
}

fn render_loader(props: &LoaderProps, primitives: Vec<VNode>) -> VNode {
    let clip_id = format!("{}-clip", ID_PREFIX);
    let gradient_id = format!("{}-gradient", ID_PREFIX);
    let (width, height) = (props.width.to_string(), props.height.to_string());

    let mut svg = VNode::element("svg")
        .with_attr("role", "img")
        .with_attr("width", width.clone())
        .with_attr("height", height.clone())
        .with_attr("viewBox", format!("0 0 {} {}", width, height));
    if props.rtl {
        svg = svg.with_style("transform", "scaleX(-1)");
    }
    if let Some(title) = &props.title {
        svg = svg
            .with_attr("aria-labelledby", format!("{}-aria", ID_PREFIX))
            .with_child(
                VNode::element("title")
                    .with_attr("id", format!("{}-aria", ID_PREFIX))
                    .with_child(VNode::text(title.clone())),
            );
    }

    let background = VNode::element("rect")
        .with_attr("role", "presentation")
        .with_attr("x", "0")
        .with_attr("y", "0")
        .with_attr("width", "100%")
        .with_attr("height", "100%")
        .with_attr("clip-path", format!("url(#{})", clip_id))
        .with_style("fill", format!("url(#{})", gradient_id));

    let stops = [
        ("0%", &props.primary_color, "-2; -2; 1"),
        ("50%", &props.secondary_color, "-1; -1; 2"),
        ("100%", &props.primary_color, "0; 0; 3"),
    ];
    let gradient = VNode::element("linearGradient")
        .with_attr("id", gradient_id)
        .with_children(
            stops
                .iter()
                .map(|(offset, color, values)| gradient_stop(offset, color, values, props.speed))
                .collect(),
        );

    let defs = VNode::element("defs")
        .with_child(
            VNode::element("clipPath")
                .with_attr("id", clip_id)
                .with_children(primitives),
        )
        .with_child(gradient);

    svg.with_child(background).with_child(defs)
}

fn gradient_stop(offset: &str, color: &str, values: &str, speed: f64) -> VNode {
    VNode::element("stop")
        .with_attr("offset", offset)
        .with_attr("stop-color", color)
        .with_attr("stop-opacity", "1")
        .with_child(
            VNode::element("animate")
                .with_attr("attributeName", "offset")
                .with_attr("values", values)
                .with_attr("keyTimes", "0; 0.25; 1")
                .with_attr("dur", format!("{}s", speed))
                .with_attr("repeatCount", "indefinite"),
        )
}

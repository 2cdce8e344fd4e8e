//! Reads a rendered loader back into a [`ShapeModel`].
//!
//! Extraction only looks at the rendered tree, never at the source text, so
//! it works the same for anything a sandbox can render.

use crate::error::ExtractionError;
use crate::sandbox::RenderOutput;
use crate::vdom::VNode;
use loaderkit_model::{defaults, Canvas, Shape, ShapeKind, ShapeModel};

/// Rebuild the scene a rendered loader was drawn from
pub fn extract(output: &RenderOutput) -> Result<ShapeModel, ExtractionError> {
    let svg = &output.root;
    if svg.tag() != Some("svg") {
        return Err(ExtractionError::NotALoader);
    }
    let clip_path = svg.find("clipPath").ok_or(ExtractionError::NotALoader)?;

    let canvas = Canvas::new(
        optional_number(svg, "width")?.unwrap_or(defaults::CANVAS_WIDTH),
        optional_number(svg, "height")?.unwrap_or(defaults::COMPONENT_HEIGHT),
    );

    let primitives = clip_path
        .children()
        .iter()
        .map(extract_shape)
        .collect::<Result<Vec<_>, _>>()?;

    let stops: Vec<&VNode> = svg
        .find("linearGradient")
        .map(|gradient| {
            gradient
                .children()
                .iter()
                .filter(|child| child.tag() == Some("stop"))
                .collect()
        })
        .unwrap_or_default();
    let stop_color = |index: usize, fallback: &str| {
        stops
            .get(index)
            .and_then(|stop| stop.attr("stop-color"))
            .unwrap_or(fallback)
            .to_string()
    };

    let speed = stops
        .first()
        .and_then(|stop| stop.find("animate"))
        .and_then(|animate| animate.attr("dur"))
        .and_then(|dur| dur.trim_end_matches('s').parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(defaults::SPEED);

    Ok(ShapeModel {
        canvas,
        primitives,
        primary_color: stop_color(0, defaults::PRIMARY_COLOR),
        secondary_color: stop_color(1, defaults::SECONDARY_COLOR),
        speed,
        rtl: svg.style("transform") == Some("scaleX(-1)"),
        guideline: svg
            .find("title")
            .map(VNode::text_content)
            .unwrap_or_default(),
    })
}

fn extract_shape(node: &VNode) -> Result<Shape, ExtractionError> {
    let tag = node.tag().unwrap_or("#text");
    match ShapeKind::from_tag(tag) {
        Some(ShapeKind::Rectangle) => {
            let rx = optional_number(node, "rx")?;
            let ry = optional_number(node, "ry")?;
            Ok(Shape::Rect {
                x: optional_number(node, "x")?.unwrap_or(0.0),
                y: optional_number(node, "y")?.unwrap_or(0.0),
                width: required_number(node, "width")?,
                height: required_number(node, "height")?,
                // a lone rx or ry applies to both corners' axes
                rx: rx.or(ry).unwrap_or(0.0),
                ry: ry.or(rx).unwrap_or(0.0),
            })
        }
        Some(ShapeKind::Circle) => Ok(Shape::Circle {
            cx: optional_number(node, "cx")?.unwrap_or(0.0),
            cy: optional_number(node, "cy")?.unwrap_or(0.0),
            r: required_number(node, "r")?,
        }),
        None => Err(ExtractionError::UnsupportedPrimitive {
            tag: tag.to_string(),
        }),
    }
}

fn required_number(node: &VNode, attribute: &str) -> Result<f64, ExtractionError> {
    optional_number(node, attribute)?.ok_or_else(|| ExtractionError::MissingAttribute {
        tag: node.tag().unwrap_or_default().to_string(),
        attribute: attribute.to_string(),
    })
}

fn optional_number(node: &VNode, attribute: &str) -> Result<Option<f64>, ExtractionError> {
    let Some(value) = node.attr(attribute) else {
        return Ok(None);
    };

    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(ExtractionError::InvalidNumber {
            tag: node.tag().unwrap_or_default().to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }),
    }
}

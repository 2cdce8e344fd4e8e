use crate::options::defaults;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered size of the output component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(defaults::CANVAS_WIDTH, defaults::CANVAS_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// SVG tag the primitive is written as
    pub fn tag(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "rect" => Some(ShapeKind::Rectangle),
            "circle" => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => f.write_str("rectangle"),
            ShapeKind::Circle => f.write_str("circle"),
        }
    }
}

/// One drawn primitive, in canvas-relative coordinates.
///
/// Circles are positioned by their centre, rectangles by their top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    #[serde(rename = "rectangle", alias = "rect")]
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        ry: f64,
    },
    Circle { cx: f64, cy: f64, r: f64 },
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx: 0.0,
            ry: 0.0,
        }
    }

    /// Rectangle with equal corner radii
    pub fn rounded_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Self {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx: radius,
            ry: radius,
        }
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Shape::Circle { cx, cy, r }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect { .. } => ShapeKind::Rectangle,
            Shape::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Geometry as `(attribute, value)` pairs in the order they are written out
    pub fn attributes(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => vec![
                ("x", x),
                ("y", y),
                ("rx", rx),
                ("ry", ry),
                ("width", width),
                ("height", height),
            ],
            Shape::Circle { cx, cy, r } => vec![("cx", cx), ("cy", cy), ("r", r)],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.attributes().iter().all(|(_, v)| v.is_finite())
    }

    /// Enforce the creation-time invariant: finite, non-negative geometry that
    /// lies inside the canvas. Extents are shrunk rather than the shape moved.
    pub fn clamped(&self, canvas: &Canvas) -> Shape {
        let fix = |v: f64, max: f64| {
            if v.is_finite() {
                v.clamp(0.0, max.max(0.0))
            } else {
                0.0
            }
        };

        match *self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                let x = fix(x, canvas.width);
                let y = fix(y, canvas.height);
                let width = fix(width, canvas.width - x);
                let height = fix(height, canvas.height - y);
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    rx: fix(rx, width),
                    ry: fix(ry, height),
                }
            }
            Shape::Circle { cx, cy, r } => {
                let cx = fix(cx, canvas.width);
                let cy = fix(cy, canvas.height);
                let reach = cx.min(cy).min(canvas.width - cx).min(canvas.height - cy);
                Shape::Circle {
                    cx,
                    cy,
                    r: fix(r, reach),
                }
            }
        }
    }

    /// Same kind and every coordinate within `tolerance`
    pub fn approx_eq(&self, other: &Shape, tolerance: f64) -> bool {
        self.kind() == other.kind()
            && self
                .attributes()
                .iter()
                .zip(other.attributes())
                .all(|((_, a), (_, b))| (a - b).abs() <= tolerance)
    }
}

/// The authoritative scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeModel {
    pub canvas: Canvas,
    /// Z-order: later primitives are drawn on top
    #[serde(default)]
    pub primitives: Vec<Shape>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub rtl: bool,
    #[serde(default)]
    pub guideline: String,
}

fn default_primary_color() -> String {
    defaults::PRIMARY_COLOR.to_string()
}

fn default_secondary_color() -> String {
    defaults::SECONDARY_COLOR.to_string()
}

fn default_speed() -> f64 {
    defaults::SPEED
}

impl ShapeModel {
    /// Empty scene with default colors and speed
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            primitives: Vec::new(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            speed: defaults::SPEED,
            rtl: false,
            guideline: String::new(),
        }
    }

    pub fn with_primitives(mut self, primitives: Vec<Shape>) -> Self {
        self.primitives = primitives;
        self
    }

    pub fn with_colors(mut self, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.primary_color = primary.into();
        self.secondary_color = secondary.into();
        self
    }

    /// Append a freshly drawn primitive, clamped into the canvas
    pub fn push_clamped(&mut self, shape: Shape) {
        let shape = shape.clamped(&self.canvas);
        self.primitives.push(shape);
    }

    pub fn is_finite(&self) -> bool {
        self.canvas.width.is_finite()
            && self.canvas.height.is_finite()
            && self.speed.is_finite()
            && self.primitives.iter().all(Shape::is_finite)
    }

    /// Geometric equivalence: same options, same primitives in the same order,
    /// every number within `tolerance`
    pub fn approx_eq(&self, other: &ShapeModel, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;

        close(self.canvas.width, other.canvas.width)
            && close(self.canvas.height, other.canvas.height)
            && close(self.speed, other.speed)
            && self.primary_color == other.primary_color
            && self.secondary_color == other.secondary_color
            && self.rtl == other.rtl
            && self.guideline == other.guideline
            && self.primitives.len() == other.primitives.len()
            && self
                .primitives
                .iter()
                .zip(&other.primitives)
                .all(|(a, b)| a.approx_eq(b, tolerance))
    }
}

impl Default for ShapeModel {
    fn default() -> Self {
        crate::presets::preset(crate::PresetName::Facebook)
    }
}

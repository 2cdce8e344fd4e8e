use loaderkit_model::Framework;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A single content loader component, in either dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderDocument {
    pub dialect: Framework,
    pub import: Option<ImportDecl>,
    pub component_name: String,
    pub root: Element,
    pub span: Span,
}

/// `import ContentLoader from "react-content-loader"` or
/// `import { ContentLoader } from "vue-content-loader"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub binding: String,
    pub source: String,
    /// Named (`{ X }`) rather than default import
    pub named: bool,
    pub span: Span,
}

impl ImportDecl {
    /// The import a dialect's generated export code starts with
    pub fn for_dialect(dialect: Framework, binding: impl Into<String>) -> Self {
        Self {
            binding: binding.into(),
            source: dialect.package().to_string(),
            named: dialect == Framework::Vue,
            span: Span::default(),
        }
    }
}

/// Markup element. Tags and attribute names use React spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub span: Span,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value,
            span: Span::default(),
        });
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Last value written for `name` (later duplicates win, as in JSX)
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .rev()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().rev().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Number(f64),
    Str(String),
    Bool(bool),
}

impl AttrValue {
    /// Numeric value; numeric strings count since markup attributes are often quoted
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Str(s) => s.trim().parse().ok(),
            AttrValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Str(s) if s == "true" => Some(true),
            AttrValue::Str(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    /// Plain string form, as the value would appear on a DOM attribute
    pub fn to_dom_string(&self) -> String {
        match self {
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Str(s) => s.clone(),
            AttrValue::Bool(b) => b.to_string(),
        }
    }
}

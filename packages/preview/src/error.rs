use loaderkit_parser::ParseError;
use std::ops::Range;
use thiserror::Error;

/// Compile or render failure inside a sandbox
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Compile error: {message}")]
    Compile { span: Range<usize>, message: String },

    #[error("'{name}' is not defined in the preview scope")]
    UnknownComponent { name: String, span: Range<usize> },

    #[error("Invalid value for prop '{name}': {message}")]
    InvalidProp {
        name: String,
        message: String,
        span: Range<usize>,
    },

    #[error("Source does not define a component")]
    EmptyOutput,
}

impl RenderError {
    /// Source location, when the error has one
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            RenderError::Compile { span, .. }
            | RenderError::UnknownComponent { span, .. }
            | RenderError::InvalidProp { span, .. } => Some(span.clone()),
            RenderError::EmptyOutput => None,
        }
    }
}

impl From<ParseError> for RenderError {
    fn from(err: ParseError) -> Self {
        RenderError::Compile {
            span: err.span(),
            message: err.to_string(),
        }
    }
}

/// Rendered output whose structure could not be read back into a scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Rendered output is not a content loader")]
    NotALoader,

    #[error("Unsupported primitive <{tag}>")]
    UnsupportedPrimitive { tag: String },

    #[error("<{tag}> is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    #[error("<{tag}> has non-numeric {attribute}=\"{value}\"")]
    InvalidNumber {
        tag: String,
        attribute: String,
        value: String,
    },
}

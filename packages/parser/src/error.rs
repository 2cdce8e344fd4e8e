use loaderkit_model::Framework;
use std::ops::Range;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: Range<usize>,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid syntax at {span:?}: {message}")]
    InvalidSyntax { span: Range<usize>, message: String },

    #[error("Lexer error at {span:?}")]
    LexerError { span: Range<usize> },

    #[error("Expected {expected} component source, found {found}")]
    DialectMismatch {
        span: Range<usize>,
        expected: Framework,
        found: Framework,
    },

    #[error("Closing tag </{found}> does not match <{expected}>")]
    MismatchedClosingTag {
        span: Range<usize>,
        expected: String,
        found: String,
    },
}

impl ParseError {
    pub fn unexpected_token(
        span: Range<usize>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_syntax(span: Range<usize>, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            span,
            message: message.into(),
        }
    }

    pub fn lexer_error(span: Range<usize>) -> Self {
        Self::LexerError { span }
    }

    /// Byte range the error points at
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidSyntax { span, .. }
            | ParseError::LexerError { span }
            | ParseError::DialectMismatch { span, .. }
            | ParseError::MismatchedClosingTag { span, .. } => span.clone(),
            ParseError::UnexpectedEof { pos, .. } => *pos..*pos,
        }
    }

    /// Short label shown under the offending source range
    pub fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEof { expected, .. } => format!("expected {}", expected),
            ParseError::InvalidSyntax { message, .. } => message.clone(),
            ParseError::LexerError { .. } => "unexpected character".to_string(),
            ParseError::DialectMismatch { found, .. } => format!("this is {} source", found),
            ParseError::MismatchedClosingTag { expected, .. } => format!("expected </{}>", expected),
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    format_report(source, filename, error.span(), &error.to_string(), &error.label())
}

/// Render any spanned message the same way parse errors are rendered
#[cfg(feature = "pretty-errors")]
pub fn format_report(
    source: &str,
    filename: &str,
    span: Range<usize>,
    message: &str,
    label: &str,
) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let end = span.end.min(source.len());
    let start = span.start.min(end);

    let mut output = Vec::new();
    let written = Report::build(ReportKind::Error, filename, start)
        .with_message(message)
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(label),
        )
        .finish()
        .write((filename, Source::from(source)), &mut output);

    match written {
        Ok(()) => String::from_utf8(output).unwrap_or_else(|_| message.to_string()),
        Err(_) => message.to_string(),
    }
}

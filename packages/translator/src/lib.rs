//! # Loaderkit Translator
//!
//! Rewrites component source from one dialect into the other so the preview
//! sandbox, which only runs React, can show code written for Vue.
//!
//! Translation re-parses the text with the generator's own grammar and prints
//! it again in the target dialect. It is best effort: text the parser does not
//! recognise is handed back untouched, with the reason attached, so the
//! sandbox gets to report the real error.

use loaderkit_compiler::print;
use loaderkit_model::Framework;
use loaderkit_parser::{parse, ImportDecl, ParseError};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Source that could not be recognised and was passed through unchanged
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Could not translate source to {target}: {reason}")]
pub struct TranslationFallthroughError {
    pub target: Framework,
    #[source]
    pub reason: ParseError,
}

/// Result of a translation attempt. Translation itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    /// Dialect the input was written in, when it was recognised
    pub source_dialect: Option<Framework>,
    pub fallthrough: Option<TranslationFallthroughError>,
}

impl Translation {
    pub fn is_fallthrough(&self) -> bool {
        self.fallthrough.is_some()
    }

    /// True when the text was rewritten from another dialect
    pub fn was_rewritten(&self, target: Framework) -> bool {
        matches!(self.source_dialect, Some(dialect) if dialect != target)
    }
}

/// Rewrite `source` into the `target` dialect
#[instrument(skip(source), fields(bytes = source.len()))]
pub fn translate(source: &str, target: Framework) -> Translation {
    let mut document = match parse(source) {
        Ok(document) => document,
        Err(reason) => {
            let error = TranslationFallthroughError { target, reason };
            warn!(error = %error, "passing source through untranslated");
            return Translation {
                text: source.to_string(),
                source_dialect: None,
                fallthrough: Some(error),
            };
        }
    };

    let source_dialect = document.dialect;
    if source_dialect == target {
        debug!(dialect = %target, "source already in target dialect");
        return Translation {
            text: source.to_string(),
            source_dialect: Some(source_dialect),
            fallthrough: None,
        };
    }

    document.dialect = target;
    document.import = document
        .import
        .map(|import| ImportDecl::for_dialect(target, import.binding));

    let text = print(&document);
    debug!(from = %source_dialect, to = %target, "translated component");

    Translation {
        text,
        source_dialect: Some(source_dialect),
        fallthrough: None,
    }
}

pub mod ast;
pub mod error;
pub mod names;
pub mod parser;
pub mod tokenizer;


pub use ast::{AttrValue, Attribute, Element, ImportDecl, LoaderDocument, Span};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_dialect, Parser};
pub use tokenizer::{tokenize, Token};

#[cfg(feature = "pretty-errors")]
pub use error::{format_error, format_report};

use crate::error::{ParseError, ParseResult};
use logos::Logos;
use std::ops::Range;

/// Tokens for both component dialects.
///
/// Vue templates live inside a template literal, but the markup they contain
/// uses the same token set, so the backtick is just another punctuation token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token<'src> {
    // Keywords
    #[token("import")]
    Import,

    #[token("from")]
    From,

    #[token("const")]
    Const,

    #[token("export")]
    Export,

    #[token("default")]
    Default,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // Identifiers (hyphenated names such as `content-loader` are one token)
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*(-[A-Za-z0-9_$]+)*", |lex| lex.slice())]
    Ident(&'src str),

    // Literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]
    })]
    String(&'src str),

    #[regex(r"'([^'\\]|\\.)*'", |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]
    })]
    SingleQuoteString(&'src str),

    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    // Operators
    #[token("=>")]
    Arrow,

    #[token("=")]
    Eq,

    // Markup
    #[token("</")]
    LtSlash,

    #[token("<")]
    Lt,

    #[token("/>")]
    SlashGt,

    #[token(">")]
    Gt,

    // Punctuation
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(";")]
    Semi,

    #[token("`")]
    Backtick,
}

/// Tokenize source code, failing on the first unrecognised character
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token<'_>, Range<usize>)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(_) => return Err(ParseError::lexer_error(lexer.span())),
        }
    }

    Ok(tokens)
}

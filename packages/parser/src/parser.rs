use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::names::{kebab_to_camel, vue_tag_to_canonical};
use crate::tokenizer::{tokenize, Token};
use loaderkit_model::Framework;
use std::ops::Range;

/// Parse component source, detecting its dialect
pub fn parse(source: &str) -> ParseResult<LoaderDocument> {
    Parser::new(source)?.parse_document(None)
}

/// Parse component source that must be written in `dialect`
pub fn parse_dialect(source: &str, dialect: Framework) -> ParseResult<LoaderDocument> {
    Parser::new(source)?.parse_document(Some(dialect))
}

/// Recursive-descent parser over the generator's output grammar.
///
/// ```text
/// document := import? "const" Ident "=" (react | vue) ";"? ("export" "default" Ident ";"?)?
/// react    := "(" ")" "=>" ( "(" element ")" | element )
/// vue      := "{" ( ("components" ":" "{" Ident,* "}" | "template" ":" "`" element "`") ),* "}"
/// element  := "<" Ident attr* ( "/>" | ">" element* "</" Ident ">" )
/// ```
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            pos: 0,
        })
    }

    /// Parse a complete document
    pub fn parse_document(&mut self, expected: Option<Framework>) -> ParseResult<LoaderDocument> {
        let import = if self.check(Token::Import) {
            Some(self.parse_import()?)
        } else {
            None
        };

        self.expect(Token::Const)?;
        let component_name = self.expect_ident()?;
        self.expect(Token::Eq)?;

        let found = match self.peek() {
            Some((Token::LParen, _)) => Framework::React,
            Some((Token::LBrace, _)) => Framework::Vue,
            _ => return Err(self.error_here("`() =>` or `{`")),
        };

        if let Some(expected) = expected {
            if expected != found {
                return Err(ParseError::DialectMismatch {
                    span: self.peek_span(),
                    expected,
                    found,
                });
            }
        }

        let root = match found {
            Framework::React => self.parse_react_body()?,
            Framework::Vue => self.parse_vue_body()?,
        };
        self.match_token(Token::Semi);

        if self.match_token(Token::Export) {
            self.expect(Token::Default)?;
            self.expect_ident()?;
            self.match_token(Token::Semi);
        }

        if !self.is_at_end() {
            return Err(ParseError::invalid_syntax(
                self.peek_span(),
                "Unexpected content after component definition",
            ));
        }

        Ok(LoaderDocument {
            dialect: found,
            import,
            component_name,
            root,
            span: Span::new(0, self.source.len()),
        })
    }

    fn parse_import(&mut self) -> ParseResult<ImportDecl> {
        let start = self.peek_span().start;
        self.expect(Token::Import)?;

        let (binding, named) = if self.match_token(Token::LBrace) {
            let name = self.expect_ident()?;
            self.expect(Token::RBrace)?;
            (name, true)
        } else {
            (self.expect_ident()?, false)
        };

        self.expect(Token::From)?;
        let source = self.expect_string()?;
        let end = self.current_span().end;
        self.match_token(Token::Semi);

        Ok(ImportDecl {
            binding,
            source,
            named,
            span: Span::new(start, end),
        })
    }

    fn parse_react_body(&mut self) -> ParseResult<Element> {
        self.expect(Token::LParen)?;
        self.expect(Token::RParen)?;
        self.expect(Token::Arrow)?;

        if self.match_token(Token::LParen) {
            let root = self.parse_element(Framework::React)?;
            self.expect(Token::RParen)?;
            Ok(root)
        } else {
            self.parse_element(Framework::React)
        }
    }

    fn parse_vue_body(&mut self) -> ParseResult<Element> {
        let open = self.peek_span();
        self.expect(Token::LBrace)?;

        let mut root = None;
        while !self.check(Token::RBrace) {
            let key_span = self.peek_span();
            let key = self.expect_ident()?;
            self.expect(Token::Colon)?;

            match key.as_str() {
                "components" => {
                    self.expect(Token::LBrace)?;
                    while !self.check(Token::RBrace) {
                        self.expect_ident()?;
                        if !self.match_token(Token::Comma) {
                            break;
                        }
                    }
                    self.expect(Token::RBrace)?;
                }
                "template" => {
                    self.expect(Token::Backtick)?;
                    root = Some(self.parse_element(Framework::Vue)?);
                    self.expect(Token::Backtick)?;
                }
                other => {
                    return Err(ParseError::invalid_syntax(
                        key_span,
                        format!("Unsupported component option '{}'", other),
                    ));
                }
            }

            if !self.match_token(Token::Comma) {
                break;
            }
        }

        self.expect(Token::RBrace)?;
        root.ok_or_else(|| ParseError::invalid_syntax(open, "Component has no template"))
    }

    fn parse_element(&mut self, dialect: Framework) -> ParseResult<Element> {
        let start = self.peek_span().start;
        self.expect(Token::Lt)?;
        let raw_tag = self.expect_ident()?;
        let tag = match dialect {
            Framework::React => raw_tag.clone(),
            Framework::Vue => vue_tag_to_canonical(&raw_tag),
        };

        let mut attributes = Vec::new();
        loop {
            match self.peek() {
                Some((Token::SlashGt, _)) => {
                    self.advance();
                    return Ok(Element {
                        tag,
                        attributes,
                        children: Vec::new(),
                        span: Span::new(start, self.current_span().end),
                    });
                }
                Some((Token::Gt, _)) => {
                    self.advance();
                    break;
                }
                _ => attributes.push(self.parse_attribute(dialect)?),
            }
        }

        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some((Token::LtSlash, _)) => break,
                Some((Token::Lt, _)) => children.push(self.parse_element(dialect)?),
                Some((Token::LBrace, _)) if dialect == Framework::React => {
                    // `{/* comment */}` leaves an empty expression container
                    self.advance();
                    self.expect(Token::RBrace)?;
                }
                _ => return Err(self.error_here(format!("child element or </{}>", raw_tag))),
            }
        }

        self.expect(Token::LtSlash)?;
        let close_span = self.peek_span();
        let closing = self.expect_ident()?;
        if closing != raw_tag {
            return Err(ParseError::MismatchedClosingTag {
                span: close_span,
                expected: raw_tag,
                found: closing,
            });
        }
        self.expect(Token::Gt)?;

        Ok(Element {
            tag,
            attributes,
            children,
            span: Span::new(start, self.current_span().end),
        })
    }

    fn parse_attribute(&mut self, dialect: Framework) -> ParseResult<Attribute> {
        let start = self.peek_span().start;

        let (name, value) = match dialect {
            Framework::React => {
                let name = self.expect_ident()?;
                let value = if self.match_token(Token::Eq) {
                    self.parse_jsx_value()?
                } else {
                    AttrValue::Bool(true)
                };
                (name, value)
            }
            Framework::Vue => {
                let bound = self.match_token(Token::Colon);
                let name = kebab_to_camel(&self.expect_ident()?);
                let value = if self.match_token(Token::Eq) {
                    let span = self.peek_span();
                    let text = self.expect_string()?;
                    if bound {
                        parse_binding(&text, span)?
                    } else {
                        AttrValue::Str(decode_entities(&text))
                    }
                } else {
                    AttrValue::Bool(true)
                };
                (name, value)
            }
        };

        Ok(Attribute {
            name,
            value,
            span: Span::new(start, self.current_span().end),
        })
    }

    /// `"text"` or `{literal}`
    fn parse_jsx_value(&mut self) -> ParseResult<AttrValue> {
        match self.peek().cloned() {
            // JSX attribute strings have no escapes, only entities
            Some((Token::String(s), _)) | Some((Token::SingleQuoteString(s), _)) => {
                self.advance();
                Ok(AttrValue::Str(decode_entities(s)))
            }
            Some((Token::LBrace, _)) => {
                self.advance();
                let value = match self.peek().cloned() {
                    Some((Token::Number(n), span)) => {
                        self.advance();
                        AttrValue::Number(parse_number(n, span)?)
                    }
                    Some((Token::True, _)) => {
                        self.advance();
                        AttrValue::Bool(true)
                    }
                    Some((Token::False, _)) => {
                        self.advance();
                        AttrValue::Bool(false)
                    }
                    Some((Token::String(s), _)) | Some((Token::SingleQuoteString(s), _)) => {
                        self.advance();
                        AttrValue::Str(unescape(s))
                    }
                    _ => return Err(self.error_here("number, boolean or string literal")),
                };
                self.expect(Token::RBrace)?;
                Ok(value)
            }
            _ => Err(self.error_here("attribute value")),
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&(Token<'src>, Range<usize>)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(&token)
        } else {
            false
        }
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.check(token.clone()) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(Self::format_expected_token(&token)))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::Ident(s), _)) => {
                let val = s.to_string();
                self.advance();
                Ok(val)
            }
            _ => Err(self.error_here("identifier")),
        }
    }

    fn expect_string(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::String(s), _)) | Some((Token::SingleQuoteString(s), _)) => {
                let val = unescape(s);
                self.advance();
                Ok(val)
            }
            _ => Err(self.error_here("string literal")),
        }
    }

    /// Span of the token we just consumed
    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map(|(_, span)| span.clone())
            .unwrap_or(0..0)
    }

    /// Span of the next token, or an empty span at end of input
    fn peek_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.clone())
            .unwrap_or_else(|| {
                let end = self.source.len();
                end..end
            })
    }

    fn error_here(&self, expected: impl Into<String>) -> ParseError {
        match self.peek() {
            Some((token, span)) => {
                ParseError::unexpected_token(span.clone(), expected, Self::format_token(token))
            }
            None => ParseError::unexpected_eof(self.source.len(), expected),
        }
    }

    fn format_token(token: &Token) -> String {
        match token {
            Token::Ident(s) => format!("identifier '{}'", s),
            Token::String(s) => format!("string \"{}\"", s),
            Token::SingleQuoteString(s) => format!("string '{}'", s),
            Token::Number(n) => format!("number {}", n),
            other => Self::format_expected_token(other),
        }
    }

    fn format_expected_token(token: &Token) -> String {
        let text = match token {
            Token::Import => "'import'",
            Token::From => "'from'",
            Token::Const => "'const'",
            Token::Export => "'export'",
            Token::Default => "'default'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Ident(_) => "identifier",
            Token::String(_) | Token::SingleQuoteString(_) => "string literal",
            Token::Number(_) => "number",
            Token::Arrow => "'=>'",
            Token::Eq => "'='",
            Token::LtSlash => "'</'",
            Token::Lt => "'<'",
            Token::SlashGt => "'/>'",
            Token::Gt => "'>'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::Semi => "';'",
            Token::Backtick => "'`'",
        };
        text.to_string()
    }
}

fn parse_number(text: &str, span: Range<usize>) -> ParseResult<f64> {
    text.parse::<f64>()
        .map_err(|_| ParseError::invalid_syntax(span, format!("Invalid number '{}'", text)))
}

/// Vue `:prop="..."` binding. Only literals are understood.
fn parse_binding(text: &str, span: Range<usize>) -> ParseResult<AttrValue> {
    let text = text.trim();
    match text {
        "true" => return Ok(AttrValue::Bool(true)),
        "false" => return Ok(AttrValue::Bool(false)),
        _ => {}
    }

    if let Ok(n) = text.parse::<f64>() {
        if n.is_finite() {
            return Ok(AttrValue::Number(n));
        }
    }

    let quoted = text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')));
    if quoted {
        return Ok(AttrValue::Str(unescape(&text[1..text.len() - 1])));
    }

    Err(ParseError::invalid_syntax(
        span,
        format!("Unsupported binding expression '{}'", text),
    ))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('u') => {
                    let hex: String = chars.clone().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) if hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                            out.push(decoded);
                            chars.nth(3);
                        }
                        _ => out.push('u'),
                    }
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode the character references the printer emits inside markup attributes
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

// mal-reader - Parser for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for mal source code.
//!
//! Converts tokens into `MalVal` forms. Reader macros (`'`, `` ` ``, `~`,
//! `~@`, `@`) expand into the corresponding two-element lists.

use im::Vector;
use thiserror::Error;

use crate::lexer::{Lexer, Token};
use crate::value::MalVal;

/// Deepest nesting of collections and reader macros accepted in one form.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Stack headroom below which the parser switches to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each additional stack segment.
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// What went wrong while reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input, expected '{0}'")]
    UnexpectedEof(char),
    #[error("unexpected end of input")]
    EmptyForm,
    #[error("unbalanced bracket '{0}'")]
    UnbalancedBracket(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unbalanced escape '\\{0}' in string")]
    UnbalancedEscape(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("keyword must have a name")]
    EmptyKeyword,
    #[error("'@' must be followed by a symbol, got {0}")]
    InvalidDeref(&'static str),
    #[error("unsupported reader macro '{0}'")]
    UnsupportedReaderMacro(char),
    #[error("forms nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {line}:{column}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

/// The parser converts tokens into `MalVal` forms.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Forms currently open around the cursor.
    depth: usize,
    /// Position just past the last character, for end-of-input errors.
    end: (usize, usize),
}

impl Parser {
    /// Create a new parser for the given source code.
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        Parser {
            tokens,
            position: 0,
            depth: 0,
            end: (lexer.line(), lexer.column()),
        }
    }

    /// Parse the next form. Returns `None` at end of input.
    pub fn parse(&mut self) -> Result<Option<MalVal>, ParseError> {
        if self.peek().is_none() {
            return Ok(None);
        }
        self.parse_form().map(Some)
    }

    /// Parse all remaining forms.
    pub fn parse_all(&mut self) -> Result<Vec<MalVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    fn error_at(token: &Token, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: token.line,
            column: token.column,
        }
    }

    fn error_at_end(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.end.0,
            column: self.end.1,
        }
    }

    fn parse_form(&mut self) -> Result<MalVal, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let kind = ParseErrorKind::TooDeep(MAX_NESTING_DEPTH);
            return Err(match self.peek() {
                Some(token) => Self::error_at(token, kind),
                None => self.error_at_end(kind),
            });
        }
        self.depth += 1;
        let form = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_token());
        self.depth -= 1;
        form
    }

    fn parse_token(&mut self) -> Result<MalVal, ParseError> {
        let Some(token) = self.advance() else {
            return Err(self.error_at_end(ParseErrorKind::EmptyForm));
        };

        match token.lexeme.as_str() {
            "(" => self.parse_seq(')').map(MalVal::List),
            "[" => self.parse_seq(']').map(MalVal::Vector),
            "{" => self.parse_seq('}').map(MalVal::HashMap),
            ")" => Err(Self::error_at(&token, ParseErrorKind::UnbalancedBracket(')'))),
            "]" => Err(Self::error_at(&token, ParseErrorKind::UnbalancedBracket(']'))),
            "}" => Err(Self::error_at(&token, ParseErrorKind::UnbalancedBracket('}'))),
            "'" => self.parse_wrapped("quote"),
            "`" => self.parse_wrapped("quasiquote"),
            "~" => self.parse_wrapped("unquote"),
            "~@" => self.parse_wrapped("splice-unquote"),
            "@" => {
                let target = self.parse_form()?;
                if !matches!(target, MalVal::Symbol(_)) {
                    return Err(Self::error_at(
                        &token,
                        ParseErrorKind::InvalidDeref(target.type_name()),
                    ));
                }
                Ok(MalVal::list([MalVal::symbol("deref"), target]))
            }
            "^" => Err(Self::error_at(
                &token,
                ParseErrorKind::UnsupportedReaderMacro('^'),
            )),
            _ => parse_atom(&token),
        }
    }

    fn parse_seq(&mut self, close: char) -> Result<Vector<MalVal>, ParseError> {
        let mut items = Vector::new();
        loop {
            match self.peek() {
                None => return Err(self.error_at_end(ParseErrorKind::UnexpectedEof(close))),
                Some(token) if token.lexeme.len() == 1 && token.lexeme.starts_with(close) => {
                    self.position += 1;
                    return Ok(items);
                }
                Some(_) => items.push_back(self.parse_form()?),
            }
        }
    }

    fn parse_wrapped(&mut self, head: &str) -> Result<MalVal, ParseError> {
        let form = self.parse_form()?;
        Ok(MalVal::list([MalVal::symbol(head), form]))
    }
}

// ============================================================================
// Atoms
// ============================================================================

fn parse_atom(token: &Token) -> Result<MalVal, ParseError> {
    let text = token.lexeme.as_str();

    if text.starts_with('"') {
        return unescape(text)
            .map(MalVal::string)
            .map_err(|kind| Parser::error_at(token, kind));
    }

    if let Some(name) = text.strip_prefix(':') {
        if name.is_empty() {
            return Err(Parser::error_at(token, ParseErrorKind::EmptyKeyword));
        }
        return Ok(MalVal::keyword(name));
    }

    if looks_numeric(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(MalVal::Int(n));
        }
        return text
            .parse::<f64>()
            .map(MalVal::Float)
            .map_err(|_| Parser::error_at(token, ParseErrorKind::InvalidNumber(text.to_string())));
    }

    Ok(match text {
        "nil" => MalVal::Nil,
        "true" => MalVal::True,
        "false" => MalVal::False,
        _ => MalVal::symbol(text),
    })
}

/// Matches `-?([0-9]+(\.[0-9]+)?|\.[0-9]+)`.
fn looks_numeric(text: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let body = text.strip_prefix('-').unwrap_or(text);
    match body.split_once('.') {
        None => digits(body),
        Some((whole, frac)) => digits(frac) && (whole.is_empty() || digits(whole)),
    }
}

/// Decode a string token, which includes its surrounding quotes.
fn unescape(text: &str) -> Result<String, ParseErrorKind> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().skip(1);
    loop {
        match chars.next() {
            None => return Err(ParseErrorKind::UnterminatedString),
            Some('"') => return Ok(out),
            Some('\\') => match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some(other) => return Err(ParseErrorKind::UnbalancedEscape(other)),
                None => return Err(ParseErrorKind::UnterminatedString),
            },
            Some(c) => out.push(c),
        }
    }
}

/// Read the first form in `source`. Trailing input is ignored.
pub fn read(source: &str) -> Result<Option<MalVal>, ParseError> {
    Parser::new(source).parse()
}

/// Read every form in `source`.
pub fn read_all(source: &str) -> Result<Vec<MalVal>, ParseError> {
    Parser::new(source).parse_all()
}

// ============================================================================
// Tests
// ============================================================================

// mal-reader - Lexer for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for mal source code.
//!
//! Splits source text into lexemes. Classification of atoms (numbers,
//! keywords, strings) is left to the parser, and the lexer itself never
//! fails: an unterminated string is passed through for the parser to reject.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A lexeme with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();

        let (line, column) = (self.line, self.column);
        let c = self.peek()?;
        let mut lexeme = String::new();

        match c {
            '~' => {
                self.advance_into(&mut lexeme);
                if self.peek() == Some('@') {
                    self.advance_into(&mut lexeme);
                }
            }
            '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '`' | '^' | '@' => {
                self.advance_into(&mut lexeme);
            }
            '"' => self.read_string(&mut lexeme),
            _ => {
                while let Some(c) = self.peek() {
                    if is_atom_delimiter(c) {
                        break;
                    }
                    self.advance_into(&mut lexeme);
                }
            }
        }

        Some(Token {
            lexeme,
            line,
            column,
        })
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Vec<Token> {
        std::iter::from_fn(|| self.next_token()).collect()
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_into(&mut self, lexeme: &mut String) {
        if let Some(c) = self.advance() {
            lexeme.push(c);
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.advance();
            } else if c == ';' {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Read a string up to the next unescaped quote, keeping escapes raw.
    fn read_string(&mut self, lexeme: &mut String) {
        self.advance_into(lexeme);
        while let Some(c) = self.advance() {
            lexeme.push(c);
            match c {
                '\\' => self.advance_into(lexeme),
                '"' => return,
                _ => {}
            }
        }
    }
}

/// Split source text into tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

fn is_atom_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '"' | '`' | '@' | ',' | ';')
}

// ============================================================================
// Tests
// ============================================================================

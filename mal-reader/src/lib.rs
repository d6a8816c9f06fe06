// mal-reader - Reader and printer for the mal Lisp
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-reader
//!
//! Value model, reader and printer for mal.
//! Produces `MalVal` forms from source strings and renders them back.

pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use keyword::Keyword;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{MAX_NESTING_DEPTH, ParseError, ParseErrorKind, Parser, read, read_all};
pub use printer::{escape_string, pr_str};
pub use symbol::Symbol;
pub use value::{MalAtom, MalFn, MalNativeFn, MalVal};

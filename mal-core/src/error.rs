// mal-core - Error types for the mal evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for mal evaluation.

use std::fmt;

use mal_reader::{ParseError, Symbol};
use thiserror::Error;

/// Result type for mal evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum Error {
    /// Undefined symbol reference
    #[error("'{0}' not found")]
    UndefinedSymbol(Symbol),

    /// Wrong number of arguments to a function or special form
    #[error(
        "Wrong number of arguments{}: expected {expected}, got {got}",
        .name.as_ref().map(|n| format!(" to '{n}'")).unwrap_or_default()
    )]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },

    /// Wrong type for an operation
    #[error(
        "{}expected {expected}, got {got}",
        .context.as_ref().map(|c| format!("{c}: ")).unwrap_or_else(|| "Type error: ".to_string())
    )]
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },

    /// Attempted to call something that isn't callable
    #[error("Cannot call value: {0}")]
    NotCallable(String),

    /// Malformed special form
    #[error("Invalid '{form}' syntax: {message}")]
    InvalidSyntax { form: &'static str, message: String },

    #[error("Division by zero")]
    DivisionByZero,

    /// Integer arithmetic left the i64 range
    #[error("Integer overflow in '{0}'")]
    IntegerOverflow(&'static str),

    #[error(transparent)]
    Read(#[from] ParseError),

    /// Nested evaluation went deeper than the configured limit
    #[error("Stack overflow: maximum recursion depth ({0}) exceeded")]
    StackOverflow(usize),

    /// A macro kept expanding into another macro call
    #[error("Macro expansion did not terminate after {0} steps")]
    MacroExpansionLimit(usize),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// General evaluation error
    #[error("{0}")]
    EvalError(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

/// Broad error families reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed source or malformed special forms
    Syntax,
    /// Unbound symbols
    Name,
    /// Values of the wrong kind
    Type,
    /// Arithmetic, I/O and resource limits
    Runtime,
}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for a bounded range with function name.
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// The family this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Read(_) | Error::InvalidSyntax { .. } | Error::ArityError { .. } => {
                ErrorCategory::Syntax
            }
            Error::UndefinedSymbol(_) => ErrorCategory::Name,
            Error::TypeError { .. } | Error::NotCallable(_) => ErrorCategory::Type,
            Error::DivisionByZero
            | Error::IntegerOverflow(_)
            | Error::StackOverflow(_)
            | Error::MacroExpansionLimit(_)
            | Error::Io { .. }
            | Error::EvalError(_) => ErrorCategory::Runtime,
        }
    }
}

// mal-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for mal integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate every form in a fresh session, returning the last
//! - [`eval_str_with_env`] - Evaluate one form in an existing environment
//! - [`eval_all`] - Evaluate every form in an existing environment
//! - [`print_str`] - Evaluate in a fresh session and print the result readably
//! - [`new_env`] - Create a new session environment
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error
//! - [`assert_prints!`] - Assert the readable printed form of a result

#![allow(dead_code)]

pub use mal_core::{Env, Error, ErrorCategory, eval, new_session, rep};
#[allow(unused_imports)]
pub use mal_reader::{Keyword, MalVal, Parser, Symbol, pr_str, read_all};

/// Create a new session environment with builtins and the prelude.
///
/// # Panics
///
/// Panics if the prelude fails to load.
#[must_use]
pub fn new_env() -> Env {
    new_session().expect("Failed to build session")
}

/// Evaluate every form in `s` in a fresh session, returning the last value.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
pub fn eval_str(s: &str) -> Result<MalVal, String> {
    eval_all(s, &new_env())
}

/// Evaluate the first form of `s` in the given environment.
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<MalVal, String> {
    let mut parser = Parser::new(s);
    match parser.parse().map_err(|e| e.to_string())? {
        Some(expr) => eval(&expr, env).map_err(|e| e.to_string()),
        None => Ok(MalVal::Nil),
    }
}

/// Evaluate every form in `s` in the given environment, returning the last value.
pub fn eval_all(s: &str, env: &Env) -> Result<MalVal, String> {
    eval_all_raw(s, env).map_err(|e| e.to_string())
}

/// Like [`eval_all`] but keeps the structured error.
pub fn eval_all_raw(s: &str, env: &Env) -> Result<MalVal, Error> {
    let mut result = MalVal::Nil;
    for expr in read_all(s)? {
        result = eval(&expr, env)?;
    }
    Ok(result)
}

/// Evaluate in a fresh session and print the result readably.
pub fn print_str(s: &str) -> Result<String, String> {
    eval_str(s).map(|v| pr_str(&v, true))
}

/// Evaluate in a fresh session and return the structured error.
///
/// # Panics
///
/// Panics if evaluation succeeds.
pub fn eval_err(s: &str) -> Error {
    match eval_all_raw(s, &new_env()) {
        Ok(v) => panic!("Expected error for '{}' but got {}", s, v),
        Err(e) => e,
    }
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", MalVal::Int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(+ 1 :not-a-number)");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that the result of evaluating `input` prints as `expected`.
///
/// # Example
///
/// ```ignore
/// assert_prints!("(list 1 \"a\")", "(1 \"a\")");
/// ```
#[macro_export]
macro_rules! assert_prints {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::print_str($input);
        assert_eq!(
            result.as_deref(),
            Ok($expected),
            "Printed result of '{}' did not match expected",
            $input
        );
    };
}

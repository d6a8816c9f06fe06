// mal-core - Runtime and evaluator for the mal Lisp
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-core
//!
//! Environment, evaluator and builtin library for mal.
//!
//! A session is a root [`Env`] built by [`new_session`]; [`rep`] reads one
//! form, evaluates it there and prints the result.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod prelude;

pub use builtins::register_builtins;
pub use env::Env;
pub use error::{AritySpec, Error, ErrorCategory, Result};
pub use eval::{
    apply, eval, get_eval_depth, get_max_eval_depth, macroexpand, make_native_fn, quasiquote,
    set_max_eval_depth,
};
pub use prelude::init_prelude;

// Re-export reader types for convenience
pub use mal_reader::{Keyword, MalVal, Symbol};

use log::debug;

/// Build a root environment with the builtins and the prelude installed.
pub fn new_session() -> Result<Env> {
    let env = Env::new();
    register_builtins(&env);
    init_prelude(&env)?;
    debug!("session ready");
    Ok(env)
}

/// Read one form from `source`, evaluate it in `env` and print the result
/// readably. Blank input yields `None`.
///
/// # Examples
///
/// ```
/// use mal_core::{new_session, rep};
///
/// let env = new_session().unwrap();
/// assert_eq!(rep("(def! x (+ 1 2))", &env).unwrap().as_deref(), Some("3"));
/// assert_eq!(rep("[x \"s\"]", &env).unwrap().as_deref(), Some("[3 \"s\"]"));
/// assert_eq!(rep("  ; nothing", &env).unwrap(), None);
/// ```
pub fn rep(source: &str, env: &Env) -> Result<Option<String>> {
    match mal_reader::read(source)? {
        Some(form) => {
            let value = eval(&form, env)?;
            Ok(Some(mal_reader::pr_str(&value, true)))
        }
        None => Ok(None),
    }
}

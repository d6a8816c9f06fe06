// mal-core - Trampolined evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Evaluator for mal expressions.
//!
//! `eval` runs a loop over `(ast, env)`. Special forms and closure calls in
//! tail position hand back a [`Step::Tail`] instead of recursing, so tail
//! calls run in constant Rust stack. Nested (non-tail) evaluation is bounded
//! by a thread-local depth counter.

pub mod apply;
pub mod macros;
pub mod quasiquote;
mod special_forms;

pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use macros::{MAX_MACRO_EXPANSIONS, macroexpand};
pub use quasiquote::quasiquote;

use std::cell::Cell;

use log::trace;
use im::Vector;
use mal_reader::MalVal;

use crate::env::Env;
use crate::error::{Error, Result};

use apply::bind_params;

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum nesting depth for eval. Can be configured via `set_max_eval_depth`.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 2_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard to manage eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::StackOverflow(max))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Trampoline
// ============================================================================

/// What a form evaluates to: a final value, or a form to continue with.
pub(crate) enum Step {
    Done(MalVal),
    Tail(MalVal, Env),
}

/// Stack headroom below which evaluation continues on a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each additional stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Evaluate a mal expression in the given environment.
///
/// # Examples
///
/// ```
/// use mal_core::{eval, new_session};
/// use mal_reader::{MalVal, read};
///
/// let env = new_session().unwrap();
/// let expr = read("(+ 1 (* 2 3))").unwrap().unwrap();
/// assert_eq!(eval(&expr, &env).unwrap(), MalVal::Int(7));
/// ```
///
/// # Errors
///
/// Returns an error if a symbol is unbound, a call has the wrong arity or
/// argument types, or nesting exceeds [`get_max_eval_depth`].
pub fn eval(ast: &MalVal, env: &Env) -> Result<MalVal> {
    let _guard = EvalDepthGuard::new()?;
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || eval_loop(ast, env))
}

fn eval_loop(ast: &MalVal, env: &Env) -> Result<MalVal> {
    let mut ast = ast.clone();
    let mut env = env.clone();

    loop {
        ast = macroexpand(ast, &env)?;

        let step = match &ast {
            MalVal::List(items) if !items.is_empty() => eval_list(items, &env)?,
            _ => return eval_ast(&ast, &env),
        };

        match step {
            Step::Done(val) => return Ok(val),
            Step::Tail(next, next_env) => {
                trace!("tail: {}", next);
                ast = next;
                env = next_env;
            }
        }
    }
}

/// Evaluate a form structurally: symbols are looked up, collections are
/// evaluated elementwise, anything else evaluates to itself.
pub(crate) fn eval_ast(ast: &MalVal, env: &Env) -> Result<MalVal> {
    match ast {
        MalVal::Symbol(sym) => env.lookup(sym),
        MalVal::List(items) => Ok(MalVal::List(eval_each(items, env)?)),
        MalVal::Vector(items) => Ok(MalVal::Vector(eval_each(items, env)?)),
        MalVal::HashMap(items) => {
            if items.len() % 2 != 0 {
                return Err(Error::syntax(
                    "hash-map",
                    format!("needs an even number of forms, got {}", items.len()),
                ));
            }
            Ok(MalVal::HashMap(eval_each(items, env)?))
        }
        _ => Ok(ast.clone()),
    }
}

fn eval_each(items: &Vector<MalVal>, env: &Env) -> Result<Vector<MalVal>> {
    if items.is_empty() {
        return Ok(items.clone());
    }
    items.iter().map(|item| eval(item, env)).collect()
}

/// Evaluate a non-empty list: a special form or a call.
fn eval_list(items: &Vector<MalVal>, env: &Env) -> Result<Step> {
    if let Some(MalVal::Symbol(head)) = items.front() {
        let args = items.skip(1);
        match head.name() {
            "def!" => return special_forms::eval_def(&args, env),
            "defmacro!" => return special_forms::eval_defmacro(&args, env),
            "let*" => return special_forms::eval_let(&args, env),
            "do" => return special_forms::eval_do(&args, env),
            "if" => return special_forms::eval_if(&args, env),
            "fn*" => return special_forms::eval_fn(&args, env),
            "quote" => return special_forms::eval_quote(&args),
            "quasiquote" => return special_forms::eval_quasiquote(&args, env),
            "quasiquoteexpand" => return special_forms::eval_quasiquoteexpand(&args),
            "macroexpand" => return special_forms::eval_macroexpand(&args, env),
            _ => {}
        }
    }

    let evaluated = items
        .iter()
        .map(|item| eval(item, env))
        .collect::<Result<Vec<_>>>()?;
    let (func, args) = evaluated
        .split_first()
        .ok_or_else(|| Error::EvalError("cannot apply an empty list".into()))?;

    match func {
        MalVal::NativeFn(native) => Ok(Step::Done(apply::apply_native(native, args)?)),
        MalVal::Fn(closure) => {
            let fn_env = bind_params(closure, args)?;
            Ok(Step::Tail((*closure.body).clone(), fn_env))
        }
        other => Err(Error::NotCallable(other.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

// mal-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms: def!, defmacro!, let*, do, if, fn*, quote, quasiquote,
//! quasiquoteexpand, macroexpand.
//!
//! Each takes the unevaluated argument forms. Forms whose result is in tail
//! position return [`Step::Tail`] for the trampoline.

use std::rc::Rc;

use im::Vector;
use log::debug;
use mal_reader::{MalFn, MalVal, Symbol};

use super::{Step, eval, macroexpand, quasiquote};
use crate::env::Env;
use crate::error::{Error, Result};

fn expect_symbol(form: &'static str, val: &MalVal, what: &str) -> Result<Symbol> {
    match val {
        MalVal::Symbol(sym) => Ok(sym.clone()),
        other => Err(Error::syntax(
            form,
            format!("{} must be a symbol, got {}", what, other.type_name()),
        )),
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// (def! name expr)
pub(super) fn eval_def(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    if args.len() != 2 {
        return Err(Error::arity_named("def!", 2, args.len()));
    }
    let name = expect_symbol("def!", &args[0], "name")?;
    let value = eval(&args[1], env)?;
    debug!("def! {}", name);
    env.define(name, value.clone());
    Ok(Step::Done(value))
}

/// (defmacro! name fn-expr)
pub(super) fn eval_defmacro(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    if args.len() != 2 {
        return Err(Error::arity_named("defmacro!", 2, args.len()));
    }
    let name = expect_symbol("defmacro!", &args[0], "name")?;
    let func = match eval(&args[1], env)? {
        MalVal::Fn(f) => f,
        other => return Err(Error::type_error_in("defmacro!", "function", other.type_name())),
    };
    debug!("defmacro! {}", name);
    env.define(name, MalVal::Fn(func.as_macro()));
    Ok(Step::Done(MalVal::Nil))
}

// ============================================================================
// Scoping and sequencing
// ============================================================================

/// (let* [name expr ...] body)
pub(super) fn eval_let(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    if args.len() != 2 {
        return Err(Error::arity_named("let*", 2, args.len()));
    }
    let bindings = args[0].as_seq().ok_or_else(|| {
        Error::syntax(
            "let*",
            format!("bindings must be a list or vector, got {}", args[0].type_name()),
        )
    })?;
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax("let*", "bindings need an even number of forms"));
    }

    let let_env = env.child();
    let mut pairs = bindings.iter();
    while let (Some(name), Some(expr)) = (pairs.next(), pairs.next()) {
        let name = expect_symbol("let*", name, "binding name")?;
        let value = eval(expr, &let_env)?;
        let_env.define(name, value);
    }

    Ok(Step::Tail(args[1].clone(), let_env))
}

/// (do expr ...)
pub(super) fn eval_do(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    let Some(last) = args.last() else {
        return Ok(Step::Done(MalVal::Nil));
    };
    for expr in args.iter().take(args.len() - 1) {
        eval(expr, env)?;
    }
    Ok(Step::Tail(last.clone(), env.clone()))
}

/// (if cond then else?)
pub(super) fn eval_if(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    if !(2..=3).contains(&args.len()) {
        return Err(Error::arity_range("if", 2, 3, args.len()));
    }
    if eval(&args[0], env)?.is_truthy() {
        Ok(Step::Tail(args[1].clone(), env.clone()))
    } else if let Some(otherwise) = args.get(2) {
        Ok(Step::Tail(otherwise.clone(), env.clone()))
    } else {
        Ok(Step::Done(MalVal::Nil))
    }
}

// ============================================================================
// Functions
// ============================================================================

/// (fn* [params] body)
pub(super) fn eval_fn(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    if args.len() != 2 {
        return Err(Error::arity_named("fn*", 2, args.len()));
    }
    let param_forms = args[0].as_seq().ok_or_else(|| {
        Error::syntax(
            "fn*",
            format!("parameters must be a list or vector, got {}", args[0].type_name()),
        )
    })?;

    let mut params = Vec::with_capacity(param_forms.len());
    let mut rest_param = None;
    let mut iter = param_forms.iter();
    while let Some(form) = iter.next() {
        let sym = expect_symbol("fn*", form, "parameter")?;
        if !sym.is("&") {
            params.push(sym);
            continue;
        }
        let rest = iter
            .next()
            .ok_or_else(|| Error::syntax("fn*", "'&' must be followed by a parameter"))?;
        rest_param = Some(expect_symbol("fn*", rest, "rest parameter")?);
        if iter.next().is_some() {
            return Err(Error::syntax("fn*", "only one parameter may follow '&'"));
        }
    }

    let func = MalFn::new(params, rest_param, args[1].clone(), Rc::new(env.clone()));
    Ok(Step::Done(MalVal::Fn(func)))
}

// ============================================================================
// Quoting and macros
// ============================================================================

/// The only argument of a one-argument special form.
fn single_arg<'a>(form: &'static str, args: &'a Vector<MalVal>) -> Result<&'a MalVal> {
    match args.front() {
        Some(arg) if args.len() == 1 => Ok(arg),
        _ => Err(Error::arity_named(form, 1, args.len())),
    }
}

/// (quote form)
pub(super) fn eval_quote(args: &Vector<MalVal>) -> Result<Step> {
    Ok(Step::Done(single_arg("quote", args)?.clone()))
}

/// (quasiquote template)
pub(super) fn eval_quasiquote(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    let template = single_arg("quasiquote", args)?;
    Ok(Step::Tail(quasiquote(template), env.clone()))
}

/// (quasiquoteexpand template) - the expansion, unevaluated
pub(super) fn eval_quasiquoteexpand(args: &Vector<MalVal>) -> Result<Step> {
    Ok(Step::Done(quasiquote(single_arg("quasiquoteexpand", args)?)))
}

/// (macroexpand form)
pub(super) fn eval_macroexpand(args: &Vector<MalVal>, env: &Env) -> Result<Step> {
    let form = single_arg("macroexpand", args)?;
    Ok(Step::Done(macroexpand(form.clone(), env)?))
}

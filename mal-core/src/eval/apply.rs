// mal-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for mal.
//!
//! Closures and native builtins are called through [`apply`], which is how
//! builtins such as `swap!` and `apply` re-enter the evaluator. The
//! evaluator's own tail calls share [`bind_params`] with it.

use std::any::Any;
use std::rc::Rc;

use mal_reader::{MalFn, MalNativeFn, MalVal};

use super::eval;
use crate::env::Env;
use crate::error::{AritySpec, Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[MalVal]) -> Result<MalVal>;

/// Apply a function to already-evaluated arguments.
pub fn apply(func: &MalVal, args: &[MalVal]) -> Result<MalVal> {
    match func {
        MalVal::Fn(f) => apply_fn(f, args),
        MalVal::NativeFn(f) => apply_native(f, args),
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// Call a closure (or macro) and evaluate its body to completion.
pub(crate) fn apply_fn(func: &MalFn, args: &[MalVal]) -> Result<MalVal> {
    let fn_env = bind_params(func, args)?;
    eval(&func.body, &fn_env)
}

pub(crate) fn apply_native(func: &MalNativeFn, args: &[MalVal]) -> Result<MalVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::EvalError("Native function has invalid type".into()))?;
    f(args)
}

/// Bind arguments to a closure's parameters in a child of its captured
/// environment.
pub(crate) fn bind_params(func: &MalFn, args: &[MalVal]) -> Result<Env> {
    if !func.accepts(args.len()) {
        let fixed = func.params.len();
        return Err(Error::ArityError {
            expected: if func.rest_param.is_some() {
                AritySpec::AtLeast(fixed)
            } else {
                AritySpec::Exact(fixed)
            },
            got: args.len(),
            name: None,
        });
    }

    let captured_env = func
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::EvalError("Function environment has invalid type".into()))?;
    let fn_env = captured_env.child();

    for (param, arg) in func.params.iter().zip(args) {
        fn_env.define(param.clone(), arg.clone());
    }
    if let Some(rest) = &func.rest_param {
        let extra = args[func.params.len()..].iter().cloned();
        fn_env.define(rest.clone(), MalVal::list(extra));
    }

    Ok(fn_env)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[MalVal]) -> Result<MalVal> + 'static,
) -> MalNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    MalNativeFn::new(name, func_any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mal_reader::Symbol;

    fn closure(params: &[&str], rest: Option<&str>, body: MalVal) -> MalFn {
        let env: Rc<dyn Any> = Rc::new(Env::new());
        MalFn::new(
            params.iter().map(|p| Symbol::new(p)).collect(),
            rest.map(Symbol::new),
            body,
            env,
        )
    }

    #[test]
    fn test_apply_native() {
        let add_one = make_native_fn("inc", |args| match args {
            [MalVal::Int(n)] => Ok(MalVal::Int(n + 1)),
            _ => Err(Error::arity_named("inc", 1, args.len())),
        });
        let result = apply(&MalVal::NativeFn(add_one), &[MalVal::Int(41)]).unwrap();
        assert_eq!(result, MalVal::Int(42));
    }

    #[test]
    fn test_rest_params_collect_list() {
        let f = closure(&["a"], Some("more"), MalVal::symbol("more"));
        let result = apply(&MalVal::Fn(f), &[MalVal::Int(1), MalVal::Int(2), MalVal::Int(3)]).unwrap();
        assert!(matches!(&result, MalVal::List(items) if items.len() == 2));
    }

    #[test]
    fn test_rest_params_may_be_empty() {
        let f = closure(&[], Some("xs"), MalVal::symbol("xs"));
        assert_eq!(apply(&MalVal::Fn(f), &[]).unwrap(), MalVal::empty_list());
    }

    #[test]
    fn test_arity_mismatch() {
        let f = closure(&["a", "b"], None, MalVal::Nil);
        let err = apply(&MalVal::Fn(f), &[MalVal::Int(1)]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArityError { expected: AritySpec::Exact(2), got: 1, .. }
        ));

        let variadic = closure(&["a"], Some("r"), MalVal::Nil);
        let err = apply(&MalVal::Fn(variadic), &[]).unwrap_err();
        assert!(matches!(err, Error::ArityError { expected: AritySpec::AtLeast(1), .. }));
    }

    #[test]
    fn test_not_callable() {
        let err = apply(&MalVal::Int(1), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Cannot call value: 1");
    }
}

// mal-core - Session prelude
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Definitions installed into every new session: `eval`, `*ARGV*`, and the
//! functions written in mal itself (`not`, `load-file`).

use mal_reader::{MalVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::{eval, make_native_fn};

/// Embedded prelude source.
const PRELUDE: &str = include_str!("prelude.mal");

/// Install the prelude into a root environment that already has builtins.
pub fn init_prelude(env: &Env) -> Result<()> {
    // `eval` always evaluates in the session's root environment.
    let root = env.clone();
    let eval_fn = make_native_fn("eval", move |args| match args {
        [form] => eval(form, &root),
        _ => Err(Error::arity_named("eval", 1, args.len())),
    });
    env.define(Symbol::new("eval"), MalVal::NativeFn(eval_fn));
    env.define(Symbol::new("*ARGV*"), MalVal::empty_list());

    for form in mal_reader::read_all(PRELUDE)? {
        eval(&form, env)?;
    }
    Ok(())
}

// mal-core - Macro expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Expansion of macro calls to a fixpoint.

use log::trace;
use mal_reader::{MalFn, MalVal};

use super::apply::apply_fn;
use crate::env::Env;
use crate::error::{Error, Result};

/// Expansions allowed at one position before giving up.
pub const MAX_MACRO_EXPANSIONS: usize = 10_000;

/// If `ast` is a call to a macro bound in `env`, the macro and its
/// unevaluated arguments.
fn macro_call(ast: &MalVal, env: &Env) -> Option<(MalFn, Vec<MalVal>)> {
    let MalVal::List(items) = ast else {
        return None;
    };
    let MalVal::Symbol(head) = items.front()? else {
        return None;
    };
    match env.get(head)? {
        MalVal::Fn(f) if f.is_macro => Some((f, items.iter().skip(1).cloned().collect())),
        _ => None,
    }
}

/// Expand `ast` while it is a macro call.
///
/// A form that is not a macro call is returned unchanged.
pub fn macroexpand(mut ast: MalVal, env: &Env) -> Result<MalVal> {
    let mut expansions = 0;
    while let Some((mac, args)) = macro_call(&ast, env) {
        expansions += 1;
        if expansions > MAX_MACRO_EXPANSIONS {
            return Err(Error::MacroExpansionLimit(MAX_MACRO_EXPANSIONS));
        }
        ast = apply_fn(&mac, &args)?;
        trace!("macroexpand: {}", ast);
    }
    Ok(ast)
}

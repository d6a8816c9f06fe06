// mal-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for mal.

mod arithmetic;
mod atoms;
mod comparison;
mod io;
mod predicates;
mod sequences;

use im::Vector;
use mal_reader::{MalVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_deref, builtin_reset, builtin_swap};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use io::{
    builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_slurp, builtin_str,
};
use predicates::{
    builtin_atom_p, builtin_false_p, builtin_fn_p, builtin_keyword_p, builtin_list_p,
    builtin_macro_p, builtin_nil_p, builtin_number_p, builtin_string_p, builtin_symbol_p,
    builtin_true_p, builtin_vector_p,
};
use sequences::{
    builtin_apply, builtin_concat, builtin_cons, builtin_count, builtin_empty_p, builtin_first,
    builtin_list, builtin_nth, builtin_rest, builtin_vec, builtin_vector,
};

/// Register all built-in functions in the given environment.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native("<=", builtin_le);
    env.define_native(">", builtin_gt);
    env.define_native(">=", builtin_ge);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("vector", builtin_vector);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("count", builtin_count);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("vec", builtin_vec);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("nth", builtin_nth);
    env.define_native("apply", builtin_apply);

    // Predicates
    env.define_native("list?", builtin_list_p);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("macro?", builtin_macro_p);
    env.define_native("atom?", builtin_atom_p);

    // Printing and reading
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("str", builtin_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);
}

/// Extension trait for binding plain builtin functions.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[MalVal]) -> Result<MalVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[MalVal]) -> Result<MalVal>) {
        let native = make_native_fn(name, func);
        self.define(Symbol::new(name), MalVal::NativeFn(native));
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

pub(crate) fn compare_numbers(
    name: &'static str,
    a: &MalVal,
    b: &MalVal,
) -> Result<std::cmp::Ordering> {
    let nan = || Error::EvalError(format!("{}: cannot compare NaN", name));
    match (a, b) {
        (MalVal::Int(x), MalVal::Int(y)) => Ok(x.cmp(y)),
        (MalVal::Float(x), MalVal::Float(y)) => x.partial_cmp(y).ok_or_else(nan),
        (MalVal::Int(x), MalVal::Float(y)) => (*x as f64).partial_cmp(y).ok_or_else(nan),
        (MalVal::Float(x), MalVal::Int(y)) => x.partial_cmp(&(*y as f64)).ok_or_else(nan),
        (a, b) => Err(Error::type_error_in(
            name,
            "number",
            if matches!(a, MalVal::Int(_) | MalVal::Float(_)) {
                b.type_name()
            } else {
                a.type_name()
            },
        )),
    }
}

/// The elements of a List or Vector argument.
pub(crate) fn seq_arg<'a>(
    name: &'static str,
    val: &'a MalVal,
) -> Result<&'a Vector<MalVal>> {
    val.as_seq()
        .ok_or_else(|| Error::type_error_in(name, "list or vector", val.type_name()))
}

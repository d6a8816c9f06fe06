// mal-core - Type predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, false?, symbol?, keyword?, string?, number?,
//! list?, vector?, fn?, macro?, atom?

use mal_reader::MalVal;

use crate::error::{Error, Result};

fn predicate(name: &'static str, args: &[MalVal], test: fn(&MalVal) -> bool) -> Result<MalVal> {
    match args {
        [val] => Ok(MalVal::bool(test(val))),
        _ => Err(Error::arity_named(name, 1, args.len())),
    }
}

pub(crate) fn builtin_nil_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("nil?", args, |v| matches!(v, MalVal::Nil))
}

pub(crate) fn builtin_true_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("true?", args, |v| matches!(v, MalVal::True))
}

pub(crate) fn builtin_false_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("false?", args, |v| matches!(v, MalVal::False))
}

pub(crate) fn builtin_symbol_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("symbol?", args, |v| matches!(v, MalVal::Symbol(_)))
}

pub(crate) fn builtin_keyword_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("keyword?", args, |v| matches!(v, MalVal::Keyword(_)))
}

pub(crate) fn builtin_string_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("string?", args, |v| matches!(v, MalVal::String(_)))
}

pub(crate) fn builtin_number_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("number?", args, |v| matches!(v, MalVal::Int(_) | MalVal::Float(_)))
}

pub(crate) fn builtin_list_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("list?", args, |v| matches!(v, MalVal::List(_)))
}

pub(crate) fn builtin_vector_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("vector?", args, |v| matches!(v, MalVal::Vector(_)))
}

/// True for closures and builtins, but not macros.
pub(crate) fn builtin_fn_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("fn?", args, |v| match v {
        MalVal::Fn(f) => !f.is_macro,
        MalVal::NativeFn(_) => true,
        _ => false,
    })
}

pub(crate) fn builtin_macro_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("macro?", args, |v| matches!(v, MalVal::Fn(f) if f.is_macro))
}

pub(crate) fn builtin_atom_p(args: &[MalVal]) -> Result<MalVal> {
    predicate("atom?", args, |v| matches!(v, MalVal::Atom(_)))
}

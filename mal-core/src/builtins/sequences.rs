// mal-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: list, vector, empty?, count, cons, concat, vec,
//! first, rest, nth, apply

use im::Vector;
use mal_reader::MalVal;

use crate::error::{Error, Result};
use crate::eval::apply;

use super::seq_arg;

// ============================================================================
// Construction
// ============================================================================

/// (list & items)
pub(crate) fn builtin_list(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::list(args.iter().cloned()))
}

/// (vector & items)
pub(crate) fn builtin_vector(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::vector(args.iter().cloned()))
}

/// (cons x seq) - a new list with x in front
pub(crate) fn builtin_cons(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("cons", 2, args.len()));
    }
    let mut items = seq_arg("cons", &args[1])?.clone();
    items.push_front(args[0].clone());
    Ok(MalVal::List(items))
}

/// (concat & seqs) - all elements as one list
pub(crate) fn builtin_concat(args: &[MalVal]) -> Result<MalVal> {
    let mut items = Vector::new();
    for arg in args {
        items.append(seq_arg("concat", arg)?.clone());
    }
    Ok(MalVal::List(items))
}

/// (vec seq) - the elements of seq as a vector
pub(crate) fn builtin_vec(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vec", 1, args.len()));
    }
    Ok(MalVal::Vector(seq_arg("vec", &args[0])?.clone()))
}

// ============================================================================
// Inspection
// ============================================================================

/// (empty? coll) - true only for an empty list, vector or map
pub(crate) fn builtin_empty_p(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("empty?", 1, args.len()));
    }
    Ok(MalVal::bool(match &args[0] {
        MalVal::List(items) | MalVal::Vector(items) | MalVal::HashMap(items) => items.is_empty(),
        _ => false,
    }))
}

/// (count coll) - nil counts as 0, a map counts its entries
pub(crate) fn builtin_count(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("count", 1, args.len()));
    }
    let n = match &args[0] {
        MalVal::Nil => 0,
        MalVal::List(items) | MalVal::Vector(items) => items.len(),
        MalVal::HashMap(items) => items.len() / 2,
        other => {
            return Err(Error::type_error_in("count", "collection", other.type_name()));
        }
    };
    Ok(MalVal::Int(n as i64))
}

/// (first seq) - nil for nil or an empty sequence
pub(crate) fn builtin_first(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("first", 1, args.len()));
    }
    match &args[0] {
        MalVal::Nil => Ok(MalVal::Nil),
        other => Ok(seq_arg("first", other)?.front().cloned().unwrap_or(MalVal::Nil)),
    }
}

/// (rest seq) - always a list, empty for nil or an empty sequence
pub(crate) fn builtin_rest(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("rest", 1, args.len()));
    }
    match &args[0] {
        MalVal::Nil => Ok(MalVal::empty_list()),
        other => {
            let items = seq_arg("rest", other)?;
            if items.is_empty() {
                return Ok(MalVal::empty_list());
            }
            Ok(MalVal::List(items.skip(1)))
        }
    }
}

/// (nth seq index)
pub(crate) fn builtin_nth(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("nth", 2, args.len()));
    }
    let items = seq_arg("nth", &args[0])?;
    let index = match &args[1] {
        MalVal::Int(i) => *i,
        other => return Err(Error::type_error_in("nth", "int", other.type_name())),
    };
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| {
            Error::EvalError(format!(
                "nth: index {} out of range for sequence of length {}",
                index,
                items.len()
            ))
        })
}

// ============================================================================
// Application
// ============================================================================

/// (apply f & args seq) - call f with args followed by the elements of seq
pub(crate) fn builtin_apply(args: &[MalVal]) -> Result<MalVal> {
    let [func, middle @ .., last] = args else {
        return Err(Error::arity_at_least("apply", 2, args.len()));
    };
    let mut call_args = middle.to_vec();
    call_args.extend(seq_arg("apply", last)?.iter().cloned());
    apply(func, &call_args)
}

// mal-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, <=, >, >=
//!
//! Each takes two or more arguments and holds when every adjacent pair does.

use std::cmp::Ordering;

use mal_reader::MalVal;

use crate::error::{Error, Result};

use super::compare_numbers;

fn chain(
    name: &'static str,
    args: &[MalVal],
    holds: impl Fn(&MalVal, &MalVal) -> Result<bool>,
) -> Result<MalVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least(name, 2, args.len()));
    }
    for pair in args.windows(2) {
        if !holds(&pair[0], &pair[1])? {
            return Ok(MalVal::False);
        }
    }
    Ok(MalVal::True)
}

fn ordered(name: &'static str, args: &[MalVal], accept: fn(Ordering) -> bool) -> Result<MalVal> {
    // Every argument is type-checked, even after the chain fails.
    for pair in args.windows(2) {
        compare_numbers(name, &pair[0], &pair[1])?;
    }
    chain(name, args, |a, b| Ok(accept(compare_numbers(name, a, b)?)))
}

/// (= x y & more)
pub(crate) fn builtin_eq(args: &[MalVal]) -> Result<MalVal> {
    chain("=", args, |a, b| Ok(a == b))
}

/// (< x y & more)
pub(crate) fn builtin_lt(args: &[MalVal]) -> Result<MalVal> {
    ordered("<", args, Ordering::is_lt)
}

/// (<= x y & more)
pub(crate) fn builtin_le(args: &[MalVal]) -> Result<MalVal> {
    ordered("<=", args, Ordering::is_le)
}

/// (> x y & more)
pub(crate) fn builtin_gt(args: &[MalVal]) -> Result<MalVal> {
    ordered(">", args, Ordering::is_gt)
}

/// (>= x y & more)
pub(crate) fn builtin_ge(args: &[MalVal]) -> Result<MalVal> {
    ordered(">=", args, Ordering::is_ge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        assert_eq!(builtin_eq(&[MalVal::Int(1), MalVal::Int(1)]).unwrap(), MalVal::True);
        assert_eq!(builtin_eq(&[MalVal::Int(1), MalVal::Float(1.0)]).unwrap(), MalVal::False);
        assert_eq!(builtin_eq(&[MalVal::Nil, MalVal::False]).unwrap(), MalVal::False);
        assert!(builtin_eq(&[MalVal::Int(1)]).is_err());
    }

    #[test]
    fn test_ordering_chains() {
        let asc = [MalVal::Int(1), MalVal::Float(1.5), MalVal::Int(2)];
        assert_eq!(builtin_lt(&asc).unwrap(), MalVal::True);
        assert_eq!(builtin_gt(&asc).unwrap(), MalVal::False);
        assert_eq!(builtin_le(&[MalVal::Int(2), MalVal::Int(2)]).unwrap(), MalVal::True);
        assert_eq!(builtin_ge(&[MalVal::Int(3), MalVal::Int(2), MalVal::Int(2)]).unwrap(), MalVal::True);
    }

    #[test]
    fn test_ordering_rejects_non_numbers() {
        let err = builtin_lt(&[MalVal::Int(1), MalVal::string("a")]).unwrap_err();
        assert_eq!(err.to_string(), "<: expected number, got string");
        assert!(builtin_gt(&[MalVal::Int(1), MalVal::Int(2), MalVal::Nil]).is_err());
    }
}

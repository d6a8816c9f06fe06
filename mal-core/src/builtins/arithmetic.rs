// mal-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! ## Integer Overflow Behaviour
//!
//! Integer arithmetic is checked and returns an error on overflow, including
//! negation and division of `i64::MIN` by -1. Any float operand promotes the
//! operation to floating point, which is not checked.

use mal_reader::MalVal;

use crate::error::{Error, Result};

// ============================================================================
// Helpers
// ============================================================================

fn check_number(name: &'static str, val: &MalVal) -> Result<()> {
    match val {
        MalVal::Int(_) | MalVal::Float(_) => Ok(()),
        other => Err(Error::type_error_in(name, "number", other.type_name())),
    }
}

fn to_float(val: &MalVal) -> f64 {
    match val {
        MalVal::Int(n) => *n as f64,
        MalVal::Float(n) => *n,
        _ => f64::NAN,
    }
}

/// Combine two numbers, staying in integers when both operands are ints.
fn combine(
    name: &'static str,
    a: &MalVal,
    b: &MalVal,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<MalVal> {
    check_number(name, a)?;
    check_number(name, b)?;
    match (a, b) {
        (MalVal::Int(x), MalVal::Int(y)) => int_op(*x, *y)
            .map(MalVal::Int)
            .ok_or(Error::IntegerOverflow(name)),
        _ => Ok(MalVal::Float(float_op(to_float(a), to_float(b)))),
    }
}

fn fold(
    name: &'static str,
    init: MalVal,
    args: &[MalVal],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<MalVal> {
    args.iter()
        .try_fold(init, |acc, arg| combine(name, &acc, arg, int_op, float_op))
}

fn int_div(x: i64, y: i64) -> Option<i64> {
    x.checked_div(y)
}

fn divide(a: &MalVal, b: &MalVal) -> Result<MalVal> {
    if matches!((a, b), (MalVal::Int(_), MalVal::Int(0))) {
        return Err(Error::DivisionByZero);
    }
    combine("/", a, b, int_div, |x, y| x / y)
}

// ============================================================================
// Operations
// ============================================================================

/// (+ & nums)
pub(crate) fn builtin_add(args: &[MalVal]) -> Result<MalVal> {
    fold("+", MalVal::Int(0), args, i64::checked_add, |x, y| x + y)
}

/// (* & nums)
pub(crate) fn builtin_mul(args: &[MalVal]) -> Result<MalVal> {
    fold("*", MalVal::Int(1), args, i64::checked_mul, |x, y| x * y)
}

/// (- x & nums) - with one argument, negates it
pub(crate) fn builtin_sub(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [] => Err(Error::arity_at_least("-", 1, 0)),
        [x] => combine("-", &MalVal::Int(0), x, i64::checked_sub, |a, b| a - b),
        [x, rest @ ..] => fold("-", x.clone(), rest, i64::checked_sub, |a, b| a - b),
    }
}

/// (/ x & nums) - with one argument, the reciprocal. Integer division truncates.
pub(crate) fn builtin_div(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [] => Err(Error::arity_at_least("/", 1, 0)),
        [x] => divide(&MalVal::Int(1), x),
        [x, rest @ ..] => {
            check_number("/", x)?;
            rest.iter().try_fold(x.clone(), |acc, arg| divide(&acc, arg))
        }
    }
}

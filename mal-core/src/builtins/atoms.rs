// mal-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, deref, reset!, swap!

use mal_reader::{MalAtom, MalVal};

use crate::error::{Error, Result};
use crate::eval::apply;

fn atom_arg<'a>(name: &'static str, val: &'a MalVal) -> Result<&'a MalAtom> {
    match val {
        MalVal::Atom(a) => Ok(a),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom", 1, args.len()));
    }
    Ok(MalVal::atom(args[0].clone()))
}

/// (deref atom) - the current value
pub(crate) fn builtin_deref(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("deref", 1, args.len()));
    }
    Ok(atom_arg("deref", &args[0])?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("reset!", 2, args.len()));
    }
    Ok(atom_arg("reset!", &args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - Set atom to (f current args...), returns the new value
pub(crate) fn builtin_swap(args: &[MalVal]) -> Result<MalVal> {
    let [target, func, extra @ ..] = args else {
        return Err(Error::arity_at_least("swap!", 2, args.len()));
    };
    let atom = atom_arg("swap!", target)?;
    let mut call_args = Vec::with_capacity(extra.len() + 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(extra);
    let new_value = apply(func, &call_args)?;
    Ok(atom.reset(new_value))
}

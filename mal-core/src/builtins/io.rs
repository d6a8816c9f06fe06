// mal-core - Printing and reading built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Printing and reading: pr-str, str, prn, println, read-string, slurp

use mal_reader::{MalVal, pr_str};

use crate::error::{Error, Result};

fn join(args: &[MalVal], readably: bool, sep: &str) -> String {
    args.iter()
        .map(|arg| pr_str(arg, readably))
        .collect::<Vec<_>>()
        .join(sep)
}

fn string_arg<'a>(name: &'static str, val: &'a MalVal) -> Result<&'a str> {
    match val {
        MalVal::String(s) => Ok(&**s),
        other => Err(Error::type_error_in(name, "string", other.type_name())),
    }
}

// ============================================================================
// Printing
// ============================================================================

/// (pr-str & xs) - readable forms joined by spaces
pub(crate) fn builtin_pr_str(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::string(join(args, true, " ")))
}

/// (str & xs) - display forms concatenated
pub(crate) fn builtin_str(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::string(join(args, false, "")))
}

/// (prn & xs) - print readable forms and a newline
pub(crate) fn builtin_prn(args: &[MalVal]) -> Result<MalVal> {
    println!("{}", join(args, true, " "));
    Ok(MalVal::Nil)
}

/// (println & xs) - print display forms and a newline
pub(crate) fn builtin_println(args: &[MalVal]) -> Result<MalVal> {
    println!("{}", join(args, false, " "));
    Ok(MalVal::Nil)
}

// ============================================================================
// Reading
// ============================================================================

/// (read-string s) - the first form in s, or nil if s holds none
pub(crate) fn builtin_read_string(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("read-string", 1, args.len()));
    }
    let source = string_arg("read-string", &args[0])?;
    Ok(mal_reader::read(source)?.unwrap_or(MalVal::Nil))
}

/// (slurp filename) - read file contents as string
pub(crate) fn builtin_slurp(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("slurp", 1, args.len()));
    }
    let path = string_arg("slurp", &args[0])?;
    std::fs::read_to_string(path)
        .map(MalVal::string)
        .map_err(|source| Error::Io {
            context: format!("slurp: {}", path),
            source,
        })
}

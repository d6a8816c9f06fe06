// mal-reader - Printer for mal values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Render values back to text.
//!
//! In readable mode the output of `pr_str` reads back as an equal value for
//! everything except functions and atoms. Display mode prints strings raw,
//! which is what `str` and `println` want.

use std::fmt::Write;

use im::Vector;

use crate::value::MalVal;

/// Render `val` as text. `readably` selects quoted, escaped strings.
pub fn pr_str(val: &MalVal, readably: bool) -> String {
    let mut out = String::new();
    write_val(&mut out, val, readably);
    out
}

/// Quote and escape a string the way the reader expects it.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn write_val(out: &mut String, val: &MalVal, readably: bool) {
    match val {
        MalVal::Nil => out.push_str("nil"),
        MalVal::True => out.push_str("true"),
        MalVal::False => out.push_str("false"),
        MalVal::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        MalVal::Float(n) => write_float(out, *n),
        MalVal::String(s) if readably => out.push_str(&escape_string(s)),
        MalVal::String(s) => out.push_str(s),
        MalVal::Symbol(sym) => out.push_str(sym.name()),
        MalVal::Keyword(kw) => {
            let _ = write!(out, "{}", kw);
        }
        MalVal::List(items) => write_seq(out, items, readably, '(', ')'),
        MalVal::Vector(items) => write_seq(out, items, readably, '[', ']'),
        MalVal::HashMap(items) => write_seq(out, items, readably, '{', '}'),
        MalVal::Fn(f) if f.is_macro => out.push_str("#<macro>"),
        MalVal::Fn(_) => out.push_str("#<function>"),
        MalVal::NativeFn(f) => {
            let _ = write!(out, "#<native-function {}>", f.name());
        }
        MalVal::Atom(atom) => {
            out.push_str("(atom ");
            write_val(out, &atom.deref(), readably);
            out.push(')');
        }
    }
}

fn write_seq(out: &mut String, items: &Vector<MalVal>, readably: bool, open: char, close: char) {
    out.push(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_val(out, item, readably);
    }
    out.push(close);
}

fn write_float(out: &mut String, n: f64) {
    // Whole floats keep a ".0" so they read back as floats.
    if n.is_finite() && n.fract() == 0.0 {
        let _ = write!(out, "{}.0", n);
    } else {
        let _ = write!(out, "{}", n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::MalAtom;

    #[test]
    fn test_scalars() {
        assert_eq!(pr_str(&MalVal::Nil, true), "nil");
        assert_eq!(pr_str(&MalVal::True, true), "true");
        assert_eq!(pr_str(&MalVal::Int(-3), true), "-3");
        assert_eq!(pr_str(&MalVal::Float(2.5), true), "2.5");
        assert_eq!(pr_str(&MalVal::Float(2.0), true), "2.0");
        assert_eq!(pr_str(&MalVal::keyword("k"), true), ":k");
        assert_eq!(pr_str(&MalVal::symbol("sym"), true), "sym");
    }

    #[test]
    fn test_string_modes() {
        let s = MalVal::string("a \"q\"\n\\");
        assert_eq!(pr_str(&s, true), r#""a \"q\"\n\\""#);
        assert_eq!(pr_str(&s, false), "a \"q\"\n\\");
    }

    #[test]
    fn test_collections() {
        let list = MalVal::list([MalVal::Int(1), MalVal::vector([MalVal::string("x")])]);
        assert_eq!(pr_str(&list, true), r#"(1 ["x"])"#);
        assert_eq!(pr_str(&list, false), "(1 [x])");
        let map = MalVal::HashMap([MalVal::keyword("a"), MalVal::Int(1)].into_iter().collect());
        assert_eq!(pr_str(&map, true), "{:a 1}");
        assert_eq!(pr_str(&MalVal::empty_list(), true), "()");
    }

    #[test]
    fn test_atom() {
        let atom = MalVal::Atom(MalAtom::new(MalVal::string("v")));
        assert_eq!(pr_str(&atom, true), r#"(atom "v")"#);
        assert_eq!(pr_str(&atom, false), "(atom v)");
    }

    #[test]
    fn test_display_is_readable() {
        assert_eq!(MalVal::string("hi").to_string(), "\"hi\"");
    }
}

// mal-reader - Core value types for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Value representation for mal data and code.
//!
//! A program is read into `MalVal` trees and evaluated as `MalVal` trees.
//! Collections use persistent `im::Vector`s so that `cons`, `rest` and the
//! evaluator's structural copies share storage.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::keyword::Keyword;
use crate::printer::pr_str;
use crate::symbol::Symbol;

// ============================================================================
// MalVal
// ============================================================================

/// A mal value.
#[derive(Clone)]
pub enum MalVal {
    Nil,
    True,
    False,
    Int(i64),
    Float(f64),
    String(Rc<str>),
    Symbol(Symbol),
    Keyword(Keyword),
    List(Vector<MalVal>),
    Vector(Vector<MalVal>),
    /// Alternating keys and values in insertion order.
    HashMap(Vector<MalVal>),
    Fn(MalFn),
    NativeFn(MalNativeFn),
    Atom(MalAtom),
}

impl MalVal {
    // ------------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------------

    #[inline]
    pub fn bool(b: bool) -> Self {
        if b { MalVal::True } else { MalVal::False }
    }

    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        MalVal::String(Rc::from(s.as_ref()))
    }

    #[inline]
    pub fn symbol(name: &str) -> Self {
        MalVal::Symbol(Symbol::new(name))
    }

    #[inline]
    pub fn keyword(name: &str) -> Self {
        MalVal::Keyword(Keyword::new(name))
    }

    pub fn list(items: impl IntoIterator<Item = MalVal>) -> Self {
        MalVal::List(items.into_iter().collect())
    }

    pub fn vector(items: impl IntoIterator<Item = MalVal>) -> Self {
        MalVal::Vector(items.into_iter().collect())
    }

    #[inline]
    pub fn empty_list() -> Self {
        MalVal::List(Vector::new())
    }

    pub fn atom(value: MalVal) -> Self {
        MalVal::Atom(MalAtom::new(value))
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Everything except `nil` and `false` is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, MalVal::Nil | MalVal::False)
    }

    /// Get the type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            MalVal::Nil => "nil",
            MalVal::True | MalVal::False => "bool",
            MalVal::Int(_) => "int",
            MalVal::Float(_) => "float",
            MalVal::String(_) => "string",
            MalVal::Symbol(_) => "symbol",
            MalVal::Keyword(_) => "keyword",
            MalVal::List(_) => "list",
            MalVal::Vector(_) => "vector",
            MalVal::HashMap(_) => "hash-map",
            MalVal::Fn(f) if f.is_macro => "macro",
            MalVal::Fn(_) => "function",
            MalVal::NativeFn(_) => "native-function",
            MalVal::Atom(_) => "atom",
        }
    }

    /// The elements of a List or Vector.
    pub fn as_seq(&self) -> Option<&Vector<MalVal>> {
        match self {
            MalVal::List(items) | MalVal::Vector(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            MalVal::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// True for a symbol spelled `name`.
    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, MalVal::Symbol(sym) if sym.is(name))
    }
}

impl PartialEq for MalVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MalVal::Nil, MalVal::Nil)
            | (MalVal::True, MalVal::True)
            | (MalVal::False, MalVal::False) => true,
            (MalVal::Int(a), MalVal::Int(b)) => a == b,
            (MalVal::Float(a), MalVal::Float(b)) => a == b,
            (MalVal::String(a), MalVal::String(b)) => a == b,
            (MalVal::Symbol(a), MalVal::Symbol(b)) => a == b,
            (MalVal::Keyword(a), MalVal::Keyword(b)) => a == b,
            (
                MalVal::List(a) | MalVal::Vector(a),
                MalVal::List(b) | MalVal::Vector(b),
            ) => a == b,
            (MalVal::HashMap(a), MalVal::HashMap(b)) => a == b,
            (MalVal::Fn(a), MalVal::Fn(b)) => a == b,
            (MalVal::NativeFn(a), MalVal::NativeFn(b)) => a == b,
            (MalVal::Atom(a), MalVal::Atom(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for MalVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pr_str(self, true))
    }
}

impl fmt::Debug for MalVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<i64> for MalVal {
    fn from(n: i64) -> Self {
        MalVal::Int(n)
    }
}

impl From<f64> for MalVal {
    fn from(n: f64) -> Self {
        MalVal::Float(n)
    }
}

impl From<bool> for MalVal {
    fn from(b: bool) -> Self {
        MalVal::bool(b)
    }
}

impl From<&str> for MalVal {
    fn from(s: &str) -> Self {
        MalVal::string(s)
    }
}

// ============================================================================
// Functions
// ============================================================================

/// A user-defined closure created by `fn*`.
///
/// The captured environment lives in mal-core, so it is stored type-erased
/// and downcast by the evaluator.
#[derive(Clone)]
pub struct MalFn {
    pub params: Rc<[Symbol]>,
    /// The symbol after `&`, if any.
    pub rest_param: Option<Symbol>,
    pub body: Rc<MalVal>,
    pub env: Rc<dyn Any>,
    pub is_macro: bool,
}

impl MalFn {
    pub fn new(
        params: Vec<Symbol>,
        rest_param: Option<Symbol>,
        body: MalVal,
        env: Rc<dyn Any>,
    ) -> Self {
        MalFn {
            params: params.into(),
            rest_param,
            body: Rc::new(body),
            env,
            is_macro: false,
        }
    }

    /// A copy of this closure flagged as a macro.
    #[must_use]
    pub fn as_macro(&self) -> Self {
        MalFn {
            is_macro: true,
            ..self.clone()
        }
    }

    /// Whether `n` arguments satisfy the parameter list.
    pub fn accepts(&self, n: usize) -> bool {
        if self.rest_param.is_some() {
            n >= self.params.len()
        } else {
            n == self.params.len()
        }
    }
}

impl PartialEq for MalFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
            && Rc::ptr_eq(&self.env, &other.env)
            && self.is_macro == other.is_macro
    }
}

impl fmt::Debug for MalFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_macro {
            write!(f, "#<macro>")
        } else {
            write!(f, "#<function>")
        }
    }
}

/// A builtin implemented in Rust.
#[derive(Clone)]
pub struct MalNativeFn {
    pub name: &'static str,
    func: Rc<dyn Any>,
}

impl MalNativeFn {
    /// Wrap a type-erased host callable.
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        MalNativeFn { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl PartialEq for MalNativeFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for MalNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-function {}>", self.name)
    }
}

// ============================================================================
// Atoms
// ============================================================================

/// A mutable reference cell.
#[derive(Clone)]
pub struct MalAtom {
    value: Rc<RefCell<MalVal>>,
}

impl MalAtom {
    pub fn new(value: MalVal) -> Self {
        MalAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value.
    pub fn deref(&self) -> MalVal {
        self.value.borrow().clone()
    }

    /// Replace the current value, returning the new one.
    pub fn reset(&self, value: MalVal) -> MalVal {
        *self.value.borrow_mut() = value.clone();
        value
    }
}

impl PartialEq for MalAtom {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for MalAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(atom {})", self.deref())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!MalVal::Nil.is_truthy());
        assert!(!MalVal::False.is_truthy());
        assert!(MalVal::True.is_truthy());
        assert!(MalVal::Int(0).is_truthy());
        assert!(MalVal::string("").is_truthy());
        assert!(MalVal::empty_list().is_truthy());
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert_ne!(MalVal::Int(1), MalVal::Float(1.0));
        assert_eq!(MalVal::Float(1.5), MalVal::Float(1.5));
    }

    #[test]
    fn test_list_equals_vector() {
        let list = MalVal::list([MalVal::Int(1), MalVal::Int(2)]);
        let vector = MalVal::vector([MalVal::Int(1), MalVal::Int(2)]);
        assert_eq!(list, vector);
        assert_ne!(list, MalVal::vector([MalVal::Int(1)]));
    }

    #[test]
    fn test_hash_map_only_equals_hash_map() {
        let items = || [MalVal::keyword("a"), MalVal::Int(1)];
        assert_eq!(MalVal::HashMap(items().into_iter().collect()), MalVal::HashMap(items().into_iter().collect()));
        assert_ne!(MalVal::HashMap(items().into_iter().collect()), MalVal::list(items()));
    }

    #[test]
    fn test_singletons_are_not_symbols() {
        assert_ne!(MalVal::Nil, MalVal::symbol("nil"));
        assert_ne!(MalVal::True, MalVal::symbol("true"));
    }

    #[test]
    fn test_atoms_compare_by_identity() {
        let a = MalAtom::new(MalVal::Int(1));
        let b = MalAtom::new(MalVal::Int(1));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_atom_reset() {
        let a = MalAtom::new(MalVal::Int(1));
        assert_eq!(a.reset(MalVal::Int(2)), MalVal::Int(2));
        assert_eq!(a.deref(), MalVal::Int(2));
    }

    #[test]
    fn test_fn_accepts() {
        let env: Rc<dyn Any> = Rc::new(());
        let fixed = MalFn::new(vec![Symbol::new("a")], None, MalVal::Nil, env.clone());
        assert!(fixed.accepts(1));
        assert!(!fixed.accepts(2));

        let variadic = MalFn::new(vec![Symbol::new("a")], Some(Symbol::new("more")), MalVal::Nil, env);
        assert!(!variadic.accepts(0));
        assert!(variadic.accepts(1));
        assert!(variadic.accepts(5));
        assert!(variadic.as_macro().is_macro);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(MalVal::Nil.type_name(), "nil");
        assert_eq!(MalVal::True.type_name(), "bool");
        assert_eq!(MalVal::symbol("x").type_name(), "symbol");
        assert_eq!(MalVal::empty_list().type_name(), "list");
    }
}

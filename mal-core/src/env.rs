// mal-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mal_reader::{MalVal, Symbol};

use crate::error::{Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through outer references. Closures hold their
/// defining environment by reference, so later definitions in that
/// environment are visible to them.
///
/// # Examples
///
/// ```
/// use mal_core::Env;
/// use mal_reader::{MalVal, Symbol};
///
/// let env = Env::new();
/// env.define(Symbol::new("x"), MalVal::Int(42));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MalVal::Int(42));
///
/// // Children see outer bindings and may shadow them
/// let child = env.child();
/// child.define(Symbol::new("x"), MalVal::Int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), MalVal::Int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MalVal::Int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, MalVal>,
    outer: Option<Env>,
}

impl Env {
    /// Create a new root environment with no outer scope.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                outer: None,
            })),
        }
    }

    /// Create a child environment with this environment as its outer scope.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                outer: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this environment (not the outer ones).
    pub fn define(&self, sym: Symbol, val: MalVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Find a binding in this environment or its outer chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn get(&self, sym: &Symbol) -> Option<MalVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Some(val.clone());
            }
            let outer = inner.outer.clone();
            drop(inner);
            current = outer?;
        }
    }

    /// Look up a symbol, failing if it is unbound.
    pub fn lookup(&self, sym: &Symbol) -> Result<MalVal> {
        self.get(sym)
            .ok_or_else(|| Error::UndefinedSymbol(sym.clone()))
    }

    /// Check if a symbol is bound anywhere in the chain.
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.get(sym).is_some()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

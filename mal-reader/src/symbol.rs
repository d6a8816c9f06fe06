// mal-reader - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are identifiers resolved through the environment.
//!
//! Symbols are interned in a global table, so two symbols with the same name
//! share storage and compare by pointer. Interned names are never freed; the
//! set of distinct names in a program is small and bounded in practice.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// An interned identifier.
#[derive(Clone)]
pub struct Symbol {
    name: Arc<str>,
}

static SYMBOL_INTERNER: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

fn intern(name: &str) -> Arc<str> {
    let table = SYMBOL_INTERNER.get_or_init(|| Mutex::new(HashSet::new()));
    // A poisoned table still holds valid names.
    let mut table = table.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(existing) = table.get(name) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(name);
    table.insert(Arc::clone(&interned));
    interned
}

impl Symbol {
    /// Create (or fetch) the symbol with the given name.
    pub fn new(name: &str) -> Self {
        Symbol { name: intern(name) }
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if this symbol is spelled `name`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        &*self.name == name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.name).cast::<u8>().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_shares_storage() {
        let a = Symbol::new("foo");
        let b = Symbol::new("foo");
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.name, &b.name));
    }

    #[test]
    fn test_distinct_names() {
        assert_ne!(Symbol::new("foo"), Symbol::new("bar"));
        assert!(Symbol::new("a") < Symbol::new("b"));
    }

    #[test]
    fn test_display_and_is() {
        let sym = Symbol::new("def!");
        assert_eq!(sym.to_string(), "def!");
        assert!(sym.is("def!"));
        assert!(!sym.is("def"));
    }
}

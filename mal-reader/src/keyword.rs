// mal-reader - Keyword type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating names written with a leading colon.

use std::fmt;
use std::rc::Rc;

/// A keyword such as `:foo`. The stored name excludes the colon.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword {
    name: Rc<str>,
}

impl Keyword {
    pub fn new(name: &str) -> Self {
        Keyword { name: Rc::from(name) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_display() {
        let kw = Keyword::new("foo");
        assert_eq!(kw.name(), "foo");
        assert_eq!(kw.to_string(), ":foo");
    }

    #[test]
    fn test_keyword_equality() {
        assert_eq!(Keyword::new("a"), Keyword::new("a"));
        assert_ne!(Keyword::new("a"), Keyword::new("b"));
    }
}

// mal-core - Quasiquote expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Rewrite a quasiquoted template into `cons`/`concat`/`vec` calls.

use im::Vector;
use mal_reader::MalVal;

/// Expand the body of a `quasiquote` form. The result is ordinary code.
pub fn quasiquote(ast: &MalVal) -> MalVal {
    match ast {
        MalVal::List(items) => {
            if let Some(inner) = tagged(ast, "unquote") {
                return inner.clone();
            }
            if items.is_empty() {
                return ast.clone();
            }
            fold_elements(items)
        }
        MalVal::Vector(items) => MalVal::list([MalVal::symbol("vec"), fold_elements(items)]),
        MalVal::Nil | MalVal::True | MalVal::False | MalVal::Int(_) | MalVal::Float(_) => {
            ast.clone()
        }
        _ => MalVal::list([MalVal::symbol("quote"), ast.clone()]),
    }
}

/// The argument of a two-element list headed by `tag`.
fn tagged<'a>(ast: &'a MalVal, tag: &str) -> Option<&'a MalVal> {
    match ast {
        MalVal::List(items) if items.len() == 2 && items[0].is_symbol(tag) => items.get(1),
        _ => None,
    }
}

fn fold_elements(items: &Vector<MalVal>) -> MalVal {
    items.iter().rev().fold(MalVal::empty_list(), |acc, elt| {
        match tagged(elt, "splice-unquote") {
            Some(spliced) => MalVal::list([MalVal::symbol("concat"), spliced.clone(), acc]),
            None => MalVal::list([MalVal::symbol("cons"), quasiquote(elt), acc]),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mal_reader::read;

    fn expand(source: &str) -> String {
        quasiquote(&read(source).unwrap().unwrap()).to_string()
    }

    #[test]
    fn test_atoms() {
        assert_eq!(expand("1"), "1");
        assert_eq!(expand("nil"), "nil");
        assert_eq!(expand("a"), "(quote a)");
        assert_eq!(expand(":k"), "(quote :k)");
        assert_eq!(expand("\"s\""), "(quote \"s\")");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(expand("(unquote x)"), "x");
    }

    #[test]
    fn test_list_fold() {
        assert_eq!(expand("()"), "()");
        assert_eq!(expand("(a (unquote b))"), "(cons (quote a) (cons b ()))");
        assert_eq!(expand("(1 (splice-unquote xs) 2)"), "(cons 1 (concat xs (cons 2 ())))");
    }

    #[test]
    fn test_vector_wraps_in_vec() {
        assert_eq!(expand("[]"), "(vec ())");
        assert_eq!(expand("[(unquote a)]"), "(vec (cons a ()))");
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(expand("((unquote a))"), "(cons a ())");
        assert_eq!(expand("(((unquote a)))"), "(cons (cons a ()) ())");
    }

    #[test]
    fn test_unquote_in_vector_is_literal_element() {
        // A vector shaped like (unquote x) is not an unquote.
        assert_eq!(expand("[unquote x]"), "(vec (cons (quote unquote) (cons (quote x) ())))");
    }
}

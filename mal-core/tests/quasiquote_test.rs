// mal-core - Quasiquote integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for quasiquote, unquote, splice-unquote and
//! quasiquoteexpand.

mod common;

use common::*;

#[test]
fn test_quasiquote_without_unquote_is_quote() {
    assert_prints!("`(a b c)", "(a b c)");
    assert_prints!("`7", "7");
    assert_prints!("`sym", "sym");
    assert_prints!("`()", "()");
}

#[test]
fn test_unquote() {
    assert_prints!("(def! b 2) `(a ~b c)", "(a 2 c)");
    assert_prints!("(def! b '(x y)) `(a ~b)", "(a (x y))");
    assert_prints!("`~(+ 1 2)", "3");
}

#[test]
fn test_splice_unquote() {
    assert_prints!("(def! lst (list 1 2 3)) `(1 ~@lst 3)", "(1 1 2 3 3)");
    assert_prints!("(def! lst [2 3]) `(~@lst)", "(2 3)");
    assert_prints!("(def! e ()) `(a ~@e b)", "(a b)");
}

#[test]
fn test_quasiquote_vectors() {
    assert_prints!("(def! x 1) `[a ~x]", "[a 1]");
    assert_prints!("(def! xs '(1 2)) `[0 ~@xs]", "[0 1 2]");
    assert_prints!("`[]", "[]");
}

#[test]
fn test_nested_structure() {
    assert_prints!("(def! x 5) `(1 (2 ~x) [3 (4 ~x)])", "(1 (2 5) [3 (4 5)])");
}

#[test]
fn test_quasiquote_returns_list_for_list_template() {
    assert_eval!("(list? `(1 2))", MalVal::True);
    assert_eval!("(vector? `[1 2])", MalVal::True);
}

#[test]
fn test_quasiquoteexpand() {
    assert_prints!("(quasiquoteexpand (a ~b))", "(cons (quote a) (cons b ()))");
    assert_prints!("(quasiquoteexpand (~@xs))", "(concat xs ())");
    assert_prints!("(quasiquoteexpand [1])", "(vec (cons 1 ()))");
}

#[test]
fn test_quasiquote_arity() {
    assert!(matches!(eval_err("(quasiquote)"), Error::ArityError { .. }));
    assert!(matches!(eval_err("(quote 1 2)"), Error::ArityError { .. }));
}

#[test]
fn test_splice_and_unquote_in_list_template() {
    assert_prints!("`(1 ~@(list 2 3) 4)", "(1 2 3 4)");
    assert_prints!("`(1 ~(+ 1 1) 3)", "(1 2 3)");
}

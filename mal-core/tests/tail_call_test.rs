// mal-core - Tail call and recursion limit tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tail positions (if branches, do, let* bodies, closure calls) run in
//! constant Rust stack. Non-tail recursion is bounded by the depth limit.

mod common;

use common::*;
use mal_core::eval::DEFAULT_MAX_EVAL_DEPTH;
use mal_core::{get_eval_depth, get_max_eval_depth, set_max_eval_depth};

#[test]
fn test_tail_recursion_in_if() {
    assert_eval!(
        "(def! sum-to (fn* (n acc) (if (= n 0) acc (sum-to (- n 1) (+ n acc)))))
         (sum-to 100000 0)",
        MalVal::Int(5_000_050_000)
    );
}

#[test]
fn test_tail_recursion_through_do_and_let() {
    assert_eval!(
        "(def! count-down (fn* (n)
           (do 1 (let* (m (- n 1)) (if (> m 0) (count-down m) :done)))))
         (count-down 100000)",
        MalVal::keyword("done")
    );
}

#[test]
fn test_mutual_tail_recursion() {
    assert_eval!(
        "(def! even? (fn* (n) (if (= n 0) true (odd? (- n 1)))))
         (def! odd? (fn* (n) (if (= n 0) false (even? (- n 1)))))
         (even? 100001)",
        MalVal::False
    );
}

#[test]
fn test_tail_call_through_apply_to_closure() {
    // start calls loop in tail position, and loop recurses in tail position.
    assert_eval!(
        "(def! loop (fn* (n) (if (= n 0) :ok (loop (- n 1)))))
         (def! start (fn* (n) (loop n)))
         (start 50000)",
        MalVal::keyword("ok")
    );
}

#[test]
fn test_non_tail_recursion_within_limit() {
    assert_eval!(
        "(def! sum (fn* (n) (if (= n 0) 0 (+ n (sum (- n 1)))))) (sum 1500)",
        MalVal::Int(1_125_750)
    );
}

#[test]
fn test_runaway_recursion_with_default_limit() {
    let env = new_env();
    let err = eval_all_raw("(def! deep (fn* (n) (+ 1 (deep n)))) (deep 0)", &env).unwrap_err();
    assert!(
        matches!(err, Error::StackOverflow(limit) if limit == DEFAULT_MAX_EVAL_DEPTH),
        "got {err}"
    );
    assert_eq!(err.category(), ErrorCategory::Runtime);
}

#[test]
fn test_raised_limit_allows_deeper_recursion() {
    let previous = set_max_eval_depth(10_000);
    let result = print_str("(def! sum (fn* (n) (if (= n 0) 0 (+ n (sum (- n 1)))))) (sum 5000)");
    set_max_eval_depth(previous);
    assert_eq!(result.as_deref(), Ok("12502500"));
}

#[test]
fn test_lowered_limit_reports_stack_overflow() {
    let previous = set_max_eval_depth(1_000);
    let env = new_env();
    let result = eval_all_raw("(def! deep (fn* (n) (+ 1 (deep (+ n 1))))) (deep 0)", &env);
    set_max_eval_depth(previous);
    assert!(matches!(result, Err(Error::StackOverflow(1_000))), "got {result:?}");
}

#[test]
fn test_session_survives_stack_overflow() {
    let env = new_env();
    assert!(eval_all("(def! deep (fn* (n) (+ 1 (deep n)))) (deep 0)", &env).is_err());
    assert_eq!(get_eval_depth(), 0);
    assert_eq!(rep("(+ 1 2)", &env).unwrap().as_deref(), Some("3"));
}

#[test]
fn test_runaway_macro_recursion_reports_error() {
    let env = new_env();
    let result = eval_all_raw(
        "(defmacro! grow (fn* (x) (list '+ 1 (list 'grow x)))) (grow 0)",
        &env,
    );
    assert!(matches!(result, Err(Error::StackOverflow(_))), "got {result:?}");
}

#[test]
fn test_max_depth_setting_round_trips() {
    let previous = set_max_eval_depth(1234);
    assert_eq!(get_max_eval_depth(), 1234);
    set_max_eval_depth(previous);
    assert_eq!(get_max_eval_depth(), previous);
}

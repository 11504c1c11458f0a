// teko-core - Tail call integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tail calls run in constant host stack and constant binding depth.

mod common;

use common::*;
use teko_core::{Error, get_eval_depth, set_max_eval_depth};

#[test]
fn test_countdown_from_one_million() {
    let env = new_env();
    let result = eval_str_with_env(
        "(define count (fn (n) (if (= n 0) n (count (- n 1)))))
         (count 1000000)",
        &env,
    );
    assert_eq!(result.unwrap(), Value::integer(0));
    assert!(!env.is_bound(&Symbol::new("n")));
    assert_eq!(get_eval_depth(), 0);
}

#[test]
fn test_tail_calls_do_not_count_against_depth_limit() {
    let previous = set_max_eval_depth(20);
    let result = eval_str("(define loop (fn (n) (if (= n 0) (' done) (loop (- n 1))))) (loop 5000)");
    let _ = set_max_eval_depth(previous);
    assert_eq!(result.unwrap(), Value::Expression(expr("done")));
}

#[test]
fn test_binding_depth_stays_constant() {
    let env = new_env();
    eval_str_with_env(
        "(define depth-at-end ())
         (define spin (fn (n) (if (= n 0) (set! depth-at-end n) (spin (- n 1)))))",
        &env,
    )
    .unwrap();
    eval_str_with_env("(spin 1000)", &env).unwrap();
    assert_eq!(env.depth(&Symbol::new("n")), 0);
}

#[test]
fn test_mutual_recursion() {
    assert_eval!(
        "(define even (fn (n) (if (= n 0) true (odd (- n 1)))))
         (define odd (fn (n) (if (= n 0) false (even (- n 1)))))
         (list (even 10001) (odd 10001))",
        Value::Expression(expr("(false true)"))
    );
}

#[test]
fn test_accumulator_loop() {
    assert_eval!(
        "(define sum-to (fn (n acc) (if (= n 0) acc (sum-to (- n 1) (+ acc n)))))
         (sum-to 10000 0)",
        Value::integer(50005000)
    );
}

#[test]
fn test_caller_binding_visible_during_tail_call() {
    // The callee runs before the caller has returned, so the caller's
    // other parameters are still in scope.
    assert_eval!(
        "(define show-outer (fn (inner) (list outer inner)))
         (define caller (fn (outer) (show-outer (+ outer 1))))
         (caller 1)",
        Value::Expression(expr("(1 2)"))
    );
}

#[test]
fn test_non_tail_recursion() {
    assert_eval!(
        "(define sum (fn (n) (if (= n 0) 0 (+ n (sum (- n 1)))))) (sum 100)",
        Value::integer(5050)
    );
}

#[test]
fn test_deep_non_tail_recursion_at_default_limit() {
    assert_eval!(
        "(define sum (fn (n) (if (= n 0) 0 (+ n (sum (- n 1)))))) (sum 5000)",
        Value::integer(12_502_500)
    );
}

#[test]
fn test_recursion_past_default_limit_is_an_error() {
    let env = new_env();
    let result = eval_source(
        "(define sum (fn (n) (if (= n 0) 0 (+ n (sum (- n 1)))))) (sum 20000)",
        &env,
    );
    match result {
        Err(Error::EvalError(msg)) => assert!(msg.contains("Stack overflow")),
        other => panic!("expected stack overflow, got {:?}", other),
    }
    assert!(!env.is_bound(&Symbol::new("n")));
    assert_eq!(get_eval_depth(), 0);
}

#[test]
fn test_non_tail_recursion_hits_depth_limit() {
    let previous = set_max_eval_depth(50);
    let env = new_env();
    let result = eval_source(
        "(define sum (fn (n) (if (= n 0) 0 (+ n (sum (- n 1)))))) (sum 100)",
        &env,
    );
    let _ = set_max_eval_depth(previous);
    match result {
        Err(Error::EvalError(msg)) => assert!(msg.contains("Stack overflow")),
        other => panic!("expected stack overflow, got {:?}", other),
    }
    assert!(!env.is_bound(&Symbol::new("n")));
}

#[test]
fn test_tail_call_through_macro_template() {
    assert_eval!(
        "(define again (mo args (pair (' tick) args)))
         (define tick (fn (n) (if (= n 0) (' finished) (again (- n 1)))))
         (tick 20000)",
        Value::Expression(expr("finished"))
    );
}

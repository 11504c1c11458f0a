// teko-core - Property-based tests for binding stacks
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for dynamic binding.
//!
//! Tests the following properties:
//! - push then pop restores the previously visible value
//! - restoring to a mark undoes every push made after it
//! - calls and unwinds leave binding depth unchanged

mod common;

use common::{Env, Symbol, Value, eval_str_with_env, new_env};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating values
// =============================================================================

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]", 1..20)
}

// =============================================================================
// Binding stacks
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Pushing a sequence of bindings and popping them in reverse leaves
    /// each symbol showing its earlier value at every step.
    #[test]
    fn push_pop_is_lifo(names in arb_names()) {
        let env = Env::new();
        let syms: Vec<Symbol> = names.iter().map(|n| Symbol::new(n)).collect();

        let mut visible: Vec<Option<Value>> = Vec::new();
        for (i, sym) in syms.iter().enumerate() {
            visible.push(env.lookup(sym).ok());
            env.push(sym, Value::integer(i as i64));
        }

        for (sym, before) in syms.iter().zip(visible).rev() {
            env.pop(sym).unwrap();
            prop_assert_eq!(env.lookup(sym).ok(), before);
        }
        prop_assert_eq!(env.binding_mark(), 0);
    }

    /// restore_to(mark) pops exactly the pushes made after mark
    #[test]
    fn restore_to_mark(before in arb_names(), after in arb_names()) {
        let env = Env::new();
        for (i, name) in before.iter().enumerate() {
            env.push(&Symbol::new(name), Value::integer(i as i64));
        }
        let mark = env.binding_mark();
        let snapshot: Vec<Option<Value>> = ["a", "b", "c"]
            .iter()
            .map(|n| env.lookup(&Symbol::new(n)).ok())
            .collect();

        for name in &after {
            env.push(&Symbol::new(name), Value::Boolean(true));
        }
        prop_assert_eq!(env.restore_to(mark).unwrap(), after.len());

        let restored: Vec<Option<Value>> = ["a", "b", "c"]
            .iter()
            .map(|n| env.lookup(&Symbol::new(n)).ok())
            .collect();
        prop_assert_eq!(restored, snapshot);
    }
}

// =============================================================================
// Evaluation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Unwinding out of any recursion depth leaves no parameter bound
    #[test]
    fn unwind_releases_all_parameters(depth in 0u32..40, tail in any::<bool>()) {
        let env = new_env();
        let body = if tail {
            "(if (= n 0) (unwind (' done)) (dive (- n 1)))"
        } else {
            "(+ 0 (if (= n 0) (unwind (' done)) (dive (- n 1))))"
        };
        eval_str_with_env(&format!("(define dive (fn (n) {}))", body), &env).unwrap();
        let result = eval_str_with_env(&format!("(wind (dive {}))", depth), &env).unwrap();
        prop_assert_eq!(result, Value::Expression(common::expr("done")));
        prop_assert!(!env.is_bound(&Symbol::new("n")));
        prop_assert_eq!(env.wind_depth(), 0);
    }
}

// teko-core - String integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Strings are built by the `"` macro from atoms and character-code lists.

mod common;

use common::*;

#[test]
fn test_single_word() {
    assert_eval!("(\" Example)", Value::string("Example"));
    assert_eval!("(\"  Example)", Value::string("Example"));
}

#[test]
fn test_words_joined_by_one_space() {
    assert_eval!("(\" Lorem   ipsum dolor)", Value::string("Lorem ipsum dolor"));
}

#[test]
fn test_character_codes() {
    assert_eval!("(\" (32) Lorem (10) ipsum)", Value::string(" Lorem\nipsum"));
    assert_eval!("(\" (40) + 1 2 (41))", Value::string("(+ 1 2)"));
}

#[test]
fn test_arguments_are_not_evaluated() {
    assert_eval!("(\" define x)", Value::string("define x"));
}

#[test]
fn test_invalid_character_code() {
    assert_eval_err!("(\" (foo))");
    assert_eval_err!("(\" (-1))");
}

#[test]
fn test_string_value_displays_as_code() {
    let value = eval_str("(\" (32) a  b)").unwrap();
    assert_eq!(value.to_string(), "(\" (32) a b)");
}

#[test]
fn test_string_round_trips_through_code() {
    assert_eval!(
        "(define s (\" (32) x (40) y)) (= (eval (head (list s))) s)",
        Value::Boolean(true)
    );
}

#[test]
fn test_string_predicate() {
    assert_eval!("(string? (\" x))", Value::Boolean(true));
    assert_eval!("(string? (' x))", Value::Boolean(false));
}

// teko-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, >, <=, >=

use std::cmp::Ordering;

use crate::env::Env;
use crate::error::Result;
use crate::value::Value;

use super::compare_numbers;

// ============================================================================
// Equality
// ============================================================================

pub(crate) fn builtin_eq(args: &[Value], _env: &Env) -> Result<Value> {
    for i in 1..args.len() {
        if args[i - 1] != args[i] {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

// ============================================================================
// Ordering
// ============================================================================

/// Check that every adjacent pair satisfies `accept`.
fn chain(name: &str, args: &[Value], accept: fn(Ordering) -> bool) -> Result<Value> {
    for i in 1..args.len() {
        match compare_numbers(name, &args[i - 1], &args[i])? {
            Some(ord) if accept(ord) => {}
            _ => return Ok(Value::Boolean(false)),
        }
    }
    // A single argument still has to be a number
    if let [only] = args {
        compare_numbers(name, only, only)?;
    }
    Ok(Value::Boolean(true))
}

pub(crate) fn builtin_lt(args: &[Value], _env: &Env) -> Result<Value> {
    chain("<", args, |o| o == Ordering::Less)
}

pub(crate) fn builtin_gt(args: &[Value], _env: &Env) -> Result<Value> {
    chain(">", args, |o| o == Ordering::Greater)
}

pub(crate) fn builtin_le(args: &[Value], _env: &Env) -> Result<Value> {
    chain("<=", args, |o| o != Ordering::Greater)
}

pub(crate) fn builtin_ge(args: &[Value], _env: &Env) -> Result<Value> {
    chain(">=", args, |o| o != Ordering::Less)
}

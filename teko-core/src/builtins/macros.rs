// teko-core - Primitive macros
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Primitive macros: ', quote, eval, and, or
//!
//! These receive their argument forms unevaluated.

use teko_parser::Expr;

use crate::env::Env;
use crate::error::{AritySpec, Result};
use crate::eval::eval;
use crate::value::Value;

use super::check_arity;

/// (' form) - return form unevaluated
pub(crate) fn builtin_quote(args: &[Expr], _env: &Env) -> Result<Value> {
    check_arity("quote", AritySpec::Exact(1), args.len())?;
    Ok(Value::Expression(args[0].clone()))
}

/// (eval form) - evaluate form, then evaluate the code it produced
pub(crate) fn builtin_eval(args: &[Expr], env: &Env) -> Result<Value> {
    check_arity("eval", AritySpec::Exact(1), args.len())?;
    match eval(&args[0], env)? {
        Value::Expression(code) => eval(&code, env),
        other => Ok(other),
    }
}

/// (and forms...) - first false value, or the last value
pub(crate) fn builtin_and(args: &[Expr], env: &Env) -> Result<Value> {
    let mut result = Value::Boolean(true);
    for arg in args {
        result = eval(arg, env)?;
        if !result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(result)
}

/// (or forms...) - first true value, or false
pub(crate) fn builtin_or(args: &[Expr], env: &Env) -> Result<Value> {
    for arg in args {
        let result = eval(arg, env)?;
        if result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(Value::Boolean(false))
}

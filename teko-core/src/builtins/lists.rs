// teko-core - List built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! List operations on code-as-data: head, tail, pair, list, null?
//!
//! Lists are `Expression` values. Anything stored into a list is converted
//! to code first, so the result can be handed straight back to the
//! evaluator as a macro template.

use std::rc::Rc;

use teko_parser::Expr;

use crate::env::Env;
use crate::error::{AritySpec, Error, Result};
use crate::value::Value;

use super::check_arity;

/// The items of a list value; `Null` is the empty list.
fn list_items(name: &str, val: &Value) -> Result<Rc<[Expr]>> {
    match val {
        Value::Null => Ok(Rc::from(Vec::new())),
        Value::Expression(Expr::List(items)) => Ok(Rc::clone(items)),
        other => Err(Error::type_error_in(name, "list", other.type_name())),
    }
}

/// (head list) - first element
pub(crate) fn builtin_head(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("head", AritySpec::Exact(1), args.len())?;
    let items = list_items("head", &args[0])?;
    items
        .first()
        .cloned()
        .map(Value::Expression)
        .ok_or_else(|| Error::EvalError("head: empty list".to_string()))
}

/// (tail list) - everything after the first element
pub(crate) fn builtin_tail(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("tail", AritySpec::Exact(1), args.len())?;
    let items = list_items("tail", &args[0])?;
    match items.split_first() {
        Some((_, rest)) => Ok(Value::Expression(Expr::List(Rc::from(rest)))),
        None => Err(Error::EvalError("tail: empty list".to_string())),
    }
}

/// (pair x list) - prepend x
pub(crate) fn builtin_pair(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("pair", AritySpec::Exact(2), args.len())?;
    let items = list_items("pair", &args[1])?;
    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(args[0].to_expr());
    out.extend(items.iter().cloned());
    Ok(Value::Expression(Expr::list(out)))
}

/// (list & items) - build a list
pub(crate) fn builtin_list(args: &[Value], _env: &Env) -> Result<Value> {
    Ok(Value::Expression(Expr::list(
        args.iter().map(Value::to_expr).collect(),
    )))
}

/// (null? x) - true for the empty list
pub(crate) fn builtin_null_p(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("null?", AritySpec::Exact(1), args.len())?;
    Ok(Value::Boolean(match &args[0] {
        Value::Null => true,
        Value::Expression(e) => e.is_empty_list(),
        _ => false,
    }))
}

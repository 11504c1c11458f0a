// teko-core - Type predicates
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: number?, string?, symbol?, list?, error?, function?,
//! macro?, and logical not.

use teko_parser::Expr;

use crate::env::Env;
use crate::error::{AritySpec, Result};
use crate::value::{BuiltinKind, Value};

use super::check_arity;

fn predicate(name: &str, args: &[Value], test: fn(&Value) -> bool) -> Result<Value> {
    check_arity(name, AritySpec::Exact(1), args.len())?;
    Ok(Value::Boolean(test(&args[0])))
}

pub(crate) fn builtin_not(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("not", args, |v| !v.is_truthy())
}

pub(crate) fn builtin_number_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("number?", args, |v| {
        matches!(v, Value::Number(_) | Value::Float(_))
    })
}

pub(crate) fn builtin_string_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("string?", args, |v| matches!(v, Value::String(_)))
}

pub(crate) fn builtin_symbol_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("symbol?", args, |v| {
        matches!(v, Value::Expression(Expr::Symbol(_)))
    })
}

pub(crate) fn builtin_list_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("list?", args, |v| {
        matches!(v, Value::Null | Value::Expression(Expr::List(_)))
    })
}

pub(crate) fn builtin_error_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("error?", args, |v| matches!(v, Value::Error(_)))
}

pub(crate) fn builtin_function_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("function?", args, |v| match v {
        Value::Function(_) => true,
        Value::Builtin(b) => matches!(b.kind, BuiltinKind::Function(_)),
        _ => false,
    })
}

pub(crate) fn builtin_macro_p(args: &[Value], _env: &Env) -> Result<Value> {
    predicate("macro?", args, |v| match v {
        Value::Macro(_) => true,
        Value::Builtin(b) => matches!(b.kind, BuiltinKind::Macro(_)),
        _ => false,
    })
}

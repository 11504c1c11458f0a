// teko-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: print, write, read-line, read-string, read
//!
//! Output goes to the environment's output sink and input comes from its
//! input source, so hosts and tests can redirect both.

use teko_parser::Parser;

use crate::env::Env;
use crate::error::{AritySpec, Error, Result};
use crate::value::Value;

use super::check_arity;

// ============================================================================
// Output
// ============================================================================

/// (print x) - write x (strings raw) and a space; returns x
pub(crate) fn builtin_print(args: &[Value], env: &Env) -> Result<Value> {
    check_arity("print", AritySpec::Exact(1), args.len())?;
    let text = match &args[0] {
        Value::String(s) => format!("{} ", s),
        other => format!("{} ", other),
    };
    env.write_output(&text)?;
    Ok(args[0].clone())
}

/// (write x) - write the printed form of x and a newline
pub(crate) fn builtin_write(args: &[Value], env: &Env) -> Result<Value> {
    check_arity("write", AritySpec::Exact(1), args.len())?;
    env.write_output(&format!("{}\n", args[0]))?;
    Ok(Value::Null)
}

// ============================================================================
// Input
// ============================================================================

/// Parse the first expression in `source`; `Null` if there is none.
fn parse_first(source: &str) -> Result<Value> {
    match Parser::parse_str(source) {
        Ok(Some(expr)) => Ok(Value::Expression(expr)),
        Ok(None) => Ok(Value::Null),
        Err(e) => Err(Error::EvalError(e.to_string())),
    }
}

/// (read-line) - next line of input as a string, or null at end of input
pub(crate) fn builtin_read_line(args: &[Value], env: &Env) -> Result<Value> {
    check_arity("read-line", AritySpec::Exact(0), args.len())?;
    Ok(env
        .read_input_line()?
        .map_or(Value::Null, Value::string))
}

/// (read-string s) - parse the first expression in s
pub(crate) fn builtin_read_string(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("read-string", AritySpec::Exact(1), args.len())?;
    match &args[0] {
        Value::String(s) => parse_first(s),
        other => Err(Error::type_error_in(
            "read-string",
            "string",
            other.type_name(),
        )),
    }
}

/// (read) - read a line of input and parse it as an expression
pub(crate) fn builtin_read(args: &[Value], env: &Env) -> Result<Value> {
    check_arity("read", AritySpec::Exact(0), args.len())?;
    match env.read_input_line()? {
        Some(line) => parse_first(&line),
        None => Ok(Value::Null),
    }
}

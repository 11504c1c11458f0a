// teko-core - Error values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error values: error, error-payload
//!
//! An error is ordinary data wrapping any payload. Caught faults arrive as
//! errors whose payload is the message string.

use crate::env::Env;
use crate::error::{AritySpec, Error, Result};
use crate::value::Value;

use super::check_arity;

/// (error payload) - wrap a payload as an error value
pub(crate) fn builtin_error(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("error", AritySpec::Exact(1), args.len())?;
    Ok(Value::error(args[0].clone()))
}

/// (error-payload err) - unwrap an error value
pub(crate) fn builtin_error_payload(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("error-payload", AritySpec::Exact(1), args.len())?;
    match &args[0] {
        Value::Error(payload) => Ok((**payload).clone()),
        other => Err(Error::type_error_in(
            "error-payload",
            "error",
            other.type_name(),
        )),
    }
}

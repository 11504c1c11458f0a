// teko-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The primitive library: functions and macros bound in a fresh environment.

mod arithmetic;
mod comparison;
mod errors;
mod io;
mod lists;
mod macros;
mod predicates;
mod strings;

use std::cmp::Ordering;

use crate::env::Env;
use crate::error::{AritySpec, Error, Result};
use crate::value::Value;

use arithmetic::{
    builtin_add, builtin_div, builtin_imag_part, builtin_mul, builtin_real_part, builtin_sub,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use errors::{builtin_error, builtin_error_payload};
use io::{builtin_print, builtin_read, builtin_read_line, builtin_read_string, builtin_write};
use lists::{builtin_head, builtin_list, builtin_null_p, builtin_pair, builtin_tail};
use macros::{builtin_and, builtin_eval, builtin_or, builtin_quote};
use predicates::{
    builtin_error_p, builtin_function_p, builtin_list_p, builtin_macro_p, builtin_not,
    builtin_number_p, builtin_string_p, builtin_symbol_p,
};
use strings::builtin_string;

/// Register all built-in functions and macros in the environment.
///
/// Each primitive is an ordinary mutable binding made with [`Env::create`],
/// so registering into an environment that already binds one of the names
/// fails with `DuplicateDefinition`.
pub fn register_builtins(env: &Env) -> Result<()> {
    // Macros
    env.define_native_macro("'", builtin_quote)?;
    env.define_native_macro("quote", builtin_quote)?;
    env.define_native_macro("\"", builtin_string)?;
    env.define_native_macro("eval", builtin_eval)?;
    env.define_native_macro("and", builtin_and)?;
    env.define_native_macro("or", builtin_or)?;

    // Arithmetic
    env.define_native("+", builtin_add)?;
    env.define_native("-", builtin_sub)?;
    env.define_native("*", builtin_mul)?;
    env.define_native("/", builtin_div)?;
    env.define_native("real-part", builtin_real_part)?;
    env.define_native("imag-part", builtin_imag_part)?;

    // Comparison
    env.define_native("=", builtin_eq)?;
    env.define_native("<", builtin_lt)?;
    env.define_native(">", builtin_gt)?;
    env.define_native("<=", builtin_le)?;
    env.define_native(">=", builtin_ge)?;
    env.define_native("not", builtin_not)?;

    // Lists
    env.define_native("head", builtin_head)?;
    env.define_native("tail", builtin_tail)?;
    env.define_native("pair", builtin_pair)?;
    env.define_native("list", builtin_list)?;
    env.define_native("null?", builtin_null_p)?;

    // Type predicates
    env.define_native("number?", builtin_number_p)?;
    env.define_native("string?", builtin_string_p)?;
    env.define_native("symbol?", builtin_symbol_p)?;
    env.define_native("list?", builtin_list_p)?;
    env.define_native("error?", builtin_error_p)?;
    env.define_native("function?", builtin_function_p)?;
    env.define_native("macro?", builtin_macro_p)?;

    // Errors
    env.define_native("error", builtin_error)?;
    env.define_native("error-payload", builtin_error_payload)?;

    // I/O
    env.define_native("print", builtin_print)?;
    env.define_native("write", builtin_write)?;
    env.define_native("read-line", builtin_read_line)?;
    env.define_native("read-string", builtin_read_string)?;
    env.define_native("read", builtin_read)?;
    Ok(())
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Check an argument count against `spec`.
pub(crate) fn check_arity(name: &str, spec: AritySpec, got: usize) -> Result<()> {
    if spec.accepts(got) {
        Ok(())
    } else {
        Err(Error::arity_spec(name, spec, got))
    }
}

/// Order two real numbers, exact or not.
///
/// Returns `Ok(None)` when the values are unordered (a NaN is involved).
pub(crate) fn compare_numbers(name: &str, a: &Value, b: &Value) -> Result<Option<Ordering>> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .real_cmp(y)
            .map(Some)
            .ok_or_else(|| Error::type_error_in(name, "real number", "complex number")),
        _ => Ok(to_real(name, a)?.partial_cmp(&to_real(name, b)?)),
    }
}

/// Convert a real number to `f64`.
pub(crate) fn to_real(name: &str, val: &Value) -> Result<f64> {
    match val {
        Value::Float(x) => Ok(*x),
        Value::Number(n) => n
            .to_f64()
            .ok_or_else(|| Error::type_error_in(name, "real number", "complex number")),
        other => Err(Error::type_error_in(name, "number", other.type_name())),
    }
}

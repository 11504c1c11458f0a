// teko-core - Winding and unwinding
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `wind` and `unwind`: Teko's catch and throw.
//!
//! `(wind body...)` evaluates its body like any sequence. `(unwind payload)`
//! evaluates the payload and returns `Err(Error::Unwound(payload))`, which
//! every pending evaluation propagates with `?`, dropping its binding frame
//! on the way. The nearest `wind` turns it back into a value.
//!
//! Faults raised by the evaluator or by primitives inside a `wind` are
//! caught the same way and arrive as `(error "message")` values.

use teko_parser::Expr;
use tracing::debug;

use crate::env::Env;
use crate::error::{Error, Result};
use crate::value::Value;

use super::{eval, eval_sequence};

/// Holds a wind frame open; leaves it on drop.
struct WindGuard<'a> {
    env: &'a Env,
    mark: usize,
}

impl<'a> WindGuard<'a> {
    fn enter(env: &'a Env) -> Self {
        let mark = env.enter_wind();
        WindGuard { env, mark }
    }
}

impl Drop for WindGuard<'_> {
    fn drop(&mut self) {
        self.env.exit_wind();
    }
}

/// (wind body...) - evaluate body, catching any unwind from within it
pub(crate) fn eval_wind(body: &[Expr], env: &Env) -> Result<Value> {
    let guard = WindGuard::enter(env);
    debug!(depth = env.wind_depth(), mark = guard.mark, "entering wind");

    let caught = match eval_sequence(body, env) {
        Ok(value) => {
            debug!(depth = env.wind_depth(), "leaving wind");
            return Ok(value);
        }
        Err(Error::Unwound(payload)) => payload,
        Err(e) if e.is_catchable() => Value::error(Value::string(e.to_string())),
        Err(e) => return Err(e),
    };

    let popped = env.restore_to(guard.mark)?;
    debug!(
        depth = env.wind_depth(),
        mark = guard.mark,
        popped,
        payload = %caught,
        "caught unwind"
    );
    Ok(caught)
}

/// (unwind payload) - transfer `payload` to the nearest enclosing wind
pub(crate) fn eval_unwind(args: &[Expr], env: &Env) -> Result<Value> {
    let [payload] = args else {
        return Err(Error::syntax("unwind", "requires exactly 1 argument"));
    };
    let payload = eval(payload, env)?;
    if env.wind_depth() == 0 {
        Err(Error::UnhandledUnwind(payload))
    } else {
        Err(Error::Unwound(payload))
    }
}

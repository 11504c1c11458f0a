// teko-core - Function and macro application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Calling functions and macros.
//!
//! A function call evaluates its arguments in the caller's environment,
//! binds them to the parameters and hands the final body form back to the
//! evaluator loop. A macro call binds the raw argument list to its single
//! parameter, evaluates its body to produce a template, releases the
//! parameter, and hands the template back to be evaluated where the macro
//! was called.

use teko_parser::Expr;

use crate::bindings::BindingFrame;
use crate::env::Env;
use crate::error::{AritySpec, Error, Result};
use crate::value::{BuiltinKind, Closure, MacroClosure, Value};

use super::{eval, eval_sequence};

/// What the evaluator loop should do after a call.
pub enum Step {
    /// The call produced its value.
    Done(Value),
    /// The call's value is the value of this expression.
    Continue(Expr),
}

/// Invoke `callee` on unevaluated `args`.
///
/// Parameters of a user function are bound in `frame`, which belongs to the
/// evaluator invocation that will evaluate the returned expression.
pub fn call(
    callee: &Value,
    args: &[Expr],
    env: &Env,
    frame: &mut BindingFrame<'_>,
) -> Result<Step> {
    match callee {
        Value::Function(closure) => call_closure(closure, args, env, frame),
        Value::Macro(mac) => {
            let template = expand(mac, args, env)?;
            Ok(match template {
                Value::Expression(expr) => Step::Continue(expr),
                other => Step::Done(other),
            })
        }
        Value::Builtin(builtin) => match builtin.kind {
            BuiltinKind::Function(f) => {
                let values = eval_args(args, env)?;
                f(&values, env).map(Step::Done)
            }
            BuiltinKind::Macro(m) => m(args, env).map(Step::Done),
        },
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// Evaluate argument forms left to right.
pub(crate) fn eval_args(args: &[Expr], env: &Env) -> Result<Vec<Value>> {
    args.iter().map(|arg| eval(arg, env)).collect()
}

fn call_closure(
    closure: &Closure,
    args: &[Expr],
    env: &Env,
    frame: &mut BindingFrame<'_>,
) -> Result<Step> {
    let values = eval_args(args, env)?;
    if closure.params.len() != values.len() {
        return Err(Error::ArityMismatch {
            expected: AritySpec::Exact(closure.params.len()),
            got: values.len(),
            name: None,
        });
    }
    frame.rebind(&closure.params, values)?;

    match closure.body.split_last() {
        Some((last, init)) => {
            eval_sequence(init, env)?;
            Ok(Step::Continue(last.clone()))
        }
        None => Ok(Step::Done(Value::Null)),
    }
}

/// Run a macro body with its parameter bound to the raw argument list.
///
/// The parameter is released before the template is evaluated.
pub fn expand(mac: &MacroClosure, args: &[Expr], env: &Env) -> Result<Value> {
    let mut frame = BindingFrame::new(env);
    frame.bind(&mac.param, Value::Expression(Expr::list(args.to_vec())));
    eval_sequence(&mac.body, env)
}

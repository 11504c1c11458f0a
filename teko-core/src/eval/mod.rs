// teko-core - Iterative evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Evaluator for Teko expressions.
//!
//! `eval` is a loop over the current expression. Whenever the value of the
//! current expression is the value of some other expression (the chosen
//! branch of an `if`, the last form of a function body, the template a macro
//! expands to) the loop replaces its expression and goes round again instead
//! of recursing. Parameters bound along the way are held by a
//! [`BindingFrame`] owned by this invocation and released when it returns.
//!
//! Only genuinely nested evaluations (arguments, tests, non-final body
//! forms) recurse, and those are counted against a configurable depth limit.

pub mod apply;
pub mod wind;

use std::cell::Cell;
use std::rc::Rc;

use teko_parser::{Expr, Parser, Symbol};

use crate::bindings::BindingFrame;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Closure, MacroClosure, Value};

use apply::{Step, call};
use wind::{eval_unwind, eval_wind};

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum recursion depth for eval. Can be configured via `set_max_eval_depth`.
const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
///
/// Tail calls never count against this limit.
#[inline]
#[must_use]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard to manage eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            (current + 1, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::EvalError(format!(
                "Stack overflow: maximum recursion depth ({}) exceeded",
                max
            )))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Evaluate a program: each expression in order against the same
/// environment, returning the value of the last one (`Null` if empty).
///
/// An `unwind` that escapes every `wind` ends the program with
/// [`Error::UnhandledUnwind`].
///
/// # Examples
///
/// ```
/// use teko_core::{Env, Value, interpret, register_builtins};
/// use teko_parser::Parser;
///
/// let env = Env::new();
/// register_builtins(&env).unwrap();
///
/// let program = Parser::parse_all_str("(define x 20) (+ x 22)").unwrap();
/// assert_eq!(interpret(&program, &env).unwrap(), Value::integer(42));
/// ```
pub fn interpret(program: &[Expr], env: &Env) -> Result<Value> {
    let mut result = Value::Null;
    for expr in program {
        result = match eval(expr, env) {
            Ok(value) => value,
            Err(Error::Unwound(payload)) => return Err(Error::UnhandledUnwind(payload)),
            Err(e) => return Err(e),
        };
    }
    Ok(result)
}

/// Parse `source` and interpret every expression in it.
pub fn eval_source(source: &str, env: &Env) -> Result<Value> {
    let program = Parser::parse_all_str(source).map_err(|e| Error::EvalError(e.to_string()))?;
    interpret(&program, env)
}

/// Evaluate a single expression.
///
/// # Errors
///
/// Returns an error if:
/// - A symbol is unbound
/// - A function is called with the wrong number of arguments
/// - An `unwind` is in flight (`Error::Unwound`) or has no `wind` to reach
/// - Stack overflow occurs (configurable via [`set_max_eval_depth`])
#[must_use = "eval returns a value that should be used"]
pub fn eval(expr: &Expr, env: &Env) -> Result<Value> {
    ensure_sufficient_stack(|| eval_loop(expr, env))
}

fn eval_loop(expr: &Expr, env: &Env) -> Result<Value> {
    // Check recursion depth before growing any further
    let _guard = EvalDepthGuard::new()?;
    let mut frame = BindingFrame::new(env);
    let mut expr = expr.clone();

    loop {
        let items = match &expr {
            Expr::Symbol(sym) => return env.lookup(sym),
            Expr::List(items) => Rc::clone(items),
        };

        let Some(head) = items.first() else {
            return Ok(Value::Null);
        };
        let args = &items[1..];

        // Special forms
        if let Expr::Symbol(sym) = head {
            match sym.name() {
                "define" => return eval_define(args, env),
                "set!" => return eval_set(args, env),
                "fn" => return eval_fn(args),
                "mo" => return eval_mo(args),
                "wind" => return eval_wind(args, env),
                "unwind" => return eval_unwind(args, env),
                "if" => {
                    expr = eval_if(args, env)?;
                    continue;
                }
                _ => {}
            }
        }

        let callee = eval(head, env)?;
        match call(&callee, args, env, &mut frame)? {
            Step::Done(value) => return Ok(value),
            Step::Continue(next) => expr = next,
        }
    }
}

/// Evaluate forms in order for their effects, returning the last value.
pub(crate) fn eval_sequence(forms: &[Expr], env: &Env) -> Result<Value> {
    let mut result = Value::Null;
    for form in forms {
        result = eval(form, env)?;
    }
    Ok(result)
}

// ============================================================================
// Special Forms
// ============================================================================

fn target_symbol(form: &'static str, expr: &Expr) -> Result<Symbol> {
    expr.as_symbol()
        .cloned()
        .ok_or_else(|| Error::syntax(form, format!("expected a symbol, got {}", expr)))
}

/// (define sym expr) - create a new binding
fn eval_define(args: &[Expr], env: &Env) -> Result<Value> {
    let [target, value] = args else {
        return Err(Error::syntax("define", "requires a symbol and a value"));
    };
    let sym = target_symbol("define", target)?;
    let value = eval(value, env)?;
    env.create(&sym, value.clone(), false)?;
    Ok(value)
}

/// (set! sym expr) - replace the visible binding
fn eval_set(args: &[Expr], env: &Env) -> Result<Value> {
    let [target, value] = args else {
        return Err(Error::syntax("set!", "requires a symbol and a value"));
    };
    let sym = target_symbol("set!", target)?;
    let value = eval(value, env)?;
    env.mutate(&sym, value.clone())?;
    Ok(value)
}

/// (fn (params...) body...) - function value
fn eval_fn(args: &[Expr]) -> Result<Value> {
    let Some((params, body)) = args.split_first() else {
        return Err(Error::syntax("fn", "requires a parameter list"));
    };
    let params = params
        .as_list()
        .ok_or_else(|| Error::syntax("fn", format!("parameters must be a list, got {}", params)))?
        .iter()
        .map(|p| target_symbol("fn", p))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Function(Rc::new(Closure {
        params: params.into(),
        body: body.into(),
    })))
}

/// (mo param body...) - macro value
fn eval_mo(args: &[Expr]) -> Result<Value> {
    let Some((param, body)) = args.split_first() else {
        return Err(Error::syntax("mo", "requires a parameter"));
    };
    let param = target_symbol("mo", param)?;
    Ok(Value::Macro(Rc::new(MacroClosure {
        param,
        body: body.into(),
    })))
}

/// (if test then else?) - choose the branch to evaluate next
fn eval_if(args: &[Expr], env: &Env) -> Result<Expr> {
    if args.len() < 2 || args.len() > 3 {
        return Err(Error::syntax("if", "requires 2 or 3 arguments"));
    }

    let test = eval(&args[0], env)?;

    if test.is_truthy() {
        Ok(args[1].clone())
    } else if args.len() == 3 {
        Ok(args[2].clone())
    } else {
        Ok(Expr::empty_list())
    }
}

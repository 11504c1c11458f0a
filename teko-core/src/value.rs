// teko-core - Runtime values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime values produced by evaluation.
//!
//! Functions and macros hold only their parameter names and body forms.
//! Free variables in a body resolve against whatever bindings are live when
//! the body runs, so there is nothing to capture.

use std::fmt;
use std::rc::Rc;

use teko_parser::{Expr, Symbol};

use crate::env::Env;
use crate::error::Result;
use crate::number::Number;

/// A primitive function: receives evaluated arguments.
pub type NativeFn = fn(&[Value], &Env) -> Result<Value>;

/// A primitive macro: receives the raw argument forms and the caller's
/// environment, and evaluates whatever it needs itself.
pub type NativeMacro = fn(&[Expr], &Env) -> Result<Value>;

/// A user-defined function created by `fn`.
#[derive(Debug)]
pub struct Closure {
    pub params: Rc<[Symbol]>,
    pub body: Rc<[Expr]>,
}

/// A user-defined macro created by `mo`.
#[derive(Debug)]
pub struct MacroClosure {
    pub param: Symbol,
    pub body: Rc<[Expr]>,
}

#[derive(Clone, Copy)]
pub enum BuiltinKind {
    Function(NativeFn),
    Macro(NativeMacro),
}

/// A primitive supplied by the host.
pub struct Builtin {
    pub name: &'static str,
    pub kind: BuiltinKind,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            BuiltinKind::Function(_) => "function",
            BuiltinKind::Macro(_) => "macro",
        };
        write!(f, "Builtin({} {})", kind, self.name)
    }
}

/// The result of evaluating an expression.
#[derive(Clone)]
pub enum Value {
    /// Exact Gaussian rational
    Number(Number),
    /// Inexact real; only `pi` and arithmetic involving it produce these
    Float(f64),
    Boolean(bool),
    Null,
    /// Text built by the `"` macro
    String(Rc<str>),
    /// An error value wrapping an arbitrary payload
    Error(Rc<Value>),
    Function(Rc<Closure>),
    Macro(Rc<MacroClosure>),
    Builtin(Rc<Builtin>),
    /// Code as data: a quoted or constructed expression
    Expression(Expr),
}

impl Value {
    pub fn integer(n: i64) -> Self {
        Value::Number(Number::from_integer(n))
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn error(payload: Value) -> Self {
        Value::Error(Rc::new(payload))
    }

    pub fn function(name: &'static str, f: NativeFn) -> Self {
        Value::Builtin(Rc::new(Builtin {
            name,
            kind: BuiltinKind::Function(f),
        }))
    }

    pub fn native_macro(name: &'static str, f: NativeMacro) -> Self {
        Value::Builtin(Rc::new(Builtin {
            name,
            kind: BuiltinKind::Macro(f),
        }))
    }

    /// Everything except `false` is true.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    /// Name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) | Value::Float(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Error(_) => "error",
            Value::Function(_) => "function",
            Value::Macro(_) => "macro",
            Value::Builtin(b) => match b.kind {
                BuiltinKind::Function(_) => "function",
                BuiltinKind::Macro(_) => "macro",
            },
            Value::Expression(Expr::Symbol(_)) => "symbol",
            Value::Expression(Expr::List(_)) => "list",
        }
    }

    /// Convert this value into code.
    ///
    /// The result, when evaluated, reproduces an equal value for numbers,
    /// booleans, null, strings and errors. Expressions are returned as-is so
    /// that templates built with list primitives splice code directly.
    pub fn to_expr(&self) -> Expr {
        match self {
            Value::Number(n) => Expr::symbol(&n.to_string()),
            Value::Float(x) => Expr::symbol(&format_float(*x)),
            Value::Boolean(true) => Expr::symbol("true"),
            Value::Boolean(false) => Expr::symbol("false"),
            Value::Null => Expr::empty_list(),
            Value::String(s) => string_to_expr(s),
            Value::Error(payload) => Expr::list(vec![Expr::symbol("error"), payload.to_expr()]),
            Value::Function(c) => {
                let mut items = vec![
                    Expr::symbol("fn"),
                    Expr::list(c.params.iter().cloned().map(Expr::Symbol).collect()),
                ];
                items.extend(c.body.iter().cloned());
                Expr::list(items)
            }
            Value::Macro(m) => {
                let mut items = vec![Expr::symbol("mo"), Expr::Symbol(m.param.clone())];
                items.extend(m.body.iter().cloned());
                Expr::list(items)
            }
            Value::Builtin(b) => Expr::symbol(b.name),
            Value::Expression(e) => e.clone(),
        }
    }
}

fn format_float(x: f64) -> String {
    if x.fract() == 0.0 && x.is_finite() {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Whether `c` may appear inside an atom.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')'
}

/// Encode text as a `(" ...)` form.
///
/// Words become atoms. A single space between two words is implied by the
/// string macro's joining rule; every other space, whitespace character or
/// parenthesis becomes a character-code sub-list.
fn string_to_expr(s: &str) -> Expr {
    let mut items = vec![Expr::symbol("\"")];
    let mut word = String::new();
    let mut last_was_word = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if is_word_char(c) {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            items.push(Expr::symbol(&word));
            word.clear();
            last_was_word = true;
        }
        let implied_space =
            c == ' ' && last_was_word && chars.peek().is_some_and(|&next| is_word_char(next));
        if !implied_space {
            items.push(Expr::list(vec![Expr::symbol(&(c as u32).to_string())]));
            last_was_word = false;
        }
    }
    if !word.is_empty() {
        items.push(Expr::symbol(&word));
    }
    Expr::list(items)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Number(a), Value::Float(b)) | (Value::Float(b), Value::Number(a)) => {
                a.to_f64() == Some(*b)
            }
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Macro(a), Value::Macro(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            (Value::Expression(a), Value::Expression(b)) => a == b,
            // The empty list and null are the same thing
            (Value::Null, Value::Expression(e)) | (Value::Expression(e), Value::Null) => {
                e.is_empty_list()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "()"),
            Value::Builtin(b) => write!(f, "{}", b.name),
            Value::Expression(e) => write!(f, "{}", e),
            Value::String(_) | Value::Error(_) | Value::Function(_) | Value::Macro(_) => {
                write!(f, "{}", self.to_expr())
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Builtin(b) => write!(f, "{:?}", b),
            _ => write!(f, "{}({})", self.type_name(), self),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Expr> for Value {
    fn from(e: Expr) -> Self {
        Value::Expression(e)
    }
}

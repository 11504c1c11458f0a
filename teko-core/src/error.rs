// teko-core - Error types for the Teko evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Teko evaluation.
//!
//! Besides genuine faults this enum carries the in-flight `unwind` transfer
//! (`Error::Unwound`), so every `?` between an `unwind` and its `wind` is a
//! propagation step that drops binding guards on the way out.

use std::fmt;

use teko_parser::Symbol;

use crate::value::Value;

/// Result type for Teko evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone)]
pub enum Error {
    /// `define` on a symbol that already has a binding
    DuplicateDefinition(Symbol),
    /// Lookup or `set!` of a symbol with no binding
    UnboundVariable(Symbol),
    /// `set!` on an immutable cell
    ImmutableBinding(Symbol),
    /// Wrong number of arguments to a function
    ArityMismatch {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Type error - wrong type for an operation
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Attempted to call something that isn't callable
    NotCallable(String),
    /// Division by exact zero
    DivisionByZero,
    /// Invalid special form syntax
    InvalidSyntax { form: &'static str, message: String },
    /// A non-local transfer looking for the nearest `wind`
    Unwound(Value),
    /// `unwind` fired with no active `wind`
    UnhandledUnwind(Value),
    /// Failure of an input or output primitive
    Io(String),
    /// General evaluation error
    EvalError(String),
    /// Internal error - invariant violation
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl AritySpec {
    /// Check whether `n` arguments satisfy this arity.
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            AritySpec::Exact(e) => n == *e,
            AritySpec::AtLeast(min) => n >= *min,
        }
    }
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateDefinition(sym) => {
                write!(f, "Symbol already defined: {}", sym)
            }
            Error::UnboundVariable(sym) => {
                write!(f, "Unbound variable: {}", sym)
            }
            Error::ImmutableBinding(sym) => {
                write!(f, "Cannot mutate immutable binding: {}", sym)
            }
            Error::ArityMismatch {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::TypeError {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::NotCallable(val) => {
                write!(f, "Cannot call value: {}", val)
            }
            Error::DivisionByZero => {
                write!(f, "Division by zero")
            }
            Error::InvalidSyntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            Error::Unwound(val) => {
                write!(f, "unwind outside of wind: {}", val)
            }
            Error::UnhandledUnwind(val) => {
                write!(f, "Unhandled unwind: {}", val)
            }
            Error::Io(msg) => {
                write!(f, "I/O error: {}", msg)
            }
            Error::EvalError(msg) => {
                write!(f, "{}", msg)
            }
            Error::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl Error {
    /// Create an arity error against an arbitrary spec, naming the callee.
    pub fn arity_spec(name: impl Into<String>, expected: AritySpec, got: usize) -> Self {
        Error::ArityMismatch {
            expected,
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// Whether an enclosing `wind` may intercept this error.
    ///
    /// Everything except an already-unhandled unwind and broken invariants
    /// is recoverable from inside the language.
    pub fn is_catchable(&self) -> bool {
        !matches!(self, Error::UnhandledUnwind(_) | Error::Internal(_))
    }
}

// teko-core - Runtime and evaluator for the Teko programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # teko-core
//!
//! Runtime and evaluator for the Teko programming language: a dynamically
//! scoped language of atoms and lists with exact Gaussian-rational numbers,
//! mandatory tail calls and `wind`/`unwind` non-local exits.

pub mod bindings;
pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod number;
mod stack;
pub mod value;

pub use bindings::BindingFrame;
pub use builtins::register_builtins;
pub use env::Env;
pub use error::{AritySpec, Error, Result};
pub use eval::{
    eval, eval_source, get_eval_depth, get_max_eval_depth, interpret, set_max_eval_depth,
};
pub use number::Number;
pub use value::{Builtin, BuiltinKind, Closure, MacroClosure, Value};

// Re-export parser types for convenience
pub use teko_parser::{Expr, Parser, Symbol};

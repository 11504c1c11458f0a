// teko-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for Teko integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate a program in a fresh environment with builtins
//! - [`eval_str_with_env`] - Evaluate a program in an existing environment
//! - [`eval_err`] - Evaluate a program that must fail, returning the error
//! - [`eval_all`] - Evaluate several programs in one environment
//! - [`new_env`] - Create a new environment with builtins registered
//! - [`capture_output`] - Redirect an environment's output into a buffer
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

// Re-export common types for convenience
pub use teko_core::builtins::register_builtins;
pub use teko_core::env::Env;
pub use teko_core::error::Error;
pub use teko_core::eval::eval_source;
pub use teko_core::value::Value;
#[allow(unused_imports)]
pub use teko_parser::{Expr, Parser, Symbol};

/// Evaluate a Teko program in a fresh environment.
///
/// # Returns
///
/// Returns the value of the last expression, or an error message string.
#[must_use]
pub fn eval_str(s: &str) -> Result<Value, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate a Teko program in the given environment.
///
/// # Returns
///
/// Returns the value of the last expression, or an error message string.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<Value, String> {
    eval_source(s, env).map_err(|e| e.to_string())
}

/// Evaluate a program that is expected to fail and return the error.
///
/// # Panics
///
/// Panics if evaluation succeeds.
#[must_use]
pub fn eval_err(s: &str) -> Error {
    match eval_source(s, &new_env()) {
        Ok(v) => panic!("Expected error for '{}' but got {}", s, v),
        Err(e) => e,
    }
}

/// Evaluate several program fragments in one environment, returning the
/// value of the last.
#[must_use]
pub fn eval_all(strs: &[&str], env: &Env) -> Result<Value, String> {
    let mut result = Value::Null;
    for s in strs {
        result = eval_str_with_env(s, env)?;
    }
    Ok(result)
}

/// Create a new environment with builtins registered.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env).expect("fresh environment accepts builtins");
    env
}

/// Parse a single expression, for building expected values.
#[must_use]
pub fn expr(s: &str) -> Expr {
    Parser::parse_str(s)
        .expect("valid test expression")
        .expect("non-empty test expression")
}

/// An output sink whose contents tests can read back.
#[derive(Clone, Default)]
pub struct OutputBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl OutputBuffer {
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Redirect `env`'s output into a buffer and return the buffer.
#[must_use]
pub fn capture_output(env: &Env) -> OutputBuffer {
    let buffer = OutputBuffer::default();
    env.set_output(Box::new(buffer.clone()));
    buffer
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", Value::integer(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(+ 1 (' x))");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

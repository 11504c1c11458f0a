// teko-core - Binding frame management
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! RAII frames for parameter bindings.
//!
//! A `BindingFrame` owns the bindings one evaluation has pushed and pops
//! them when dropped, so bindings are released on every exit path: normal
//! return, error, and `unwind` alike.

use teko_parser::Symbol;
use tracing::{trace, warn};

use crate::env::Env;
use crate::error::Result;
use crate::value::Value;

/// Bindings pushed by one evaluation, popped newest-first on drop.
pub struct BindingFrame<'a> {
    env: &'a Env,
    symbols: Vec<Symbol>,
}

impl<'a> BindingFrame<'a> {
    pub fn new(env: &'a Env) -> Self {
        BindingFrame {
            env,
            symbols: Vec::new(),
        }
    }

    /// Push a binding owned by this frame.
    pub fn bind(&mut self, sym: &Symbol, value: Value) {
        self.env.push(sym, value);
        self.symbols.push(sym.clone());
    }

    /// Bind parameters for a tail call.
    ///
    /// Any binding this frame already holds for one of `params` is popped
    /// before the new one is pushed. The popped binding belongs to a call
    /// whose body has nothing left to evaluate, so it can never be seen
    /// again, and a self-recursive loop keeps a constant number of cells.
    pub fn rebind(&mut self, params: &[Symbol], args: Vec<Value>) -> Result<()> {
        let mut released = 0;
        for param in params {
            if let Some(pos) = self.symbols.iter().rposition(|s| s == param) {
                self.symbols.remove(pos);
                self.env.pop(param)?;
                released += 1;
            }
        }
        for (param, arg) in params.iter().zip(args) {
            self.bind(param, arg);
        }
        trace!(
            released,
            held = self.symbols.len(),
            "rebound parameters for tail call"
        );
        Ok(())
    }

    /// Number of bindings currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Drop for BindingFrame<'_> {
    fn drop(&mut self) {
        while let Some(sym) = self.symbols.pop() {
            if let Err(e) = self.env.pop(&sym) {
                warn!(symbol = %sym, error = %e, "unbalanced binding stack");
            }
        }
    }
}

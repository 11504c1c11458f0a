// teko-core - Environment of per-symbol binding stacks
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with dynamic scoping.
//!
//! There is exactly one table per interpreter run. Each symbol maps to a
//! stack of cells; the top cell is the visible binding. Function calls push
//! their parameters and pop them on return, so a free variable in a body
//! resolves to whatever the current call chain last bound.
//!
//! Every `push` is also recorded on a trail. A `wind` remembers the trail
//! length at entry, and restoring to that mark pops every binding pushed
//! since, whichever symbols they belong to.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use teko_parser::Symbol;

use crate::error::{Error, Result};
use crate::number::Number;
use crate::value::{NativeFn, NativeMacro, Value};

/// The shared dynamic environment.
///
/// Cloning an `Env` yields another handle to the same table.
///
/// # Examples
///
/// ```
/// use teko_core::{Env, Value};
/// use teko_parser::Symbol;
///
/// let env = Env::new();
/// let x = Symbol::new("x");
///
/// env.create(&x, Value::integer(1), false).unwrap();
/// env.push(&x, Value::integer(2));
/// assert_eq!(env.lookup(&x).unwrap(), Value::integer(2));
///
/// env.pop(&x).unwrap();
/// assert_eq!(env.lookup(&x).unwrap(), Value::integer(1));
/// ```
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct Cell {
    value: Value,
    immutable: bool,
}

struct EnvInner {
    bindings: HashMap<Symbol, Vec<Cell>>,
    /// Symbols in the order their bindings were pushed
    trail: Vec<Symbol>,
    /// Number of active `wind` forms
    winds: usize,
    output: Box<dyn Write>,
    input: Box<dyn BufRead>,
}

impl Env {
    /// Create a new environment seeded with `true`, `false` and `pi`.
    pub fn new() -> Self {
        let env = Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                trail: Vec::new(),
                winds: 0,
                output: Box::new(io::stdout()),
                input: Box::new(io::BufReader::new(io::stdin())),
            })),
        };
        env.install(Symbol::new("true"), Value::Boolean(true), true);
        env.install(Symbol::new("false"), Value::Boolean(false), true);
        env.install(Symbol::new("pi"), Value::Float(std::f64::consts::PI), false);
        env
    }

    fn install(&self, sym: Symbol, value: Value, immutable: bool) {
        self.inner
            .borrow_mut()
            .bindings
            .insert(sym, vec![Cell { value, immutable }]);
    }

    /// Bind a primitive function under `name`.
    pub fn define_native(&self, name: &'static str, f: NativeFn) -> Result<()> {
        self.create(&Symbol::new(name), Value::function(name, f), false)
    }

    /// Bind a primitive macro under `name`.
    pub fn define_native_macro(&self, name: &'static str, f: NativeMacro) -> Result<()> {
        self.create(&Symbol::new(name), Value::native_macro(name, f), false)
    }

    // ========================================================================
    // Binding stacks
    // ========================================================================

    /// Install a fresh one-element stack for `sym`.
    ///
    /// Fails with `DuplicateDefinition` if `sym` is already bound, including
    /// numeric literals, which are bound from the start.
    pub fn create(&self, sym: &Symbol, value: Value, immutable: bool) -> Result<()> {
        if self.is_bound(sym) || Number::parse(sym.name()).is_some() {
            return Err(Error::DuplicateDefinition(sym.clone()));
        }
        self.install(sym.clone(), value, immutable);
        Ok(())
    }

    /// Replace the value of the top cell for `sym`.
    pub fn mutate(&self, sym: &Symbol, value: Value) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        match inner.bindings.get_mut(sym).and_then(|stack| stack.last_mut()) {
            Some(cell) if cell.immutable => Err(Error::ImmutableBinding(sym.clone())),
            Some(cell) => {
                cell.value = value;
                Ok(())
            }
            None if Number::parse(sym.name()).is_some() => {
                Err(Error::ImmutableBinding(sym.clone()))
            }
            None => Err(Error::UnboundVariable(sym.clone())),
        }
    }

    /// Push a new top cell for `sym`. Always succeeds.
    pub fn push(&self, sym: &Symbol, value: Value) {
        let mut inner = self.inner.borrow_mut();
        inner.bindings.entry(sym.clone()).or_default().push(Cell {
            value,
            immutable: false,
        });
        inner.trail.push(sym.clone());
    }

    /// Remove the top cell for `sym`.
    ///
    /// Popping an empty stack means push and pop got out of step, which is
    /// reported as an internal error.
    pub fn pop(&self, sym: &Symbol) -> Result<Value> {
        let mut inner = self.inner.borrow_mut();
        inner.pop_cell(sym)
    }

    /// Look up the visible binding of `sym`.
    ///
    /// A miss on an atom that spells a number installs an immutable binding
    /// for it and returns the number.
    pub fn lookup(&self, sym: &Symbol) -> Result<Value> {
        if let Some(cell) = self
            .inner
            .borrow()
            .bindings
            .get(sym)
            .and_then(|stack| stack.last())
        {
            return Ok(cell.value.clone());
        }
        match Number::parse(sym.name()) {
            Some(n) => {
                let value = Value::Number(n);
                self.install(sym.clone(), value.clone(), true);
                Ok(value)
            }
            None => Err(Error::UnboundVariable(sym.clone())),
        }
    }

    /// Whether `sym` currently has a binding.
    #[must_use]
    pub fn is_bound(&self, sym: &Symbol) -> bool {
        self.inner
            .borrow()
            .bindings
            .get(sym)
            .is_some_and(|stack| !stack.is_empty())
    }

    /// Number of cells on `sym`'s stack.
    #[must_use]
    pub fn depth(&self, sym: &Symbol) -> usize {
        self.inner
            .borrow()
            .bindings
            .get(sym)
            .map_or(0, |stack| stack.len())
    }

    // ========================================================================
    // Wind frames
    // ========================================================================

    /// Current length of the push trail.
    #[must_use]
    pub fn binding_mark(&self) -> usize {
        self.inner.borrow().trail.len()
    }

    /// Pop every binding pushed after `mark`, newest first.
    ///
    /// Returns how many bindings were popped.
    pub fn restore_to(&self, mark: usize) -> Result<usize> {
        let mut inner = self.inner.borrow_mut();
        let mut popped = 0;
        while inner.trail.len() > mark {
            let Some(sym) = inner.trail.last().cloned() else {
                break;
            };
            inner.pop_cell(&sym)?;
            popped += 1;
        }
        Ok(popped)
    }

    /// Enter a wind frame, returning its binding mark.
    pub fn enter_wind(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        let mark = inner.trail.len();
        inner.winds += 1;
        mark
    }

    /// Leave the innermost wind frame.
    pub fn exit_wind(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.winds = inner.winds.saturating_sub(1);
    }

    /// Number of active wind frames.
    #[must_use]
    pub fn wind_depth(&self) -> usize {
        self.inner.borrow().winds
    }

    // ========================================================================
    // Input and output
    // ========================================================================

    /// Redirect the output written by `print` and `write`.
    pub fn set_output(&self, output: Box<dyn Write>) {
        self.inner.borrow_mut().output = output;
    }

    /// Redirect the input consumed by `read-line` and `read`.
    pub fn set_input(&self, input: Box<dyn BufRead>) {
        self.inner.borrow_mut().input = input;
    }

    pub fn write_output(&self, text: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.output.write_all(text.as_bytes())?;
        inner.output.flush()?;
        Ok(())
    }

    /// Read one line without its terminator; `None` at end of input.
    pub fn read_input_line(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.inner.borrow_mut().input.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl EnvInner {
    fn pop_cell(&mut self, sym: &Symbol) -> Result<Value> {
        let stack = self
            .bindings
            .get_mut(sym)
            .ok_or_else(|| Error::Internal(format!("pop of unbound symbol {}", sym)))?;
        let cell = stack
            .pop()
            .ok_or_else(|| Error::Internal(format!("pop of empty binding stack {}", sym)))?;
        if stack.is_empty() {
            self.bindings.remove(sym);
        }
        if let Some(pos) = self.trail.iter().rposition(|s| s == sym) {
            self.trail.remove(pos);
        }
        Ok(cell.value)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Env")
            .field("symbols", &inner.bindings.len())
            .field("trail", &inner.trail.len())
            .field("winds", &inner.winds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    #[test]
    fn test_create_and_lookup() {
        let env = Env::new();
        env.create(&sym("x"), Value::integer(42), false).unwrap();
        assert_eq!(env.lookup(&sym("x")).unwrap(), Value::integer(42));
    }

    #[test]
    fn test_create_twice_keeps_first() {
        let env = Env::new();
        env.create(&sym("x"), Value::integer(1), false).unwrap();
        let err = env.create(&sym("x"), Value::integer(2), false).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
        assert_eq!(env.lookup(&sym("x")).unwrap(), Value::integer(1));
    }

    #[test]
    fn test_unbound() {
        let env = Env::new();
        assert!(matches!(
            env.lookup(&sym("nope")),
            Err(Error::UnboundVariable(_))
        ));
        assert!(matches!(
            env.mutate(&sym("nope"), Value::Null),
            Err(Error::UnboundVariable(_))
        ));
    }

    #[test]
    fn test_mutate_targets_top_cell() {
        let env = Env::new();
        env.create(&sym("x"), Value::integer(1), false).unwrap();
        env.push(&sym("x"), Value::integer(2));
        env.mutate(&sym("x"), Value::integer(3)).unwrap();
        env.pop(&sym("x")).unwrap();
        assert_eq!(env.lookup(&sym("x")).unwrap(), Value::integer(1));
    }

    #[test]
    fn test_push_pop_round_trip() {
        let env = Env::new();
        env.push(&sym("y"), Value::integer(1));
        env.push(&sym("y"), Value::integer(2));
        assert_eq!(env.depth(&sym("y")), 2);
        assert_eq!(env.pop(&sym("y")).unwrap(), Value::integer(2));
        assert_eq!(env.lookup(&sym("y")).unwrap(), Value::integer(1));
        env.pop(&sym("y")).unwrap();
        assert!(!env.is_bound(&sym("y")));
        assert!(matches!(env.pop(&sym("y")), Err(Error::Internal(_))));
    }

    #[test]
    fn test_seeded_constants() {
        let env = Env::new();
        assert_eq!(env.lookup(&sym("true")).unwrap(), Value::Boolean(true));
        assert!(matches!(
            env.mutate(&sym("false"), Value::Boolean(true)),
            Err(Error::ImmutableBinding(_))
        ));
        env.mutate(&sym("pi"), Value::integer(3)).unwrap();
        assert_eq!(env.lookup(&sym("pi")).unwrap(), Value::integer(3));
    }

    #[test]
    fn test_numeric_literals_are_lazily_bound() {
        let env = Env::new();
        assert!(!env.is_bound(&sym("1/3")));
        let n = env.lookup(&sym("1/3")).unwrap();
        assert_eq!(n.to_string(), "1/3");
        assert!(env.is_bound(&sym("1/3")));
        assert!(matches!(
            env.mutate(&sym("1/3"), Value::Null),
            Err(Error::ImmutableBinding(_))
        ));
    }

    #[test]
    fn test_numeric_literals_are_immutable_before_first_lookup() {
        let env = Env::new();
        assert!(matches!(
            env.mutate(&sym("7"), Value::Null),
            Err(Error::ImmutableBinding(_))
        ));
        assert!(matches!(
            env.create(&sym("7"), Value::Null, false),
            Err(Error::DuplicateDefinition(_))
        ));
    }

    #[test]
    fn test_restore_to_mark() {
        let env = Env::new();
        env.push(&sym("a"), Value::integer(1));
        let mark = env.enter_wind();
        env.push(&sym("a"), Value::integer(2));
        env.push(&sym("b"), Value::integer(3));
        env.push(&sym("a"), Value::integer(4));
        assert_eq!(env.restore_to(mark).unwrap(), 3);
        env.exit_wind();
        assert_eq!(env.lookup(&sym("a")).unwrap(), Value::integer(1));
        assert!(!env.is_bound(&sym("b")));
        assert_eq!(env.wind_depth(), 0);
    }

    #[test]
    fn test_nested_winds_count_depth() {
        let env = Env::new();
        let outer = env.enter_wind();
        env.push(&sym("a"), Value::integer(1));
        let inner = env.enter_wind();
        assert_eq!(env.wind_depth(), 2);
        assert_eq!(inner, outer + 1);
        env.exit_wind();
        env.exit_wind();
        env.exit_wind();
        assert_eq!(env.wind_depth(), 0);
    }

    #[test]
    fn test_out_of_order_pop_keeps_trail_consistent() {
        let env = Env::new();
        let mark = env.binding_mark();
        env.push(&sym("a"), Value::integer(1));
        env.push(&sym("b"), Value::integer(2));
        env.pop(&sym("a")).unwrap();
        assert_eq!(env.binding_mark(), mark + 1);
        env.restore_to(mark).unwrap();
        assert!(!env.is_bound(&sym("b")));
    }
}

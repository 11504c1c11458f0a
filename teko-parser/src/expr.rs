// teko-parser - Expression syntax tree
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The single syntactic shape of Teko: an atom or a list of expressions.
//!
//! Lists share their storage through `Rc`, so cloning an expression (which
//! the evaluator does whenever it moves a body form into tail position) is
//! a reference-count bump.

use std::fmt;
use std::rc::Rc;

use crate::symbol::Symbol;

/// A parsed Teko expression.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// An atom token.
    Symbol(Symbol),
    /// A parenthesised, possibly empty, sequence of expressions.
    List(Rc<[Expr]>),
}

impl Expr {
    /// Create an atom expression.
    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(Symbol::new(name))
    }

    /// Create a list expression.
    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(items.into())
    }

    /// The empty list `()`.
    pub fn empty_list() -> Self {
        Expr::List(Rc::from(Vec::new()))
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expr::Symbol(sym) => Some(sym),
            Expr::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items) => Some(items),
            Expr::Symbol(_) => None,
        }
    }

    /// True for `()`.
    #[must_use]
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Expr::List(items) if items.is_empty())
    }
}

impl From<Symbol> for Expr {
    fn from(sym: Symbol) -> Self {
        Expr::Symbol(sym)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(sym) => write!(f, "{}", sym),
            Expr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let expr = Expr::list(vec![
            Expr::symbol("define"),
            Expr::symbol("x"),
            Expr::list(vec![Expr::symbol("+"), Expr::symbol("1"), Expr::symbol("2")]),
            Expr::empty_list(),
        ]);
        assert_eq!(expr.to_string(), "(define x (+ 1 2) ())");
    }

    #[test]
    fn test_structural_equality() {
        let a = Expr::list(vec![Expr::symbol("a"), Expr::empty_list()]);
        let b = Expr::list(vec![Expr::symbol("a"), Expr::empty_list()]);
        assert_eq!(a, b);
        assert!(Expr::empty_list().is_empty_list());
    }
}

// teko-parser - Lexer and parser for the Teko programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # teko-parser
//!
//! Lexer and parser for the Teko programming language.
//! Produces `Expr` trees from source code strings.

pub mod expr;
pub mod lexer;
pub mod parser;
pub mod symbol;

pub use expr::Expr;
pub use lexer::{Lexer, Token};
pub use parser::{ParseError, Parser};
pub use symbol::Symbol;

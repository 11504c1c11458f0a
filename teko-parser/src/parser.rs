// teko-parser - Parser for Teko
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for Teko source code.
//!
//! Converts tokens into `Expr` trees.

use std::fmt;

use crate::expr::Expr;
use crate::lexer::{Lexer, Token};
use crate::symbol::Symbol;

/// Parser error with position information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// The parser converts tokens into `Expr` nodes.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        lexer.skip_leading_whitespace();
        // Capture position before first token
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            line,
            column,
        }
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<Expr>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let expr = self.parse_form()?;
        Ok(Some(expr))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<Expr>, ParseError> {
        Parser::new(source).parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<Expr>, ParseError> {
        Parser::new(source).parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) {
        // Capture position of the next token before fetching it
        self.lexer.skip_leading_whitespace();
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token();
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError {
            message: message.to_string(),
            line: self.line,
            column: self.column,
        }
    }

    fn parse_form(&mut self) -> Result<Expr, ParseError> {
        match &self.current {
            Token::Atom(name) => {
                let sym = Symbol::new(name);
                self.advance();
                Ok(Expr::Symbol(sym))
            }
            Token::LParen => self.parse_list(),
            Token::RParen => Err(self.error("Unmatched closing parenthesis")),
            Token::Eof => Err(self.error("Unexpected end of input")),
        }
    }

    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let (open_line, open_column) = (self.line, self.column);
        self.advance(); // consume (
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RParen | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        if matches!(self.current, Token::Eof) {
            return Err(ParseError {
                message: "Unmatched opening parenthesis".to_string(),
                line: open_line,
                column: open_column,
            });
        }
        self.advance(); // consume )
        Ok(Expr::list(elements))
    }
}

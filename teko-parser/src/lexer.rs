// teko-parser - Lexer for Teko
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Teko source code.
//!
//! Teko has exactly three kinds of token: the two parentheses and atoms.
//! An atom is a maximal run of characters that are neither whitespace nor
//! parentheses, so `"`, `'`, `set!` and `2+3i` are all ordinary atoms.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen, // (
    RParen, // )
    Atom(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Atom(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    ///
    /// Every character belongs to some token, so lexing cannot fail.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::Eof,
        };

        match c {
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            _ => self.read_atom(),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    /// Skip whitespace so that `line`/`column` point at the next token.
    pub fn skip_leading_whitespace(&mut self) {
        self.skip_whitespace();
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_atom(&mut self) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_atom_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::Atom(name)
    }
}

/// Check if a character can appear in an atom.
fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(s: &str) -> Vec<Token> {
        Lexer::new(s).tokenize()
    }

    fn atom(s: &str) -> Token {
        Token::Atom(s.to_string())
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            tokenize("(())"),
            vec![Token::LParen, Token::LParen, Token::RParen, Token::RParen]
        );
    }

    #[test]
    fn test_atoms() {
        assert_eq!(
            tokenize("define set! 2+3i 1/3 .5e-2"),
            vec![
                atom("define"),
                atom("set!"),
                atom("2+3i"),
                atom("1/3"),
                atom(".5e-2")
            ]
        );
    }

    #[test]
    fn test_punctuation_atoms() {
        assert_eq!(
            tokenize("(\" Hello world!)"),
            vec![
                Token::LParen,
                atom("\""),
                atom("Hello"),
                atom("world!"),
                Token::RParen
            ]
        );
        assert_eq!(tokenize("'x"), vec![atom("'x")]);
    }

    #[test]
    fn test_parens_split_atoms() {
        assert_eq!(
            tokenize("a(b)c"),
            vec![
                atom("a"),
                Token::LParen,
                atom("b"),
                Token::RParen,
                atom("c")
            ]
        );
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(tokenize("   \t\n  "), vec![]);
        assert_eq!(tokenize("  a \n\t b "), vec![atom("a"), atom("b")]);
    }

    #[test]
    fn test_any_text_lexes() {
        assert_eq!(
            tokenize("#{}\"\u{0} ü)"),
            vec![atom("#{}\"\u{0}"), atom("ü"), Token::RParen]
        );
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new("a\n  b");
        lexer.next_token();
        lexer.next_token();
        assert_eq!(lexer.line(), 2);
        assert_eq!(lexer.column(), 4);
    }
}

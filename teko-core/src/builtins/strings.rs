// teko-core - String construction
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The `"` macro builds a string from its raw argument forms.
//!
//! Atoms contribute their text, with a single space between two atoms that
//! follow each other directly. A sub-list contributes the characters whose
//! codes it lists and never introduces a space, so
//! `(" (32) Lorem (10) ipsum)` is `" Lorem\nipsum"`.

use teko_parser::Expr;

use crate::env::Env;
use crate::error::{Error, Result};
use crate::number::Number;
use crate::value::Value;

/// (" words-and-code-lists...) - build a string
pub(crate) fn builtin_string(args: &[Expr], _env: &Env) -> Result<Value> {
    let mut out = String::new();
    let mut after_atom = false;

    for arg in args {
        match arg {
            Expr::Symbol(word) => {
                if after_atom {
                    out.push(' ');
                }
                out.push_str(word.name());
                after_atom = true;
            }
            Expr::List(codes) => {
                for code in codes.iter() {
                    out.push(character(code)?);
                }
                after_atom = false;
            }
        }
    }
    Ok(Value::string(out))
}

fn character(code: &Expr) -> Result<char> {
    code.as_symbol()
        .and_then(|sym| Number::parse(sym.name()))
        .and_then(|n| n.to_u32())
        .and_then(char::from_u32)
        .ok_or_else(|| Error::EvalError(format!("\": invalid character code {}", code)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teko_parser::Parser;

    fn build(src: &str) -> Result<Value> {
        let form = Parser::parse_str(src).unwrap().unwrap();
        let items = form.as_list().unwrap();
        builtin_string(&items[1..], &Env::new())
    }

    #[test]
    fn test_words_joined_by_single_spaces() {
        assert_eq!(build("(\" Hello   brave\tworld!)").unwrap(), Value::string("Hello brave world!"));
    }

    #[test]
    fn test_code_lists_suppress_spaces() {
        assert_eq!(
            build("(\" (32) Lorem (10) ipsum)").unwrap(),
            Value::string(" Lorem\nipsum")
        );
        assert_eq!(build("(\" a (44 32) b)").unwrap(), Value::string("a, b"));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(build("(\")").unwrap(), Value::string(""));
    }

    #[test]
    fn test_invalid_code() {
        assert!(build("(\" (x))").is_err());
        assert!(build("(\" (1/2))").is_err());
        assert!(build("(\" ((32)))").is_err());
    }
}

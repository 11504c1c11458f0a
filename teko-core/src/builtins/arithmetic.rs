// teko-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /, real-part, imag-part
//!
//! ## Exactness
//!
//! Arithmetic on numbers is exact Gaussian-rational arithmetic. If any
//! operand is a float (which only `pi` produces), every operand is converted
//! to `f64` and the result is a float; complex operands cannot take part.

use num_rational::BigRational;
use num_traits::Zero;

use crate::env::Env;
use crate::error::{AritySpec, Error, Result};
use crate::number::Number;
use crate::value::Value;

use super::{check_arity, to_real};

/// Operands of one arithmetic call, after promotion.
enum Operands {
    Exact(Vec<Number>),
    Inexact(Vec<f64>),
}

fn operands(name: &str, args: &[Value]) -> Result<Operands> {
    if args.iter().any(|a| matches!(a, Value::Float(_))) {
        let floats = args
            .iter()
            .map(|a| to_real(name, a))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Operands::Inexact(floats));
    }
    let numbers = args
        .iter()
        .map(|a| match a {
            Value::Number(n) => Ok(n.clone()),
            other => Err(Error::type_error_in(name, "number", other.type_name())),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Operands::Exact(numbers))
}

pub(crate) fn builtin_add(args: &[Value], _env: &Env) -> Result<Value> {
    match operands("+", args)? {
        Operands::Exact(nums) => Ok(nums
            .iter()
            .fold(Number::zero(), |acc, n| acc.add(n))
            .into()),
        Operands::Inexact(xs) => Ok(Value::Float(xs.iter().sum())),
    }
}

pub(crate) fn builtin_sub(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("-", AritySpec::AtLeast(1), args.len())?;
    match operands("-", args)? {
        Operands::Exact(nums) => Ok(match nums.as_slice() {
            [only] => only.neg(),
            [first, rest @ ..] => rest.iter().fold(first.clone(), |acc, n| acc.sub(n)),
            [] => Number::zero(),
        }
        .into()),
        Operands::Inexact(xs) => Ok(Value::Float(match xs.as_slice() {
            [only] => -only,
            [first, rest @ ..] => rest.iter().fold(*first, |acc, x| acc - x),
            [] => 0.0,
        })),
    }
}

pub(crate) fn builtin_mul(args: &[Value], _env: &Env) -> Result<Value> {
    match operands("*", args)? {
        Operands::Exact(nums) => Ok(nums
            .iter()
            .fold(Number::one(), |acc, n| acc.mul(n))
            .into()),
        Operands::Inexact(xs) => Ok(Value::Float(xs.iter().product())),
    }
}

pub(crate) fn builtin_div(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("/", AritySpec::AtLeast(1), args.len())?;
    match operands("/", args)? {
        Operands::Exact(nums) => match nums.as_slice() {
            [only] => Ok(Number::one().div(only)?.into()),
            [first, rest @ ..] => {
                let mut acc = first.clone();
                for n in rest {
                    acc = acc.div(n)?;
                }
                Ok(acc.into())
            }
            [] => Ok(Number::one().into()),
        },
        Operands::Inexact(xs) => Ok(Value::Float(match xs.as_slice() {
            [only] => 1.0 / only,
            [first, rest @ ..] => rest.iter().fold(*first, |acc, x| acc / x),
            [] => 1.0,
        })),
    }
}

pub(crate) fn builtin_real_part(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("real-part", AritySpec::Exact(1), args.len())?;
    match &args[0] {
        Value::Number(n) => Ok(Number::real(n.re().clone()).into()),
        Value::Float(x) => Ok(Value::Float(*x)),
        other => Err(Error::type_error_in("real-part", "number", other.type_name())),
    }
}

pub(crate) fn builtin_imag_part(args: &[Value], _env: &Env) -> Result<Value> {
    check_arity("imag-part", AritySpec::Exact(1), args.len())?;
    match &args[0] {
        Value::Number(n) => Ok(Number::real(n.im().clone()).into()),
        Value::Float(_) => Ok(Number::real(BigRational::zero()).into()),
        other => Err(Error::type_error_in("imag-part", "number", other.type_name())),
    }
}

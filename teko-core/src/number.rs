// teko-core - Gaussian rational numbers
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Exact numbers and the numeric literal grammar.
//!
//! Every Teko number is a Gaussian rational: a complex number whose real and
//! imaginary parts are arbitrary-precision rationals kept in lowest terms.
//!
//! ## Literal grammar
//!
//! ```text
//! number    := sign? real (sign real "i")?
//! real      := mantissa exponent?
//! mantissa  := digits | digits "." | "." digits | digits "." digits
//!            | digits "/" digits
//! exponent  := ("e" | "E") sign? digits
//! ```
//!
//! A zero denominator is not a number. Exponents scale by an exact power of
//! ten, so `2.5e-3` is `1/400`. An exponent above [`MAX_EXPONENT`] makes
//! the atom an ordinary symbol rather than a number.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Largest exponent magnitude a literal may carry.
pub const MAX_EXPONENT: u32 = 4096;

/// An exact Gaussian rational.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Number {
    re: BigRational,
    im: BigRational,
}

impl Number {
    /// Build from real and imaginary parts.
    pub fn new(re: BigRational, im: BigRational) -> Self {
        Number { re, im }
    }

    /// A real number.
    pub fn real(re: BigRational) -> Self {
        Number {
            re,
            im: BigRational::zero(),
        }
    }

    pub fn from_integer(n: i64) -> Self {
        Number::real(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn zero() -> Self {
        Number::real(BigRational::zero())
    }

    pub fn one() -> Self {
        Number::real(BigRational::one())
    }

    pub fn re(&self) -> &BigRational {
        &self.re
    }

    pub fn im(&self) -> &BigRational {
        &self.im
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// The real part as a float, if this number has no imaginary part.
    pub fn to_f64(&self) -> Option<f64> {
        if self.is_real() {
            self.re.to_f64()
        } else {
            None
        }
    }

    /// Order two real numbers; `None` if either has an imaginary part.
    pub fn real_cmp(&self, other: &Number) -> Option<Ordering> {
        if self.is_real() && other.is_real() {
            Some(self.re.cmp(&other.re))
        } else {
            None
        }
    }

    /// If this number is a non-negative integer that fits in `u32`, return it.
    pub fn to_u32(&self) -> Option<u32> {
        if self.is_real() && self.re.is_integer() {
            self.re.to_integer().to_u32()
        } else {
            None
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn add(&self, other: &Number) -> Number {
        Number::new(&self.re + &other.re, &self.im + &other.im)
    }

    pub fn sub(&self, other: &Number) -> Number {
        Number::new(&self.re - &other.re, &self.im - &other.im)
    }

    pub fn mul(&self, other: &Number) -> Number {
        // (a+bi)(c+di) = (ac-bd) + (ad+bc)i
        let re = &self.re * &other.re - &self.im * &other.im;
        let im = &self.re * &other.im + &self.im * &other.re;
        Number::new(re, im)
    }

    pub fn div(&self, other: &Number) -> Result<Number> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if other.is_real() {
            return Ok(Number::new(&self.re / &other.re, &self.im / &other.re));
        }
        // (a+bi)/(c+di) = ((ac+bd) + (bc-ad)i) / (c²+d²)
        let norm = &other.re * &other.re + &other.im * &other.im;
        let re = (&self.re * &other.re + &self.im * &other.im) / &norm;
        let im = (&self.im * &other.re - &self.re * &other.im) / &norm;
        Ok(Number::new(re, im))
    }

    pub fn neg(&self) -> Number {
        Number::new(-&self.re, -&self.im)
    }

    // ========================================================================
    // Resolution from text
    // ========================================================================

    /// Resolve an atom's text against the numeric grammar.
    ///
    /// Returns `None` for anything that is not a complete numeric literal.
    pub fn parse(text: &str) -> Option<Number> {
        let mut cursor = Cursor::new(text);

        let negative = cursor.sign().unwrap_or(false);
        let mut re = cursor.real()?;
        if negative {
            re = -re;
        }

        if cursor.at_end() {
            return Some(Number::real(re));
        }

        let im_negative = cursor.sign()?;
        let mut im = cursor.real()?;
        if im_negative {
            im = -im;
        }
        if !cursor.eat(b'i') || !cursor.at_end() {
            return None;
        }
        Some(Number::new(re, im))
    }
}

/// Byte cursor over a candidate literal.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `Some(negative)` if a sign was consumed.
    fn sign(&mut self) -> Option<bool> {
        if self.eat(b'+') {
            Some(false)
        } else if self.eat(b'-') {
            Some(true)
        } else {
            None
        }
    }

    fn digits(&mut self) -> &'a str {
        let bytes = self.bytes;
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        // Only ASCII digits were consumed, so the slice is valid UTF-8.
        std::str::from_utf8(&bytes[start..self.pos]).unwrap_or_default()
    }

    fn real(&mut self) -> Option<BigRational> {
        let whole = self.digits();
        let mut value = if self.eat(b'/') {
            let den = self.digits();
            if whole.is_empty() || den.is_empty() {
                return None;
            }
            let den: BigInt = den.parse().ok()?;
            if den.is_zero() {
                return None;
            }
            BigRational::new(whole.parse().ok()?, den)
        } else if self.eat(b'.') {
            let frac = self.digits();
            if whole.is_empty() && frac.is_empty() {
                return None;
            }
            let joined = format!("{}{}", whole, frac);
            let num: BigInt = joined.parse().ok()?;
            BigRational::new(num, ten_pow(frac.len().try_into().ok()?))
        } else {
            if whole.is_empty() {
                return None;
            }
            BigRational::from_integer(whole.parse().ok()?)
        };

        if self.eat(b'e') || self.eat(b'E') {
            let negative = self.sign().unwrap_or(false);
            let exp = self.digits();
            if exp.is_empty() {
                return None;
            }
            let exp: u32 = exp.parse().ok()?;
            if exp > MAX_EXPONENT {
                return None;
            }
            let scale = BigRational::from_integer(ten_pow(exp));
            value = if negative {
                value / scale
            } else {
                value * scale
            };
        }
        Some(value)
    }
}

fn ten_pow(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.re)?;
        if !self.im.is_zero() {
            let sign = if self.im.is_negative() { "" } else { "+" };
            write!(f, "{}{}i", sign, self.im)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

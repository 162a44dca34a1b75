use core::fmt;
use core::ops::{Mul, Neg};
use std::collections::BTreeMap;

use log::{debug, trace};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::{PolyError, Result};

/// Coefficient type: an exact rational with arbitrary-precision numerator
/// and denominator.
///
/// Parsed and constructed polynomials carry integral coefficients; fractions
/// only show up as quotients of an inexact division.
pub type Coeff = BigRational;

fn integer(n: i64) -> Coeff {
    Coeff::from_integer(BigInt::from(n))
}

/// Single-variable polynomial with a sparse exponent -> coefficient map.
///
/// Every stored coefficient is non-zero, except for the zero polynomial,
/// which is the single term `0 * x^0` so that its degree is 0.
///
/// Values are never mutated: every operation returns a new polynomial.
#[derive(Clone)]
pub struct Polynomial {
    variable: char,
    terms: BTreeMap<u32, Coeff>,
}

impl Polynomial {
    /// Create a polynomial from `(exponent, coefficient)` pairs with integer
    /// coefficients.
    ///
    /// Pairs sharing an exponent are summed. Zero coefficients are dropped,
    /// except at exponent 0.
    ///
    /// # Errors
    ///
    /// Returns `PolyError::EmptyTerms` if nothing is left after dropping the
    /// zero coefficients.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::{PolyError, Polynomial};
    ///
    /// // 4x - 3
    /// let p = Polynomial::new('x', [(1, 4), (0, -3)]).unwrap();
    /// assert_eq!(p.degree(), 1);
    /// assert_eq!(p.to_string(), "4x-3");
    ///
    /// // 0x^2 has no term left to give it a degree
    /// assert_eq!(Polynomial::new('x', [(2, 0)]), Err(PolyError::EmptyTerms));
    /// ```
    pub fn new<I>(variable: char, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, i64)>,
    {
        Self::from_coeffs(variable, terms.into_iter().map(|(exp, c)| (exp, integer(c))))
    }

    /// Create a polynomial from `(exponent, coefficient)` pairs with rational
    /// coefficients.
    ///
    /// Same rules as [`Polynomial::new`].
    pub fn from_coeffs<I>(variable: char, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, Coeff)>,
    {
        let mut acc = BTreeMap::new();
        for (exp, coeff) in terms {
            *acc.entry(exp).or_insert_with(Coeff::zero) += coeff;
        }

        if !acc.contains_key(&0) && acc.values().all(Zero::is_zero) {
            return Err(PolyError::EmptyTerms);
        }

        Ok(Self::normalized(variable, acc))
    }

    /// Create the zero polynomial.
    pub fn zero(variable: char) -> Self {
        Self::constant(variable, 0)
    }

    /// Create a constant polynomial.
    pub fn constant(variable: char, c: i64) -> Self {
        Self {
            variable,
            terms: BTreeMap::from([(0, integer(c))]),
        }
    }

    /// Create a monomial `c * variable^exp`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::{Coeff, Polynomial};
    ///
    /// let m = Polynomial::monomial('t', 3, 2);
    /// assert_eq!(m.to_string(), "3t^2");
    /// assert_eq!(m.eval_at(2), Coeff::from_integer(12.into()));
    /// ```
    pub fn monomial(variable: char, c: i64, exp: u32) -> Self {
        Self::term(variable, integer(c), exp)
    }

    fn term(variable: char, c: Coeff, exp: u32) -> Self {
        if c.is_zero() {
            return Self::zero(variable);
        }
        Self {
            variable,
            terms: BTreeMap::from([(exp, c)]),
        }
    }

    /// Build a polynomial from an accumulated map, dropping zero
    /// coefficients. An empty result is the zero polynomial.
    fn normalized(variable: char, mut terms: BTreeMap<u32, Coeff>) -> Self {
        terms.retain(|_, c| !c.is_zero());
        if terms.is_empty() {
            terms.insert(0, Coeff::zero());
        }
        Self { variable, terms }
    }

    /// The indeterminate symbol.
    pub fn variable(&self) -> char {
        self.variable
    }

    /// The highest exponent carrying a coefficient.
    pub fn degree(&self) -> u32 {
        self.terms.last_key_value().map_or(0, |(&exp, _)| exp)
    }

    /// The coefficient at `degree()`.
    pub fn leading_coeff(&self) -> Coeff {
        self.terms
            .last_key_value()
            .map_or_else(Coeff::zero, |(_, c)| c.clone())
    }

    /// Get the coefficient of `variable^exp`, zero when absent.
    pub fn coeff(&self, exp: u32) -> Coeff {
        self.terms.get(&exp).cloned().unwrap_or_else(Coeff::zero)
    }

    /// The exponent -> coefficient map, in ascending exponent order.
    pub fn terms(&self) -> &BTreeMap<u32, Coeff> {
        &self.terms
    }

    /// Check if this is a constant (degree 0) polynomial.
    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.is_constant() && self.leading_coeff().is_zero()
    }

    /// Same terms under another variable symbol.
    fn with_variable(&self, variable: char) -> Self {
        Self {
            variable,
            terms: self.terms.clone(),
        }
    }

    /// Variable shared by two operands.
    ///
    /// Constants are variable-agnostic, so they combine with anything and
    /// the other operand's variable wins.
    fn common_variable(&self, other: &Self) -> Result<char> {
        match (self.is_constant(), other.is_constant()) {
            (_, true) => Ok(self.variable),
            (true, false) => Ok(other.variable),
            (false, false) if self.variable == other.variable => Ok(self.variable),
            (false, false) => Err(PolyError::IncompatibleOperand {
                left: self.variable,
                right: other.variable,
            }),
        }
    }

    /// Term-wise combination over the union of both exponent sets.
    fn combine<F>(&self, rhs: &Self, variable: char, op: F) -> Self
    where
        F: Fn(Coeff, Coeff) -> Coeff,
    {
        let terms = self
            .terms
            .keys()
            .chain(rhs.terms.keys())
            .map(|&exp| (exp, op(self.coeff(exp), rhs.coeff(exp))))
            .collect();
        Self::normalized(variable, terms)
    }

    /// Convolution of the two term maps.
    fn product(&self, rhs: &Self, variable: char) -> Self {
        let mut terms = BTreeMap::new();
        for (&d1, c1) in &self.terms {
            for (&d2, c2) in &rhs.terms {
                *terms.entry(d1 + d2).or_insert_with(Coeff::zero) += c1 * c2;
            }
        }
        Self::normalized(variable, terms)
    }

    /// Add two polynomials.
    ///
    /// # Errors
    ///
    /// Returns `PolyError::IncompatibleOperand` if both operands are
    /// non-constant and use different variables.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        let variable = self.common_variable(rhs)?;
        Ok(self.combine(rhs, variable, |a, b| a + b))
    }

    /// Subtract `rhs` from `self`.
    ///
    /// # Errors
    ///
    /// Returns `PolyError::IncompatibleOperand` if both operands are
    /// non-constant and use different variables.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::Polynomial;
    ///
    /// let p: Polynomial = "7n - 5n^4+6n^3".parse().unwrap();
    /// let q: Polynomial = "3n^3-2n^4+8n".parse().unwrap();
    /// assert_eq!(p.checked_sub(&q).unwrap().to_string(), "-3n^4+3n^3-n");
    /// assert_eq!(p.checked_sub(&p).unwrap().to_string(), "0");
    /// ```
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        let variable = self.common_variable(rhs)?;
        Ok(self.combine(rhs, variable, |a, b| a - b))
    }

    /// Multiply two polynomials.
    ///
    /// For multiplication by a scalar see [`Polynomial::scale`] and the
    /// `Mul<i64>`/`Mul<Coeff>` operators.
    ///
    /// # Errors
    ///
    /// Returns `PolyError::IncompatibleOperand` if both operands are
    /// non-constant and use different variables.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::Polynomial;
    ///
    /// let p = Polynomial::new('x', [(1, 1), (0, 1)]).unwrap();
    /// let square = p.checked_mul(&p).unwrap();
    /// assert_eq!(square, Polynomial::new('x', [(2, 1), (1, 2), (0, 1)]).unwrap());
    /// ```
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self> {
        let variable = self.common_variable(rhs)?;
        Ok(self.product(rhs, variable))
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: Coeff) -> Self {
        let terms = self.terms.iter().map(|(&exp, coeff)| (exp, coeff * &c)).collect();
        Self::normalized(self.variable, terms)
    }

    /// Raise to a non-negative power by square-and-multiply.
    ///
    /// `pow(0)` returns the base unchanged, the same as `pow(1)`; it does
    /// not produce the constant 1.
    pub fn pow(&self, exp: u32) -> Self {
        if exp <= 1 {
            return self.clone();
        }

        let mut base = self.clone();
        let mut result = Self::constant(self.variable, 1);
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.product(&base, self.variable);
            }
            e >>= 1;
            if e > 0 {
                base = base.product(&base, self.variable);
            }
        }
        result
    }

    /// Long division: compute quotient and remainder.
    ///
    /// Returns `(q, r)` such that `self = divisor * q + r`. Quotient
    /// coefficients are fractions when the division is inexact. If the
    /// divisor has a higher degree than `self`, the quotient is zero and the
    /// remainder is `self`.
    ///
    /// # Errors
    ///
    /// Returns `PolyError::DivisionByZero` for a zero divisor and
    /// `PolyError::IncompatibleOperand` for non-constant operands in
    /// different variables.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::Polynomial;
    ///
    /// // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
    /// let dividend: Polynomial = "x^2+2x+1".parse().unwrap();
    /// let divisor: Polynomial = "x+1".parse().unwrap();
    /// let (q, r) = dividend.div_rem(&divisor).unwrap();
    ///
    /// assert_eq!(q, divisor);
    /// assert!(r.is_zero());
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        let variable = self.common_variable(divisor)?;
        if divisor.is_zero() {
            return Err(PolyError::DivisionByZero);
        }

        let divisor_deg = divisor.degree();
        let divisor_lc = divisor.leading_coeff();
        let mut partial = self.with_variable(variable);

        let Some(mut place) = self.degree().checked_sub(divisor_deg) else {
            debug!(
                "divisor degree {} exceeds dividend degree {}, quotient is zero",
                divisor_deg,
                self.degree()
            );
            return Ok((Self::zero(variable), partial));
        };

        let mut quotient = BTreeMap::new();
        loop {
            let factor = partial.coeff(place + divisor_deg) / &divisor_lc;
            trace!("quotient term {}{}^{}", factor, variable, place);

            if !factor.is_zero() {
                let step = divisor.product(&Self::term(variable, factor.clone(), place), variable);
                partial = partial.combine(&step, variable, |a, b| a - b);
            }
            quotient.insert(place, factor);

            if place == 0 {
                break;
            }
            place -= 1;
        }

        let quotient = Self::normalized(variable, quotient);
        debug!("({}) / ({}) = {} remainder {}", self, divisor, quotient, partial);
        Ok((quotient, partial))
    }

    /// Quotient of long division; see [`Polynomial::div_rem`].
    ///
    /// # Errors
    ///
    /// Same as [`Polynomial::div_rem`]: `PolyError::DivisionByZero` or
    /// `PolyError::IncompatibleOperand`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::{PolyError, Polynomial};
    ///
    /// let p: Polynomial = "x+4".parse().unwrap();
    /// assert_eq!(p.checked_div(&p).unwrap().to_string(), "1");
    /// assert_eq!(p.checked_div(&Polynomial::zero('x')), Err(PolyError::DivisionByZero));
    /// ```
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Remainder of long division: `self - divisor * (self / divisor)`.
    ///
    /// # Errors
    ///
    /// Same as [`Polynomial::div_rem`].
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::{PolyError, Polynomial};
    ///
    /// let dividend: Polynomial = "x^3+2x+5".parse().unwrap();
    /// let divisor: Polynomial = "x-1".parse().unwrap();
    /// assert_eq!(dividend.checked_rem(&divisor).unwrap().to_string(), "8");
    ///
    /// let other: Polynomial = "y^2".parse().unwrap();
    /// assert_eq!(
    ///     dividend.checked_rem(&other),
    ///     Err(PolyError::IncompatibleOperand { left: 'x', right: 'y' })
    /// );
    /// ```
    pub fn checked_rem(&self, divisor: &Self) -> Result<Self> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Evaluate at an integer point.
    ///
    /// # Example
    ///
    /// ```
    /// use polyterm::{Coeff, Polynomial};
    ///
    /// let p = Polynomial::new('x', [(2, 1), (1, 2), (0, 1)]).unwrap();
    /// assert_eq!(p.eval_at(4), Coeff::from_integer(25.into()));
    /// ```
    pub fn eval_at(&self, n: i64) -> Coeff {
        self.eval_at_coeff(integer(n))
    }

    /// Evaluate at a rational point.
    ///
    /// ```
    /// use polyterm::{Coeff, Polynomial};
    ///
    /// let p = Polynomial::new('x', [(2, 1), (1, 2), (0, 1)]).unwrap();
    /// let half = Coeff::new(1.into(), 2.into());
    /// assert_eq!(p.eval_at_coeff(half), Coeff::new(9.into(), 4.into()));
    /// ```
    pub fn eval_at_coeff(&self, n: Coeff) -> Coeff {
        self.terms
            .iter()
            .fold(Coeff::zero(), |acc, (&exp, c)| {
                acc + c * num_traits::pow(n.clone(), exp as usize)
            })
    }

    /// Compute the formal derivative.
    ///
    /// The derivative of a constant is the zero polynomial.
    pub fn derivative(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|&(&exp, _)| exp > 0)
            .map(|(&exp, c)| (exp - 1, c * integer(i64::from(exp))))
            .collect();
        Self::normalized(self.variable, terms)
    }

    /// Compare two polynomials, rejecting operands in different variables.
    ///
    /// `==` treats non-constants in different variables as unequal; this
    /// reports them as incompatible instead.
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        self.common_variable(other)?;
        Ok(self == other)
    }
}

/* ---- Equality ---- */

/// Constants compare by value whatever their variable. Anything else needs
/// the same variable and the same coefficient at every exponent up to and
/// including the larger degree.
impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        if self.is_constant() && other.is_constant() {
            return self.leading_coeff() == other.leading_coeff();
        }
        if self.variable != other.variable {
            return false;
        }
        let max_deg = self.degree().max(other.degree());
        (0..=max_deg).all(|exp| self.coeff(exp) == other.coeff(exp))
    }
}

impl Eq for Polynomial {}

/* ---- Arithmetic operators ---- */

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        let terms = self.terms.iter().map(|(&exp, c)| (exp, -c)).collect();
        Polynomial::normalized(self.variable, terms)
    }
}

/// Scalar multiplication: polynomial * scalar
impl Mul<Coeff> for Polynomial {
    type Output = Self;

    fn mul(self, rhs: Coeff) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Coeff> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Coeff) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<i64> for Polynomial {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        self.scale(integer(rhs))
    }
}

impl Mul<i64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: i64) -> Self::Output {
        self.scale(integer(rhs))
    }
}

/// Scalar multiplication: scalar * polynomial
impl Mul<Polynomial> for Coeff {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Self::Output {
        rhs.scale(self)
    }
}

impl Mul<&Polynomial> for Coeff {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        rhs.scale(self)
    }
}

impl Mul<Polynomial> for i64 {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Self::Output {
        rhs.scale(integer(self))
    }
}

impl Mul<&Polynomial> for i64 {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        rhs.scale(integer(self))
    }
}

/* ---- Formatting ---- */

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (&exp, coeff) in self.terms.iter().rev() {
            if coeff.is_zero() {
                continue;
            }

            if coeff.is_negative() {
                write!(f, "-")?;
            } else if !first {
                write!(f, "+")?;
            }
            first = false;

            let magnitude = coeff.abs();
            match exp {
                0 => write!(f, "{}", magnitude)?,
                1 if magnitude.is_one() => write!(f, "{}", self.variable)?,
                1 => write!(f, "{}{}", magnitude, self.variable)?,
                _ if magnitude.is_one() => write!(f, "{}^{}", self.variable, exp)?,
                _ => write!(f, "{}{}^{}", magnitude, self.variable, exp)?,
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({:?}, {{", self.variable)?;
        for (i, (exp, coeff)) in self.terms.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", exp, coeff)?;
        }
        write!(f, "}})")
    }
}

/* ---- Serialization ---- */

/// Coefficients travel as their `Display` text (`"-3"`, `"1/2"`) so that
/// the format does not depend on the big integer digit layout.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PolynomialRepr {
    variable: char,
    terms: Vec<(u32, String)>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Polynomial {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let repr = PolynomialRepr {
            variable: self.variable,
            terms: self.terms.iter().map(|(&exp, c)| (exp, c.to_string())).collect(),
        };
        serde::Serialize::serialize(&repr, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Polynomial {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr: PolynomialRepr = serde::Deserialize::deserialize(deserializer)?;
        let terms = repr
            .terms
            .into_iter()
            .map(|(exp, text)| {
                text.parse::<Coeff>()
                    .map(|c| (exp, c))
                    .map_err(|e| serde::de::Error::custom(format!("coefficient {:?}: {}", text, e)))
            })
            .collect::<core::result::Result<Vec<_>, D::Error>>()?;
        Self::from_coeffs(repr.variable, terms).map_err(serde::de::Error::custom)
    }
}

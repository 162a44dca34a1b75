//! Term parser: turns text such as `35p^2+2p-24` into a term map.
//!
//! The input is a run of signed monomials in one variable. Exponents use
//! `^`; a missing exponent means 1 and a missing variable means a constant
//! term. Whitespace anywhere in the input is ignored.

use core::str::FromStr;
use std::collections::BTreeMap;

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PolyError, Result};
use crate::structures::poly::{Coeff, Polynomial};

/// One monomial, most specific alternative first: `c x^n`, `c x`, `c`.
static MONOMIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-]?[0-9]*[A-Za-z]\^[0-9]+|[+-]?[0-9]*[A-Za-z]|[+-]?[0-9]+")
        .expect("monomial pattern is valid")
});

/// Parse polynomial text into its variable and an exponent -> coefficient
/// map.
///
/// Terms with the same exponent are summed. The map is not normalized:
/// `x-x` yields `{1: 0}`.
///
/// # Errors
///
/// Returns `PolyError::InvalidInput` if the text is empty, has no variable,
/// mixes variables, contains anything that is not a monomial, or holds an
/// exponent too large for a `u32`. Coefficients have no size limit.
///
/// # Example
///
/// ```
/// use polyterm::BigInt;
///
/// let (var, terms) = polyterm::parse("35p^2+2p-24").unwrap();
/// assert_eq!(var, 'p');
/// assert_eq!(terms[&2], BigInt::from(35));
/// assert_eq!(terms[&1], BigInt::from(2));
/// assert_eq!(terms[&0], BigInt::from(-24));
/// ```
pub fn parse(text: &str) -> Result<(char, BTreeMap<u32, BigInt>)> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(PolyError::invalid_input(text, "empty input"));
    }

    let variable = cleaned
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .ok_or_else(|| PolyError::invalid_input(text, "no variable symbol"))?;

    let mut terms = BTreeMap::new();
    let mut cursor = 0;
    for m in MONOMIAL.find_iter(&cleaned) {
        if m.start() != cursor {
            return Err(unexpected(text, &cleaned[cursor..m.start()]));
        }
        cursor = m.end();

        let (exp, coeff) = split_term(text, m.as_str(), variable)?;
        trace!("term {:?} -> {} * {}^{}", m.as_str(), coeff, variable, exp);

        *terms.entry(exp).or_insert_with(BigInt::zero) += coeff;
    }
    if cursor != cleaned.len() {
        return Err(unexpected(text, &cleaned[cursor..]));
    }

    debug!("parsed {:?} as {:?} in `{}`", text, terms, variable);
    Ok((variable, terms))
}

/// Parse polynomial text straight into a [`Polynomial`].
///
/// # Errors
///
/// Everything [`parse`] rejects, plus `PolyError::EmptyTerms` when all terms
/// cancel out to nothing (for example `x-x`).
pub fn parse_polynomial(text: &str) -> Result<Polynomial> {
    let (variable, terms) = parse(text)?;
    Polynomial::from_coeffs(
        variable,
        terms.into_iter().map(|(exp, c)| (exp, Coeff::from_integer(c))),
    )
}

impl FromStr for Polynomial {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self> {
        parse_polynomial(s)
    }
}

fn unexpected(input: &str, fragment: &str) -> PolyError {
    PolyError::invalid_input(input, format!("unexpected {:?}", fragment))
}

/// Split one matched monomial into `(exponent, coefficient)`.
///
/// A bare sign or a missing coefficient before the variable stands for 1.
fn split_term(input: &str, term: &str, variable: char) -> Result<(u32, BigInt)> {
    let Some(at) = term.find(|c: char| c.is_ascii_alphabetic()) else {
        return Ok((0, parse_int(input, term)?));
    };

    let symbol = term[at..].chars().next().unwrap_or(variable);
    if symbol != variable {
        return Err(PolyError::invalid_input(
            input,
            format!("mixed variables `{}` and `{}`", variable, symbol),
        ));
    }

    let coeff = match &term[..at] {
        "" | "+" => BigInt::one(),
        "-" => -BigInt::one(),
        digits => parse_int(input, digits)?,
    };

    let exp = match term[at + symbol.len_utf8()..].strip_prefix('^') {
        Some(digits) => parse_int(input, digits)?,
        None => 1,
    };

    Ok((exp, coeff))
}

fn parse_int<T: FromStr>(input: &str, digits: &str) -> Result<T> {
    digits
        .parse()
        .map_err(|_| PolyError::invalid_input(input, format!("number out of range: {}", digits)))
}

use thiserror::Error;

/// Errors reported by parsing, construction and polynomial arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolyError {
    /// The input text is not a polynomial in one variable.
    #[error("invalid polynomial input {input:?}: {reason}")]
    InvalidInput { input: String, reason: String },

    /// A terms map had no entry left after dropping zero coefficients.
    #[error("polynomial has no terms")]
    EmptyTerms,

    /// The operands are polynomials in different variables.
    #[error("incompatible operands: polynomial in `{left}` and polynomial in `{right}`")]
    IncompatibleOperand { left: char, right: char },

    /// The divisor is the zero polynomial.
    #[error("division by the zero polynomial")]
    DivisionByZero,
}

impl PolyError {
    pub(crate) fn invalid_input(input: &str, reason: impl Into<String>) -> Self {
        PolyError::InvalidInput {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PolyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = PolyError::invalid_input("", "empty input");
        assert_eq!(err.to_string(), "invalid polynomial input \"\": empty input");
        assert_eq!(PolyError::EmptyTerms.to_string(), "polynomial has no terms");
        assert_eq!(
            PolyError::IncompatibleOperand { left: 'x', right: 'y' }.to_string(),
            "incompatible operands: polynomial in `x` and polynomial in `y`"
        );
        assert_eq!(
            PolyError::DivisionByZero.to_string(),
            "division by the zero polynomial"
        );
    }
}

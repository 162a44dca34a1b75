//! Single-variable polynomial algebra over exact rational coefficients.
//!
//! Text such as `35p^2+2p-24` is parsed into a [`Polynomial`], which supports
//! addition, subtraction, multiplication, exponentiation, long division,
//! evaluation and differentiation, and renders back to the same canonical
//! text.
//!
//! ```
//! use polyterm::{Coeff, Polynomial};
//!
//! let p: Polynomial = "x+1".parse().unwrap();
//! let square = p.checked_mul(&p).unwrap();
//! assert_eq!(square.to_string(), "x^2+2x+1");
//! assert_eq!(square.eval_at(4), Coeff::from_integer(25.into()));
//! assert_eq!(square.derivative().to_string(), "2x+2");
//! assert_eq!(square.checked_div(&p).unwrap(), p);
//! ```

pub mod error;
pub mod parser;
pub mod structures;

pub use error::{PolyError, Result};
pub use num_bigint::BigInt;
pub use parser::{parse, parse_polynomial};
pub use structures::poly::{Coeff, Polynomial};

use thiserror::Error;

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error(transparent)]
    ParsePolynomial(#[from] ParsePolynomialError),
}

/// Errors raised while parsing a polynomial from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParsePolynomialError {
    #[error("no coefficients supplied")]
    Empty,
    #[error("invalid coefficient `{0}`")]
    InvalidCoefficient(String),
}

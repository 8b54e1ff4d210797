pub use crate::error::{MathError, ParsePolynomialError};
pub use crate::poly;
pub use crate::poly::Polynomial;

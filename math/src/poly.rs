//! Dense univariate polynomials over floating-point scalars.
//!
//! Coefficients are stored in ascending index order, so `coeffs[i]` weights
//! `x^i`. A polynomial is immutable after construction; workers that need
//! their own instance clone the coefficient vector and rebuild.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use rand::distr::uniform::SampleUniform;
use rand::Rng;

use crate::error::ParsePolynomialError;

/// Represents a polynomial `a0 + a1*x + a2*x^2 + ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<F> {
    coeffs: Vec<F>,
}

/// Construct a [`Polynomial`] from coefficients in ascending index order.
///
/// # Examples
///
/// ```
/// use math::prelude::*;
///
/// let p: Polynomial<f32> = poly![1.0, 2.0, 3.0];
/// assert_eq!(p.degree(), 2);
/// ```
#[macro_export]
macro_rules! poly {
    ($c:expr; $n:expr) => {
        $crate::poly::Polynomial::new(vec![$c; $n])
    };
    ($($c:expr),* $(,)?) => {
        $crate::poly::Polynomial::new(vec![$($c),*])
    };
}

impl<F: Float> Polynomial<F> {
    /// Initialize polynomial with the given coefficients.
    pub fn new(coeffs: Vec<F>) -> Self {
        Self { coeffs }
    }

    /// Coefficients in ascending index order.
    pub fn coefficients(&self) -> &[F] {
        &self.coeffs
    }

    /// Consume the polynomial and return its coefficient vector.
    pub fn into_coefficients(self) -> Vec<F> {
        self.coeffs
    }

    /// Number of stored terms, including zero coefficients.
    pub fn term_count(&self) -> usize {
        self.coeffs.len()
    }

    /// Degree of the polynomial; `-1` for the empty polynomial.
    pub fn degree(&self) -> isize {
        self.coeffs.len() as isize - 1
    }

    /// Check whether every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Evaluate the polynomial at `x`.
    ///
    /// Accumulates terms in ascending index order, carrying the running
    /// power of `x` alongside the sum.
    pub fn evaluate(&self, x: F) -> F {
        let mut result = F::zero();
        let mut power = F::one();
        for &coeff in &self.coeffs {
            result = result + coeff * power;
            power = power * x;
        }
        result
    }

    /// Value of the single term `coeffs[index] * x^index`.
    ///
    /// Returns zero when `index` is out of range; callers with empty term
    /// ranges rely on this instead of treating it as an error.
    pub fn term_value(&self, index: usize, x: F) -> F {
        match self.coeffs.get(index) {
            None => F::zero(),
            Some(&coeff) => {
                let mut power = F::one();
                for _ in 0..index {
                    power = power * x;
                }
                coeff * power
            }
        }
    }

    /// Generate a random polynomial with `len` coefficients in `[-bound, bound]`.
    pub fn random(len: usize, bound: F) -> Self
    where
        F: SampleUniform,
    {
        let mut rng = rand::rng();
        let coeffs = (0..len).map(|_| rng.random_range(-bound..=bound)).collect();
        Self { coeffs }
    }
}

impl<F: Float> From<Vec<F>> for Polynomial<F> {
    fn from(coeffs: Vec<F>) -> Self {
        Self::new(coeffs)
    }
}

impl<F: Float + FromStr> FromStr for Polynomial<F> {
    type Err = ParsePolynomialError;

    /// Parse whitespace-separated coefficients, `a0` first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coeffs = s
            .split_whitespace()
            .map(|token| {
                token.parse::<F>().map_err(|_| {
                    ParsePolynomialError::InvalidCoefficient(token.to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if coeffs.is_empty() {
            return Err(ParsePolynomialError::Empty);
        }

        Ok(Self::new(coeffs))
    }
}

impl<F: Float + fmt::Display> fmt::Display for Polynomial<F> {
    /// Render in descending index order, skipping zero coefficients.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for (index, &coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff.is_zero() {
                continue;
            }
            if wrote {
                write!(f, " + ")?;
            }
            match index {
                0 => write!(f, "{coeff}")?,
                1 => write!(f, "{coeff}*x")?,
                _ => write!(f, "{coeff}*x^{index}")?,
            }
            wrote = true;
        }
        if !wrote {
            write!(f, "0")?;
        }
        Ok(())
    }
}

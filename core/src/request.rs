use num_traits::Float;
use serde::{Deserialize, Serialize};

use math::Polynomial;

use crate::error::{PipelineError, Result};

/// Parameters for one distributed evaluation, broadcast by the coordinator.
///
/// Constructed once, read-only afterwards. Every worker ends the broadcast
/// holding an identical copy and builds its own [`Polynomial`] from it; no
/// state is shared between workers once the broadcast completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest<F> {
    x: F,
    coefficients: Vec<F>,
}

impl<F: Float> EvaluationRequest<F> {
    /// Validate and construct a request.
    ///
    /// An empty coefficient list is a fatal configuration error and is
    /// rejected here, before any broadcast can take place.
    pub fn new(x: F, coefficients: Vec<F>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(PipelineError::EmptyCoefficients);
        }
        Ok(Self { x, coefficients })
    }

    /// The evaluation point.
    pub fn x(&self) -> F {
        self.x
    }

    /// Coefficients in ascending index order.
    pub fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    /// Number of polynomial terms, `degree + 1`.
    pub fn term_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Degree of the polynomial carried by this request.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Build this participant's own polynomial copy.
    pub fn polynomial(&self) -> Polynomial<F> {
        Polynomial::new(self.coefficients.clone())
    }
}

//! Typed run transcript.
//!
//! Workers do not write to a shared stdout while they compute; each returns
//! a [`WorkerReport`] and the harness gathers them in rank order into an
//! [`Evaluation`]. Rendering one reproduces the line-oriented transcript of
//! the run: per-term log lines, per-worker sums, and the tail's final
//! comparison block.

use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::chain::Role;
use crate::params::DISPLAY_PRECISION;
use crate::partition::TermRange;

const SEPARATOR: &str = "------------------------------------------------";

/// One computed term, logged by the worker that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermTrace<F> {
    pub index: usize,
    pub value: F,
}

impl<F: fmt::Display> fmt::Display for TermTrace<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "computed term {index} (a{index}*x^{index}) = {value:.prec$}",
            index = self.index,
            value = self.value,
            prec = DISPLAY_PRECISION,
        )
    }
}

/// Side-by-side result of the pipelined and direct evaluations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison<F> {
    pub accumulated: F,
    pub reference: F,
}

impl<F: Float> Comparison<F> {
    pub fn new(accumulated: F, reference: F) -> Self {
        Self {
            accumulated,
            reference,
        }
    }

    /// Absolute difference between the two results.
    pub fn difference(&self) -> F {
        (self.accumulated - self.reference).abs()
    }

    /// Whether the two results agree within `tolerance`.
    pub fn within(&self, tolerance: F) -> bool {
        self.difference() <= tolerance
    }
}

/// Everything one worker contributes to the run transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport<F> {
    pub rank: usize,
    pub role: Role,
    pub range: TermRange,
    pub terms: Vec<TermTrace<F>>,
    pub partial: F,
    pub accumulated: F,
    /// Present only on the worker that closed the chain.
    pub comparison: Option<Comparison<F>>,
}

impl<F: Float + fmt::Display> fmt::Display for WorkerReport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            writeln!(f, "Process {}: {}", self.rank, term)?;
        }
        if self.rank == 0 {
            writeln!(
                f,
                "Process {}: partial sum = {:.prec$}",
                self.rank,
                self.partial,
                prec = DISPLAY_PRECISION,
            )
        } else {
            writeln!(
                f,
                "Process {}: partial sum = {:.prec$}, accumulated sum = {:.prec$}",
                self.rank,
                self.partial,
                self.accumulated,
                prec = DISPLAY_PRECISION,
            )
        }
    }
}

/// The gathered transcript of one distributed evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation<F> {
    x: F,
    workers: usize,
    reports: Vec<WorkerReport<F>>,
    comparison: Comparison<F>,
}

impl<F: Float> Evaluation<F> {
    pub(crate) fn new(
        x: F,
        workers: usize,
        reports: Vec<WorkerReport<F>>,
        comparison: Comparison<F>,
    ) -> Self {
        Self {
            x,
            workers,
            reports,
            comparison,
        }
    }

    /// The evaluation point.
    pub fn x(&self) -> F {
        self.x
    }

    /// Number of workers that took part in the run.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Per-worker reports in rank order.
    pub fn reports(&self) -> &[WorkerReport<F>] {
        &self.reports
    }

    /// The tail's comparison of both results.
    pub fn comparison(&self) -> &Comparison<F> {
        &self.comparison
    }

    /// Result of the pipelined accumulation.
    pub fn accumulated(&self) -> F {
        self.comparison.accumulated
    }

    /// Result of the coordinator's direct evaluation.
    pub fn reference(&self) -> F {
        self.comparison.reference
    }

    /// Absolute difference between the two results.
    pub fn difference(&self) -> F {
        self.comparison.difference()
    }
}

impl<F: Float + fmt::Display> fmt::Display for Evaluation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            write!(f, "{report}")?;
        }
        writeln!(f, "{SEPARATOR}")?;
        writeln!(
            f,
            "FINAL RESULT: P({}) = {:.prec$}",
            self.x,
            self.comparison.accumulated,
            prec = DISPLAY_PRECISION,
        )?;
        writeln!(
            f,
            "Verification (direct computation): {:.prec$}",
            self.comparison.reference,
            prec = DISPLAY_PRECISION,
        )?;
        writeln!(
            f,
            "Difference: {:.prec$}",
            self.comparison.difference(),
            prec = DISPLAY_PRECISION,
        )
    }
}

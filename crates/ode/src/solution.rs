use std::fmt;

use thiserror::Error;

/// Why an integration stopped before reaching the end of its span.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IntegrationFailure {
    /// The error controller asked for a step smaller than the floating-point spacing allows.
    #[error("required step size is less than spacing between numbers at t = {t}")]
    StepSizeTooSmall { t: f64 },
    /// The state or its derivative stopped being finite.
    #[error("state or derivative became non-finite at t = {t}")]
    NonFiniteState { t: f64 },
}

impl IntegrationFailure {
    /// Time of the last good sample when the failure was detected.
    pub fn time(&self) -> f64 {
        match *self {
            IntegrationFailure::StepSizeTooSmall { t }
            | IntegrationFailure::NonFiniteState { t } => t,
        }
    }
}

/// Terminal status of one integration pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverStatus {
    /// The end of the span was reached.
    Finished,
    Failed(IntegrationFailure),
}

impl SolverStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, SolverStatus::Finished)
    }

    pub fn failure(&self) -> Option<IntegrationFailure> {
        match self {
            SolverStatus::Finished => None,
            SolverStatus::Failed(failure) => Some(*failure),
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Finished => write!(
                f,
                "the solver successfully reached the end of the integration interval"
            ),
            SolverStatus::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

/// Work counters for one integration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub fn_evals: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

/// Samples produced by [`crate::solve`]: the initial point followed by every accepted step.
#[derive(Debug, Clone)]
pub struct OdeSolution<const N: usize> {
    pub t: Vec<f64>,
    pub y: Vec<[f64; N]>,
    pub status: SolverStatus,
    pub stats: Stats,
}

impl<const N: usize> OdeSolution<N> {
    pub fn success(&self) -> bool {
        self.status.is_success()
    }

    /// Last sample, which is the end of the span when the integration finished.
    pub fn last(&self) -> Option<(f64, &[f64; N])> {
        self.t.last().copied().zip(self.y.last())
    }

    /// One state variable across all samples (a row of the state matrix).
    ///
    /// # Panics
    /// When `index >= N`.
    pub fn component(&self, index: usize) -> Vec<f64> {
        assert!(index < N, "component {index} out of range for a {N}-dimensional state");
        self.y.iter().map(|y| y[index]).collect()
    }
}

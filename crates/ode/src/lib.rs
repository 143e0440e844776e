//! Adaptive embedded Runge–Kutta integration.
//!
//! The solver is a Dormand–Prince 5(4) pair with automatic initial step selection and
//! error-per-step control. It integrates fixed-size systems described by [`OdeSystem`] over a
//! time span and returns every accepted step:
//!
//! ```
//! use astro_ode::{IntegratorOptions, OdeSystem, Tolerances, solve};
//!
//! struct Decay;
//!
//! impl OdeSystem<1> for Decay {
//!     fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) {
//!         dydt[0] = -y[0];
//!     }
//! }
//!
//! let options = IntegratorOptions::with_tolerances(Tolerances::new(1e-10, 1e-12));
//! let solution = solve(&Decay, (0.0, 1.0), &[1.0], &options).unwrap();
//! assert!(solution.success());
//! ```
//!
//! A configuration that cannot be used at all (non-finite span, negative tolerance) is an
//! [`SolverError`]. Everything that goes wrong *while* integrating is reported through
//! [`SolverStatus`] on the returned [`OdeSolution`], together with the samples accepted
//! before the failure.

mod solution;
mod solver;
mod tableau;

pub use solution::{IntegrationFailure, OdeSolution, SolverStatus, Stats};
pub use solver::{IntegratorOptions, SolverError, Tolerances, solve};

/// A first-order system `dy/dt = f(t, y)` with `N` state variables.
pub trait OdeSystem<const N: usize> {
    /// Evaluate the right-hand side at `(t, y)` into `dydt`.
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

//! Impulsive manoeuvre utilities: Lambert solver, Hohmann transfers and rendezvous phasing.

pub mod lambert;
pub mod rendezvous;
pub mod transfers;

pub use lambert::{LambertSolution, LambertSolverError, solve as lambert_solve, solve_prograde};
pub use rendezvous::{RendezvousPlan, plan_rendezvous};
pub use transfers::{HohmannResult, ImpulsiveError, hohmann};

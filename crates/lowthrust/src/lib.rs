//! Low-thrust trajectory propagation.
//!
//! A spacecraft is described by a 7-component state (position, velocity, mass). Its motion
//! under point-mass gravity and a constant, always-prograde thrust is integrated with the
//! adaptive Dormand–Prince solver from `astro_ode`, producing every accepted step as a
//! [`TrajectorySample`].

pub mod dynamics;
pub mod propagator;
pub mod state;
pub mod trajectory;

pub use dynamics::{LowThrustDynamics, ThrustUnits};
pub use propagator::{
    DEFAULT_TOLERANCES, InputError, InputPolicy, LowThrustRequest, PropagationError,
    PropagationSettings, propagate,
};
pub use state::{STATE_DIM, SpacecraftState};
pub use trajectory::{Trajectory, TrajectorySample};

pub use astro_ode::{IntegrationFailure, IntegratorOptions, SolverStatus, Stats, Tolerances};
pub use astro_propulsion::Thruster;

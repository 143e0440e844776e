use astro_core::constants::MU_EARTH_KM3_S2;
use astro_core::vector;
use astro_ode::{IntegrationFailure, IntegratorOptions, SolverError, Tolerances};
use astro_propulsion::{PropulsionError, Thruster};
use log::{debug, warn};
use thiserror::Error;

use crate::dynamics::{LowThrustDynamics, ThrustUnits};
use crate::state::SpacecraftState;
use crate::trajectory::Trajectory;

/// Relative and absolute tolerance used unless the caller picks others.
pub const DEFAULT_TOLERANCES: Tolerances = Tolerances::new(1e-9, 1e-9);

/// What to do with initial conditions the model cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPolicy {
    /// Reject degenerate inputs with [`PropagationError::InvalidInput`] before integrating.
    #[default]
    Validate,
    /// Integrate whatever is given. Degenerate inputs surface as a failed solver status.
    Permissive,
}

/// Per-call physical and numerical configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationSettings {
    pub mu_km3_s2: f64,
    pub integrator: IntegratorOptions,
    pub thrust_units: ThrustUnits,
    pub input_policy: InputPolicy,
}

impl Default for PropagationSettings {
    fn default() -> Self {
        Self {
            mu_km3_s2: MU_EARTH_KM3_S2,
            integrator: IntegratorOptions::with_tolerances(DEFAULT_TOLERANCES),
            thrust_units: ThrustUnits::default(),
            input_policy: InputPolicy::default(),
        }
    }
}

/// Initial conditions, engine and time span of one propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct LowThrustRequest {
    pub initial: SpacecraftState,
    pub thruster: Thruster,
    /// `(start, end)` in seconds.
    pub t_span_s: (f64, f64),
}

impl LowThrustRequest {
    pub fn new(
        position_km: [f64; 3],
        velocity_km_s: [f64; 3],
        thruster: Thruster,
        mass_kg: f64,
        t_span_s: (f64, f64),
    ) -> Self {
        Self {
            initial: SpacecraftState::new(position_km, velocity_km_s, mass_kg),
            thruster,
            t_span_s,
        }
    }
}

/// Initial conditions rejected under [`InputPolicy::Validate`].
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("initial state contains non-finite values")]
    NonFiniteState,
    #[error("initial position must be non-zero")]
    ZeroPosition,
    #[error("initial velocity must be non-zero, thrust direction is undefined")]
    ZeroVelocity,
    #[error("initial mass must be positive (got {0} kg)")]
    NonPositiveMass(f64),
    #[error(transparent)]
    Thruster(#[from] PropulsionError),
    #[error("gravitational parameter must be finite and positive (got {0} km^3/s^2)")]
    InvalidMu(f64),
    #[error("time span must be finite with end >= start (got {0} .. {1})")]
    InvalidSpan(f64, f64),
    #[error("propellant is exhausted after {depletion_s:.1} s, before the {span_s:.1} s span ends")]
    MassDepleted { depletion_s: f64, span_s: f64 },
}

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid propagation input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("integrator configuration rejected: {0}")]
    Solver(#[from] SolverError),
    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationFailure),
}

/// Integrate the low-thrust equations of motion over `request.t_span_s`.
///
/// A failure *during* integration is not an `Err`: the returned [`Trajectory`] carries the
/// samples reached so far and a failed status, and callers must check
/// [`Trajectory::success`] (or use [`Trajectory::into_checked`]) before trusting the final
/// sample. `Err` is reserved for inputs or settings rejected up front.
pub fn propagate(
    request: &LowThrustRequest,
    settings: &PropagationSettings,
) -> Result<Trajectory, PropagationError> {
    if settings.input_policy == InputPolicy::Validate {
        validate(request, settings)?;
    }

    let dynamics =
        LowThrustDynamics::new(settings.mu_km3_s2, request.thruster, settings.thrust_units);
    let (t0, tf) = request.t_span_s;
    debug!(
        "propagating {t0} -> {tf} s: thrust {} N, isp {} s, m0 {} kg, units {:?}",
        request.thruster.thrust_newtons,
        request.thruster.isp_seconds,
        request.initial.mass_kg,
        settings.thrust_units
    );

    let solution = astro_ode::solve(
        &dynamics,
        request.t_span_s,
        &request.initial.to_array(),
        &settings.integrator,
    )?;
    if let Some(failure) = solution.status.failure() {
        warn!("low-thrust propagation stopped short of t = {tf}: {failure}");
    }
    Ok(Trajectory::from(solution))
}

fn validate(request: &LowThrustRequest, settings: &PropagationSettings) -> Result<(), InputError> {
    let initial = &request.initial;
    if !initial.is_finite() {
        return Err(InputError::NonFiniteState);
    }
    if vector::norm(&initial.position_km) == 0.0 {
        return Err(InputError::ZeroPosition);
    }
    if vector::norm(&initial.velocity_km_s) == 0.0 {
        return Err(InputError::ZeroVelocity);
    }
    if initial.mass_kg <= 0.0 {
        return Err(InputError::NonPositiveMass(initial.mass_kg));
    }
    request.thruster.validate()?;
    if !settings.mu_km3_s2.is_finite() || settings.mu_km3_s2 <= 0.0 {
        return Err(InputError::InvalidMu(settings.mu_km3_s2));
    }

    let (t0, tf) = request.t_span_s;
    if !t0.is_finite() || !tf.is_finite() || tf < t0 {
        return Err(InputError::InvalidSpan(t0, tf));
    }
    let span_s = tf - t0;
    if request.thruster.mass_after(initial.mass_kg, span_s) <= 0.0 {
        return Err(InputError::MassDepleted {
            depletion_s: request.thruster.burn_time_s(initial.mass_kg),
            span_s,
        });
    }
    Ok(())
}

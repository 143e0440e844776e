//! Equations of motion: inverse-square gravity plus constant prograde thrust.

use astro_core::units;
use astro_core::vector::{self, Vector3};
use astro_ode::OdeSystem;
use astro_propulsion::Thruster;
use serde::Deserialize;

use crate::state::{STATE_DIM, SpacecraftState};

/// How `thrust / mass` (m/s²) is combined with the km/s² gravity term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrustUnits {
    /// Convert the thrust acceleration to km/s² so the whole model is in km and km/s.
    #[default]
    Consistent,
    /// Add the m/s² value to the km/s² gravity term unchanged, overstating thrust a
    /// thousandfold. Only for comparison with results computed that way.
    Legacy,
}

/// Time-invariant low-thrust two-body model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowThrustDynamics {
    pub mu_km3_s2: f64,
    pub thruster: Thruster,
    pub thrust_units: ThrustUnits,
}

impl LowThrustDynamics {
    pub fn new(mu_km3_s2: f64, thruster: Thruster, thrust_units: ThrustUnits) -> Self {
        Self {
            mu_km3_s2,
            thruster,
            thrust_units,
        }
    }

    /// `-μ r / |r|³`. Infinite or NaN at the origin.
    pub fn gravity_acceleration(&self, position_km: &Vector3) -> Vector3 {
        let r_norm = vector::norm(position_km);
        vector::scale(position_km, -self.mu_km3_s2 / r_norm.powi(3))
    }

    /// `(thrust / m) · v̂`. NaN when the velocity is zero, whatever the thrust.
    pub fn thrust_acceleration(&self, velocity_km_s: &Vector3, mass_kg: f64) -> Vector3 {
        let magnitude = units::newtons_per_kg(self.thruster.thrust_newtons, mass_kg);
        let magnitude = match self.thrust_units {
            ThrustUnits::Consistent => units::ms2_to_kms2(magnitude),
            ThrustUnits::Legacy => magnitude,
        };
        vector::scale(&vector::unit(velocity_km_s), magnitude)
    }

    /// `dm/dt = -thrust / (isp · g0)` (kg/s).
    pub fn mass_rate_kg_s(&self) -> f64 {
        -self.thruster.mass_flow_rate_kg_s()
    }

    /// Time derivative of a state: `[v, a_gravity + a_thrust, dm/dt]`.
    pub fn derivative(&self, state: &SpacecraftState) -> [f64; STATE_DIM] {
        let gravity = self.gravity_acceleration(&state.position_km);
        let thrust = self.thrust_acceleration(&state.velocity_km_s, state.mass_kg);
        let [vx, vy, vz] = state.velocity_km_s;
        let [ax, ay, az] = vector::add(&gravity, &thrust);
        [vx, vy, vz, ax, ay, az, self.mass_rate_kg_s()]
    }
}

impl OdeSystem<STATE_DIM> for LowThrustDynamics {
    fn rhs(&self, _t: f64, y: &[f64; STATE_DIM], dydt: &mut [f64; STATE_DIM]) {
        *dydt = self.derivative(&SpacecraftState::from_array(y));
    }
}

use astro_core::vector::{self, Vector3};
use serde::Deserialize;

/// Number of scalars in a packed [`SpacecraftState`].
pub const STATE_DIM: usize = 7;

/// Position (km), velocity (km/s) and instantaneous mass (kg) of the spacecraft.
///
/// Packed layout: `[x, y, z, vx, vy, vz, m]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpacecraftState {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    pub mass_kg: f64,
}

impl SpacecraftState {
    pub fn new(position_km: Vector3, velocity_km_s: Vector3, mass_kg: f64) -> Self {
        Self {
            position_km,
            velocity_km_s,
            mass_kg,
        }
    }

    pub fn to_array(&self) -> [f64; STATE_DIM] {
        let [x, y, z] = self.position_km;
        let [vx, vy, vz] = self.velocity_km_s;
        [x, y, z, vx, vy, vz, self.mass_kg]
    }

    pub fn from_array(y: &[f64; STATE_DIM]) -> Self {
        Self {
            position_km: [y[0], y[1], y[2]],
            velocity_km_s: [y[3], y[4], y[5]],
            mass_kg: y[6],
        }
    }

    pub fn radius_km(&self) -> f64 {
        vector::norm(&self.position_km)
    }

    pub fn speed_km_s(&self) -> f64 {
        vector::norm(&self.velocity_km_s)
    }

    pub fn is_finite(&self) -> bool {
        vector::is_finite(&self.position_km)
            && vector::is_finite(&self.velocity_km_s)
            && self.mass_kg.is_finite()
    }

    /// Specific mechanical energy of the two-body orbit through this state (km²/s²).
    pub fn specific_energy(&self, mu_km3_s2: f64) -> f64 {
        astro_orbits::specific_energy(mu_km3_s2, &self.position_km, &self.velocity_km_s)
    }

    /// Specific angular momentum `r × v` (km²/s).
    pub fn angular_momentum(&self) -> Vector3 {
        astro_orbits::specific_angular_momentum(&self.position_km, &self.velocity_km_s)
    }
}

impl From<[f64; STATE_DIM]> for SpacecraftState {
    fn from(y: [f64; STATE_DIM]) -> Self {
        Self::from_array(&y)
    }
}

impl From<SpacecraftState> for [f64; STATE_DIM] {
    fn from(state: SpacecraftState) -> Self {
        state.to_array()
    }
}

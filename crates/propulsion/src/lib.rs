//! Constant-thrust engine descriptors and vehicle mass properties.

use astro_core::constants::G0_M_S2;
use serde::Deserialize;
use thiserror::Error;

/// A constant-thrust, constant-specific-impulse engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thruster {
    pub thrust_newtons: f64,
    pub isp_seconds: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum PropulsionError {
    #[error("thrust must be finite and non-negative (got {0} N)")]
    InvalidThrust(f64),
    #[error("specific impulse must be finite and positive (got {0} s)")]
    InvalidSpecificImpulse(f64),
    #[error("dry mass must be positive and propellant mass non-negative")]
    InvalidMass,
}

impl Thruster {
    pub fn new(thrust_newtons: f64, isp_seconds: f64) -> Self {
        Self {
            thrust_newtons,
            isp_seconds,
        }
    }

    /// Check the engine describes a physical thruster. Zero thrust (a coasting arc) is allowed.
    pub fn validate(&self) -> Result<(), PropulsionError> {
        if !self.thrust_newtons.is_finite() || self.thrust_newtons < 0.0 {
            return Err(PropulsionError::InvalidThrust(self.thrust_newtons));
        }
        if !self.isp_seconds.is_finite() || self.isp_seconds <= 0.0 {
            return Err(PropulsionError::InvalidSpecificImpulse(self.isp_seconds));
        }
        Ok(())
    }

    /// Effective exhaust velocity `isp · g0` (m/s).
    pub fn exhaust_velocity_m_s(&self) -> f64 {
        self.isp_seconds * G0_M_S2
    }

    /// Propellant consumption `thrust / (isp · g0)` (kg/s, positive).
    pub fn mass_flow_rate_kg_s(&self) -> f64 {
        self.thrust_newtons / self.exhaust_velocity_m_s()
    }

    /// Mass remaining after burning for `duration_s` from `initial_mass_kg`.
    pub fn mass_after(&self, initial_mass_kg: f64, duration_s: f64) -> f64 {
        initial_mass_kg - self.mass_flow_rate_kg_s() * duration_s
    }

    /// Burn time until `propellant_kg` is exhausted; infinite for a zero-thrust engine.
    pub fn burn_time_s(&self, propellant_kg: f64) -> f64 {
        let flow = self.mass_flow_rate_kg_s();
        if flow == 0.0 {
            f64::INFINITY
        } else {
            propellant_kg / flow
        }
    }
}

/// Vehicle definition used to bound propagation spans by available propellant.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub dry_mass_kg: f64,
    pub propellant_mass_kg: f64,
    pub thruster: Thruster,
}

impl Vehicle {
    /// Convenience accessor for total initial mass.
    pub fn initial_mass_kg(&self) -> f64 {
        self.dry_mass_kg + self.propellant_mass_kg
    }

    pub fn validate(&self) -> Result<(), PropulsionError> {
        let dry_ok = self.dry_mass_kg.is_finite() && self.dry_mass_kg > 0.0;
        let propellant_ok = self.propellant_mass_kg.is_finite() && self.propellant_mass_kg >= 0.0;
        if !dry_ok || !propellant_ok {
            return Err(PropulsionError::InvalidMass);
        }
        self.thruster.validate()
    }

    /// Longest burn before the tanks run dry.
    pub fn max_burn_time_s(&self) -> f64 {
        self.thruster.burn_time_s(self.propellant_mass_kg)
    }

    /// Ideal delta-v from the rocket equation (km/s).
    pub fn delta_v_capacity_km_s(&self) -> f64 {
        let ratio = self.initial_mass_kg() / self.dry_mass_kg;
        astro_core::units::m_to_km(self.thruster.exhaust_velocity_m_s() * ratio.ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ion() -> Thruster {
        Thruster::new(0.01, 3000.0)
    }

    #[test]
    fn mass_flow_uses_standard_gravity() {
        let expected = 0.01 / (3000.0 * 9.80665);
        assert!((ion().mass_flow_rate_kg_s() - expected).abs() < 1e-20);
        assert!((ion().mass_after(500.0, 86_400.0) - (500.0 - expected * 86_400.0)).abs() < 1e-12);
    }

    #[test]
    fn coasting_engine_never_runs_dry() {
        let coast = Thruster::new(0.0, 3000.0);
        assert!(coast.validate().is_ok());
        assert!(coast.burn_time_s(10.0).is_infinite());
    }

    #[test]
    fn rejects_unphysical_engines() {
        assert_eq!(
            Thruster::new(-1.0, 300.0).validate(),
            Err(PropulsionError::InvalidThrust(-1.0))
        );
        assert_eq!(
            Thruster::new(1.0, 0.0).validate(),
            Err(PropulsionError::InvalidSpecificImpulse(0.0))
        );
    }

    #[test]
    fn vehicle_capacity_follows_rocket_equation() {
        let vehicle = Vehicle {
            name: "Ion Tug".to_string(),
            dry_mass_kg: 400.0,
            propellant_mass_kg: 100.0,
            thruster: ion(),
        };
        assert!(vehicle.validate().is_ok());
        assert_eq!(vehicle.initial_mass_kg(), 500.0);
        let dv = vehicle.delta_v_capacity_km_s();
        let expected = 3000.0 * 9.80665 * (500.0f64 / 400.0).ln() / 1000.0;
        assert!((dv - expected).abs() < 1e-12);
        assert!((vehicle.max_burn_time_s() - 100.0 / ion().mass_flow_rate_kg_s()).abs() < 1e-3);
    }
}

//! Perturbing accelerations for near-Earth orbits: exponential-atmosphere drag and J2.
//!
//! Positions are in km, speeds in km/s, and every acceleration is returned in km/s² so it can
//! be added to a two-body gravity term directly.

use astro_core::constants::{
    ATMOSPHERE_SCALE_HEIGHT_M, EARTH_RADIUS_KM, J2_EARTH, MU_EARTH_KM3_S2,
    SEA_LEVEL_DENSITY_KG_M3,
};
use astro_core::units::{km_to_m, kms_to_ms, m_to_km};
use astro_core::vector::{self, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PerturbationError {
    #[error("atmosphere scale height must be positive")]
    InvalidScaleHeight,
    #[error("surface density must be non-negative")]
    InvalidDensity,
    #[error("drag coefficient must be non-negative")]
    InvalidDragCoefficient,
    #[error("reference area must be positive")]
    InvalidArea,
    #[error("vehicle mass must be positive")]
    InvalidMass,
    #[error("position must be finite and non-zero")]
    DegeneratePosition,
    #[error("body radius and gravitational parameter must be positive")]
    InvalidBody,
}

/// Exponential atmosphere `ρ(h) = ρ0 · exp(−h / H)` above a spherical body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub surface_density_kg_m3: f64,
    pub scale_height_m: f64,
    pub body_radius_km: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            surface_density_kg_m3: SEA_LEVEL_DENSITY_KG_M3,
            scale_height_m: ATMOSPHERE_SCALE_HEIGHT_M,
            body_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl Atmosphere {
    pub fn validate(&self) -> Result<(), PerturbationError> {
        if !positive(self.scale_height_m) {
            return Err(PerturbationError::InvalidScaleHeight);
        }
        if !non_negative(self.surface_density_kg_m3) {
            return Err(PerturbationError::InvalidDensity);
        }
        Ok(())
    }

    /// Density (kg/m³) at an altitude in km.
    pub fn density_kg_m3(&self, altitude_km: f64) -> f64 {
        self.surface_density_kg_m3 * (-km_to_m(altitude_km) / self.scale_height_m).exp()
    }
}

/// Aerodynamic properties of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragParameters {
    pub drag_coefficient: f64,
    pub area_m2: f64,
    pub mass_kg: f64,
}

impl DragParameters {
    pub fn validate(&self) -> Result<(), PerturbationError> {
        if !non_negative(self.drag_coefficient) {
            return Err(PerturbationError::InvalidDragCoefficient);
        }
        if !positive(self.area_m2) {
            return Err(PerturbationError::InvalidArea);
        }
        if !positive(self.mass_kg) {
            return Err(PerturbationError::InvalidMass);
        }
        Ok(())
    }
}

/// Drag deceleration magnitude (km/s²) at `altitude_km` and `speed_km_s`.
pub fn drag_magnitude(
    atmosphere: &Atmosphere,
    vehicle: &DragParameters,
    altitude_km: f64,
    speed_km_s: f64,
) -> Result<f64, PerturbationError> {
    atmosphere.validate()?;
    vehicle.validate()?;
    let rho = atmosphere.density_kg_m3(altitude_km);
    let v_m_s = kms_to_ms(speed_km_s);
    let force_n = 0.5 * vehicle.drag_coefficient * vehicle.area_m2 * rho * v_m_s * v_m_s;
    Ok(m_to_km(force_n / vehicle.mass_kg))
}

/// Drag acceleration vector (km/s²), opposing the velocity.
///
/// Altitude is measured from the atmosphere's body radius. Zero velocity gives zero drag.
pub fn drag_acceleration(
    atmosphere: &Atmosphere,
    vehicle: &DragParameters,
    position_km: &Vector3,
    velocity_km_s: &Vector3,
) -> Result<Vector3, PerturbationError> {
    check_position(position_km)?;
    let speed = vector::norm(velocity_km_s);
    let altitude_km = vector::norm(position_km) - atmosphere.body_radius_km;
    let magnitude = drag_magnitude(atmosphere, vehicle, altitude_km, speed)?;
    if speed == 0.0 {
        return Ok([0.0; 3]);
    }
    Ok(vector::scale(velocity_km_s, -magnitude / speed))
}

/// Oblate central body for the J2 term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct J2Parameters {
    pub mu_km3_s2: f64,
    pub j2: f64,
    pub body_radius_km: f64,
}

impl Default for J2Parameters {
    fn default() -> Self {
        Self {
            mu_km3_s2: MU_EARTH_KM3_S2,
            j2: J2_EARTH,
            body_radius_km: EARTH_RADIUS_KM,
        }
    }
}

/// J2 zonal-harmonic acceleration (km/s²) in a body-centred frame with z along the spin axis.
pub fn j2_acceleration(
    params: &J2Parameters,
    position_km: &Vector3,
) -> Result<Vector3, PerturbationError> {
    check_position(position_km)?;
    if !positive(params.mu_km3_s2) || !positive(params.body_radius_km) {
        return Err(PerturbationError::InvalidBody);
    }
    let [x, y, z] = *position_km;
    let r = vector::norm(position_km);
    let r2 = r * r;
    let factor =
        -1.5 * params.j2 * params.mu_km3_s2 * params.body_radius_km.powi(2) / r2.powi(2) / r;
    let z_ratio = 5.0 * z * z / r2;
    Ok([
        factor * x * (1.0 - z_ratio),
        factor * y * (1.0 - z_ratio),
        factor * z * (3.0 - z_ratio),
    ])
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_position(position_km: &Vector3) -> Result<(), PerturbationError> {
    if !vector::is_finite(position_km) || vector::norm(position_km) == 0.0 {
        return Err(PerturbationError::DegeneratePosition);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubesat() -> DragParameters {
        DragParameters {
            drag_coefficient: 2.2,
            area_m2: 0.01,
            mass_kg: 1.0,
        }
    }

    #[test]
    fn density_falls_by_e_per_scale_height() {
        let atmosphere = Atmosphere::default();
        assert_eq!(atmosphere.density_kg_m3(0.0), 1.225);
        let ratio = atmosphere.density_kg_m3(8.5) / atmosphere.density_kg_m3(0.0);
        assert!((ratio - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn drag_magnitude_at_sea_level() {
        let a = drag_magnitude(&Atmosphere::default(), &cubesat(), 0.0, 1.0).expect("drag");
        // 0.5 * 2.2 * 0.01 * 1.225 * 1000^2 N on 1 kg, in km/s^2.
        assert!((a - 13.475).abs() < 1e-9, "a = {a}");
    }

    #[test]
    fn drag_vector_opposes_velocity() {
        let atmosphere = Atmosphere::default();
        let a = drag_acceleration(&atmosphere, &cubesat(), &[6571.0, 0.0, 0.0], &[0.0, 7.8, 0.0])
            .expect("drag");
        let magnitude = drag_magnitude(&atmosphere, &cubesat(), 200.0, 7.8).expect("drag");
        assert_eq!(a[0], 0.0);
        assert!(a[1] < 0.0);
        assert!((a[1] + magnitude).abs() < 1e-18);
        let still = drag_acceleration(&atmosphere, &cubesat(), &[6571.0, 0.0, 0.0], &[0.0; 3])
            .expect("drag");
        assert_eq!(still, [0.0; 3]);
    }

    #[test]
    fn drag_rejects_bad_vehicle() {
        let mut vehicle = cubesat();
        vehicle.mass_kg = 0.0;
        assert_eq!(
            drag_magnitude(&Atmosphere::default(), &vehicle, 100.0, 7.8),
            Err(PerturbationError::InvalidMass)
        );
        let thin = Atmosphere {
            scale_height_m: 0.0,
            ..Atmosphere::default()
        };
        assert_eq!(
            drag_magnitude(&thin, &cubesat(), 100.0, 7.8),
            Err(PerturbationError::InvalidScaleHeight)
        );
    }

    #[test]
    fn j2_in_the_equatorial_plane_points_inward() {
        let params = J2Parameters::default();
        let r = 7000.0;
        let a = j2_acceleration(&params, &[r, 0.0, 0.0]).expect("j2");
        let expected = -1.5 * J2_EARTH * MU_EARTH_KM3_S2 * EARTH_RADIUS_KM.powi(2) / r.powi(4);
        assert!((a[0] - expected).abs() < 1e-15);
        assert_eq!(a[1], 0.0);
        assert_eq!(a[2], 0.0);
    }

    #[test]
    fn j2_over_the_pole_points_outward() {
        let a = j2_acceleration(&J2Parameters::default(), &[0.0, 0.0, 7000.0]).expect("j2");
        assert!(a[2] > 0.0);
        assert_eq!(
            j2_acceleration(&J2Parameters::default(), &[0.0; 3]),
            Err(PerturbationError::DegeneratePosition)
        );
    }
}

//! Analytic estimators for impulsive transfers in the coplanar, circular limit.
//!
//! Returns delta-v components and time of flight for two-body Keplerian motion with a
//! specified central GM.

use std::f64::consts::PI;

use astro_orbits::{circular_speed, vis_viva_speed};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ImpulsiveError {
    #[error("orbit radius must be finite and positive (got {0} km)")]
    InvalidRadius(f64),
    #[error("gravitational parameter must be finite and positive (got {0} km^3/s^2)")]
    InvalidMu(f64),
    #[error("phase angle must be finite (got {0} deg)")]
    InvalidPhaseAngle(f64),
    #[error("orbits share a radius and are out of phase, the phase angle never changes")]
    NoRelativeDrift,
}

/// Result for a Hohmann transfer between circular, coplanar orbits of radii r1 and r2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannResult {
    pub dv1_km_s: f64,      // signed: negative for inward (retro) burn
    pub dv2_km_s: f64,      // signed: negative for retro capture when arriving inward
    pub dv_total_km_s: f64, // |dv1| + |dv2|
    pub tof_seconds: f64,
}

pub(crate) fn check_radius(radius_km: f64) -> Result<f64, ImpulsiveError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(ImpulsiveError::InvalidRadius(radius_km))
    }
}

pub(crate) fn check_mu(mu_km3_s2: f64) -> Result<f64, ImpulsiveError> {
    if mu_km3_s2.is_finite() && mu_km3_s2 > 0.0 {
        Ok(mu_km3_s2)
    } else {
        Err(ImpulsiveError::InvalidMu(mu_km3_s2))
    }
}

/// Compute the classical Hohmann transfer between two circular coplanar orbits.
///
/// Inputs:
/// - `r1_km`: initial circular orbit radius (km)
/// - `r2_km`: target circular orbit radius (km)
/// - `mu_km3_s2`: gravitational parameter of central body (km^3/s^2)
pub fn hohmann(r1_km: f64, r2_km: f64, mu_km3_s2: f64) -> Result<HohmannResult, ImpulsiveError> {
    let r1_km = check_radius(r1_km)?;
    let r2_km = check_radius(r2_km)?;
    let mu = check_mu(mu_km3_s2)?;

    let v1 = circular_speed(mu, r1_km);
    let v2 = circular_speed(mu, r2_km);
    let a_t = 0.5 * (r1_km + r2_km);
    let tof = PI * (a_t.powi(3) / mu).sqrt();

    // Transfer periapsis speed (at r1) and apoapsis speed (at r2)
    let v_t1 = vis_viva_speed(mu, r1_km, a_t);
    let v_t2 = vis_viva_speed(mu, r2_km, a_t);

    let dv1 = v_t1 - v1; // positive for outward, negative for inward
    let dv2 = v2 - v_t2; // positive for outward (prograde capture), negative for inward

    Ok(HohmannResult {
        dv1_km_s: dv1,
        dv2_km_s: dv2,
        dv_total_km_s: dv1.abs() + dv2.abs(),
        tof_seconds: tof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_core::constants::MU_EARTH_KM3_S2 as MU;

    #[test]
    fn same_radius_needs_no_burns() {
        let h = hohmann(7000.0, 7000.0, MU).expect("hohmann");
        assert!(h.dv_total_km_s.abs() < 1e-12);
        let half_period = PI * (7000.0f64.powi(3) / MU).sqrt();
        assert!((h.tof_seconds - half_period).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(hohmann(0.0, 7000.0, MU), Err(ImpulsiveError::InvalidRadius(0.0)));
        assert_eq!(hohmann(7000.0, -1.0, MU), Err(ImpulsiveError::InvalidRadius(-1.0)));
        assert!(matches!(
            hohmann(7000.0, 42_164.0, f64::NAN),
            Err(ImpulsiveError::InvalidMu(_))
        ));
    }
}

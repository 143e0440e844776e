//! Phasing for a Hohmann rendezvous between two coplanar circular orbits.
//!
//! The phase angle is the target's angular lead over the chaser, measured in the direction of
//! motion. The chaser burns when the lead equals `π − ω_target · t_transfer`, so both arrive
//! at the transfer apse together.

use std::f64::consts::{PI, TAU};

use astro_core::units::{deg_to_rad, rad_to_deg};
use astro_orbits::mean_motion;

use crate::transfers::{HohmannResult, ImpulsiveError, check_mu, check_radius, hohmann};

/// Phase angles closer than this to the required lead count as already aligned.
const PHASE_EPSILON_RAD: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendezvousPlan {
    pub transfer: HohmannResult,
    /// Target lead at the first burn, in `[0, 360)`.
    pub required_phase_deg: f64,
    /// Time until the current phase drifts to the required one.
    pub wait_time_s: f64,
    /// Time between successive burn opportunities; infinite for equal radii.
    pub synodic_period_s: f64,
    /// Wait plus transfer.
    pub total_time_s: f64,
}

/// Plan a rendezvous from a chaser orbit to a target orbit, given the target's current lead.
pub fn plan_rendezvous(
    chaser_radius_km: f64,
    target_radius_km: f64,
    phase_angle_deg: f64,
    mu_km3_s2: f64,
) -> Result<RendezvousPlan, ImpulsiveError> {
    let r_chaser = check_radius(chaser_radius_km)?;
    let r_target = check_radius(target_radius_km)?;
    let mu = check_mu(mu_km3_s2)?;
    if !phase_angle_deg.is_finite() {
        return Err(ImpulsiveError::InvalidPhaseAngle(phase_angle_deg));
    }

    let transfer = hohmann(r_chaser, r_target, mu)?;
    let omega_chaser = mean_motion(mu, r_chaser);
    let omega_target = mean_motion(mu, r_target);

    let required = (PI - omega_target * transfer.tof_seconds).rem_euclid(TAU);
    let current = deg_to_rad(phase_angle_deg).rem_euclid(TAU);
    let drift = omega_target - omega_chaser;

    // Angle the lead still has to travel, in the direction it is drifting.
    let remaining = if drift > 0.0 {
        (required - current).rem_euclid(TAU)
    } else {
        (current - required).rem_euclid(TAU)
    };
    let aligned = remaining < PHASE_EPSILON_RAD || TAU - remaining < PHASE_EPSILON_RAD;

    let (wait_time_s, synodic_period_s) = if drift == 0.0 {
        if !aligned {
            return Err(ImpulsiveError::NoRelativeDrift);
        }
        (0.0, f64::INFINITY)
    } else {
        let wait = if aligned { 0.0 } else { remaining / drift.abs() };
        (wait, TAU / drift.abs())
    };

    Ok(RendezvousPlan {
        transfer,
        required_phase_deg: rad_to_deg(required),
        wait_time_s,
        synodic_period_s,
        total_time_s: wait_time_s + transfer.tof_seconds,
    })
}

use astro_core::vector::{self, Vector3};
use lambert_bate::get_velocities;
use thiserror::Error;

const TOLERANCE: f64 = 1e-8;

#[derive(Debug, Error)]
pub enum LambertSolverError {
    #[error("time of flight must be finite and positive (got {0} s)")]
    InvalidTimeOfFlight(f64),
    #[error("gravitational parameter must be finite and positive (got {0} km^3/s^2)")]
    InvalidMu(f64),
    #[error("boundary positions must be finite and non-zero")]
    DegeneratePosition,
    #[error("lambert solver failed: {0}")]
    Failure(String),
}

/// Boundary velocities of the conic arc joining two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertSolution {
    pub v1_km_s: Vector3,
    pub v2_km_s: Vector3,
}

/// Solve Lambert's problem between `r1_km` and `r2_km` for the given time of flight.
///
/// `short` picks the transfer angle below 180 degrees.
pub fn solve(
    r1_km: Vector3,
    r2_km: Vector3,
    time_of_flight_s: f64,
    mu_km3_s2: f64,
    short: bool,
) -> Result<LambertSolution, LambertSolverError> {
    if !time_of_flight_s.is_finite() || time_of_flight_s <= 0.0 {
        return Err(LambertSolverError::InvalidTimeOfFlight(time_of_flight_s));
    }
    if !mu_km3_s2.is_finite() || mu_km3_s2 <= 0.0 {
        return Err(LambertSolverError::InvalidMu(mu_km3_s2));
    }
    for r in [&r1_km, &r2_km] {
        if !vector::is_finite(r) || vector::norm(r) == 0.0 {
            return Err(LambertSolverError::DegeneratePosition);
        }
    }

    let (v1_km_s, v2_km_s) = get_velocities(
        r1_km,
        r2_km,
        time_of_flight_s,
        mu_km3_s2,
        short,
        TOLERANCE,
        500,
    )
    .map_err(|e| LambertSolverError::Failure(format!("{e:?}")))?;
    Ok(LambertSolution { v1_km_s, v2_km_s })
}

/// Solve along the prograde (counter-clockwise about +z) path.
pub fn solve_prograde(
    r1_km: Vector3,
    r2_km: Vector3,
    time_of_flight_s: f64,
    mu_km3_s2: f64,
) -> Result<LambertSolution, LambertSolverError> {
    solve(r1_km, r2_km, time_of_flight_s, mu_km3_s2, is_short_way_prograde(&r1_km, &r2_km))
}

/// The short way is prograde when `(r1 × r2)·ẑ` is non-negative.
pub fn is_short_way_prograde(r1_km: &Vector3, r2_km: &Vector3) -> bool {
    vector::cross(r1_km, r2_km)[2] >= 0.0
}

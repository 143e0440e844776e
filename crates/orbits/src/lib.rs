//! Two-body orbit helpers (conic geometry and the invariants of Keplerian motion).
use std::f64::consts::TAU;

use astro_core::vector::{self, Vector3};

/// Radius on a conic orbit at the given true anomaly: `a(1 − e²) / (1 + e·cos ν)`.
///
/// Works for ellipses and, with a negative semi-major axis, hyperbolae. Beyond the asymptote
/// of a hyperbola the result is negative and meaningless.
pub fn kepler_radius(semi_major_axis_km: f64, eccentricity: f64, true_anomaly_rad: f64) -> f64 {
    let semi_latus_rectum = semi_major_axis_km * (1.0 - eccentricity * eccentricity);
    semi_latus_rectum / (1.0 + eccentricity * true_anomaly_rad.cos())
}

/// Speed on a conic orbit at radius `r` (vis-viva).
pub fn vis_viva_speed(mu_km3_s2: f64, radius_km: f64, semi_major_axis_km: f64) -> f64 {
    (mu_km3_s2 * (2.0 / radius_km - 1.0 / semi_major_axis_km)).sqrt()
}

/// Speed of a circular orbit of radius `r`.
pub fn circular_speed(mu_km3_s2: f64, radius_km: f64) -> f64 {
    (mu_km3_s2 / radius_km).sqrt()
}

/// Mean motion `sqrt(μ/a³)` (rad/s).
pub fn mean_motion(mu_km3_s2: f64, semi_major_axis_km: f64) -> f64 {
    (mu_km3_s2 / semi_major_axis_km.powi(3)).sqrt()
}

/// Period of an elliptical orbit.
pub fn orbital_period(mu_km3_s2: f64, semi_major_axis_km: f64) -> f64 {
    TAU / mean_motion(mu_km3_s2, semi_major_axis_km)
}

/// Specific mechanical energy `v²/2 − μ/r` (km²/s²).
pub fn specific_energy(mu_km3_s2: f64, position_km: &Vector3, velocity_km_s: &Vector3) -> f64 {
    let v = vector::norm(velocity_km_s);
    0.5 * v * v - mu_km3_s2 / vector::norm(position_km)
}

/// Specific angular momentum `r × v` (km²/s).
pub fn specific_angular_momentum(position_km: &Vector3, velocity_km_s: &Vector3) -> Vector3 {
    vector::cross(position_km, velocity_km_s)
}

/// Semi-major axis recovered from the specific energy, `−μ / 2ε`.
pub fn semi_major_axis(mu_km3_s2: f64, position_km: &Vector3, velocity_km_s: &Vector3) -> f64 {
    -mu_km3_s2 / (2.0 * specific_energy(mu_km3_s2, position_km, velocity_km_s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_core::constants::MU_EARTH_KM3_S2 as MU;

    #[test]
    fn kepler_radius_hits_periapsis_and_apoapsis() {
        let (a, e) = (7000.0, 0.1);
        assert!((kepler_radius(a, e, 0.0) - a * (1.0 - e)).abs() < 1e-9);
        assert!((kepler_radius(a, e, std::f64::consts::PI) - a * (1.0 + e)).abs() < 1e-9);
        let r45 = kepler_radius(a, e, 45f64.to_radians());
        assert!((r45 - 6_472.34).abs() < 0.01, "r(45°) = {r45}");
    }

    #[test]
    fn circular_orbit_invariants() {
        let r = [7000.0, 0.0, 0.0];
        let v = [0.0, circular_speed(MU, 7000.0), 0.0];
        assert!((specific_energy(MU, &r, &v) + MU / (2.0 * 7000.0)).abs() < 1e-12);
        assert!((semi_major_axis(MU, &r, &v) - 7000.0).abs() < 1e-9);
        let h = specific_angular_momentum(&r, &v);
        assert!((h[2] - (MU * 7000.0).sqrt()).abs() < 1e-9);
        assert!((vis_viva_speed(MU, 7000.0, 7000.0) - v[1]).abs() < 1e-12);
    }

    #[test]
    fn leo_period_is_about_ninety_seven_minutes() {
        let minutes = orbital_period(MU, 7000.0) / 60.0;
        assert!((minutes - 97.1).abs() < 0.2, "period = {minutes} min");
    }
}

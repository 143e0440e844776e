//! Constants, unit conversions and small vector primitives shared by every crate in the
//! astro calculator workspace.

/// Physical constants. Units are part of every name.
pub mod constants {
    /// Standard gravity used to turn specific impulse into exhaust velocity (m/s²).
    pub const G0_M_S2: f64 = 9.80665;
    /// Earth's gravitational parameter as used throughout the calculators (km³/s²).
    pub const MU_EARTH_KM3_S2: f64 = 398_600.0;
    /// Mean Earth radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Earth's second zonal harmonic.
    pub const J2_EARTH: f64 = 1.08263e-3;
    /// Sea-level atmospheric density (kg/m³).
    pub const SEA_LEVEL_DENSITY_KG_M3: f64 = 1.225;
    /// Scale height of the single-layer exponential atmosphere (m).
    pub const ATMOSPHERE_SCALE_HEIGHT_M: f64 = 8_500.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Unit conversion boundary. Kinematics are carried in km and km/s; propulsion inputs
/// arrive in SI and cross into the kinematic system only through these helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert an acceleration in m/s² to km/s².
    #[inline]
    pub fn ms2_to_kms2(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Acceleration produced by a force on a mass, in m/s².
    #[inline]
    pub fn newtons_per_kg(force_newtons: f64, mass_kg: f64) -> f64 {
        force_newtons / mass_kg
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// `v / |v|`. A zero vector yields NaN components; callers that care check the norm first.
    #[inline]
    pub fn unit(v: &Vector3) -> Vector3 {
        scale(v, 1.0 / norm(v))
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

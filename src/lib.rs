//! Orbital mechanics calculators built around a low-thrust trajectory propagator.
//!
//! The workspace crates are re-exported here so front-ends (the bundled CLIs, tests, other
//! programs) can depend on a single crate.

pub use astro_config as config;
pub use astro_core as core;
pub use astro_export as export;
pub use astro_impulsive as impulsive;
pub use astro_lowthrust as lowthrust;
pub use astro_ode as ode;
pub use astro_orbits as orbits;
pub use astro_perturbations as perturbations;
pub use astro_propulsion as propulsion;

pub mod logging;
pub mod report;
pub mod scenario;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

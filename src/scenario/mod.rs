use std::path::Path;

use astro_config::{ConfigError, ScenarioConfig};
use astro_lowthrust::{
    InputPolicy, IntegratorOptions, LowThrustRequest, PropagationError, PropagationSettings,
    Tolerances, Trajectory, propagate,
};
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("scenario '{name}': {source}")]
    Propagation {
        name: String,
        #[source]
        source: PropagationError,
    },
}

/// A scenario file entry resolved into propagator inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub request: LowThrustRequest,
    pub settings: PropagationSettings,
}

impl From<&ScenarioConfig> for Scenario {
    fn from(config: &ScenarioConfig) -> Self {
        let request = LowThrustRequest {
            initial: config.initial_state,
            thruster: config.thruster,
            t_span_s: (config.span.start_s, config.span.end_s),
        };

        let integrator = &config.integrator;
        let mut options =
            IntegratorOptions::with_tolerances(Tolerances::new(integrator.rtol, integrator.atol));
        options.first_step = integrator.first_step_s;
        if let Some(max_step) = integrator.max_step_s {
            options.max_step = max_step;
        }

        let settings = PropagationSettings {
            mu_km3_s2: config.physics.mu_km3_s2,
            integrator: options,
            thrust_units: config.physics.thrust_units,
            input_policy: if integrator.validate_inputs {
                InputPolicy::Validate
            } else {
                InputPolicy::Permissive
            },
        };

        Self {
            name: config.name.clone(),
            request,
            settings,
        }
    }
}

impl Scenario {
    /// Propagate this scenario. A failed solver status is still an `Ok` trajectory.
    pub fn run(&self) -> Result<Trajectory, ScenarioError> {
        info!("running scenario '{}'", self.name);
        propagate(&self.request, &self.settings).map_err(|source| ScenarioError::Propagation {
            name: self.name.clone(),
            source,
        })
    }
}

/// Load every scenario from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioError> {
    let configs = astro_config::load_scenarios(path)?;
    Ok(configs.iter().map(Scenario::from).collect())
}

/// Load one scenario by name, or the first in the file when `name` is `None`.
pub fn load_scenario<P: AsRef<Path>>(
    path: P,
    name: Option<&str>,
) -> Result<Scenario, ScenarioError> {
    let configs = astro_config::load_scenarios(path)?;
    let config = astro_config::select_scenario(&configs, name)?;
    Ok(Scenario::from(&config))
}

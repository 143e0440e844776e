//! Scenario files describing low-thrust propagation runs.
//!
//! A scenario names the initial state and thruster; everything else falls back to the
//! defaults of the propagator (Earth μ, one-day span, 1e-9 tolerances, consistent units,
//! input validation on).

use std::fs::File;
use std::path::{Path, PathBuf};

use astro_core::constants::{MU_EARTH_KM3_S2, SECONDS_PER_DAY};
use astro_lowthrust::{SpacecraftState, ThrustUnits, Thruster};
use serde::Deserialize;
use thiserror::Error;

/// One propagation run parsed from a scenario file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub initial_state: SpacecraftState,
    pub thruster: Thruster,
    #[serde(default)]
    pub span: SpanConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub integrator: IntegratorConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SpanConfig {
    #[serde(default)]
    pub start_s: f64,
    #[serde(default = "default_end_s")]
    pub end_s: f64,
}

impl Default for SpanConfig {
    fn default() -> Self {
        Self {
            start_s: 0.0,
            end_s: default_end_s(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    #[serde(default = "default_mu")]
    pub mu_km3_s2: f64,
    #[serde(default)]
    pub thrust_units: ThrustUnits,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mu_km3_s2: default_mu(),
            thrust_units: ThrustUnits::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct IntegratorConfig {
    #[serde(default = "default_tolerance")]
    pub rtol: f64,
    #[serde(default = "default_tolerance")]
    pub atol: f64,
    #[serde(default)]
    pub first_step_s: Option<f64>,
    #[serde(default)]
    pub max_step_s: Option<f64>,
    #[serde(default = "default_true")]
    pub validate_inputs: bool,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            rtol: default_tolerance(),
            atol: default_tolerance(),
            first_step_s: None,
            max_step_s: None,
            validate_inputs: true,
        }
    }
}

fn default_end_s() -> f64 {
    SECONDS_PER_DAY
}

fn default_mu() -> f64 {
    MU_EARTH_KM3_S2
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_true() -> bool {
    true
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("no scenarios found")]
    Empty,
}

/// Load scenarios from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let scenarios: Vec<ScenarioConfig> = load_records(path)?;
    if scenarios.is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(scenarios)
}

/// Pick a scenario by name (case-insensitive), or the first one when no name is given.
pub fn select_scenario(
    scenarios: &[ScenarioConfig],
    requested: Option<&str>,
) -> Result<ScenarioConfig, ConfigError> {
    let chosen = match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            scenarios
                .iter()
                .find(|s| s.name.to_uppercase() == upper)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))?
        }
        None => scenarios.first().ok_or(ConfigError::Empty)?,
    };
    Ok(chosen.clone())
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

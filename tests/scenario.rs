use std::fs;

use astro_calculator::lowthrust::{InputPolicy, ThrustUnits};
use astro_calculator::report;
use astro_calculator::scenario::{ScenarioError, load_scenario, load_scenarios};

const SCENARIOS_YAML: &str = r#"
- name: leo-ion
  initial_state:
    position_km: [7000.0, 0.0, 0.0]
    velocity_km_s: [0.0, 7.546, 0.0]
    mass_kg: 1000.0
  thruster: { thrust_newtons: 0.1, isp_seconds: 3000.0 }
  span: { end_s: 3600.0 }
- name: legacy-check
  initial_state:
    position_km: [7000.0, 0.0, 0.0]
    velocity_km_s: [0.0, 7.546, 0.0]
    mass_kg: 1000.0
  thruster: { thrust_newtons: 0.1, isp_seconds: 3000.0 }
  span: { start_s: 100.0, end_s: 700.0 }
  physics: { thrust_units: legacy }
  integrator: { rtol: 1.0e-8, atol: 1.0e-10, max_step_s: 30.0, validate_inputs: false }
- name: burnout
  initial_state:
    position_km: [7000.0, 0.0, 0.0]
    velocity_km_s: [0.0, 7.546, 0.0]
    mass_kg: 1.0
  thruster: { thrust_newtons: 10.0, isp_seconds: 300.0 }
"#;

fn write_scenarios() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scenarios.yaml");
    fs::write(&path, SCENARIOS_YAML).expect("write scenarios");
    (dir, path)
}

#[test]
fn scenario_defaults_map_to_propagator_settings() {
    let (_dir, path) = write_scenarios();
    let scenario = load_scenario(&path, None).expect("load");
    assert_eq!(scenario.name, "leo-ion");
    assert_eq!(scenario.request.t_span_s, (0.0, 3600.0));
    assert_eq!(scenario.settings.mu_km3_s2, 398_600.0);
    assert_eq!(scenario.settings.integrator.tolerances.rtol, 1e-9);
    assert_eq!(scenario.settings.integrator.tolerances.atol, 1e-9);
    assert!(scenario.settings.integrator.max_step.is_infinite());
    assert_eq!(scenario.settings.thrust_units, ThrustUnits::Consistent);
    assert_eq!(scenario.settings.input_policy, InputPolicy::Validate);
}

#[test]
fn scenario_overrides_map_to_propagator_settings() {
    let (_dir, path) = write_scenarios();
    let scenario = load_scenario(&path, Some("legacy-check")).expect("load");
    assert_eq!(scenario.request.t_span_s, (100.0, 700.0));
    assert_eq!(scenario.settings.integrator.tolerances.rtol, 1e-8);
    assert_eq!(scenario.settings.integrator.max_step, 30.0);
    assert_eq!(scenario.settings.thrust_units, ThrustUnits::Legacy);
    assert_eq!(scenario.settings.input_policy, InputPolicy::Permissive);

    let trajectory = scenario.run().expect("run");
    assert!(trajectory.success());
    assert_eq!(trajectory.time_s.first(), Some(&100.0));
    assert_eq!(trajectory.time_s.last(), Some(&700.0));
    assert!(trajectory.time_s.windows(2).all(|w| w[1] - w[0] <= 30.0 + 1e-9));
}

#[test]
fn depleting_scenario_is_rejected_with_its_name() {
    let (_dir, path) = write_scenarios();
    let scenarios = load_scenarios(&path).expect("load");
    assert_eq!(scenarios.len(), 3);
    let err = scenarios[2].run().expect_err("propellant runs out");
    assert!(matches!(err, ScenarioError::Propagation { ref name, .. } if name == "burnout"));
    assert!(err.to_string().contains("burnout"));
}

#[test]
fn unknown_scenario_name_is_reported() {
    let (_dir, path) = write_scenarios();
    let err = load_scenario(&path, Some("mars-cruise")).expect_err("missing");
    assert!(err.to_string().contains("mars-cruise"));
}

#[test]
fn summary_json_describes_the_run() {
    let (_dir, path) = write_scenarios();
    let scenario = load_scenario(&path, Some("leo-ion")).expect("load");
    let trajectory = scenario.run().expect("run");

    let mut buffer = Vec::new();
    report::write_summary(&mut buffer, &scenario.name, &trajectory).expect("summary");
    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("json");
    assert_eq!(value["name"], "leo-ion");
    assert_eq!(value["success"], true);
    assert_eq!(value["end_s"], 3600.0);
    assert_eq!(
        value["samples"].as_array().map(Vec::len),
        Some(trajectory.len())
    );
    let used = value["propellant_used_kg"].as_f64().expect("propellant");
    assert!((used - trajectory.propellant_used_kg()).abs() < 1e-12);
}

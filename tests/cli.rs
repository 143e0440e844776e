use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn lowthrust_prints_final_state_and_writes_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("out").join("leo.csv");

    Command::cargo_bin("lowthrust")
        .expect("binary")
        .args([
            "--position",
            "7000,0,0",
            "--velocity",
            "0,7.546,0",
            "--mass",
            "1000",
            "--thrust",
            "0.1",
            "--isp",
            "3000",
            "--duration",
            "600",
            "--csv",
        ])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final position (km)"))
        .stdout(predicate::str::contains("Final mass (kg): 999.99"));

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["time_s", "x_km", "y_km", "z_km", "vx_km_s", "vy_km_s", "vz_km_s", "mass_kg"]
    );
    let times: Vec<f64> = reader
        .records()
        .map(|row| row.expect("row")[0].parse().expect("time"))
        .collect();
    assert_eq!(times.first(), Some(&0.0));
    assert_eq!(times.last(), Some(&600.0));
}

#[test]
fn lowthrust_rejects_zero_velocity_up_front() {
    Command::cargo_bin("lowthrust")
        .expect("binary")
        .args(["--position", "7000,0,0", "--velocity", "0,0,0", "--duration", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("velocity"));
}

#[test]
fn lowthrust_permissive_reports_failed_status() {
    Command::cargo_bin("lowthrust")
        .expect("binary")
        .args([
            "--position",
            "7000,0,0",
            "--velocity",
            "0,0,0",
            "--duration",
            "60",
            "--permissive",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("non-finite"))
        .stderr(predicate::str::contains("failed"));
}

#[test]
fn lowthrust_runs_a_toml_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("coast.toml");
    fs::write(
        &config,
        r#"
name = "coast"

[initial_state]
position_km = [7000.0, 0.0, 0.0]
velocity_km_s = [0.0, 7.546, 0.0]
mass_kg = 500.0

[thruster]
thrust_newtons = 0.0
isp_seconds = 3000.0

[span]
end_s = 1200.0
"#,
    )
    .expect("write config");
    let json = dir.path().join("coast.json");

    Command::cargo_bin("lowthrust")
        .expect("binary")
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario: coast"))
        .stdout(predicate::str::contains("Final mass (kg): 500.000000"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).expect("read json")).expect("parse json");
    assert_eq!(summary["name"], "coast");
    assert_eq!(summary["end_s"], 1200.0);
}

#[test]
fn lowthrust_refuses_state_flags_alongside_a_scenario_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("unused.toml");
    fs::write(&config, "name = \"unused\"\n").expect("write config");

    for flag in ["--mass", "--thrust", "--isp", "--start", "--duration"] {
        Command::cargo_bin("lowthrust")
            .expect("binary")
            .arg("--config")
            .arg(&config)
            .args([flag, "10"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be used with"));
    }
}

#[test]
fn maneuver_hohmann_reports_total_delta_v() {
    Command::cargo_bin("maneuver")
        .expect("binary")
        .args(["hohmann", "--r1", "6678", "--r2", "42164"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dv total: 3.89"));
}

#[test]
fn maneuver_kepler_radius() {
    Command::cargo_bin("maneuver")
        .expect("binary")
        .args(["kepler", "--a", "7000", "--e", "0.1", "--nu", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("radius: 6472.3"));
}

#[test]
fn maneuver_rejects_bad_radius() {
    Command::cargo_bin("maneuver")
        .expect("binary")
        .args(["hohmann", "--r1", "0", "--r2", "42164"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius"));
}

#[test]
fn lowthrust_reports_propellant_budget() {
    Command::cargo_bin("lowthrust")
        .expect("binary")
        .args([
            "--position",
            "7000,0,0",
            "--velocity",
            "0,7.546,0",
            "--mass",
            "500",
            "--dry-mass",
            "400",
            "--thrust",
            "0.01",
            "--duration",
            "60",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delta-v capacity (km/s): 6.56"));
}

use std::path::PathBuf;

use anyhow::{Context, bail};
use astro_calculator::lowthrust::{
    InputPolicy, IntegratorOptions, LowThrustRequest, PropagationSettings, ThrustUnits, Thruster,
    Tolerances, Trajectory,
};
use astro_calculator::propulsion::Vehicle;
use astro_calculator::scenario::{self, Scenario};
use astro_calculator::{export, logging, report};
use clap::Parser;
use log::warn;

/// Propagate a spacecraft under two-body gravity and constant prograde thrust.
#[derive(Parser, Debug)]
#[command(author, version, about = "Low-thrust trajectory propagator")]
struct Cli {
    /// Scenario file (YAML list, TOML file, or directory of TOML files)
    #[arg(
        long,
        conflicts_with_all = ["position", "velocity", "mass", "thrust", "isp", "start", "duration"]
    )]
    config: Option<PathBuf>,

    /// Scenario name within the config file (defaults to the first)
    #[arg(long, requires = "config")]
    scenario: Option<String>,

    /// Initial position x,y,z in km
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    position: Option<Vec<f64>>,

    /// Initial velocity vx,vy,vz in km/s
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    velocity: Option<Vec<f64>>,

    /// Initial mass in kg
    #[arg(long, default_value_t = 1000.0)]
    mass: f64,

    /// Thrust in newtons
    #[arg(long, default_value_t = 0.1)]
    thrust: f64,

    /// Specific impulse in seconds
    #[arg(long, default_value_t = 3000.0)]
    isp: f64,

    /// Dry mass in kg; enables the propellant budget report
    #[arg(long)]
    dry_mass: Option<f64>,

    /// Start of the time span in seconds
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    start: f64,

    /// Length of the time span in seconds
    #[arg(long, default_value_t = 86_400.0)]
    duration: f64,

    /// Gravitational parameter in km^3/s^2 (Earth by default)
    #[arg(long)]
    mu: Option<f64>,

    /// Relative tolerance
    #[arg(long)]
    rtol: Option<f64>,

    /// Absolute tolerance
    #[arg(long)]
    atol: Option<f64>,

    /// Upper bound on the integrator step in seconds
    #[arg(long)]
    max_step: Option<f64>,

    /// Add thrust/mass in m/s^2 to gravity in km/s^2 without converting
    #[arg(long, default_value_t = false)]
    legacy_units: bool,

    /// Skip input validation and integrate whatever is given
    #[arg(long, default_value_t = false)]
    permissive: bool,

    /// Write every sample as CSV (use '-' for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut run = match &cli.config {
        Some(path) => scenario::load_scenario(path, cli.scenario.as_deref())
            .with_context(|| format!("loading {}", path.display()))?,
        None => scenario_from_flags(&cli)?,
    };
    apply_overrides(&cli, &mut run.settings);

    let trajectory = run.run()?;
    if let Some(path) = &cli.csv {
        let mut writer = export::writer_for_path(path)?;
        report::write_csv(writer.as_mut(), &trajectory)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.json {
        let mut writer = export::writer_for_path(path)?;
        report::write_summary(writer.as_mut(), &run.name, &trajectory)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    print_summary(&run.name, &trajectory);
    if let Some(dry_mass_kg) = cli.dry_mass {
        print_propellant_budget(&run, dry_mass_kg)?;
    }
    if let Some(failure) = trajectory.status.failure() {
        bail!("propagation of '{}' failed: {failure}", run.name);
    }
    Ok(())
}

fn scenario_from_flags(cli: &Cli) -> anyhow::Result<Scenario> {
    let position = vector_arg("position", cli.position.as_deref())?;
    let velocity = vector_arg("velocity", cli.velocity.as_deref())?;
    let request = LowThrustRequest::new(
        position,
        velocity,
        Thruster::new(cli.thrust, cli.isp),
        cli.mass,
        (cli.start, cli.start + cli.duration),
    );
    Ok(Scenario {
        name: "command-line".to_string(),
        request,
        settings: PropagationSettings::default(),
    })
}

fn vector_arg(name: &str, values: Option<&[f64]>) -> anyhow::Result<[f64; 3]> {
    match values {
        Some(&[x, y, z]) => Ok([x, y, z]),
        Some(other) => bail!("--{name} expects three comma-separated values, got {}", other.len()),
        None => bail!("--{name} is required unless --config is given"),
    }
}

fn apply_overrides(cli: &Cli, settings: &mut PropagationSettings) {
    if let Some(mu) = cli.mu {
        settings.mu_km3_s2 = mu;
    }
    let current = settings.integrator.tolerances;
    let tolerances = Tolerances::new(
        cli.rtol.unwrap_or(current.rtol),
        cli.atol.unwrap_or(current.atol),
    );
    settings.integrator = IntegratorOptions {
        tolerances,
        max_step: cli.max_step.unwrap_or(settings.integrator.max_step),
        ..settings.integrator
    };
    if cli.legacy_units {
        settings.thrust_units = ThrustUnits::Legacy;
    }
    if cli.permissive {
        settings.input_policy = InputPolicy::Permissive;
    }
}

fn print_propellant_budget(run: &Scenario, dry_mass_kg: f64) -> anyhow::Result<()> {
    let vehicle = Vehicle {
        name: run.name.clone(),
        dry_mass_kg,
        propellant_mass_kg: run.request.initial.mass_kg - dry_mass_kg,
        thruster: run.request.thruster,
    };
    vehicle
        .validate()
        .with_context(|| format!("dry mass {dry_mass_kg} kg for '{}'", vehicle.name))?;

    let (t0, tf) = run.request.t_span_s;
    let max_burn_s = vehicle.max_burn_time_s();
    println!("Delta-v capacity (km/s): {:.6}", vehicle.delta_v_capacity_km_s());
    println!("Max burn time (s): {max_burn_s:.3}");
    if tf - t0 > max_burn_s {
        warn!(
            "'{}' burns through its propellant after {max_burn_s:.1} s of a {:.1} s span",
            vehicle.name,
            tf - t0
        );
    }
    Ok(())
}

fn print_summary(name: &str, trajectory: &Trajectory) {
    println!("Scenario: {name}");
    println!("Status: {}", trajectory.status);
    println!(
        "Steps: {} accepted, {} rejected, {} evaluations",
        trajectory.stats.accepted_steps,
        trajectory.stats.rejected_steps,
        trajectory.stats.fn_evals
    );
    if let Some(last) = trajectory.final_sample() {
        let [x, y, z] = last.state.position_km;
        let [vx, vy, vz] = last.state.velocity_km_s;
        println!("Final time: {:.3} s", last.time_s);
        println!("Final position (km): [{x:.6}, {y:.6}, {z:.6}]");
        println!("Final velocity (km/s): [{vx:.9}, {vy:.9}, {vz:.9}]");
        println!("Final mass (kg): {:.6}", last.state.mass_kg);
        println!("Propellant used (kg): {:.6}", trajectory.propellant_used_kg());
    }
}

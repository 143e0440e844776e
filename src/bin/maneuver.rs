use astro_calculator::core::constants::MU_EARTH_KM3_S2;
use astro_calculator::core::units::deg_to_rad;
use astro_calculator::impulsive::{self, lambert};
use astro_calculator::logging;
use astro_calculator::orbits;
use astro_calculator::perturbations::{self, Atmosphere, DragParameters, J2Parameters};
use anyhow::bail;
use clap::{Parser, Subcommand};

/// Closed-form orbital manoeuvre and perturbation calculators.
#[derive(Parser, Debug)]
#[command(author, version, about = "Orbital manoeuvre calculators")]
struct Cli {
    /// Gravitational parameter in km^3/s^2 (Earth by default)
    #[arg(long, global = true, default_value_t = MU_EARTH_KM3_S2)]
    mu: f64,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hohmann transfer between two circular coplanar orbits
    Hohmann {
        /// Initial orbit radius in km
        #[arg(long)]
        r1: f64,
        /// Target orbit radius in km
        #[arg(long)]
        r2: f64,
    },
    /// Hohmann rendezvous with wait time for phasing
    Rendezvous {
        /// Chaser orbit radius in km
        #[arg(long)]
        chaser: f64,
        /// Target orbit radius in km
        #[arg(long)]
        target: f64,
        /// Current lead of the target over the chaser in degrees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        phase: f64,
    },
    /// Lambert boundary velocities between two positions
    Lambert {
        /// Departure position x,y,z in km
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        r1: Vec<f64>,
        /// Arrival position x,y,z in km
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        r2: Vec<f64>,
        /// Time of flight in seconds
        #[arg(long)]
        tof: f64,
        /// Take the long way (transfer angle above 180 degrees)
        #[arg(long, conflicts_with = "prograde")]
        long_way: bool,
        /// Pick the prograde direction from the geometry
        #[arg(long)]
        prograde: bool,
    },
    /// Conic radius at a true anomaly
    Kepler {
        /// Semi-major axis in km
        #[arg(long)]
        a: f64,
        /// Eccentricity
        #[arg(long)]
        e: f64,
        /// True anomaly in degrees
        #[arg(long, allow_hyphen_values = true)]
        nu: f64,
    },
    /// Atmospheric drag deceleration in an exponential atmosphere
    Drag {
        /// Altitude above the surface in km
        #[arg(long)]
        altitude: f64,
        /// Speed in km/s
        #[arg(long)]
        speed: f64,
        /// Drag coefficient
        #[arg(long, default_value_t = 2.2)]
        cd: f64,
        /// Reference area in m^2
        #[arg(long)]
        area: f64,
        /// Vehicle mass in kg
        #[arg(long)]
        mass: f64,
    },
    /// J2 oblateness acceleration at a position
    J2 {
        /// Position x,y,z in km
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        position: Vec<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mu = cli.mu;

    match cli.command {
        Command::Hohmann { r1, r2 } => {
            let h = impulsive::hohmann(r1, r2, mu)?;
            println!("dv1: {:.6} km/s", h.dv1_km_s);
            println!("dv2: {:.6} km/s", h.dv2_km_s);
            println!("dv total: {:.6} km/s", h.dv_total_km_s);
            println!("time of flight: {:.3} s ({:.3} h)", h.tof_seconds, h.tof_seconds / 3600.0);
        }
        Command::Rendezvous {
            chaser,
            target,
            phase,
        } => {
            let plan = impulsive::plan_rendezvous(chaser, target, phase, mu)?;
            println!("dv total: {:.6} km/s", plan.transfer.dv_total_km_s);
            println!("required phase: {:.4} deg", plan.required_phase_deg);
            println!("wait time: {:.3} s", plan.wait_time_s);
            println!("transfer time: {:.3} s", plan.transfer.tof_seconds);
            println!("synodic period: {:.3} s", plan.synodic_period_s);
            println!("total time: {:.3} s", plan.total_time_s);
        }
        Command::Lambert {
            r1,
            r2,
            tof,
            long_way,
            prograde,
        } => {
            let r1 = vector_arg("r1", &r1)?;
            let r2 = vector_arg("r2", &r2)?;
            let solution = if prograde {
                lambert::solve_prograde(r1, r2, tof, mu)?
            } else {
                lambert::solve(r1, r2, tof, mu, !long_way)?
            };
            let [a, b, c] = solution.v1_km_s;
            println!("v1 (km/s): [{a:.6}, {b:.6}, {c:.6}]");
            let [a, b, c] = solution.v2_km_s;
            println!("v2 (km/s): [{a:.6}, {b:.6}, {c:.6}]");
        }
        Command::Kepler { a, e, nu } => {
            let r = orbits::kepler_radius(a, e, deg_to_rad(nu));
            println!("radius: {r:.6} km");
        }
        Command::Drag {
            altitude,
            speed,
            cd,
            area,
            mass,
        } => {
            let vehicle = DragParameters {
                drag_coefficient: cd,
                area_m2: area,
                mass_kg: mass,
            };
            let atmosphere = Atmosphere::default();
            let a = perturbations::drag_magnitude(&atmosphere, &vehicle, altitude, speed)?;
            println!("density: {:.6e} kg/m^3", atmosphere.density_kg_m3(altitude));
            println!("drag deceleration: {a:.6e} km/s^2");
        }
        Command::J2 { position } => {
            let position = vector_arg("position", &position)?;
            let params = J2Parameters {
                mu_km3_s2: mu,
                ..J2Parameters::default()
            };
            let [ax, ay, az] = perturbations::j2_acceleration(&params, &position)?;
            println!("J2 acceleration (km/s^2): [{ax:.6e}, {ay:.6e}, {az:.6e}]");
        }
    }
    Ok(())
}

fn vector_arg(name: &str, values: &[f64]) -> anyhow::Result<[f64; 3]> {
    match values {
        &[x, y, z] => Ok([x, y, z]),
        other => bail!("--{name} expects three comma-separated values, got {}", other.len()),
    }
}

//! Conversions from propagated trajectories to export records.

use std::io::{self, Write};

use astro_export::summary::{self, RunSummary, Sample};
use astro_export::trajectory::{self as table, Record};
use astro_lowthrust::{SolverStatus, Trajectory};

pub fn csv_records(trajectory: &Trajectory) -> Vec<Record> {
    trajectory
        .samples()
        .map(|sample| Record {
            time_s: sample.time_s,
            position_km: sample.state.position_km,
            velocity_km_s: sample.state.velocity_km_s,
            mass_kg: sample.state.mass_kg,
        })
        .collect()
}

/// Summary of a run, or `None` for an empty trajectory.
pub fn run_summary(name: &str, trajectory: &Trajectory) -> Option<RunSummary> {
    let first = trajectory.initial_sample()?;
    let last = trajectory.final_sample()?;
    let samples = trajectory
        .samples()
        .map(|sample| Sample {
            time_s: sample.time_s,
            radius_km: sample.state.radius_km(),
            speed_km_s: sample.state.speed_km_s(),
            mass_kg: sample.state.mass_kg,
        })
        .collect();
    let status = match trajectory.status {
        SolverStatus::Finished => "finished".to_string(),
        SolverStatus::Failed(failure) => failure.to_string(),
    };
    Some(
        RunSummary {
            name: name.to_string(),
            success: trajectory.success(),
            status,
            start_s: first.time_s,
            end_s: last.time_s,
            final_position_km: last.state.position_km,
            final_velocity_km_s: last.state.velocity_km_s,
            final_mass_kg: last.state.mass_kg,
            propellant_used_kg: trajectory.propellant_used_kg(),
            fn_evals: trajectory.stats.fn_evals,
            accepted_steps: trajectory.stats.accepted_steps,
            rejected_steps: trajectory.stats.rejected_steps,
            samples,
            daily: Vec::new(),
        }
        .with_daily_aggregates(),
    )
}

pub fn write_csv(writer: &mut dyn Write, trajectory: &Trajectory) -> io::Result<()> {
    table::write_csv(writer, &csv_records(trajectory))
}

pub fn write_summary(
    writer: &mut dyn Write,
    name: &str,
    trajectory: &Trajectory,
) -> io::Result<()> {
    match run_summary(name, trajectory) {
        Some(run) => summary::write_json(writer, &run),
        None => Err(io::Error::new(io::ErrorKind::InvalidInput, "trajectory has no samples")),
    }
}

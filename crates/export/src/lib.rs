//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::{self, Write};

    const HEADER: &str = "time_s,x_km,y_km,z_km,vx_km_s,vy_km_s,vz_km_s,mass_kg";

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one propagated sample.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Record {
        pub time_s: f64,
        pub position_km: [f64; 3],
        pub velocity_km_s: [f64; 3],
        pub mass_kg: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        ///
        /// Values use shortest round-trip formatting so a reader recovers the exact state.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let [x, y, z] = self.position_km;
            let [vx, vy, vz] = self.velocity_km_s;
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                self.time_s, x, y, z, vx, vy, vz, self.mass_kg
            )
        }
    }

    /// Header plus one row per record.
    pub fn write_csv<'a, I>(writer: &mut dyn Write, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        write_header(writer)?;
        for record in records {
            record.write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod summary {
    use astro_core::constants::SECONDS_PER_DAY;
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    /// Reduced sample kept in JSON summaries.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Sample {
        pub time_s: f64,
        pub radius_km: f64,
        pub speed_km_s: f64,
        pub mass_kg: f64,
    }

    /// Last sample of each elapsed day, counted from the first sample.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct DailyAggregate {
        pub day_index: usize,
        pub time_s: f64,
        pub radius_km: f64,
        pub speed_km_s: f64,
        pub mass_kg: f64,
    }

    /// Envelope of one propagation run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary {
        pub name: String,
        pub success: bool,
        pub status: String,
        pub start_s: f64,
        pub end_s: f64,
        pub final_position_km: [f64; 3],
        pub final_velocity_km_s: [f64; 3],
        pub final_mass_kg: f64,
        pub propellant_used_kg: f64,
        pub fn_evals: usize,
        pub accepted_steps: usize,
        pub rejected_steps: usize,
        pub samples: Vec<Sample>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub daily: Vec<DailyAggregate>,
    }

    impl RunSummary {
        /// Fill `daily` when the samples cover at least one day.
        pub fn with_daily_aggregates(mut self) -> Self {
            let covered = match (self.samples.first(), self.samples.last()) {
                (Some(first), Some(last)) => last.time_s - first.time_s,
                _ => 0.0,
            };
            if covered >= SECONDS_PER_DAY {
                self.daily = aggregate_daily(&self.samples);
            }
            self
        }
    }

    /// Pretty-printed JSON, followed by a newline.
    pub fn write_json(writer: &mut dyn Write, summary: &RunSummary) -> io::Result<()> {
        to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)?;
        writer.flush()
    }

    pub fn aggregate_daily(samples: &[Sample]) -> Vec<DailyAggregate> {
        let Some(origin) = samples.first().map(|s| s.time_s) else {
            return Vec::new();
        };
        let mut daily: Vec<DailyAggregate> = Vec::new();
        for sample in samples {
            let day_index = ((sample.time_s - origin) / SECONDS_PER_DAY).floor() as usize;
            match daily.last_mut() {
                Some(last) if last.day_index == day_index => {
                    last.time_s = sample.time_s;
                    last.radius_km = sample.radius_km;
                    last.speed_km_s = sample.speed_km_s;
                    last.mass_kg = sample.mass_kg;
                }
                _ => daily.push(DailyAggregate {
                    day_index,
                    time_s: sample.time_s,
                    radius_km: sample.radius_km,
                    speed_km_s: sample.speed_km_s,
                    mass_kg: sample.mass_kg,
                }),
            }
        }
        daily
    }
}

#[cfg(test)]
mod tests {
    use super::summary::{RunSummary, Sample, aggregate_daily, write_json};
    use super::trajectory::{Record, write_csv};
    use super::writer_for_path;

    fn records() -> Vec<Record> {
        vec![
            Record {
                time_s: 0.0,
                position_km: [7000.0, 0.0, 0.0],
                velocity_km_s: [0.0, 7.5, 0.0],
                mass_kg: 500.0,
            },
            Record {
                time_s: 60.0,
                position_km: [6998.5, 449.9, 0.0],
                velocity_km_s: [-0.48, 7.48, 0.0],
                mass_kg: 499.99998,
            },
        ]
    }

    fn sample(time_s: f64, mass_kg: f64) -> Sample {
        Sample {
            time_s,
            radius_km: 7000.0,
            speed_km_s: 7.5,
            mass_kg,
        }
    }

    #[test]
    fn csv_round_trips_through_a_reader() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("run.csv");
        {
            let mut writer = writer_for_path(&path).expect("writer");
            write_csv(writer.as_mut(), &records()).expect("write");
        }

        let mut reader = csv::Reader::from_path(&path).expect("reader");
        let headers = reader.headers().expect("headers").clone();
        assert_eq!(headers.len(), 8);
        assert_eq!(&headers[0], "time_s");
        assert_eq!(&headers[7], "mass_kg");

        let rows: Vec<Vec<f64>> = reader
            .records()
            .map(|row| {
                row.expect("row")
                    .iter()
                    .map(|field| field.parse::<f64>().expect("number"))
                    .collect()
            })
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], 60.0);
        assert_eq!(rows[1][4], -0.48);
        assert_eq!(rows[1][7], 499.99998);
    }

    #[test]
    fn daily_aggregation_keeps_the_last_sample_of_each_day() {
        let samples = vec![
            sample(0.0, 500.0),
            sample(43_200.0, 499.0),
            sample(86_400.0, 498.0),
            sample(100_000.0, 497.5),
        ];
        let daily = aggregate_daily(&samples);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].time_s, 43_200.0);
        assert_eq!(daily[1].day_index, 1);
        assert_eq!(daily[1].mass_kg, 497.5);
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn short_runs_skip_daily_aggregates() {
        let summary = RunSummary {
            name: "short".into(),
            success: true,
            status: "finished".into(),
            start_s: 0.0,
            end_s: 60.0,
            final_position_km: [6998.5, 449.9, 0.0],
            final_velocity_km_s: [-0.48, 7.48, 0.0],
            final_mass_kg: 499.99998,
            propellant_used_kg: 0.00002,
            fn_evals: 14,
            accepted_steps: 2,
            rejected_steps: 0,
            samples: vec![sample(0.0, 500.0), sample(60.0, 499.99998)],
            daily: Vec::new(),
        }
        .with_daily_aggregates();
        assert!(summary.daily.is_empty());

        let mut buffer = Vec::new();
        write_json(&mut buffer, &summary).expect("json");
        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("parse");
        assert_eq!(value["name"], "short");
        assert_eq!(value["samples"].as_array().map(Vec::len), Some(2));
        assert!(value.get("daily").is_none());
    }
}

//! Progress display and JSON output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::{ModelConfig, ObservableSummary, SampledRun, ScanPoint, Trajectory};
use serde::Serialize;

pub fn progress_bar(len: u64, msg: &'static str, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message(msg);
    Ok(pb)
}

#[derive(Serialize)]
pub struct SimulateReport<'a> {
    pub config: &'a ModelConfig,
    pub curie_temperature: f64,
    pub acceptance_ratio: f64,
    pub summary: ObservableSummary,
    pub trajectory: &'a Trajectory,
}

#[derive(Serialize)]
pub struct SampleReport<'a> {
    pub config: &'a ModelConfig,
    pub curie_temperature: f64,
    pub acceptance_ratio: f64,
    pub run: &'a SampledRun,
}

#[derive(Serialize)]
pub struct ScanReport<'a> {
    pub config: &'a ModelConfig,
    pub curie_temperature: f64,
    pub points: &'a [ScanPoint],
}

/// Serialize `value` as JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .wrap_err_with(|| format!("unable to create output file {}", p.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer(&mut out, value).wrap_err("failed to serialize results")?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, value).wrap_err("failed to serialize results")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

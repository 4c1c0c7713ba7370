//! Command-line driver for the 2D Ising engine.
//!
//! Parses arguments, runs one of the engine's drives, and writes the recorded
//! series as JSON for plotting or rendering tools.

use clap::Parser;
use color_eyre::eyre::Result;
use ising_sim::{run_temperature_scan, IsingModel, SamplingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod report;

use cli::{Cli, Command};
use report::{progress_bar, write_json, SampleReport, ScanReport, SimulateReport};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = cli.output.as_deref();

    match cli.command {
        Command::Simulate {
            model,
            steps,
            warmup_ratio,
        } => {
            let config = model.config();
            let mut model = IsingModel::new(config)?;
            eprintln!("{model}");

            let pb = progress_bar(steps as u64, "steps", cli.quiet)?;
            let summary = model
                .simulate_with(steps, &|| pb.inc(1))?
                .summary(warmup_ratio);
            pb.finish();

            info!(
                mean_energy = summary.mean_energy,
                mean_abs_magnetization = summary.mean_abs_magnetization,
                acceptance = model.acceptance_ratio(),
                "simulation finished"
            );

            let acceptance_ratio = model.acceptance_ratio();
            let curie_temperature = model.curie_temperature();
            if let Some(trajectory) = model.trajectory().get() {
                write_json(
                    &SimulateReport {
                        config: &config,
                        curie_temperature,
                        acceptance_ratio,
                        summary,
                        trajectory,
                    },
                    output,
                )?;
            }
        }

        Command::Sample {
            model,
            steps,
            samples,
        } => {
            let config = model.config();
            let mut model = IsingModel::new(config)?;
            eprintln!("{model}");

            let sampling = SamplingConfig::new(steps).with_samples(samples);
            sampling.check()?;
            let pb = progress_bar(sampling.effective_samples() as u64, "samples", cli.quiet)?;
            model.sample_with(sampling, &mut |_, _| pb.inc(1))?;
            pb.finish();

            if let Some(run) = model.sampled_run().get() {
                write_json(
                    &SampleReport {
                        config: &config,
                        curie_temperature: model.curie_temperature(),
                        acceptance_ratio: model.acceptance_ratio(),
                        run,
                    },
                    output,
                )?;
            }
        }

        Command::Scan {
            model,
            temperatures,
            steps,
            warmup_ratio,
        } => {
            let config = model.config();
            let total = (steps * temperatures.len()) as u64;
            let pb = progress_bar(total, "steps", cli.quiet)?;
            let points =
                run_temperature_scan(&config, &temperatures, steps, warmup_ratio, &|| pb.inc(1))?;
            pb.finish();

            for p in &points {
                info!(
                    temperature = p.temperature,
                    mean_abs_magnetization = p.summary.mean_abs_magnetization,
                    acceptance = p.acceptance_ratio,
                    "scan point"
                );
            }

            write_json(
                &ScanReport {
                    config: &config,
                    curie_temperature: config.curie_temperature(),
                    points: &points,
                },
                output,
            )?;
        }
    }

    Ok(())
}

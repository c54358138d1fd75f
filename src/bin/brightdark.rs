//! brightdark command-line interface.
//!
//! Run bright/dark interference studies from TOML job files:
//! ```sh
//! brightdark run job.toml
//! brightdark validate job.toml
//! brightdark theory
//! brightdark demo --save-animation
//! ```

use anyhow::Context;
use brightdark::config::{self, OutputConfig};
use brightdark::core::{ModelContext, PI, TAU};
use brightdark::experiments::{Experiment, ExperimentBuilder, Scenario};
use brightdark::output;
use brightdark::simulation::Simulator;
use brightdark::AmplitudeParameters;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "brightdark")]
#[command(about = "Bright/dark photon interference model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenarios of a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without running it.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print a summary of the model.
    Theory,
    /// Run the default static analysis on the simulator preset.
    Demo {
        /// Also export the 100-frame phase animation.
        #[arg(long)]
        save_animation: bool,
        /// Output directory.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
}

fn demo_experiment(save_animation: bool) -> Experiment {
    let builder = ExperimentBuilder::new()
        .name("demo")
        .add(Scenario::PhaseCurves {
            amplitudes: AmplitudeParameters::default(),
            phases: vec![0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0, PI],
        })
        .add(Scenario::AmplitudeSweep { dark_amplitudes: vec![0.1, 0.3, 0.5, 0.7, 0.9], beta_phase: PI / 4.0 })
        .add(Scenario::interference(PI / 3.0))
        .add(Scenario::phase_sweep(0.0, 2.0 * TAU, 200));
    if save_animation {
        builder.add(Scenario::animation()).build()
    } else {
        builder.build()
    }
}

fn run_and_write(ctx: &ModelContext, experiment: &Experiment, output: &OutputConfig, dir: &Path) -> anyhow::Result<()> {
    println!("Context: {}", ctx);
    let result = Simulator::new()
        .run(ctx, experiment)
        .context("simulation failed")?;
    print!("{}", result);

    let written = output::write_result(&result, ctx, output, dir)
        .with_context(|| format!("failed to write results to {}", dir.display()))?;
    for path in &written {
        println!("  wrote {}", path.display());
    }
    println!("Simulation complete.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Bright/Dark Interference Model");
            println!("==============================");
            let job = config::load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            println!("Configuration: {}", config.display());

            let ctx = job.context()?;
            let experiment = job.experiment()?;
            print!("{}", experiment);

            // Determine output directory
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            run_and_write(&ctx, &experiment, &job.output, &out_dir)
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            job.context()?;
            let experiment = job.experiment()?;
            println!("Configuration is valid: {}", config.display());
            print!("{}", experiment);
            Ok(())
        }
        Commands::Theory => {
            print!("{}", brightdark::theory_summary());
            Ok(())
        }
        Commands::Demo { save_animation, output } => {
            let ctx = ModelContext::simulator_default()?;
            let experiment = demo_experiment(save_animation);
            let out = OutputConfig {
                directory: output.display().to_string(),
                save_csv: true,
                save_json: false,
                save_animation,
            };
            run_and_write(&ctx, &experiment, &out, &output)?;
            print!("{}", brightdark::theory_summary());
            Ok(())
        }
    }
}

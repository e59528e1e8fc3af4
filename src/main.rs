//! Scenario Report CLI
//!
//! Command-line interface for the predator-prey scenario report generator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scenario_report::{
    analytics::{logger::ReportLogger, report::report_scenario},
    config::ReportConfig,
    data::{load_animal_log, Species},
    pipeline::{replay, Orchestrator},
};

#[derive(Parser)]
#[command(name = "scenario-report")]
#[command(version = "0.1.0")]
#[command(about = "Age statistics and population charts for predator-prey scenarios", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every configured scenario
    Run {
        /// YAML scenario configuration (defaults to the reference scenarios)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the reference scenarios are read from when no config is given
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Output directory for charts and saved results
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip chart generation
        #[arg(long)]
        no_charts: bool,

        /// Do not save results and summary files
        #[arg(long)]
        no_save: bool,
    },

    /// Re-emit the report from previously saved results
    Report {
        /// Input JSON file with saved results
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for regenerated charts
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// Age statistics for a single animal log
    Stats {
        /// Animal log CSV file
        file: PathBuf,

        /// Species the log belongs to
        #[arg(short, long, value_enum, default_value = "hawk")]
        species: Species,
    },

    /// Print expected input formats and defaults
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries the report itself. RUST_LOG overrides --verbose.
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Run {
            config,
            data_dir,
            output,
            no_charts,
            no_save,
        } => {
            let mut config = match config {
                Some(path) => ReportConfig::from_yaml_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ReportConfig::default().with_data_dir(&data_dir),
            };
            if let Some(output) = output {
                config.output_dir = output;
            }

            run_report(config, !no_charts, !no_save)?;
        }

        Commands::Report { input, output } => {
            report_from_file(&input, &output)?;
        }

        Commands::Stats { file, species } => {
            let log = load_animal_log(&file, species)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            let name = file.display().to_string();
            report_scenario(&mut io::stdout().lock(), &name, &[log])?;
        }

        Commands::Info => {
            print_info();
        }
    }

    Ok(())
}

fn run_report(config: ReportConfig, charts: bool, save: bool) -> Result<()> {
    info!("Configuration:");
    for scenario in &config.scenarios {
        info!("  {:<14} {}", scenario.name, scenario.population_file.display());
    }
    info!("  Output:        {}", config.output_dir.display());

    let output_dir = config.output_dir.clone();
    let orchestrator = Orchestrator::new(config).with_charts(charts);

    let mut stdout = io::stdout().lock();
    let results = orchestrator.run(&mut stdout)?;
    stdout.flush()?;

    if save {
        let logger = ReportLogger::new(&output_dir);
        let json_path = logger.save_results(&results).context("Failed to save results")?;
        logger.save_summary(&results).context("Failed to save summary")?;
        info!("Results saved to: {}", json_path.display());
    }

    Ok(())
}

fn report_from_file(input: &Path, output: &Path) -> Result<()> {
    info!("Loading results from: {}", input.display());

    let results = ReportLogger::load_results(input)
        .with_context(|| format!("Failed to read results {}", input.display()))?;

    let charts = replay(&results, &mut io::stdout().lock(), Some(output))?;
    info!("Regenerated {} charts in {}", charts.len(), output.display());

    Ok(())
}

fn print_info() {
    let defaults = ReportConfig::default();

    println!();
    println!("Predator-prey scenario report");
    println!();
    println!("INPUTS (CSV with header row):");
    println!("  animal log       needs `Age`; optional `Animal` and `Death cause`");
    println!("  population log   needs `HAWK` and `SQUIRREL`; row order is tick order");
    println!();
    println!("DEFAULT SCENARIOS:");
    for scenario in &defaults.scenarios {
        println!(
            "  {:<14} {}, {}, {}",
            scenario.name,
            scenario.population_file.display(),
            scenario.hawk_age_file.display(),
            scenario.squirrel_age_file.display()
        );
    }
    println!();
    println!("USAGE:");
    println!("  scenario-report run -d ./data              # Report reference scenarios");
    println!("  scenario-report run -c scenarios.yaml      # Report configured scenarios");
    println!("  scenario-report stats hawk.csv             # Stats for one log");
    println!("  scenario-report report -i report.json      # Re-emit saved results");
    println!();
}

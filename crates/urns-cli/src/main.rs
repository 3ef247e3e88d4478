//! urns - Bayesian urn inference CLI
//!
//! Usage:
//!   urns -m 10 -n 3 -k 2                         # with replacement
//!   urns -m 10 -n 3 -k 1 2 --without-replacement # without replacement
//!   urns -m 10 -n 3 -k 1,2 -p 0.05 --history     # every posterior stage
//!   urns --config urn.json --json                # JSON in, JSON out

use bayes_urns::bayesian::{Sampling, UrnConfig, UrnInference};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod error;
mod output;
mod report;

use error::{CliError, Result};
use report::Report;

/// urns - infer how many balls of interest an urn holds
///
/// Folds the observed counts of each draw experiment, in order, into a
/// posterior over the number of balls of interest, then accepts or rejects
/// the most probable count at the given significance level.
#[derive(Parser, Debug)]
#[command(name = "urns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Total number of balls in the urn
    #[arg(short = 'm', long, required_unless_present = "config")]
    population: Option<u64>,

    /// Number of balls drawn per experiment
    #[arg(short = 'n', long, required_unless_present = "config")]
    draws: Option<u64>,

    /// Balls of interest seen in each experiment
    #[arg(
        short = 'k',
        long,
        num_args = 1..,
        value_delimiter = ',',
        required_unless_present = "config"
    )]
    observations: Vec<u64>,

    /// Draw without replacement (hypergeometric likelihood)
    #[arg(long)]
    without_replacement: bool,

    /// Significance level for accepting the most likely count [default: 0.1]
    #[arg(short = 'p', long)]
    significance: Option<f64>,

    /// Read the experiment configuration from a JSON file
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with_all = ["population", "draws", "observations", "without_replacement"]
    )]
    config: Option<PathBuf>,

    /// Probability mass of the reported credible interval
    #[arg(long, default_value = "0.9", value_parser = parse_mass)]
    credible_mass: f64,

    /// Print every posterior stage
    #[arg(long)]
    history: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn urn_config(&self) -> Result<UrnConfig> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => UrnConfig::new(
                self.population.unwrap_or_default(),
                self.draws.unwrap_or_default(),
                self.observations.clone(),
                Sampling::from_replacement(!self.without_replacement),
            ),
        };
        Ok(match self.significance {
            Some(p) => config.with_significance_level(p),
            None => config,
        })
    }
}

fn parse_mass(s: &str) -> std::result::Result<f64, String> {
    let mass: f64 = s.parse::<f64>().map_err(|e| e.to_string())?;
    if mass > 0.0 && mass < 1.0 {
        Ok(mass)
    } else {
        Err(format!("{mass} is not in (0, 1)"))
    }
}

fn load_config(path: &Path) -> Result<UrnConfig> {
    if !path.exists() {
        return Err(CliError::ConfigNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| CliError::InvalidConfigFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("URNS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.urn_config()?;
    tracing::debug!(?config, "parsed configuration");

    let mut urn = UrnInference::new(config)?;
    urn.run_inference()?;

    let report = Report::from_engine(&urn, cli.credible_mass, cli.history)?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            e.exit_code()
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pluvial daily precipitation frequency analysis.
#[derive(Parser)]
#[command(
    name = "pluvial",
    version,
    about = "Daily precipitation exceedance probabilities and return periods"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a synthetic daily precipitation series.
    Synth(SynthArgs),
    /// Analyse a daily precipitation series and write a JSON report.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `synth` subcommand.
#[derive(clap::Args)]
pub struct SynthArgs {
    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output series path (`.json` for JSON, anything else for text).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of days from config.
    #[arg(short = 'n', long)]
    pub days: Option<usize>,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input series path (`.json` for JSON, anything else for text).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the JSON report. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the wetness threshold from config.
    #[arg(long)]
    pub wet_threshold: Option<f64>,
}

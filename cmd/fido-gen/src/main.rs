//! fido-gen - print generated Fido query inputs.
//!
//! Kinds:
//! - `fido-gen delta` - per-unit duration magnitudes
//! - `fido-gen offline` / `online` - instrument selectors
//! - `fido-gen time` / `goes-time` / `rhessi-time` - time attributes

use anyhow::Result;
use clap::{Parser, ValueEnum};
use fido_strategies::{Sampler, SamplerConfig};
use tracing_subscriber::EnvFilter;

mod sample;

#[derive(Parser)]
#[command(name = "fido-gen")]
#[command(about = "Print randomized but valid Fido query inputs")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seed for the sampler
    #[arg(short, long, env = "FIDO_GEN_SEED", default_value_t = 42)]
    seed: u64,

    /// Number of samples to print
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Candidates drawn per sample before giving up
    #[arg(long, default_value_t = 1000)]
    max_attempts: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// What to generate
    #[arg(value_enum)]
    kind: Kind,
}

/// Sample kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Per-unit duration magnitudes
    Delta,
    /// Instrument selectors that work offline
    Offline,
    /// Instrument selectors that need the network
    Online,
    /// Time attributes from 1900 onwards
    Time,
    /// Time attributes GOES can serve
    GoesTime,
    /// Time attributes RHESSI can serve
    RhessiTime,
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One JSON document per line
    Json,
    /// Human-readable rendering
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = SamplerConfig::default()
        .with_seed(cli.seed)
        .with_max_attempts(cli.max_attempts);
    let mut sampler = Sampler::new(config);

    let stdout = std::io::stdout();
    sample::run(&mut sampler, cli.kind, cli.format, cli.count, &mut stdout.lock())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use edgescore_core::EdgeScoreConfig;
use edgescore_engine::DefaultScoring;

mod commands;

#[derive(Parser)]
#[command(
    name = "edgescore",
    about = "EdgeScore — device fitness scoring for service placement",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to edgescore.toml (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
    /// Log per-metric reads and scores
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a device and print its fitness score.
    ///
    /// Without --strict, a missing metric prints the invalid score 0.
    Score {
        /// Peer device identifier used for the RTT measurement
        device: String,
        /// Fail with the underlying error instead of printing 0
        #[arg(long)]
        strict: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Capture the raw resource snapshot for a device
    Snapshot {
        device: String,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Score a snapshot JSON file without re-measuring
    Rescore {
        /// Snapshot file, or - for stdin
        #[arg(default_value = "-")]
        file: String,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format, cli.verbose)?;

    let config = EdgeScoreConfig::load(cli.config.as_deref())?;
    let scoring = DefaultScoring::new(edgescore_provider::from_config(&config));

    match cli.command {
        Commands::Score { device, strict, format } => {
            commands::score::score(&scoring, &device, strict, format)
        }
        Commands::Snapshot { device, format } => {
            commands::snapshot::snapshot(&scoring, &device, format)
        }
        Commands::Rescore { file, format } => commands::rescore::rescore(&scoring, &file, format),
    }
}

fn log_directive(verbose: bool) -> &'static str {
    if verbose { "edgescore=debug" } else { "edgescore=info" }
}

fn init_tracing(format: LogFormat, verbose: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_directive(verbose)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

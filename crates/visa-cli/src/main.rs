//! `visa` - pull visa fields out of mixed Arabic/English PDFs.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{batch, config, process};

#[derive(Parser)]
#[command(name = "visa", author, version, about = "Extract visa fields from PDF documents")]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: <config dir>/visa/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single document
    Process(process::ProcessArgs),

    /// Extract fields from many documents into one sheet
    Batch(batch::BatchArgs),

    /// Inspect or edit the configuration file
    Config(config::ConfigArgs),
}

/// Logs go to stderr so `process` output on stdout stays clean.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}

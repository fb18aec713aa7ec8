//! CLI application for NFS-e invoice field extraction.

mod chooser;
mod commands;
mod settings;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract};
use settings::ConfigSource;

/// NFS-e extraction - Collect fields from a folder of NFS-e PDFs into a spreadsheet
#[derive(Parser)]
#[command(name = "nfse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: <config_dir>/nfse/config.json when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Defaults to `extract` with the folder dialog
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every PDF in a folder into an XLSX file
    Extract(extract::ExtractArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let source = ConfigSource::resolve(cli.config.as_deref());

    match cli.command.unwrap_or_else(|| Commands::Extract(Default::default())) {
        Commands::Extract(args) => extract::execute(args, &source),
        Commands::Config(args) => config::run(args, &source),
    }
}

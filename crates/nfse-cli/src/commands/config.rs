//! Config command - inspect or create the configuration file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use nfse_core::NfseConfig;

use crate::settings::ConfigSource;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the configuration an extraction run would use
    Show,

    /// Write a configuration file with the default values
    Init {
        /// Write here instead of the configuration path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value (e.g., "output.file_name" or "cost_center.entities")
    Get { key: String },

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs, source: &ConfigSource) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            if !source.path.exists() {
                println!(
                    "{} No config file at {}, showing defaults.",
                    style("ℹ").blue(),
                    source.path.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&source.load()?)?);
        }
        ConfigCommand::Init { output, force } => {
            let target = output.unwrap_or_else(|| source.path.clone());
            init(&target, force)?;
        }
        ConfigCommand::Get { key } => {
            let value = lookup(&source.load()?, &key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ConfigCommand::Path => {
            let status = if source.path.exists() {
                style("exists").green()
            } else {
                style("not created, run 'nfse config init'").yellow()
            };
            println!("Configuration file: {} ({})", source.path.display(), status);
        }
    }

    Ok(())
}

fn init(target: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if target.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            target.display()
        );
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    NfseConfig::default().save(target)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        target.display()
    );

    Ok(())
}

/// Value at a dotted key path of the serialized configuration.
fn lookup(config: &NfseConfig, key: &str) -> anyhow::Result<serde_json::Value> {
    let json = serde_json::to_value(config)?;

    key.split('.')
        .try_fold(&json, |node, part| node.get(part))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
}

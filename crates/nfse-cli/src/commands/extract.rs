//! Extract command - turn a folder of NFS-e PDFs into one spreadsheet.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::{glob_with, MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use nfse_core::{CostCenterClassifier, NfseConfig, NfseParser, NfseRecord, XlsxExporter};

use crate::chooser::{DialogChooser, DirectoryChooser, FixedDirectory};
use crate::settings::ConfigSource;

/// Arguments for the extract command.
#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Folder with the PDFs; opens a folder dialog when omitted
    #[arg(short, long)]
    folder: Option<PathBuf>,
}

/// A PDF that could not be read.
#[derive(Debug)]
pub struct FileFailure {
    pub name: String,
    pub error: String,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The chooser returned no folder.
    NoFolderSelected,
    /// The folder has no PDF files.
    NoPdfFound,
    /// Every PDF failed, nothing was written.
    NoRecords { failed: Vec<FileFailure> },
    /// The spreadsheet was written.
    Written {
        path: PathBuf,
        records: usize,
        failed: Vec<FileFailure>,
    },
}

pub fn execute(args: ExtractArgs, source: &ConfigSource) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = source.load()?;

    let chooser: Box<dyn DirectoryChooser> = match args.folder {
        Some(folder) => Box::new(FixedDirectory(folder)),
        None => Box::new(DialogChooser),
    };

    println!("{} Starting extraction...", style("ℹ").blue());

    match run(chooser.as_ref(), &config)? {
        RunOutcome::NoFolderSelected => {
            println!("{} No folder selected.", style("ℹ").blue());
        }
        RunOutcome::NoPdfFound => {
            println!("{} No PDF files found in the folder.", style("ℹ").blue());
        }
        RunOutcome::NoRecords { failed } => {
            print_failures(&failed);
            println!(
                "{} No records extracted, no spreadsheet written.",
                style("⚠").yellow()
            );
        }
        RunOutcome::Written {
            path,
            records,
            failed,
        } => {
            print_failures(&failed);
            println!(
                "{} Excel file saved to: {}",
                style("✓").green(),
                path.display()
            );
            println!();
            println!("Summary:");
            println!("  Processed: {}", style(records).green());
            if !failed.is_empty() {
                println!("  Failed:    {}", style(failed.len()).red());
            }
        }
    }

    info!("Finished in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Process every PDF of the chosen folder and write the spreadsheet next to them.
pub fn run(chooser: &dyn DirectoryChooser, config: &NfseConfig) -> anyhow::Result<RunOutcome> {
    let Some(dir) = chooser.choose_directory() else {
        return Ok(RunOutcome::NoFolderSelected);
    };

    println!("{} Selected folder: {}", style("ℹ").blue(), dir.display());

    let files = discover_pdfs(&dir)?;
    if files.is_empty() {
        return Ok(RunOutcome::NoPdfFound);
    }

    println!(
        "{} Found {} PDF files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = NfseParser::from_config(config);
    let total = files.len();
    let mut records = Vec::with_capacity(total);
    let mut failed = Vec::new();

    for (index, path) in files.iter().enumerate() {
        let name = file_name(path);

        match process_file(path, &parser) {
            Ok(record) => {
                records.push(record);
                pb.suspend(|| println!("({}/{}) Processed: {}", index + 1, total, name));
            }
            Err(e) => {
                warn!("Failed to process {}: {:#}", path.display(), e);
                failed.push(FileFailure {
                    name,
                    error: format!("{:#}", e),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if records.is_empty() {
        return Ok(RunOutcome::NoRecords { failed });
    }

    println!("{} Converting to Excel...", style("ℹ").blue());

    CostCenterClassifier::from_config(&config.cost_center).classify_records(&mut records);

    let output = dir.join(&config.output.file_name);
    XlsxExporter::from_config(&config.output).write(&records, &output)?;

    Ok(RunOutcome::Written {
        path: output,
        records: records.len(),
        failed,
    })
}

/// PDF files directly inside `dir`, by name. The extension match ignores case.
pub fn discover_pdfs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files: Vec<PathBuf> = glob_with(&pattern, options)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    debug!("Found {} PDF files in {}", files.len(), dir.display());

    Ok(files)
}

fn process_file(path: &Path, parser: &NfseParser) -> anyhow::Result<NfseRecord> {
    let result = parser.parse_file(path)?;
    let name = &result.record.source_name;

    for warning in &result.warnings {
        debug!("{}: {}", name, warning);
    }
    debug!(
        "{} parsed in {}ms, {} fields missing",
        name,
        result.processing_time_ms,
        result.missing_fields.len()
    );
    debug!("{}", serde_json::to_string(&result.record)?);

    Ok(result.record)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_failures(failed: &[FileFailure]) {
    for failure in failed {
        println!(
            "{} {}: {}",
            style("✗").red(),
            failure.name,
            failure.error
        );
    }
}

//! Batch command - extract visa fields from many documents into one sheet.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use visa_core::{Batch, EmptyDocumentPolicy, SheetFormat, SourceDocument, VisaParser};

use crate::output::{extension, resolve_format, write_sheet};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting the input files (PDF or .txt)
    #[arg(required = true)]
    input: String,

    /// Output sheet (default: visas.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sheet format (default: from the output extension, then config)
    #[arg(short, long, value_enum)]
    format: Option<SheetFormatArg>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Keep going when a document cannot be read or has no text
    #[arg(long)]
    continue_on_error: bool,

    /// Write a name-only row for documents that yield nothing
    #[arg(long)]
    blank_rows: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SheetFormatArg {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
    /// JSON array of records
    Json,
}

impl From<SheetFormatArg> for SheetFormat {
    fn from(arg: SheetFormatArg) -> Self {
        match arg {
            SheetFormatArg::Xlsx => SheetFormat::Xlsx,
            SheetFormatArg::Csv => SheetFormat::Csv,
            SheetFormatArg::Json => SheetFormat::Json,
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // glob yields paths in alphabetical order
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && super::is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let flag = args.format.map(SheetFormat::from);
    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => {
            let format = flag.unwrap_or(config.output.default_format);
            PathBuf::from(format!("visas.{}", extension(format)))
        }
    };
    let format = resolve_format(flag, &output_path, &config.output);

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = VisaParser::new().with_normalizer(config.normalizer.clone());
    let mut batch = Batch::new(&parser);
    // Read errors replace the generic "no text layer" message in the report
    let mut read_errors: HashMap<String, String> = HashMap::new();

    for path in &files {
        match super::load_document(path) {
            Ok(document) => batch.push(document),
            Err(e) => {
                let identifier = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), e);
                    read_errors.insert(identifier.clone(), e.to_string());
                    batch.push(SourceDocument::without_text(identifier));
                } else {
                    pb.abandon();
                    error!("Failed to read {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed: {}: {}", path.display(), e);
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    debug!("Extracting {} documents with {} jobs", batch.len(), args.jobs);
    let outcome = batch.run_parallel(args.jobs);

    if !args.continue_on_error {
        if let Some((identifier, err)) = outcome.failures().next() {
            anyhow::bail!("Processing failed: {}: {}", identifier, err);
        }
    }

    let policy = if args.blank_rows {
        EmptyDocumentPolicy::NameOnly
    } else {
        config.extraction.empty_documents
    };
    let rows = outcome.rows(policy);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_sheet(&output_path, format, &rows, &config.output)?;

    println!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        rows.len(),
        output_path.display()
    );

    let failed: Vec<_> = outcome.failures().collect();
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcome.entries.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcome.entries.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (identifier, err) in &failed {
            let message = read_errors
                .get(*identifier)
                .cloned()
                .unwrap_or_else(|| err.to_string());
            println!("  - {}: {}", identifier, message);
        }
    }

    Ok(())
}

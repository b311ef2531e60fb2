//! Process command - extract visa fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use visa_core::{ExtractionError, VisaExtractor, VisaParser, VisaRecord};

use crate::output::{format_csv, format_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or extracted text as .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the normalized page text to stderr
    #[arg(long)]
    show_text: bool,

    /// Report fields that were not found
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output with header row
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !super::is_supported(&args.input) {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    pb.set_message("Reading first page...");
    let document = super::load_document(&args.input)?;

    pb.set_message("Extracting visa fields...");
    let text = document.text.ok_or_else(|| ExtractionError::NoTextLayer {
        identifier: document.identifier.clone(),
    })?;
    let parser = VisaParser::new().with_normalizer(config.normalizer.clone());
    let result = parser.parse(&text, &document.identifier)?;

    pb.finish_and_clear();

    if args.show_text {
        eprintln!("{}", result.normalized_text);
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings {
        eprintln!();
        if result.warnings.is_empty() {
            eprintln!("{} All fields found", style("ℹ").blue());
        }
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &VisaRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

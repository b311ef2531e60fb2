//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::Path;

use tracing::debug;

use visa_core::{read_first_page, SourceDocument, VisaConfig};

/// Input extensions the CLI accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// Load the configuration from `-c`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VisaConfig> {
    if let Some(path) = config_path {
        return Ok(VisaConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(VisaConfig::from_file(&default_path)?)
    } else {
        Ok(VisaConfig::default())
    }
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&file_extension(path).as_str())
}

/// Read one input file into a batch document.
///
/// PDFs contribute their first page. `.txt` files are taken as an already
/// extracted text layer.
pub fn load_document(path: &Path) -> anyhow::Result<SourceDocument> {
    match file_extension(path).as_str() {
        "pdf" => Ok(read_first_page(path)?),
        "txt" => {
            let identifier = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(SourceDocument::new(identifier, fs::read_to_string(path)?))
        }
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

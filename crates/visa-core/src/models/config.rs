//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VisaError};

/// Main configuration for the visa pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisaConfig {
    /// Text normalization configuration.
    pub normalizer: NormalizerConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Spreadsheet output configuration.
    pub output: OutputConfig,
}

/// Paragraph direction used when reordering a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDirection {
    /// Taken from the first strong character of each line.
    #[default]
    Auto,
    /// Always left-to-right.
    Ltr,
}

/// Text normalizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Substitute Arabic letters with their joined presentation forms.
    pub reshape: bool,

    /// Apply bidirectional reordering per line.
    pub reorder: bool,

    /// Paragraph direction for reordering.
    pub base_direction: BaseDirection,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            reshape: true,
            reorder: true,
            base_direction: BaseDirection::Auto,
        }
    }
}

/// What the sink receives for a document without extractable text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDocumentPolicy {
    /// No row is written.
    #[default]
    Skip,
    /// A row with the name and every other cell blank.
    NameOnly,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Handling of documents with no extractable text.
    pub empty_documents: EmptyDocumentPolicy,
}

/// Spreadsheet formats a batch can be written as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Worksheet name for xlsx output.
    pub sheet_name: String,

    /// Format used when neither a flag nor the file extension decides.
    pub default_format: SheetFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Visas".to_string(),
            default_format: SheetFormat::Xlsx,
        }
    }
}

impl VisaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the writers cannot honour.
    pub fn validate(&self) -> Result<()> {
        let name = &self.output.sheet_name;
        if name.trim().is_empty() {
            return Err(VisaError::Config("output.sheet_name must not be empty".to_string()));
        }
        // Excel limits worksheet names to 31 characters.
        if name.chars().count() > 31 {
            return Err(VisaError::Config(format!(
                "output.sheet_name is longer than 31 characters: {}",
                name
            )));
        }
        Ok(())
    }
}

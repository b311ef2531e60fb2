//! Visa parser driving the rule table.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::{NormalizerConfig, VisaRecord};
use crate::text::TextNormalizer;

use super::rules::{Field, FIELD_RULES};
use super::{Result, VisaExtractor};

/// Result of visa extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: VisaRecord,
    /// Display-ordered text the rules ran against.
    pub normalized_text: String,
    /// One entry per field that was not found.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based visa parser.
///
/// Holds no per-document state, so one parser can serve any number of
/// documents and threads.
#[derive(Debug, Clone, Default)]
pub struct VisaParser {
    normalizer: TextNormalizer,
}

/// Derive the record name from a document identifier: the file name with
/// any directory prefix and its last extension removed.
pub fn document_name(identifier: &str) -> String {
    Path::new(identifier)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| identifier.to_string())
}

impl VisaParser {
    /// Create a parser with the default normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set normalizer configuration.
    pub fn with_normalizer(mut self, config: NormalizerConfig) -> Self {
        self.normalizer = TextNormalizer::new(config);
        self
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Run every rule once; index `i` holds the value for `Field::ALL[i]`.
    fn extract_fields(&self, text: &str) -> [Option<String>; 8] {
        let mut values: [Option<String>; 8] = Default::default();
        for rule in FIELD_RULES.iter() {
            values[rule.field.index()] = rule.apply(text);
        }
        values
    }

    fn build_record(name: String, mut values: [Option<String>; 8]) -> VisaRecord {
        let mut take = |field: Field| values[field.index()].take();
        VisaRecord::new(name)
            .with_country(take(Field::Country))
            .with_passport_number(take(Field::PassportNumber))
            .with_visa_no(take(Field::VisaNo))
            .with_valid_from(take(Field::ValidFrom))
            .with_valid_until(take(Field::ValidUntil))
            .with_duration_of_stay(take(Field::DurationOfStay))
            .with_entry_type(take(Field::EntryType).and_then(|s| s.parse().ok()))
    }

    fn warnings(record: &VisaRecord) -> Vec<String> {
        Field::ALL
            .iter()
            .zip(record.to_row())
            .filter(|(_, cell)| cell.is_none())
            .map(|(field, _)| format!("{} not found", field.header()))
            .collect()
    }
}

impl VisaExtractor for VisaParser {
    fn extract(&self, text: &str, identifier: &str) -> VisaRecord {
        let values = self.extract_fields(text);
        let record = Self::build_record(document_name(identifier), values);
        debug!(
            "Extracted {}/{} fields for {}",
            record.filled_count(),
            Field::ALL.len(),
            identifier
        );
        record
    }

    fn parse(&self, raw_text: &str, identifier: &str) -> Result<ExtractionResult> {
        let start = Instant::now();

        let normalized_text = self.normalizer.normalize(raw_text)?;
        let record = self.extract(&normalized_text, identifier);
        let warnings = Self::warnings(&record);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Parsed {} in {}ms ({} fields missing)",
            identifier,
            processing_time_ms,
            warnings.len()
        );

        Ok(ExtractionResult {
            record,
            normalized_text,
            warnings,
            processing_time_ms,
        })
    }
}

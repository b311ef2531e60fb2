//! Text normalization: Arabic reshaping followed by bidi reordering.

mod bidi;
mod lines;
mod reshape;

pub use bidi::reorder_lines;
pub use lines::{is_line_break, lines_with_breaks, split_lines};
pub use reshape::{has_arabic, reshape};

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::NormalizerConfig;

/// Turns raw page text into a display-ordered string for left-to-right
/// pattern matching.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Create a normalizer with the given configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Reshape then reorder `raw`.
    ///
    /// Empty or whitespace-only input is rejected instead of producing an
    /// empty string for the extractor.
    pub fn normalize(&self, raw: &str) -> Result<String, ExtractionError> {
        if raw.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let shaped = if self.config.reshape {
            reshape(raw)
        } else {
            raw.to_string()
        };

        let ordered = if self.config.reorder {
            reorder_lines(&shaped, self.config.base_direction)
        } else {
            shaped
        };

        debug!(
            "Normalized {} chars -> {} chars (arabic: {})",
            raw.chars().count(),
            ordered.chars().count(),
            has_arabic(raw)
        );

        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseDirection;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejects_empty_input() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize(""), Err(ExtractionError::EmptyDocument));
        assert_eq!(normalizer.normalize(" \n\t"), Err(ExtractionError::EmptyDocument));
    }

    #[test]
    fn test_latin_text_passes_through() {
        let text = "Nationality United Kingdom\nPassport No. AB1234567\nDuration of Stay\n90 days";
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize(text).unwrap(), text);
    }

    #[test]
    fn test_reshapes_and_reorders() {
        let config = NormalizerConfig {
            base_direction: BaseDirection::Ltr,
            ..NormalizerConfig::default()
        };
        let normalizer = TextNormalizer::new(config);
        // beh beh after a Latin label: shaped to initial+final, then reversed.
        let out = normalizer.normalize("Name \u{0628}\u{0628}").unwrap();
        assert_eq!(out, "Name \u{FE90}\u{FE91}");
    }

    #[test]
    fn test_steps_can_be_disabled() {
        let config = NormalizerConfig {
            reshape: false,
            reorder: false,
            base_direction: BaseDirection::Auto,
        };
        let raw = "Name \u{0628}\u{0628}";
        assert_eq!(TextNormalizer::new(config).normalize(raw).unwrap(), raw);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = TextNormalizer::default();
        let raw = "\u{0631}\u{0642}\u{0645} \u{0627}\u{0644}\u{062C}\u{0648}\u{0627}\u{0632} AB123";
        assert_eq!(normalizer.normalize(raw), normalizer.normalize(raw));
    }
}

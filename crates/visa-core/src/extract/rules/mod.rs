//! Rule-based field extractors for visa documents.

pub mod duration;
pub mod labeled;
pub mod numerals;
pub mod patterns;
pub mod table;

pub use duration::DurationExtractor;
pub use labeled::LabeledExtractor;
pub use numerals::{arabic_indic_to_latin, is_arabic_indic_digit};
pub use table::{Field, FieldRule, FIELD_RULES};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the value in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

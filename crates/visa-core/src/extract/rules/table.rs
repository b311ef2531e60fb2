//! Ordered rule table mapping each text-derived field to its extractor.
//!
//! Adding a field or a label spelling means adding a row or a pattern here;
//! the parser only walks the table.

use lazy_static::lazy_static;

use super::numerals::arabic_indic_to_latin;
use super::patterns::*;
use super::{DurationExtractor, ExtractionMatch, FieldExtractor, LabeledExtractor};

/// Output columns of a visa record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Country,
    PassportNumber,
    VisaNo,
    ValidFrom,
    ValidUntil,
    DurationOfStay,
    EntryType,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Country,
        Field::PassportNumber,
        Field::VisaNo,
        Field::ValidFrom,
        Field::ValidUntil,
        Field::DurationOfStay,
        Field::EntryType,
    ];

    /// Column header.
    pub fn header(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Country => "Country",
            Field::PassportNumber => "Passport Number",
            Field::VisaNo => "Visa No",
            Field::ValidFrom => "Valid From",
            Field::ValidUntil => "Valid Until",
            Field::DurationOfStay => "Duration of Stay",
            Field::EntryType => "Entry Type",
        }
    }

    /// Zero-based column index.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Extractor object stored in the table.
pub type DynExtractor = dyn FieldExtractor<Output = ExtractionMatch<String>> + Send + Sync;

/// One row of the rule table.
pub struct FieldRule {
    /// Field the rule fills.
    pub field: Field,
    /// Finds the raw value.
    pub extractor: Box<DynExtractor>,
    /// Turns the raw match into the stored value; `None` drops it.
    pub post_process: fn(&str) -> Option<String>,
}

impl FieldRule {
    fn new(
        field: Field,
        extractor: Box<DynExtractor>,
        post_process: fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            field,
            extractor,
            post_process,
        }
    }

    /// Run the rule against `text`.
    pub fn apply(&self, text: &str) -> Option<String> {
        self.extractor
            .extract(text)
            .and_then(|m| (self.post_process)(&m.value))
    }
}

/// A capture that trims to nothing counts as absent.
fn trimmed(value: &str) -> Option<String> {
    Some(value.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn latin_digits(value: &str) -> Option<String> {
    trimmed(value).map(|v| arabic_indic_to_latin(&v))
}

lazy_static! {
    /// Rules for every text-derived field. `Name` comes from the document
    /// identifier and has no row.
    pub static ref FIELD_RULES: Vec<FieldRule> = vec![
        FieldRule::new(
            Field::Country,
            Box::new(LabeledExtractor::single(&NATIONALITY)),
            trimmed,
        ),
        FieldRule::new(
            Field::PassportNumber,
            Box::new(LabeledExtractor::new(vec![
                &*PASSPORT_NO,
                &*PASSPORT_NO_COMPACT,
                &*PASSPORT_NO_ARABIC,
            ])),
            trimmed,
        ),
        FieldRule::new(
            Field::VisaNo,
            Box::new(LabeledExtractor::single(&VISA_NO)),
            trimmed,
        ),
        FieldRule::new(
            Field::ValidFrom,
            Box::new(LabeledExtractor::single(&VALID_FROM)),
            trimmed,
        ),
        FieldRule::new(
            Field::ValidUntil,
            Box::new(LabeledExtractor::single(&VALID_UNTIL)),
            trimmed,
        ),
        FieldRule::new(
            Field::DurationOfStay,
            Box::new(DurationExtractor::new()),
            latin_digits,
        ),
        FieldRule::new(
            Field::EntryType,
            Box::new(LabeledExtractor::single(&ENTRY_TYPE)),
            trimmed,
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VisaRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headers_match_record() {
        let headers: Vec<_> = Field::ALL.iter().map(Field::header).collect();
        assert_eq!(headers, VisaRecord::HEADERS.to_vec());
    }

    #[test]
    fn test_index_follows_column_order() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_every_text_field_has_one_rule() {
        for field in Field::ALL.iter().skip(1) {
            let count = FIELD_RULES.iter().filter(|r| r.field == *field).count();
            assert_eq!(count, 1, "{:?}", field);
        }
        assert!(FIELD_RULES.iter().all(|r| r.field != Field::Name));
    }

    #[test]
    fn test_duration_rule_converts_digits() {
        let rule = FIELD_RULES
            .iter()
            .find(|r| r.field == Field::DurationOfStay)
            .unwrap();
        assert_eq!(rule.apply("Duration of Stay\n٩٠ days"), Some("90".to_string()));
    }

    #[test]
    fn test_blank_capture_is_absent() {
        assert_eq!(trimmed("   "), None);
        assert_eq!(trimmed(" Oman "), Some("Oman".to_string()));
        assert_eq!(latin_digits(""), None);
    }
}

//! Label-anchored extraction: a label followed by a captured token.

use regex::Regex;
use tracing::trace;

use super::{ExtractionMatch, FieldExtractor};

/// Extracts the token captured after one of several label spellings.
///
/// Behaves like one alternation of the variants: the label that appears
/// first in the text wins, and at the same offset the earlier variant wins.
pub struct LabeledExtractor {
    variants: Vec<&'static Regex>,
}

impl LabeledExtractor {
    /// Build from patterns whose group 1 is the value.
    pub fn new(variants: Vec<&'static Regex>) -> Self {
        Self { variants }
    }

    /// Single-label extractor.
    pub fn single(pattern: &'static Regex) -> Self {
        Self::new(vec![pattern])
    }

    /// First match of `re` as (label offset, match).
    fn to_match(re: &Regex, text: &str) -> Option<(usize, ExtractionMatch<String>)> {
        let caps = re.captures(text)?;
        let value = caps.get(1)?;
        let full = caps.get(0)?;
        trace!("{} matched {:?} at {}", re.as_str(), full.as_str(), full.start());
        Some((
            full.start(),
            ExtractionMatch::new(value.as_str().to_string(), full.as_str())
                .with_position(value.start(), value.end()),
        ))
    }
}

impl FieldExtractor for LabeledExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // min_by_key keeps the first of equal keys, i.e. the earlier variant
        self.variants
            .iter()
            .filter_map(|re| Self::to_match(re, text))
            .min_by_key(|(start, _)| *start)
            .map(|(_, m)| m)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        for re in &self.variants {
            for caps in re.captures_iter(text) {
                let (Some(full), Some(value)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                results.push((
                    full.start(),
                    ExtractionMatch::new(value.as_str().to_string(), full.as_str())
                        .with_position(value.start(), value.end()),
                ));
            }
        }
        // Stable sort keeps variant order for matches at the same offset
        results.sort_by_key(|(start, _)| *start);
        results.into_iter().map(|(_, m)| m).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::patterns::*;
    use pretty_assertions::assert_eq;

    fn passport() -> LabeledExtractor {
        LabeledExtractor::new(vec![&*PASSPORT_NO, &*PASSPORT_NO_COMPACT, &*PASSPORT_NO_ARABIC])
    }

    #[test]
    fn test_first_match_only() {
        let extractor = LabeledExtractor::single(&VISA_NO);
        let text = "Visa No. 111\nVisa No. 222";
        assert_eq!(extractor.extract(text).unwrap().value, "111");
        assert_eq!(extractor.extract_all(text).len(), 2);
    }

    #[test]
    fn test_earliest_label_in_text_wins() {
        let text = "PassportNo.ZZ1\nPassport No. AA2";
        assert_eq!(passport().extract(text).unwrap().value, "ZZ1");

        let text = "Passport No. AA2\nPassportNo.ZZ1";
        assert_eq!(passport().extract(text).unwrap().value, "AA2");
    }

    #[test]
    fn test_extract_all_in_text_order() {
        let text = "\u{0631}\u{0642}\u{0645} \u{0627}\u{0644}\u{062C}\u{0648}\u{0627}\u{0632} P1\n\
                    PassportNo.P2\nPassport No. P3";
        let values: Vec<_> = passport()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(values, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_position_points_at_value() {
        let text = "Visa No. 4455";
        let m = LabeledExtractor::single(&VISA_NO).extract(text).unwrap();
        let (start, end) = m.position.unwrap();
        assert_eq!(&text[start..end], "4455");
        assert_eq!(m.source, "Visa No. 4455");
    }

    #[test]
    fn test_no_match() {
        assert!(passport().extract("Nationality France").is_none());
        assert!(passport().extract_all("").is_empty());
    }
}

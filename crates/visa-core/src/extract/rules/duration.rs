//! Duration-of-stay recovery from a two-line window.
//!
//! The value is usually printed on the label's line or wrapped onto the
//! next one, and often in Arabic-Indic digits.

use tracing::trace;

use super::patterns::{DIGIT_RUN, DURATION_LABEL};
use super::{ExtractionMatch, FieldExtractor};
use crate::text::split_lines;

/// Finds the first digit run in the line holding the duration label plus
/// the line after it.
///
/// The value is returned as matched; digit conversion is left to the
/// caller's post-processing.
pub struct DurationExtractor {
    label: &'static str,
}

impl DurationExtractor {
    pub fn new() -> Self {
        Self { label: DURATION_LABEL }
    }

    /// Windows of `line i + line i+1` for each line holding the label, in
    /// text order.
    fn windows<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        let mut lines = split_lines(text).peekable();
        std::iter::from_fn(move || {
            while let Some(line) = lines.next() {
                if line.contains(self.label) {
                    let mut window = line.to_string();
                    if let Some(next) = lines.peek() {
                        window.push_str(next);
                    }
                    return Some(window);
                }
            }
            None
        })
    }

    fn digit_run(window: &str) -> Option<ExtractionMatch<String>> {
        let m = DIGIT_RUN.find(window)?;
        trace!("Duration window {:?} -> {:?}", window, m.as_str());
        Some(ExtractionMatch::new(m.as_str().to_string(), window).with_position(m.start(), m.end()))
    }
}

impl Default for DurationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DurationExtractor {
    type Output = ExtractionMatch<String>;

    /// Only the first labelled line is considered. If its window has no
    /// digits the field is absent, whatever later lines hold.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let window = self.windows(text).next()?;
        Self::digit_run(&window)
    }

    /// One result per labelled line whose window has a digit run.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.windows(text).filter_map(|w| Self::digit_run(&w)).collect()
    }
}

//! Bidirectional reordering (UAX #9) of extracted page text.

use unicode_bidi::{BidiInfo, Level};

use super::lines::lines_with_breaks;
use crate::models::BaseDirection;

/// Reorder bidirectional text per line into display order.
///
/// Line breaks are kept where they are, so line-based rules still see the
/// page's line structure after reordering.
pub fn reorder_lines(text: &str, direction: BaseDirection) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());
    for (line, line_break) in lines_with_breaks(text) {
        if !line.is_empty() {
            out.push_str(&reorder_single_line(line, direction));
        }
        out.push_str(line_break);
    }
    out
}

fn reorder_single_line(line: &str, direction: BaseDirection) -> String {
    let level = match direction {
        BaseDirection::Auto => None,
        BaseDirection::Ltr => Some(Level::ltr()),
    };

    let info = BidiInfo::new(line, level);
    if info.paragraphs.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    for para in &info.paragraphs {
        out.push_str(&info.reorder_line(para, para.range.clone()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_stays_empty() {
        assert_eq!(reorder_lines("", BaseDirection::Auto), "");
    }

    #[test]
    fn test_ltr_text_is_unchanged() {
        let text = "Nationality United Kingdom\nVisa No. 123456";
        assert_eq!(reorder_lines(text, BaseDirection::Auto), text);
    }

    #[test]
    fn test_rtl_run_reversed_in_ltr_line() {
        // "abc" then alef, beh: the Arabic run comes out reversed.
        let line = "abc \u{0627}\u{0628}";
        assert_eq!(
            reorder_lines(line, BaseDirection::Ltr),
            "abc \u{0628}\u{0627}"
        );
    }

    #[test]
    fn test_newlines_preserved() {
        let text = "\u{0627}\u{0628}\n\nabc\n";
        let out = reorder_lines(text, BaseDirection::Auto);
        assert_eq!(out, "\u{0628}\u{0627}\n\nabc\n");
    }

    #[test]
    fn test_carriage_returns_split_lines() {
        let text = "\u{0627}\u{0628}\rabc\r\n\u{062A}\u{062B}";
        let out = reorder_lines(text, BaseDirection::Auto);
        assert_eq!(out, "\u{0628}\u{0627}\rabc\r\n\u{062B}\u{062A}");
    }

    #[test]
    fn test_arabic_indic_digits_keep_order() {
        let line = "Duration of Stay \u{0669}\u{0660}";
        assert_eq!(reorder_lines(line, BaseDirection::Ltr), line);
    }
}

//! Arabic-Indic to Latin numeral conversion.

/// Arabic-Indic digits ٠..٩, indexed by value.
const ARABIC_INDIC_DIGITS: [char; 10] = [
    '\u{0660}', '\u{0661}', '\u{0662}', '\u{0663}', '\u{0664}',
    '\u{0665}', '\u{0666}', '\u{0667}', '\u{0668}', '\u{0669}',
];

/// Check whether `c` is an Arabic-Indic digit (U+0660..U+0669).
pub fn is_arabic_indic_digit(c: char) -> bool {
    ARABIC_INDIC_DIGITS.contains(&c)
}

/// Latin digit for a single Arabic-Indic digit.
pub fn latin_digit(c: char) -> Option<char> {
    ARABIC_INDIC_DIGITS
        .iter()
        .position(|&d| d == c)
        .and_then(|value| char::from_digit(value as u32, 10))
}

/// Convert every Arabic-Indic digit to its Latin counterpart.
///
/// Conversion is per character: anything without a mapping is kept as is,
/// so mixed runs keep whatever could not be converted.
pub fn arabic_indic_to_latin(s: &str) -> String {
    s.chars().map(|c| latin_digit(c).unwrap_or(c)).collect()
}

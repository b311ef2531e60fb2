//! Regex patterns for visa field extraction.
//!
//! Labels are matched case-sensitively. The `.` after `No` is an unescaped
//! wildcard and matches any character.

use lazy_static::lazy_static;
use regex::Regex;

/// Phrase that marks the duration-of-stay line.
pub const DURATION_LABEL: &str = "Duration of Stay";

lazy_static! {
    pub static ref NATIONALITY: Regex = Regex::new(
        r"Nationality\s+([A-Za-z ]+)"
    ).unwrap();

    // Passport label variants; the leftmost label in the text wins
    pub static ref PASSPORT_NO: Regex = Regex::new(
        r"Passport No.\s*([A-Z0-9]+)"
    ).unwrap();

    pub static ref PASSPORT_NO_COMPACT: Regex = Regex::new(
        r"PassportNo.\s*([A-Z0-9]+)"
    ).unwrap();

    // رقم الجواز
    pub static ref PASSPORT_NO_ARABIC: Regex = Regex::new(
        r"\x{0631}\x{0642}\x{0645} \x{0627}\x{0644}\x{062C}\x{0648}\x{0627}\x{0632}\s*([A-Z0-9]+)"
    ).unwrap();

    pub static ref VISA_NO: Regex = Regex::new(
        r"Visa No.\s+(\d+)"
    ).unwrap();

    // Validity dates: DD/MM/YYYY literal, no calendar check
    pub static ref VALID_FROM: Regex = Regex::new(
        r"Valid From\s+(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref VALID_UNTIL: Regex = Regex::new(
        r"Valid Until\s+(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref ENTRY_TYPE: Regex = Regex::new(
        r"Entry Type\s+(Single|Multiple)"
    ).unwrap();

    // Latin, Arabic-Indic, or mixed digit run
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"(\d+|[\x{0660}-\x{0669}]+)"
    ).unwrap();
}

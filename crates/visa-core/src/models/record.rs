//! Visa record model: one row of output per input document.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layout of the `Valid From` / `Valid Until` tokens.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Structured fields extracted from one visa document.
///
/// Absent fields are `None`. Values are only set through the consuming
/// `with_*` builders, so a record cannot change after it is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaRecord {
    name: String,
    country: Option<String>,
    passport_number: Option<String>,
    visa_no: Option<String>,
    valid_from: Option<String>,
    valid_until: Option<String>,
    duration_of_stay: Option<String>,
    entry_type: Option<EntryType>,
}

/// Visa entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Single,
    Multiple,
}

impl EntryType {
    /// Label as printed on the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Single => "Single",
            EntryType::Multiple => "Multiple",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Single" => Ok(EntryType::Single),
            "Multiple" => Ok(EntryType::Multiple),
            other => Err(format!("unknown entry type: {}", other)),
        }
    }
}

impl VisaRecord {
    /// Column headers, in output order.
    pub const HEADERS: [&'static str; 8] = [
        "Name",
        "Country",
        "Passport Number",
        "Visa No",
        "Valid From",
        "Valid Until",
        "Duration of Stay",
        "Entry Type",
    ];

    /// Start a record with only the name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: None,
            passport_number: None,
            visa_no: None,
            valid_from: None,
            valid_until: None,
            duration_of_stay: None,
            entry_type: None,
        }
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    pub fn with_passport_number(mut self, passport_number: Option<String>) -> Self {
        self.passport_number = passport_number;
        self
    }

    pub fn with_visa_no(mut self, visa_no: Option<String>) -> Self {
        self.visa_no = visa_no;
        self
    }

    pub fn with_valid_from(mut self, valid_from: Option<String>) -> Self {
        self.valid_from = valid_from;
        self
    }

    pub fn with_valid_until(mut self, valid_until: Option<String>) -> Self {
        self.valid_until = valid_until;
        self
    }

    pub fn with_duration_of_stay(mut self, duration: Option<String>) -> Self {
        self.duration_of_stay = duration;
        self
    }

    pub fn with_entry_type(mut self, entry_type: Option<EntryType>) -> Self {
        self.entry_type = entry_type;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn passport_number(&self) -> Option<&str> {
        self.passport_number.as_deref()
    }

    pub fn visa_no(&self) -> Option<&str> {
        self.visa_no.as_deref()
    }

    pub fn valid_from(&self) -> Option<&str> {
        self.valid_from.as_deref()
    }

    pub fn valid_until(&self) -> Option<&str> {
        self.valid_until.as_deref()
    }

    /// Duration of stay in Latin digits.
    pub fn duration_of_stay(&self) -> Option<&str> {
        self.duration_of_stay.as_deref()
    }

    pub fn entry_type(&self) -> Option<EntryType> {
        self.entry_type
    }

    /// Cells in `HEADERS` order. `None` renders as a blank cell.
    pub fn to_row(&self) -> [Option<&str>; 8] {
        [
            Some(self.name.as_str()),
            self.country(),
            self.passport_number(),
            self.visa_no(),
            self.valid_from(),
            self.valid_until(),
            self.duration_of_stay(),
            self.entry_type.as_ref().map(EntryType::as_str),
        ]
    }

    /// True when nothing besides the name was found.
    pub fn is_blank(&self) -> bool {
        self.to_row().iter().skip(1).all(Option::is_none)
    }

    /// Number of fields that carry a value, name included.
    pub fn filled_count(&self) -> usize {
        self.to_row().iter().filter(|c| c.is_some()).count()
    }

    /// Validity window as calendar dates.
    ///
    /// The captured literals are not validated, so this returns `None` when
    /// either side is missing or is not a real date (e.g. `31/13/9999`).
    pub fn validity_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = NaiveDate::parse_from_str(self.valid_from()?, DATE_FORMAT).ok()?;
        let until = NaiveDate::parse_from_str(self.valid_until()?, DATE_FORMAT).ok()?;
        Some((from, until))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> VisaRecord {
        VisaRecord::new("john_smith")
            .with_country(Some("United Kingdom".to_string()))
            .with_valid_from(Some("01/01/2024".to_string()))
            .with_valid_until(Some("31/12/2024".to_string()))
            .with_entry_type(Some(EntryType::Multiple))
    }

    #[test]
    fn test_headers_order() {
        assert_eq!(
            VisaRecord::HEADERS.join(","),
            "Name,Country,Passport Number,Visa No,Valid From,Valid Until,Duration of Stay,Entry Type"
        );
    }

    #[test]
    fn test_row_keeps_absent_cells() {
        let record = sample();
        let row = record.to_row();
        assert_eq!(
            row,
            [
                Some("john_smith"),
                Some("United Kingdom"),
                None,
                None,
                Some("01/01/2024"),
                Some("31/12/2024"),
                None,
                Some("Multiple"),
            ]
        );
    }

    #[test]
    fn test_blank_record() {
        let record = VisaRecord::new("empty");
        assert!(record.is_blank());
        assert_eq!(record.filled_count(), 1);
        assert!(!sample().is_blank());
        assert_eq!(sample().filled_count(), 5);
    }

    #[test]
    fn test_validity_period() {
        let (from, until) = sample().validity_period().unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(until, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_validity_period_rejects_impossible_date() {
        let record = sample().with_valid_until(Some("31/13/9999".to_string()));
        assert_eq!(record.valid_until(), Some("31/13/9999"));
        assert!(record.validity_period().is_none());
    }

    #[test]
    fn test_serialize_absent_as_null() {
        let json = serde_json::to_value(VisaRecord::new("a")).unwrap();
        assert_eq!(json["name"], "a");
        assert!(json["country"].is_null());
        assert!(json["entry_type"].is_null());

        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["entry_type"], "Multiple");
    }

    #[test]
    fn test_entry_type_from_str() {
        assert_eq!("Single".parse::<EntryType>(), Ok(EntryType::Single));
        assert!("single".parse::<EntryType>().is_err());
    }
}

//! Core domain types for the calendar schedule.

use serde::{Deserialize, Serialize};

/// Names of the six prayer/twilight time fields, in output order.
pub const TIME_FIELDS: [&str; 6] = ["fajr", "sunrise", "dhuhr", "asr", "maghrib", "isha"];

// ---------------------------------------------------------------------------
// CellValue
// ---------------------------------------------------------------------------

/// A single spreadsheet cell, kept in the type the workbook stored it in.
///
/// Serialized untagged, so a record looks exactly like the sheet:
/// text stays a JSON string, whole numbers become JSON integers, and empty
/// cells become `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty or absent cell.
    #[default]
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Integer, or a float without fractional part.
    Integer(i64),
    /// Any other number.
    Number(f64),
    /// Text, including rendered dates and error literals.
    Text(String),
}

impl CellValue {
    /// Whether the value counts as "empty" for the row skip rule.
    ///
    /// `Null`, `""`, `0`, `0.0` and `false` are falsy. Whitespace-only text
    /// is not.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Integer(i) => *i == 0,
            Self::Number(f) => *f == 0.0,
            Self::Text(s) => s.is_empty(),
        }
    }

    /// Render the value as plain text (`Null` renders as an empty string).
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Number(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Borrow the inner string of a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

// ---------------------------------------------------------------------------
// DayRecord
// ---------------------------------------------------------------------------

/// One calendar day of the schedule.
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Weekday label.
    pub day_name: CellValue,
    /// Ordinal day of the lunar month.
    pub ramadan_date: CellValue,
    /// Civil date label.
    pub gregorian_date: CellValue,
    pub fajr: CellValue,
    pub sunrise: CellValue,
    pub dhuhr: CellValue,
    pub asr: CellValue,
    pub maghrib: CellValue,
    pub isha: CellValue,
}

impl DayRecord {
    /// JSON key order of a serialized record.
    pub const FIELD_NAMES: [&'static str; 9] = [
        "day_name",
        "ramadan_date",
        "gregorian_date",
        "fajr",
        "sunrise",
        "dhuhr",
        "asr",
        "maghrib",
        "isha",
    ];

    /// Build a record from nine cells by position.
    pub fn from_cells(cells: [CellValue; 9]) -> Self {
        let [
            day_name,
            ramadan_date,
            gregorian_date,
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
        ] = cells;

        Self {
            day_name,
            ramadan_date,
            gregorian_date,
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
        }
    }

    /// All nine values in field order.
    pub fn values(&self) -> [&CellValue; 9] {
        [
            &self.day_name,
            &self.ramadan_date,
            &self.gregorian_date,
            &self.fajr,
            &self.sunrise,
            &self.dhuhr,
            &self.asr,
            &self.maghrib,
            &self.isha,
        ]
    }

    /// Mutable access to the six time fields, in [`TIME_FIELDS`] order.
    pub fn times_mut(&mut self) -> [&mut CellValue; 6] {
        [
            &mut self.fajr,
            &mut self.sunrise,
            &mut self.dhuhr,
            &mut self.asr,
            &mut self.maghrib,
            &mut self.isha,
        ]
    }
}

//! Optional normalization of time and date labels.
//!
//! Times such as `05:15 ص` or `7:05 PM` become 24-hour `HH:MM`; civil dates
//! such as `18 فبراير، 2026` become ISO `2026-02-18`. Anything that does not
//! match is left as it was.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use tracing::debug;

use imsakia_shared::{CellValue, DayRecord, TIME_FIELDS};

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// `H:MM`, optional seconds, optional AM/PM marker (Arabic or Latin).
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})(?::\d{2})?\s*(ص|م|am|pm)?\s*$").expect("time regex")
});

/// `<day> <month name>[،] <year>`.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s+([^\s،,0-9]+)\s*[،,]?\s*(\d{4})\s*$").expect("date regex")
});

/// Arabic names of the Gregorian months, including common unhamzated spellings.
const MONTHS: &[(&str, u32)] = &[
    ("يناير", 1),
    ("فبراير", 2),
    ("مارس", 3),
    ("أبريل", 4),
    ("ابريل", 4),
    ("إبريل", 4),
    ("مايو", 5),
    ("يونيو", 6),
    ("يوليو", 7),
    ("أغسطس", 8),
    ("اغسطس", 8),
    ("سبتمبر", 9),
    ("أكتوبر", 10),
    ("اكتوبر", 10),
    ("نوفمبر", 11),
    ("ديسمبر", 12),
];

/// Parse a clock label into 24-hour `HH:MM`.
///
/// `م`/PM adds twelve hours to hours below 12, so `15:30 م` stays `15:30`;
/// `ص`/AM maps 12 to 00.
pub fn normalize_time(label: &str) -> Option<String> {
    let caps = TIME_RE.captures(label)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;

    match caps.get(3).map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("م") | Some("pm") if hour < 12 => hour += 12,
        Some("ص") | Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0).map(|t| t.format("%H:%M").to_string())
}

/// Parse an Arabic civil date label into ISO `YYYY-MM-DD`.
pub fn normalize_date(label: &str) -> Option<String> {
    let caps = DATE_RE.captures(label)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = MONTHS
        .iter()
        .find(|(name, _)| *name == &caps[2])
        .map(|(_, m)| *m)?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Rewrite the time and date fields of `record` in place.
///
/// Returns how many values changed. `day_name` and `ramadan_date` are never
/// touched, and only text cells are considered.
pub fn normalize_record(record: &mut DayRecord) -> usize {
    let mut changed = 0;

    if rewrite(&mut record.gregorian_date, "gregorian_date", normalize_date) {
        changed += 1;
    }

    for (value, field) in record.times_mut().into_iter().zip(TIME_FIELDS) {
        if rewrite(value, field, normalize_time) {
            changed += 1;
        }
    }

    changed
}

fn rewrite(value: &mut CellValue, field: &str, parse: fn(&str) -> Option<String>) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };

    match parse(text) {
        Some(normalized) if normalized != text => {
            *value = CellValue::Text(normalized);
            true
        }
        Some(_) => false,
        None => {
            debug!(field, value = text, "value left as-is, no recognizable format");
            false
        }
    }
}

//! Rendering of Wikidata time values.
//!
//! Wikidata stores times as signed ISO-like strings
//! (`+1850-00-00T00:00:00Z`) together with a precision code between 0
//! (billion years) and 14 (second). Month and day are `00` when the precision
//! does not cover them. Only precisions from century upwards get a friendly
//! rendering; everything else, and anything that fails to parse, keeps the
//! raw string.

use chrono::{Month, NaiveDate};
use thiserror::Error;

/// Precision code for centuries.
pub const PRECISION_CENTURY: u8 = 7;
/// Precision code for decades.
pub const PRECISION_DECADE: u8 = 8;
/// Precision code for years.
pub const PRECISION_YEAR: u8 = 9;
/// Precision code for months.
pub const PRECISION_MONTH: u8 = 10;
/// Precision code for days. Finer precisions render like days.
pub const PRECISION_DAY: u8 = 11;

/// Why a time value could not be given a friendly rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("no precision given")]
    MissingPrecision,

    #[error("precision {0} has no friendly rendering")]
    UnsupportedPrecision(u8),

    #[error("malformed time string {0:?}")]
    Malformed(String),
}

/// The calendar components of a Wikidata time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeParts {
    year: i64,
    month: u32,
    day: u32,
}

impl TimeParts {
    fn parse(raw: &str) -> Result<Self, TimeFormatError> {
        let malformed = || TimeFormatError::Malformed(raw.to_string());

        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let date = unsigned.split('T').next().unwrap_or(unsigned);
        let mut fields = date.splitn(3, '-');

        let year_field = fields.next().filter(|y| is_digits(y)).ok_or_else(malformed)?;
        let year: i64 = year_field.parse().map_err(|_| malformed())?;
        let month = parse_component(fields.next()).ok_or_else(malformed)?;
        let day = parse_component(fields.next()).ok_or_else(malformed)?;

        Ok(Self {
            year: if negative { -year } else { year },
            month,
            day,
        })
    }

    fn month_name(self) -> Option<&'static str> {
        let month = u8::try_from(self.month).ok()?;
        Month::try_from(month).ok().map(|m| m.name())
    }
}

/// Parse an optional month or day field; an absent field counts as `0`.
fn parse_component(field: Option<&str>) -> Option<u32> {
    match field {
        None => Some(0),
        Some(f) if is_digits(f) => f.parse().ok(),
        Some(_) => None,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Render a time value, falling back to the raw string on any failure.
pub fn format_time(raw: &str, precision: Option<u8>) -> String {
    try_format_time(raw, precision).unwrap_or_else(|err| {
        log::debug!("keeping raw time {}: {}", raw, err);
        raw.to_string()
    })
}

/// Render a time value according to its precision.
///
/// # Errors
/// Returns a [`TimeFormatError`] when the precision has no friendly rendering
/// or the string does not carry the components the precision needs.
pub fn try_format_time(raw: &str, precision: Option<u8>) -> Result<String, TimeFormatError> {
    let precision = precision.ok_or(TimeFormatError::MissingPrecision)?;
    let parts = TimeParts::parse(raw)?;
    let malformed = || TimeFormatError::Malformed(raw.to_string());

    match precision {
        p if p >= PRECISION_DAY => {
            let year = i32::try_from(parts.year).map_err(|_| malformed())?;
            NaiveDate::from_ymd_opt(year, parts.month, parts.day).ok_or_else(malformed)?;
            let month = parts.month_name().ok_or_else(malformed)?;
            Ok(format!("{} {}, {}", month, parts.day, parts.year))
        }
        PRECISION_MONTH => {
            let month = parts.month_name().ok_or_else(malformed)?;
            Ok(format!("{} {}", month, parts.year))
        }
        PRECISION_YEAR => Ok(parts.year.to_string()),
        PRECISION_DECADE => Ok(format!("{}s", parts.year.div_euclid(10) * 10)),
        PRECISION_CENTURY => {
            let century = parts.year.div_euclid(100) + 1;
            Ok(format!("{} century", ordinal(century)))
        }
        other => Err(TimeFormatError::UnsupportedPrecision(other)),
    }
}

/// `1` → `1st`, `12` → `12th`, `23` → `23rd`.
pub fn ordinal(n: i64) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

fn ordinal_suffix(n: i64) -> &'static str {
    let n = n.unsigned_abs();
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_century_precision() {
        assert_eq!(format_time("+1850-01-01T00:00:00Z", Some(7)), "19th century");
        assert_eq!(format_time("+2001-01-01T00:00:00Z", Some(7)), "21st century");
        assert_eq!(format_time("+1150-00-00T00:00:00Z", Some(7)), "12th century");
    }

    #[test]
    fn test_decade_precision() {
        assert_eq!(format_time("+1987-01-01T00:00:00Z", Some(8)), "1980s");
        assert_eq!(format_time("+1990-00-00T00:00:00Z", Some(8)), "1990s");
    }

    #[test]
    fn test_year_precision_ignores_zero_month_and_day() {
        assert_eq!(format_time("+1879-00-00T00:00:00Z", Some(9)), "1879");
    }

    #[test]
    fn test_month_precision() {
        assert_eq!(format_time("+1969-07-00T00:00:00Z", Some(10)), "July 1969");
    }

    #[test]
    fn test_day_precision_and_finer() {
        assert_eq!(format_time("+1879-03-14T00:00:00Z", Some(11)), "March 14, 1879");
        assert_eq!(format_time("+1879-03-14T00:00:00Z", Some(14)), "March 14, 1879");
    }

    #[test]
    fn test_negative_year() {
        assert_eq!(format_time("-0500-00-00T00:00:00Z", Some(9)), "-500");
        assert_eq!(format_time("-0044-03-15T00:00:00Z", Some(11)), "March 15, -44");
    }

    #[test]
    fn test_unsupported_precision_keeps_raw() {
        let raw = "+13798000000-00-00T00:00:00Z";
        assert_eq!(format_time(raw, Some(1)), raw);
        assert_eq!(
            try_format_time(raw, Some(1)),
            Err(TimeFormatError::UnsupportedPrecision(1))
        );
    }

    #[test]
    fn test_missing_precision_keeps_raw() {
        let raw = "+1990-01-01T00:00:00Z";
        assert_eq!(format_time(raw, None), raw);
    }

    #[test]
    fn test_malformed_input_keeps_raw() {
        for raw in ["", "yesterday", "+19x0-01-01T00:00:00Z"] {
            assert_eq!(format_time(raw, Some(9)), raw);
        }
        // Day precision needs a real calendar date.
        assert_eq!(format_time("+1990-00-00T00:00:00Z", Some(11)), "+1990-00-00T00:00:00Z");
        assert_eq!(format_time("+1990-02-30T00:00:00Z", Some(11)), "+1990-02-30T00:00:00Z");
        assert_eq!(format_time("+1990-13-00T00:00:00Z", Some(10)), "+1990-13-00T00:00:00Z");
    }

    #[test]
    fn test_formatting_is_repeatable() {
        let first = format_time("+1850-01-01T00:00:00Z", Some(7));
        let second = format_time("+1850-01-01T00:00:00Z", Some(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (111, "111th"),
            (-4, "-4th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }
}

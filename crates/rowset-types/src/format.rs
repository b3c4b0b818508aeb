//! Text formatting for SQL values that have no native cell kind.
//!
//! DECIMAL, DATE, TIME, DATETIME, DATETIMEOFFSET and UNIQUEIDENTIFIER values
//! are rendered to canonical strings by the producer and travel through the
//! intern table. Repeated values (the same date on many rows, for example)
//! therefore cost four bytes per repetition.
//!
//! | SQL type | Output |
//! |----------|--------|
//! | `DECIMAL(p, s)` | `-123.4500` (exactly `s` fraction digits) |
//! | `DATE` | `2024-01-31` |
//! | `TIME` | `13:45:00` or `13:45:00.1234567` |
//! | `DATETIME2` | `2024-01-31T13:45:00` or `...T13:45:00.250000` |
//! | `DATETIMEOFFSET` | `...Z` or `...+05:30` |
//! | `UNIQUEIDENTIFIER` | lowercase hyphenated |

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::error::TypeError;

/// Days from 0001-01-01 (day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const MICROS_PER_SECOND: i64 = 1_000_000;
const SECONDS_PER_DAY: i64 = 86_400;
/// SQL Server caps DECIMAL precision at 38 digits.
const MAX_DECIMAL_SCALE: u8 = 38;

/// Render a scaled integer as a decimal string.
pub fn decimal_to_string(value: i128, scale: u8) -> Result<String, TypeError> {
    if scale == 0 {
        return Ok(value.to_string());
    }
    if scale > MAX_DECIMAL_SCALE {
        return Err(TypeError::OutOfRange {
            target_type: "DECIMAL",
        });
    }

    let divisor = 10u128.pow(u32::from(scale));
    let abs = value.unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    Ok(format!(
        "{sign}{}.{:0>width$}",
        abs / divisor,
        abs % divisor,
        width = scale as usize
    ))
}

/// Render days since 1970-01-01 as `YYYY-MM-DD`.
pub fn unix_days_to_iso(unix_days: i32) -> Result<String, TypeError> {
    Ok(format_date(date_from_unix_days(unix_days)?))
}

/// Render nanoseconds since midnight as `HH:MM:SS[.fffffff]`.
///
/// The fraction uses SQL Server's seven-digit (100 ns) resolution and is
/// omitted when the value falls on a whole second.
pub fn nanos_to_time_str(nanos: u64) -> Result<String, TypeError> {
    let out_of_range = TypeError::OutOfRange {
        target_type: "TIME",
    };
    let secs = u32::try_from(nanos / NANOS_PER_SECOND).map_err(|_| out_of_range.clone())?;
    let frac = (nanos % NANOS_PER_SECOND) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).ok_or(out_of_range)?;

    let hms = format_hms(time);
    if frac == 0 {
        Ok(hms)
    } else {
        Ok(format!("{hms}.{:07}", frac / 100))
    }
}

/// Render microseconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
///
/// Negative inputs floor toward the earlier instant, so `-1` renders as
/// `1969-12-31T23:59:59.999999`.
pub fn micros_to_iso(micros: i64) -> Result<String, TypeError> {
    let out_of_range = TypeError::OutOfRange {
        target_type: "DATETIME",
    };
    let total_secs = micros.div_euclid(MICROS_PER_SECOND);
    let frac = micros.rem_euclid(MICROS_PER_SECOND);
    let days = i32::try_from(total_secs.div_euclid(SECONDS_PER_DAY))
        .map_err(|_| out_of_range.clone())?;
    let day_secs = total_secs.rem_euclid(SECONDS_PER_DAY) as u32;

    let date = date_from_unix_days(days).map_err(|_| out_of_range.clone())?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(day_secs, 0).ok_or(out_of_range)?;

    let base = format!("{}T{}", format_date(date), format_hms(time));
    if frac == 0 {
        Ok(base)
    } else {
        Ok(format!("{base}.{frac:06}"))
    }
}

/// Render a DATETIMEOFFSET as [`micros_to_iso`] plus `Z` or `±HH:MM`.
pub fn micros_offset_to_iso(micros: i64, offset_minutes: i16) -> Result<String, TypeError> {
    let base = micros_to_iso(micros)?;
    if offset_minutes == 0 {
        return Ok(format!("{base}Z"));
    }
    let sign = if offset_minutes > 0 { '+' } else { '-' };
    let abs = offset_minutes.unsigned_abs();
    Ok(format!("{base}{sign}{:02}:{:02}", abs / 60, abs % 60))
}

/// Render a GUID as lowercase hyphenated text.
#[must_use]
pub fn guid_to_string(bytes: &[u8; 16]) -> String {
    uuid::Uuid::from_bytes(*bytes).hyphenated().to_string()
}

fn date_from_unix_days(unix_days: i32) -> Result<NaiveDate, TypeError> {
    unix_days
        .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or(TypeError::OutOfRange {
            target_type: "DATE",
        })
}

fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

fn format_hms(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_to_string() {
        assert_eq!(decimal_to_string(42, 0).unwrap(), "42");
        assert_eq!(decimal_to_string(-120345, 4).unwrap(), "-12.0345");
        assert_eq!(decimal_to_string(5, 3).unwrap(), "0.005");
        assert_eq!(decimal_to_string(-5, 3).unwrap(), "-0.005");
        assert_eq!(decimal_to_string(1000, 2).unwrap(), "10.00");
    }

    #[test]
    fn test_decimal_extreme_values() {
        let s = decimal_to_string(i128::MIN, 38).unwrap();
        assert!(s.starts_with("-1.7014118346046923173168730371588410572"));
        assert!(decimal_to_string(1, 39).is_err());
    }

    #[test]
    fn test_unix_days_to_iso() {
        assert_eq!(unix_days_to_iso(0).unwrap(), "1970-01-01");
        assert_eq!(unix_days_to_iso(-1).unwrap(), "1969-12-31");
        assert_eq!(unix_days_to_iso(19_723).unwrap(), "2024-01-01");
        assert_eq!(unix_days_to_iso(-719_162).unwrap(), "0001-01-01");
        assert_eq!(unix_days_to_iso(2_932_896).unwrap(), "9999-12-31");
        assert!(unix_days_to_iso(i32::MAX).is_err());
    }

    #[test]
    fn test_nanos_to_time_str() {
        assert_eq!(nanos_to_time_str(0).unwrap(), "00:00:00");
        assert_eq!(
            nanos_to_time_str(3_661 * NANOS_PER_SECOND + 123_456_700).unwrap(),
            "01:01:01.1234567"
        );
        assert_eq!(
            nanos_to_time_str(86_399 * NANOS_PER_SECOND + 999_999_900).unwrap(),
            "23:59:59.9999999"
        );
        assert!(nanos_to_time_str(86_400 * NANOS_PER_SECOND).is_err());
    }

    #[test]
    fn test_micros_to_iso() {
        assert_eq!(micros_to_iso(0).unwrap(), "1970-01-01T00:00:00");
        assert_eq!(micros_to_iso(1_500_000).unwrap(), "1970-01-01T00:00:01.500000");
        assert_eq!(micros_to_iso(-1).unwrap(), "1969-12-31T23:59:59.999999");
        assert_eq!(
            micros_to_iso(1_704_067_200 * MICROS_PER_SECOND + 45_296 * MICROS_PER_SECOND).unwrap(),
            "2024-01-01T12:34:56"
        );
        assert!(micros_to_iso(i64::MAX).is_err());
    }

    #[test]
    fn test_micros_offset_to_iso() {
        assert_eq!(micros_offset_to_iso(0, 0).unwrap(), "1970-01-01T00:00:00Z");
        assert_eq!(
            micros_offset_to_iso(0, 330).unwrap(),
            "1970-01-01T00:00:00+05:30"
        );
        assert_eq!(
            micros_offset_to_iso(0, -480).unwrap(),
            "1970-01-01T00:00:00-08:00"
        );
    }

    #[test]
    fn test_guid_to_string() {
        let bytes = [
            0x67, 0xe5, 0x50, 0x44, 0x10, 0xb1, 0x42, 0x6f, 0x92, 0x47, 0xbb, 0x68, 0x0e, 0x5f,
            0xe0, 0xc8,
        ];
        assert_eq!(
            guid_to_string(&bytes),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }
}

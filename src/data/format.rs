//! Cell value formatting, including spreadsheet date-serial decoding.
//!
//! Spreadsheet files store dates as day counts from a 1900 epoch, so a
//! "Date" column arrives here as a bare integer. Integral values in a
//! plausible serial range are decoded to `YYYY-MM-DD`; everything else
//! renders in its plain string form.

use chrono::{Datelike, Days, NaiveDate};
use log::warn;

use super::Value;

/// Exclusive lower bound of the date-serial range.
const DATE_SERIAL_MIN: f64 = 1.0;
/// Exclusive upper bound of the date-serial range.
const DATE_SERIAL_MAX: f64 = 100_000.0;

/// Format a raw cell value for substitution into element text.
///
/// Empty cells format as the empty string. Integral numbers strictly
/// between 1 and 100000 are treated as 1900-epoch date serials; a serial
/// whose decoded year falls outside `[1900, 2100]` falls back to its
/// literal numeric form.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Empty => String::new(),
        Value::Text(s) => s.clone(),
        Value::Number(n) => format_number(*n),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n > DATE_SERIAL_MIN && n < DATE_SERIAL_MAX {
        if let Some(date) = decode_date_serial(n as u64) {
            return date;
        }
    }
    plain_number(n)
}

/// Decode a 1900-epoch spreadsheet date serial to `YYYY-MM-DD`.
///
/// The epoch convention counts 1900-01-01 as serial 1, but the format's
/// historical leap-year miscalculation means serials convert correctly
/// with a minus-2-days correction: serial 2 is 1900-01-01.
fn decode_date_serial(serial: u64) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let date = epoch.checked_add_days(Days::new(serial - 2))?;
    if (1900..=2100).contains(&date.year()) {
        Some(date.format("%Y-%m-%d").to_string())
    } else {
        warn!("date serial {serial} decodes outside 1900-2100, keeping literal value");
        None
    }
}

/// Default string form of a number, matching how a dynamically-typed cell
/// value prints: integral values drop the decimal part entirely.
fn plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

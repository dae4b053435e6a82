//! Renders epoch `timestamp` fields as `YYYY-MM-DD HH:MM:SS UTC`.
//!
//! Values that are not epoch numbers (already-rendered strings, nested values, epochs
//! outside years 1 to 9999) are left exactly as they were.

use {
    super::RawRecord,
    chrono::{DateTime, Datelike, Utc},
    serde_json::{Number, Value},
};

pub const TIMESTAMP_FIELD: &str = "timestamp";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
// well past year 9999; keeps the microsecond arithmetic inside i64
const MAX_FLOAT_EPOCH: f64 = 1e12;

/// Returns `record` with its `timestamp` rendered, if it holds a non-zero epoch number.
pub fn normalize_timestamp(mut record: RawRecord) -> RawRecord {
    if let Some(rendered) = record
        .get(TIMESTAMP_FIELD)
        .and_then(|value| match value {
            Value::Number(n) => epoch_to_utc(n),
            _ => None,
        })
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
    {
        // Map::insert on an existing key keeps its position
        record.insert(TIMESTAMP_FIELD.to_string(), Value::String(rendered));
    }
    record
}

pub fn normalize_all(records: Vec<RawRecord>) -> Vec<RawRecord> {
    records.into_iter().map(normalize_timestamp).collect()
}

fn epoch_to_utc(n: &Number) -> Option<DateTime<Utc>> {
    let dt = if let Some(secs) = n.as_i64() {
        if secs == 0 {
            return None;
        }
        DateTime::from_timestamp(secs, 0)?
    } else if n.as_u64().is_some() {
        // larger than i64::MAX seconds
        return None;
    } else {
        float_epoch_to_utc(n.as_f64()?)?
    };

    // the rendered form has exactly four year digits
    (1..=9999).contains(&dt.year()).then_some(dt)
}

/// Rounds to the nearest microsecond (ties to even) before the seconds are taken.
fn float_epoch_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if secs == 0.0 || !secs.is_finite() || secs.abs() >= MAX_FLOAT_EPOCH {
        return None;
    }
    let whole = secs.trunc();
    let micros = ((secs - whole) * 1e6).round_ties_even();
    DateTime::from_timestamp_micros(whole as i64 * 1_000_000 + micros as i64)
}

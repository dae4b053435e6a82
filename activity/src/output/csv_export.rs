//! CSV export of history records.

use {
    crate::{error::ActivityResult, history::RawRecord},
    serde_json::Value,
    std::path::Path,
};

/// Default file name for an account/symbol history export.
pub fn history_file_name(account: &str, symbol: &str) -> String {
    format!("history_{account}_{symbol}.csv")
}

/// Writes `records` to `path` as CSV.
///
/// The header is the first record's keys in order. Later records missing a header key
/// get an empty cell; keys absent from the header are dropped.
///
/// # Arguments
///
/// * `records` - Normalized history records
/// * `path` - Destination file, created or truncated
///
/// # Returns
///
/// The number of data rows written. With no records nothing is created and `Ok(0)` is
/// returned.
pub fn write_csv(records: &[RawRecord], path: impl AsRef<Path>) -> ActivityResult<usize> {
    let path = path.as_ref();
    let Some(first) = records.first() else {
        log::warn!("No data to save.");
        return Ok(0);
    };

    let header: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;

    let mut count = 0;
    for record in records {
        let extra = record.keys().filter(|k| !first.contains_key(*k)).count();
        if extra > 0 {
            log::debug!("Dropping {extra} field(s) not in the header from row {count}");
        }
        writer.write_record(header.iter().map(|key| cell(record.get(*key))))?;
        count += 1;
    }
    writer.flush()?;

    log::info!("Successfully saved {count} records to {}", path.display());
    Ok(count)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::history::normalize_all, serde_json::json};

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    #[test]
    fn test_history_file_name() {
        assert_eq!(history_file_name("null", "SIM"), "history_null_SIM.csv");
    }

    #[test]
    fn test_empty_input_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history_null_SIM.csv");

        assert_eq!(write_csv(&[], &path).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history_alice_SIM.csv");
        let records = normalize_all(vec![
            record(json!({
                "account": "alice",
                "operation": "tokens_transfer",
                "quantity": "1.5",
                "timestamp": 1_700_000_000,
            })),
            record(json!({
                "account": "alice",
                "operation": "tokens_stake",
                "quantity": "2",
                "timestamp": 1_700_000_060,
            })),
            record(json!({
                "account": "alice",
                "operation": "market_buy",
                "quantity": "3, with comma",
                "timestamp": 1_700_000_120,
            })),
        ]);

        assert_eq!(write_csv(&records, &path).unwrap(), 3);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, vec!["account", "operation", "quantity", "timestamp"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "tokens_transfer");
        assert_eq!(&rows[0][3], "2023-11-14 22:13:20 UTC");
        assert_eq!(&rows[1][2], "2");
        assert_eq!(&rows[2][2], "3, with comma");
    }

    #[test]
    fn test_missing_and_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![
            record(json!({ "a": 1, "b": "x" })),
            record(json!({ "b": "y", "c": true })),
            record(json!({ "a": null, "b": { "nested": [1, 2] } })),
        ];

        assert_eq!(write_csv(&records, &path).unwrap(), 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "a,b");
        assert_eq!(lines[1], "1,x");
        assert_eq!(lines[2], ",y");
        assert_eq!(lines[3], r#","{""nested"":[1,2]}""#);
    }
}

//! Output module for exporting and displaying normalized records.
//!
//! This module provides:
//! - [`write_csv`] - CSV export of history records with a header taken from the first record
//! - [`render_table`] - Aligned console table of notification summaries
//! - [`OutputFormat`] - Notification output selected with `--format` (table, JSON)

mod csv_export;
pub mod table;

pub use csv_export::{history_file_name, write_csv};
pub use table::render_table;

use {
    crate::{error::ActivityResult, notification::NotificationSummary},
    clap::ValueEnum,
};

/// How `notifications` prints its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    Table,
    /// One compact JSON object per line
    Json,
    /// A pretty-printed JSON array
    JsonPretty,
}

/// Formats notification summaries for stdout.
pub fn format_summaries(
    rows: &[NotificationSummary],
    format: OutputFormat,
) -> ActivityResult<String> {
    Ok(match format {
        OutputFormat::Table => render_table(rows),
        OutputFormat::Json => rows
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(rows)?,
    })
}

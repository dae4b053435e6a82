//! Bordered console table for notification summaries.
//!
//! Example output:
//! ```text
//! +---+------+--------+-------------------------+---------------------+
//! | # | Type | From   | Data                    |        Date         |
//! +---+------+--------+-------------------------+---------------------+
//! | 1 | vote | @alice | voted 1.23 on your post | 2024-03-01 12:30:45 |
//! +---+------+--------+-------------------------+---------------------+
//! ```

use {
    crate::notification::NotificationSummary,
    tabled::{
        settings::{
            object::{Columns, Segment},
            Alignment, Modify, Style,
        },
        Table, Tabled,
    },
};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "From")]
    sender: String,
    #[tabled(rename = "Data")]
    description: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&NotificationSummary> for SummaryRow {
    fn from(summary: &NotificationSummary) -> Self {
        Self {
            index: summary.index,
            kind: summary.kind.clone(),
            sender: summary.sender.clone(),
            description: summary.description.clone(),
            date: summary.date.clone(),
        }
    }
}

/// Renders the summaries as a table, one row each, in the given order.
///
/// "From" and "Data" are left-aligned; the other columns are centered.
pub fn render_table(rows: &[NotificationSummary]) -> String {
    let mut table = Table::new(rows.iter().map(SummaryRow::from));
    table
        .with(Style::ascii())
        .with(Modify::new(Segment::all()).with(Alignment::center()))
        .with(Modify::new(Columns::new(2..4)).with(Alignment::left()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(index: usize, kind: &str, sender: &str, description: &str) -> NotificationSummary {
        NotificationSummary {
            index,
            kind: kind.to_string(),
            sender: sender.to_string(),
            description: description.to_string(),
            date: "2024-03-01 12:30:45".to_string(),
        }
    }

    #[test]
    fn test_render_single_row() {
        let table = render_table(&[summary(1, "vote", "@alice", "voted 1.23 on your post")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "+---+------+--------+-------------------------+---------------------+"
        );
        assert!(lines[1].starts_with("| # | Type | From   | Data                    |"));
        assert_eq!(
            lines[3],
            "| 1 | vote | @alice | voted 1.23 on your post | 2024-03-01 12:30:45 |"
        );
        assert_eq!(lines[4], lines[0]);
    }

    #[test]
    fn test_column_alignment() {
        let table = render_table(&[
            summary(1, "vote", "@a", "x"),
            summary(10, "reblog", "@longer-name", "reblogged your post"),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines
            .iter()
            .all(|l| l.chars().count() == lines[0].chars().count()));
        // From and Data hug the left border
        assert!(lines[1].contains("| From         | Data                |"));
        assert!(lines[3].contains("| @a           | x                   |"));
        // Type and Date are centered
        assert!(lines[1].contains("|  Type  |"));
        assert!(lines[1].contains("      Date      "));
        assert!(lines[3].contains("|  vote  |"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("| # | Type | From | Data | Date |"));
    }
}

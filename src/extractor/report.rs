use crate::config::ExtractConfig;
use crate::extractor::dump::{TableSnapshot, NULL_TOKEN};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Values longer than this are shortened for the single-line preview.
const TRUNCATE_AT: usize = 30;
const TRUNCATE_KEEP: usize = 27;

#[derive(Debug, Clone, Copy)]
pub struct DisplayLimits {
    pub row_limit: usize,
    pub column_limit: usize,
    pub detail_columns: usize,
}

impl From<&ExtractConfig> for DisplayLimits {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            row_limit: config.row_limit,
            column_limit: config.column_limit,
            detail_columns: config.detail_columns,
        }
    }
}

/// Machine-readable result of one inspection run, emitted as-is in JSON
/// output mode.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub dump_path: String,
    pub dump_bytes: u64,
    pub generated_at: DateTime<Utc>,
    pub tables: Vec<TableCount>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

/// Console form of a single field: `\N` becomes `NULL`, anything over 30
/// characters is cut to 27 plus an ellipsis.
pub fn format_value(raw: &str) -> String {
    if raw == NULL_TOKEN {
        return "NULL".to_string();
    }

    // Count characters, not bytes: dump values are UTF-8 text.
    if raw.chars().count() > TRUNCATE_AT {
        let kept: String = raw.chars().take(TRUNCATE_KEEP).collect();
        format!("{}...", kept)
    } else {
        raw.to_string()
    }
}

/// Render a table preview: banner, up to `row_limit` enumerated rows
/// showing the first `column_limit` fields, and a remainder note.
pub fn preview_lines(snapshot: &TableSnapshot, limits: &DisplayLimits) -> Vec<String> {
    let mut lines = Vec::new();

    if snapshot.rows.is_empty() {
        lines.push(format!("{}: no data", snapshot.name.to_uppercase()));
        return lines;
    }

    lines.push(format!(
        "=== {} ({} rows) ===",
        snapshot.name.to_uppercase(),
        snapshot.row_count()
    ));

    for (index, row) in snapshot.rows.iter().take(limits.row_limit).enumerate() {
        let shown: Vec<String> = row
            .iter()
            .take(limits.column_limit)
            .map(|value| format_value(value))
            .collect();
        lines.push(format!("  {}. {}", index + 1, shown.join(" | ")));
    }

    if snapshot.row_count() > limits.row_limit {
        lines.push(format!(
            "  ... and {} more rows",
            snapshot.row_count() - limits.row_limit
        ));
    }

    lines
}

/// Render the per-row detail pass: one block per row, `column: value` for
/// the first `detail_columns` columns. Short rows fill in `N/A`.
pub fn detail_lines(snapshot: &TableSnapshot, detail_columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for (index, row) in snapshot.rows.iter().enumerate() {
        lines.push(format!("--- {} #{} ---", snapshot.name, index + 1));
        for (col_index, column) in snapshot.columns.iter().take(detail_columns).enumerate() {
            let value = match row.get(col_index) {
                Some(value) if value == NULL_TOKEN => "NULL".to_string(),
                Some(value) => value.clone(),
                None => "N/A".to_string(),
            };
            lines.push(format!("  {}: {}", column, value));
        }
    }

    lines
}

/// Render the closing `table: count` summary, sorted by count descending.
pub fn summary_lines(counts: &[TableCount]) -> Vec<String> {
    let mut sorted: Vec<&TableCount> = counts.iter().collect();
    sorted.sort_by(|a, b| b.rows.cmp(&a.rows));

    let mut lines = vec!["Row counts:".to_string()];
    for count in sorted {
        lines.push(format!("  {}: {}", count.table, count.rows));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TableSnapshot {
        TableSnapshot {
            name: "users".to_string(),
            columns: vec!["id".to_string(), "name".to_string(), "email".to_string()],
            rows: vec![
                vec!["1".to_string(), "Alice".to_string(), "a@example.com".to_string()],
                vec!["2".to_string(), r"\N".to_string()],
            ],
        }
    }

    #[test]
    fn test_format_value_null() {
        assert_eq!(format_value(r"\N"), "NULL");
    }

    #[test]
    fn test_format_value_truncation() {
        let long = "x".repeat(31);
        let formatted = format_value(&long);
        assert_eq!(formatted, format!("{}...", "x".repeat(27)));

        let exact = "y".repeat(30);
        assert_eq!(format_value(&exact), exact);
    }

    #[test]
    fn test_format_value_multibyte() {
        let long = "é".repeat(40);
        let formatted = format_value(&long);
        assert_eq!(formatted.chars().count(), 30); // 27 kept + "..."
    }

    #[test]
    fn test_preview_banner_and_null() {
        let limits = DisplayLimits {
            row_limit: 10,
            column_limit: 5,
            detail_columns: 10,
        };
        let lines = preview_lines(&snapshot(), &limits);
        assert_eq!(lines[0], "=== USERS (2 rows) ===");
        assert_eq!(lines[1], "  1. 1 | Alice | a@example.com");
        assert_eq!(lines[2], "  2. 2 | NULL");
    }

    #[test]
    fn test_preview_row_limit_and_remainder() {
        let mut snap = snapshot();
        snap.rows = (0..14)
            .map(|i| vec![i.to_string(), format!("user{}", i)])
            .collect();
        let limits = DisplayLimits {
            row_limit: 10,
            column_limit: 5,
            detail_columns: 10,
        };
        let lines = preview_lines(&snap, &limits);
        // banner + 10 rows + remainder note
        assert_eq!(lines.len(), 12);
        assert_eq!(lines.last().unwrap(), "  ... and 4 more rows");
    }

    #[test]
    fn test_preview_empty_table() {
        let mut snap = snapshot();
        snap.rows.clear();
        let limits = DisplayLimits {
            row_limit: 10,
            column_limit: 5,
            detail_columns: 10,
        };
        let lines = preview_lines(&snap, &limits);
        assert_eq!(lines, vec!["USERS: no data"]);
    }

    #[test]
    fn test_detail_placeholders() {
        let lines = detail_lines(&snapshot(), 10);
        assert!(lines.contains(&"--- users #2 ---".to_string()));
        assert!(lines.contains(&"  name: NULL".to_string()));
        assert!(lines.contains(&"  email: N/A".to_string()));
    }

    #[test]
    fn test_detail_column_cap() {
        let lines = detail_lines(&snapshot(), 1);
        // 2 rows, 1 header + 1 column line each
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_summary_sorted_descending() {
        let counts = vec![
            TableCount {
                table: "users".to_string(),
                rows: 3,
            },
            TableCount {
                table: "rentals".to_string(),
                rows: 42,
            },
            TableCount {
                table: "empty".to_string(),
                rows: 0,
            },
        ];
        let lines = summary_lines(&counts);
        assert_eq!(
            lines,
            vec!["Row counts:", "  rentals: 42", "  users: 3", "  empty: 0"]
        );
    }
}

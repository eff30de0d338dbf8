use crate::error::{Result, SalvageError};
use regex::Regex;

/// Literal token pg_dump writes for SQL NULL inside COPY data.
pub const NULL_TOKEN: &str = r"\N";

/// One table's worth of data lifted out of a logical dump. Recomputed on
/// every extraction call; nothing here is cached or mutated afterwards.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value at (row, column) with the short-row placeholder applied.
    /// Row field counts are never validated against the column list, so
    /// display code has to index defensively.
    pub fn value_or_placeholder<'a>(&'a self, row: &'a [String], index: usize) -> &'a str {
        row.get(index).map(String::as_str).unwrap_or("N/A")
    }
}

/// Locate the first `COPY public.<table> (<cols>) FROM stdin;` block in the
/// dump text and split it into columns and tab-separated rows. Returns
/// `None` when the dump has no such block; callers treat that as "table
/// absent", not as a failure.
pub fn extract_table(dump: &str, table: &str) -> Result<Option<TableSnapshot>> {
    let pattern = format!(
        r"(?sm)COPY public\.{} \(([^)]+)\) FROM stdin;\n(.*?)^\\\.$",
        regex::escape(table)
    );
    let re = Regex::new(&pattern).map_err(|e| SalvageError::Pattern {
        table: table.to_string(),
        message: e.to_string(),
    })?;

    let captures = match re.captures(dump) {
        Some(captures) => captures,
        None => return Ok(None),
    };

    let columns: Vec<String> = captures[1].split(", ").map(str::to_string).collect();

    // Blank lines inside or after the data section carry nothing; skip them.
    let rows: Vec<Vec<String>> = captures[2]
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect();

    Ok(Some(TableSnapshot {
        name: table.to_string(),
        columns,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DUMP: &str = "\
--\n-- PostgreSQL database dump\n--\n\n\
COPY public.users (id, name) FROM stdin;\n\
1\tAlice\n\
2\t\\N\n\
\\.\n\n\
COPY public.vehicles (id, brand, model) FROM stdin;\n\
10\tBMW\tX5\n\
\\.\n";

    #[test]
    fn test_extract_table_basic() {
        let snapshot = extract_table(SAMPLE_DUMP, "users").unwrap().unwrap();
        assert_eq!(snapshot.columns, vec!["id", "name"]);
        assert_eq!(
            snapshot.rows,
            vec![vec!["1", "Alice"], vec!["2", r"\N"]]
        );
    }

    #[test]
    fn test_extract_second_table() {
        let snapshot = extract_table(SAMPLE_DUMP, "vehicles").unwrap().unwrap();
        assert_eq!(snapshot.columns, vec!["id", "brand", "model"]);
        assert_eq!(snapshot.row_count(), 1);
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let result = extract_table(SAMPLE_DUMP, "ghosts").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_table_name_is_escaped() {
        // A regex metacharacter in the name must not blow up or match wildly.
        let result = extract_table(SAMPLE_DUMP, "use.s").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_data_section() {
        let dump = "COPY public.empty (id) FROM stdin;\n\\.\n";
        let snapshot = extract_table(dump, "empty").unwrap().unwrap();
        assert_eq!(snapshot.columns, vec!["id"]);
        assert!(snapshot.rows.is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dump = "COPY public.t (a) FROM stdin;\n1\n\n2\n\\.\n";
        let snapshot = extract_table(dump, "t").unwrap().unwrap();
        assert_eq!(snapshot.row_count(), 2);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let dump = "\
COPY public.t (a) FROM stdin;\n1\n\\.\n\
COPY public.t (a) FROM stdin;\n2\n3\n\\.\n";
        let snapshot = extract_table(dump, "t").unwrap().unwrap();
        assert_eq!(snapshot.rows, vec![vec!["1"]]);
    }

    #[test]
    fn test_short_row_placeholder() {
        let snapshot = extract_table(SAMPLE_DUMP, "vehicles").unwrap().unwrap();
        let row = &snapshot.rows[0];
        assert_eq!(snapshot.value_or_placeholder(row, 1), "BMW");
        assert_eq!(snapshot.value_or_placeholder(row, 7), "N/A");
    }
}

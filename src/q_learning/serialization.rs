//! Flat text format for q-tables.
//!
//! 81 lines, one per row in index order, each holding the North, East,
//! South and West values separated by single spaces. Values are written with
//! Rust's shortest round-trip `f64` formatting, so a table written by
//! [`write_table`] reads back bit-identical and re-writes byte-identical.
//! Blank lines are ignored on read; any non-blank line past row 81 is an
//! error, as is a non-finite value.

use std::io::{BufRead, ErrorKind, Write};

use crate::{
    Error, Result,
    q_learning::q_table::{QTable, Row},
    state::DiscreteState,
    types::Action,
};

/// Parse a q-table, rejecting any shape mismatch.
pub fn read_table<R: BufRead>(reader: R) -> Result<QTable> {
    let mut rows: Vec<Row> = Vec::with_capacity(DiscreteState::ROWS);
    let mut extra = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| match source.kind() {
            ErrorKind::InvalidData => Error::TableValue {
                line: i + 1,
                token: "<invalid UTF-8>".to_string(),
            },
            _ => Error::Io {
                operation: "read q-table line".to_string(),
                source,
            },
        })?;
        if line.trim().is_empty() {
            continue;
        }
        if rows.len() == DiscreteState::ROWS {
            extra += 1;
            continue;
        }
        rows.push(parse_row(i + 1, &line)?);
    }

    if extra > 0 {
        return Err(Error::TableTrailingRows {
            expected: DiscreteState::ROWS,
            extra,
        });
    }

    QTable::from_rows(rows)
}

fn parse_row(line_no: usize, line: &str) -> Result<Row> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != Action::COUNT {
        return Err(Error::TableColumnCount {
            line: line_no,
            expected: Action::COUNT,
            got: tokens.len(),
        });
    }

    let mut row = [0.0; Action::COUNT];
    for (slot, token) in row.iter_mut().zip(tokens) {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| Error::TableValue {
                line: line_no,
                token: token.to_string(),
            })?;
    }
    Ok(row)
}

/// Write every row of `table` in index order.
pub fn write_table<W: Write>(table: &QTable, mut writer: W) -> Result<()> {
    for row in table.rows() {
        let line = row
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{line}").map_err(|source| Error::Io {
            operation: "write q-table row".to_string(),
            source,
        })?;
    }
    writer.flush().map_err(|source| Error::Io {
        operation: "flush q-table".to_string(),
        source,
    })
}

/// Render a table to its text form.
pub fn table_to_string(table: &QTable) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_table(table, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Parse a table from its text form.
pub fn table_from_str(text: &str) -> Result<QTable> {
    read_table(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        (0..DiscreteState::ROWS)
            .map(|i| format!("{} -{} 0.25 {}\n", i, i, i as f64 * 1.5))
            .collect()
    }

    #[test]
    fn test_text_roundtrip_is_byte_identical() {
        let text = sample_text();
        let table = table_from_str(&text).unwrap();
        assert_eq!(table.get(10, Action::North), 10.0);
        assert_eq!(table.get(10, Action::East), -10.0);
        assert_eq!(table.get(10, Action::West), 15.0);
        assert_eq!(table_to_string(&table), text);
    }

    #[test]
    fn test_reads_loose_whitespace_and_python_floats() {
        let mut text = String::new();
        for _ in 0..DiscreteState::ROWS {
            text.push_str("0.0 \t1.0  -2.5 200.0 \n");
        }
        text.push('\n');
        let table = table_from_str(&text).unwrap();
        assert_eq!(table.get(80, Action::West), 200.0);
        assert!(table_to_string(&table).starts_with("0 1 -2.5 200\n"));
    }

    #[test]
    fn test_missing_rows_is_format_error() {
        let text: String = sample_text().lines().take(80).map(|l| format!("{l}\n")).collect();
        let err = table_from_str(&text).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(err, Error::TableRowCount { got: 80, .. }));
    }

    #[test]
    fn test_trailing_rows_rejected() {
        let text = format!("{}1 2 3 4\n", sample_text());
        let err = table_from_str(&text).unwrap_err();
        assert!(matches!(err, Error::TableTrailingRows { extra: 1, .. }));
    }

    #[test]
    fn test_short_row_reports_line() {
        let mut lines: Vec<String> = sample_text().lines().map(str::to_string).collect();
        lines[4] = "1 2 3".to_string();
        let err = table_from_str(&lines.join("\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::TableColumnCount { line: 5, expected: 4, got: 3 }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let mut bytes = "5 5 5 5\n".repeat(DiscreteState::ROWS - 1).into_bytes();
        bytes.extend_from_slice(b"5 5 \xff 5\n");
        let err = read_table(bytes.as_slice()).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(err, Error::TableValue { line: 81, .. }));
    }

    #[test]
    fn test_non_numeric_and_non_finite_rejected() {
        let mut lines: Vec<String> = sample_text().lines().map(str::to_string).collect();
        lines[0] = "1 two 3 4".to_string();
        let err = table_from_str(&lines.join("\n")).unwrap_err();
        assert!(matches!(err, Error::TableValue { line: 1, .. }));

        lines[0] = "1 NaN 3 4".to_string();
        let err = table_from_str(&lines.join("\n")).unwrap_err();
        assert!(matches!(err, Error::TableValue { ref token, .. } if token == "NaN"));
    }
}

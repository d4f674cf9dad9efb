use super::model::{Column, Table};
use super::parser::ParsedRows;

/// Build the typed table from parsed rows.
///
/// Each column is coerced on its own, then the `dropped` columns (the
/// point index in a standard export) are removed.
pub fn build_table(parsed: ParsedRows, dropped: &[String]) -> Table {
    let ParsedRows { header, rows, .. } = parsed;
    let row_count = rows.len();

    let mut raw_columns: Vec<Vec<String>> = header
        .iter()
        .map(|_| Vec::with_capacity(row_count))
        .collect();
    for row in rows {
        for (col, value) in raw_columns.iter_mut().zip(row) {
            col.push(value);
        }
    }

    let columns: Vec<Column> = raw_columns.into_iter().map(Column::coerce).collect();
    let mut table = Table::new(header, columns, row_count);

    for name in dropped {
        if table.drop_column(name).is_some() {
            log::debug!("dropped column '{name}'");
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(header: &[&str], rows: &[&[&str]]) -> ParsedRows {
        ParsedRows {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            skipped: 0,
        }
    }

    #[test]
    fn point_column_is_dropped_and_values_coerced() {
        let table = build_table(
            parsed(
                &["Point", "Distance", "FeK", "SED"],
                &[&["1", "0.0", "12.3", "45.0"], &["2", "1.0", "14.1", "46.2"]],
            ),
            &["Point".to_string()],
        );
        assert_eq!(table.column_names(), ["Distance", "FeK", "SED"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("FeK").and_then(Column::as_numeric),
            Some(&[12.3, 14.1][..])
        );
    }

    #[test]
    fn columns_are_coerced_independently() {
        let table = build_table(
            parsed(&["Distance", "Label"], &[&["0.5", "a"], &["1.5", "2"]]),
            &[],
        );
        assert!(table.column("Distance").and_then(Column::as_numeric).is_some());
        assert_eq!(
            table.column("Label"),
            Some(&Column::Text(vec!["a".to_string(), "2".to_string()]))
        );
    }

    #[test]
    fn no_rows_gives_empty_numeric_columns() {
        let table = build_table(parsed(&["Distance", "SED"], &[]), &["Point".to_string()]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }
}

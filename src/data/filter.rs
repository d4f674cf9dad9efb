use super::model::Table;

// ---------------------------------------------------------------------------
// Table view: search query and sort key for the data preview
// ---------------------------------------------------------------------------

/// Sort key: column index into the table plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub descending: bool,
}

/// How the preview table is currently presented.
/// An empty query and no sort key show every row in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub query: String,
    pub sort: Option<SortKey>,
}

impl TableView {
    /// Cycle a column through ascending → descending → unsorted.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some(SortKey {
                column: c,
                descending: false,
            }) if c == column => Some(SortKey {
                column,
                descending: true,
            }),
            Some(SortKey {
                column: c,
                descending: true,
            }) if c == column => None,
            _ => Some(SortKey {
                column,
                descending: false,
            }),
        };
    }
}

/// Return indices of rows matching the query, in display order.
///
/// A row matches when any of its cells contains the query, ignoring case.
/// Sorting is stable, so equal values keep file order.
pub fn visible_rows(table: &Table, view: &TableView) -> Vec<usize> {
    let query = view.query.trim().to_lowercase();

    let mut rows: Vec<usize> = (0..table.row_count())
        .filter(|&row| {
            if query.is_empty() {
                return true;
            }
            table.columns().any(|(_, col)| {
                col.cell(row)
                    .is_some_and(|cell| cell.to_string().to_lowercase().contains(&query))
            })
        })
        .collect();

    if let Some(key) = view.sort {
        if let Some(col) = table.column_at(key.column) {
            rows.sort_by(|&a, &b| {
                let ord = col.compare_rows(a, b);
                if key.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn table() -> Table {
        Table::new(
            vec!["Distance".into(), "FeK".into(), "Phase".into()],
            vec![
                Column::Numeric(vec![0.0, 1.0, 2.0, 3.0]),
                Column::Numeric(vec![12.5, 3.0, 40.0, 3.0]),
                Column::Text(vec!["Alpha".into(), "beta".into(), "ALPHA".into(), "gamma".into()]),
            ],
            4,
        )
    }

    #[test]
    fn default_view_shows_all_rows_in_order() {
        assert_eq!(visible_rows(&table(), &TableView::default()), [0, 1, 2, 3]);
    }

    #[test]
    fn query_matches_any_cell_case_insensitively() {
        let view = TableView {
            query: "alpha".into(),
            sort: None,
        };
        assert_eq!(visible_rows(&table(), &view), [0, 2]);

        let view = TableView {
            query: "40".into(),
            sort: None,
        };
        assert_eq!(visible_rows(&table(), &view), [2]);
    }

    #[test]
    fn numeric_sort_is_stable_and_reversible() {
        let mut view = TableView::default();
        view.toggle_sort(1);
        assert_eq!(visible_rows(&table(), &view), [1, 3, 0, 2]);
        view.toggle_sort(1);
        assert_eq!(visible_rows(&table(), &view), [2, 0, 1, 3]);
        view.toggle_sort(1);
        assert_eq!(view.sort, None);
    }

    #[test]
    fn sorting_another_column_starts_ascending() {
        let mut view = TableView::default();
        view.toggle_sort(1);
        view.toggle_sort(2);
        assert_eq!(
            view.sort,
            Some(SortKey {
                column: 2,
                descending: false
            })
        );
        // Byte order: uppercase sorts before lowercase.
        assert_eq!(visible_rows(&table(), &view), [2, 0, 1, 3]);
    }
}

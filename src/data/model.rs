use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Column – one typed column of the table
// ---------------------------------------------------------------------------

/// A column is numeric only when every value in it parses as a number;
/// otherwise it keeps the original strings untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    /// All-or-nothing numeric coercion of raw string values.
    pub fn coerce(raw: Vec<String>) -> Self {
        let parsed: Result<Vec<f64>, _> = raw.iter().map(|v| v.parse::<f64>()).collect();
        match parsed {
            Ok(values) => Column::Numeric(values),
            Err(_) => Column::Text(raw),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Column::Numeric(v) => Some(v),
            Column::Text(_) => None,
        }
    }

    /// Display text of a single cell.
    pub fn cell(&self, row: usize) -> Option<CellRef<'_>> {
        match self {
            Column::Numeric(v) => v.get(row).map(|&x| CellRef::Number(x)),
            Column::Text(v) => v.get(row).map(|s| CellRef::Text(s)),
        }
    }

    /// Order two rows by this column's values.
    pub fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        match self {
            Column::Numeric(v) => v[a].total_cmp(&v[b]),
            Column::Text(v) => v[a].cmp(&v[b]),
        }
    }
}

/// Borrowed view of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellRef<'a> {
    Number(f64),
    Text(&'a str),
}

impl fmt::Display for CellRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRef::Number(v) => write!(f, "{v}"),
            CellRef::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – named, row-aligned columns
// ---------------------------------------------------------------------------

/// The parsed line scan: column names in file order and one typed column each.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Assemble a table from already coerced columns.
    ///
    /// All columns must hold `row_count` values.
    pub fn new(names: Vec<String>, columns: Vec<Column>, row_count: usize) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == row_count));
        Self {
            names,
            columns,
            row_count,
        }
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Remove a column by name, returning it if it existed.
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.position(name)?;
        self.names.remove(idx);
        Some(self.columns.remove(idx))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }
}

//! In-memory transaction table handed from the ingestion adapter to the
//! reconciliation engine.

use crate::data::{Cell, normalize_column_name};

static NULL_CELL: Cell = Cell::Null;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table from column names and positional rows. Short rows are
    /// padded with nulls and long rows are truncated to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Builds a table from `(column, cell)` records. Columns appear in the
    /// order they are first seen; a record missing a column holds null there.
    pub fn from_records<I, R, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Cell>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for record in records {
            let mut row = vec![Cell::Null; columns.len()];
            for (key, value) in record {
                let key = key.into();
                let idx = match columns.iter().position(|c| *c == key) {
                    Some(idx) => idx,
                    None => {
                        columns.push(key);
                        columns.len() - 1
                    }
                };
                if row.len() <= idx {
                    row.resize(idx + 1, Cell::Null);
                }
                row[idx] = value.into();
            }
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column names trimmed and lower-cased, in original order. The caller's
    /// names are left untouched.
    pub fn normalized_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| normalize_column_name(c))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&NULL_CELL))
    }
}

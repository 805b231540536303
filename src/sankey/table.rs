//! Staged categorical table
//!
//! A `Table` is an ordered list of equally long columns. Column `i` is the
//! stage directly upstream of column `i + 1`. Producers (CSV loader, DataFrame
//! conversion) are responsible for dropping rows with missing values before a
//! table reaches the graph builder.

use super::error::{Result, SankeyError};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single category value held in a table cell
///
/// Equality is exact and type-sensitive: `Str("1")` and `Int(1)` are different
/// values, and strings are compared case-sensitively without trimming.
/// Floats compare by bit pattern so they can be hashed.
#[derive(Debug, Clone)]
pub enum CategoryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl PartialEq for CategoryValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CategoryValue::Str(a), CategoryValue::Str(b)) => a == b,
            (CategoryValue::Int(a), CategoryValue::Int(b)) => a == b,
            (CategoryValue::Float(a), CategoryValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CategoryValue::Bool(a), CategoryValue::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CategoryValue {}

impl Hash for CategoryValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CategoryValue::Str(s) => s.hash(state),
            CategoryValue::Int(i) => i.hash(state),
            CategoryValue::Float(f) => f.to_bits().hash(state),
            CategoryValue::Bool(b) => b.hash(state),
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Str(s) => write!(f, "{}", s),
            CategoryValue::Int(i) => write!(f, "{}", i),
            CategoryValue::Float(x) => write!(f, "{}", x),
            CategoryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CategoryValue {
    fn from(s: &str) -> Self {
        CategoryValue::Str(s.to_string())
    }
}

impl From<String> for CategoryValue {
    fn from(s: String) -> Self {
        CategoryValue::Str(s)
    }
}

impl From<i64> for CategoryValue {
    fn from(i: i64) -> Self {
        CategoryValue::Int(i)
    }
}

impl From<f64> for CategoryValue {
    fn from(x: f64) -> Self {
        CategoryValue::Float(x)
    }
}

impl From<bool> for CategoryValue {
    fn from(b: bool) -> Self {
        CategoryValue::Bool(b)
    }
}

/// One stage of the flow
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CategoryValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CategoryValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

/// Ordered set of equally long columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name used in error messages and output file names (usually the file stem)
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, checking that all columns have the same length
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for column in &columns[1..] {
                if column.values.len() != expected {
                    return Err(SankeyError::RaggedColumns {
                        table: name,
                        column: column.name.clone(),
                        expected,
                        found: column.values.len(),
                    });
                }
            }
        }
        Ok(Table { name, columns })
    }

    /// Create a table from a header and row-wise cells
    pub fn from_rows<I, R>(name: impl Into<String>, headers: &[&str], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: Into<CategoryValue>,
    {
        let name = name.into();
        let mut columns: Vec<Column> = headers
            .iter()
            .map(|h| Column::new(*h, Vec::new()))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            let cells: Vec<CategoryValue> = row.into_iter().map(Into::into).collect();
            if cells.len() != headers.len() {
                return Err(SankeyError::RaggedRow {
                    table: name,
                    row: row_idx,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.values.push(cell);
            }
        }

        Ok(Table { name, columns })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Row count (0 for a table without columns)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Value at (column, row)
    pub fn cell(&self, column: usize, row: usize) -> Option<&CategoryValue> {
        self.columns.get(column).and_then(|c| c.values.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_transposes() {
        let table =
            Table::from_rows("t", &["A", "B"], vec![vec!["x", "y"], vec!["x", "z"]]).unwrap();
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_names(), vec!["A", "B"]);
        assert_eq!(table.cell(1, 1), Some(&CategoryValue::from("z")));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn test_from_rows_rejects_short_row() {
        let err = Table::from_rows("t", &["A", "B"], vec![vec!["x", "y"], vec!["x"]]).unwrap_err();
        assert!(matches!(err, SankeyError::RaggedRow { row: 1, expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let err = Table::new(
            "t",
            vec![
                Column::new("A", vec!["x".into(), "y".into()]),
                Column::new("B", vec!["z".into()]),
            ],
        )
        .unwrap_err();
        assert_eq!(err.table(), Some("t"));
        assert!(matches!(err, SankeyError::RaggedColumns { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_empty_table_has_zero_rows() {
        let table = Table::new("empty", vec![]).unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.n_columns(), 0);
    }

    #[test]
    fn test_category_value_equality_is_type_sensitive() {
        assert_ne!(CategoryValue::from("1"), CategoryValue::from(1i64));
        assert_ne!(CategoryValue::from("Unknown"), CategoryValue::from("unknown"));
        assert_ne!(CategoryValue::from("x"), CategoryValue::from("x "));
        assert_eq!(CategoryValue::from(0.5), CategoryValue::from(0.5));
        assert_eq!(CategoryValue::Float(f64::NAN), CategoryValue::Float(f64::NAN));
    }

    #[test]
    fn test_category_value_display() {
        assert_eq!(CategoryValue::from("abc").to_string(), "abc");
        assert_eq!(CategoryValue::from(42i64).to_string(), "42");
        assert_eq!(CategoryValue::from(true).to_string(), "true");
        assert_eq!(CategoryValue::from(1.5).to_string(), "1.5");
    }
}

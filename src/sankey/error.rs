use thiserror::Error;

/// Errors that can occur while turning a table into a Sankey graph
#[derive(Debug, Error)]
pub enum SankeyError {
    /// No usable rows or columns left after cleaning
    #[error("Table '{table}' has no usable input: {reason}")]
    EmptyInput { table: String, reason: String },

    /// Fewer than two columns, so there are no transitions to draw
    #[error("Table '{table}' needs at least 2 columns to form transitions, found {found}")]
    InsufficientColumns { table: String, found: usize },

    /// Zero-length palette handed to color assignment
    #[error("Palette is empty")]
    EmptyPalette,

    /// Column length differs from the rest of the table
    #[error("Table '{table}': column '{column}' has {found} values, expected {expected}")]
    RaggedColumns {
        table: String,
        column: String,
        expected: usize,
        found: usize,
    },

    /// Row with a different number of cells than the header
    #[error("Table '{table}': row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Color string that is neither `#RRGGBB` nor `rgb(...)`/`rgba(...)`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Opacity outside the canonical [0, 1] range
    #[error("Opacity {0} is outside [0, 1]")]
    InvalidOpacity(f64),

    /// Named palette not present in the registry
    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    /// Configuration error (invalid values, unreadable file contents)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SankeyError {
    /// Name of the table the error refers to, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            SankeyError::EmptyInput { table, .. }
            | SankeyError::InsufficientColumns { table, .. }
            | SankeyError::RaggedColumns { table, .. }
            | SankeyError::RaggedRow { table, .. } => Some(table),
            _ => None,
        }
    }
}

/// Type alias for Results using SankeyError
pub type Result<T> = std::result::Result<T, SankeyError>;

/// Delimited tabular files
pub mod table;

/// Labeled review datasets
pub mod reviews;

pub use reviews::{load_history, Review, Schema};
pub use table::{Row, Table};

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The file could not be read or written
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file is not valid delimited text
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The spreadsheet could not be read
    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    /// The workbook has no sheets
    #[error("workbook {0} has no sheets")]
    EmptyWorkbook(String),

    /// The file extension names a format that cannot be read
    #[error("unsupported file format: {0} (expected .csv, .tsv or a spreadsheet)")]
    UnsupportedFormat(String),

    /// A requested column is absent
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// None of the accepted column names is present
    #[error("no {kind} column found (looked for {candidates})")]
    MissingColumn {
        /// What the column holds, e.g. "label"
        kind: &'static str,

        /// The accepted names, comma separated
        candidates: String,
    },

    /// A new column does not have one value per row
    #[error("column {column} has {actual} values for {expected} rows")]
    LengthMismatch {
        /// The column being added
        column: String,

        /// Rows in the table
        expected: usize,

        /// Values supplied
        actual: usize,
    },
}

use std::{fs::File, io, path::Path};

use calamine::{open_workbook_auto, Data, Reader};

use super::DatasetError;

/// A row of string cells, carrying the index it had when the table was read
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Position of the row in the original input
    pub index: usize,

    /// One cell per header
    pub values: Vec<String>,
}

/// An in-memory table of string cells with named columns
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding missing cells with empty strings and dropping extra cells
    pub fn push_row<S: Into<String>>(&mut self, values: impl IntoIterator<Item = S>) {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        values.resize(self.headers.len(), String::new());

        let index = self.rows.last().map(|row| row.index + 1).unwrap_or(0);

        self.rows.push(Row { index, values });
    }

    /// Read delimited text with a header row
    pub fn from_reader(reader: impl io::Read, delimiter: u8) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::new(reader.headers()?.iter());

        for record in reader.records() {
            table.push_row(record?.iter());
        }

        Ok(table)
    }

    /// Read the first sheet of a spreadsheet workbook. The first row holds the headers.
    pub fn from_workbook(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();

        let mut workbook = open_workbook_auto(path)?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DatasetError::EmptyWorkbook(path.display().to_string()))??;

        let mut rows = range.rows();

        let Some(headers) = rows.next() else {
            return Ok(Self::default());
        };

        let mut table = Self::new(headers.iter().map(cell_to_string));

        for row in rows {
            table.push_row(row.iter().map(cell_to_string));
        }

        Ok(table)
    }

    /// Read a delimited (`.csv`, `.tsv`) or spreadsheet (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`,
    /// `.ods`) file, chosen by extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::from_reader(File::open(path)?, b','),
            "tsv" => Self::from_reader(File::open(path)?, b'\t'),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::from_workbook(path),
            _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serialize to comma-separated bytes, header row first, without the row index
    pub fn to_csv(&self) -> Result<Vec<u8>, DatasetError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(&row.values)?;
        }

        writer
            .into_inner()
            .map_err(|e| DatasetError::Io(e.into_error()))
    }

    /// Write comma-separated text to a file
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        std::fs::write(path, self.to_csv()?)?;

        Ok(())
    }

    /// The column names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the named column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of the named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// The values of the named column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<&str>, DatasetError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.values[index].as_str())
            .collect())
    }

    /// Keep only the rows for which the predicate holds, preserving order and row indexes
    pub fn retain(&mut self, mut keep: impl FnMut(&Row) -> bool) {
        self.rows.retain(|row| keep(row));
    }

    /// Set a column to the given values, one per row. An existing column of the same name is
    /// overwritten in place; otherwise the column is appended.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), DatasetError> {
        if values.len() != self.rows.len() {
            return Err(DatasetError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.values[index] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.values.push(value);
                }
            }
        }

        Ok(())
    }
}

/// Render a spreadsheet cell the way it would read in delimited text
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        cell => cell.to_string(),
    }
}

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names of the three columns the pipeline interprets; everything else in
/// the imported column list is carried along as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementColumns {
    /// Counterparty / description text the position identifiers match on.
    pub key: String,
    /// Signed, locale-formatted amount.
    pub value: String,
    /// Booking date.
    pub date: String,
}

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("cannot read statement {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("statement has no column named {0:?}")]
    MissingColumn(String),
    #[error("statement has a header but no data rows")]
    NoDataRows,
}

/// An in-memory statement table, still all text. Preprocessing passes
/// mutate it row-wise before the typed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawStatement {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawStatement { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, StatementError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StatementError::MissingColumn(name.to_string()))
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    pub fn map_column<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for row in &mut self.rows {
            row[index] = f(&row[index]);
        }
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Reads a delimited statement, keeping only the imported columns in the
/// given order. Bank exports are not always valid UTF-8, so cells are
/// decoded lossily from raw bytes.
pub fn read_from<R: Read>(
    data: R,
    delimiter: u8,
    imported_columns: &[String],
) -> Result<RawStatement, StatementError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let header_record = reader.byte_headers()?.clone();
    let file_headers: Vec<String> = header_record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).trim().to_string())
        .collect();

    let mut indices = Vec::with_capacity(imported_columns.len());
    for name in imported_columns {
        let idx = file_headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StatementError::MissingColumn(name.clone()))?;
        indices.push(idx);
    }

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        let row: Vec<String> = indices
            .iter()
            .map(|&idx| {
                record
                    .get(idx)
                    .map(|cell| String::from_utf8_lossy(cell).to_string())
                    .unwrap_or_default()
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(StatementError::NoDataRows);
    }

    Ok(RawStatement::new(imported_columns.to_vec(), rows))
}

pub fn read_statement(
    path: &Path,
    delimiter: u8,
    imported_columns: &[String],
) -> Result<RawStatement, StatementError> {
    let file = std::fs::File::open(path).map_err(|source| StatementError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file, delimiter, imported_columns)
}

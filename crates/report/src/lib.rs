pub mod overview;
pub mod tables;

use std::path::PathBuf;
use thiserror::Error;

pub use overview::{read_month_overview, write_month_overview, write_year_overview};
pub use tables::{write_transactions, TableHeaders};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{path}: overview is missing column {column:?}")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path} row {row}: cannot parse sum {value:?}")]
    InvalidSum {
        path: PathBuf,
        row: usize,
        value: String,
    },
}

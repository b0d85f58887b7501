//! SVG chart rendering for month and year overviews. No business logic
//! lives here; a failure (unwritable path, nothing to draw) is returned as
//! an error, never swallowed.

pub mod month;
pub mod year;

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use month::{month_bar, month_pie};
pub use year::{year_line, year_stacked};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("cannot render chart {path}: {message}")]
    Draw { path: PathBuf, message: String },
    #[error("chart {path}: nothing to draw")]
    EmptyData { path: PathBuf },
    #[error("chart {path}: {months} months but {incomes} income values")]
    IncomeMismatch {
        path: PathBuf,
        months: usize,
        incomes: usize,
    },
}

pub(crate) fn draw_error(path: &Path, e: impl std::fmt::Display) -> ChartError {
    ChartError::Draw {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Stable per-position color, cycling through the large palette.
pub(crate) fn pick_color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

use thiserror::Error;

use super::category::ExternalPosition;
use super::classify::MonthClassification;
use super::period::Month;

/// Name of the derived column-wise sum row/column.
pub const TOTAL: &str = "Total";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub position: String,
    /// Absolute whole-unit sum (sign and fraction are dropped when the
    /// summary is built, before any totalling).
    pub sum: i64,
    pub count: usize,
}

/// Per-month overview: one row per position in configuration order, then
/// the catch-all, then the external positions. The Total row is derived,
/// not stored, so chart rendering can consume the rows without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    rows: Vec<SummaryRow>,
}

impl MonthSummary {
    pub fn build(
        classification: &MonthClassification,
        externals: &[ExternalPosition],
        month: Month,
    ) -> Self {
        let mut rows: Vec<SummaryRow> = classification
            .positions
            .iter()
            .chain(std::iter::once(&classification.catch_all))
            .map(|p| SummaryRow {
                position: p.totals.name.clone(),
                sum: p.totals.sum.abs_whole(),
                count: p.totals.count,
            })
            .collect();
        for ext in externals {
            let amount = ext.amount_for(month.index());
            rows.push(SummaryRow {
                position: ext.name.clone(),
                sum: amount.abs(),
                count: usize::from(amount != 0),
            });
        }
        MonthSummary { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Column-wise sum of all rows.
    pub fn total(&self) -> SummaryRow {
        SummaryRow {
            position: TOTAL.to_string(),
            sum: self.rows.iter().map(|r| r.sum).sum(),
            count: self.rows.iter().map(|r| r.count).sum(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no month summaries to build a year summary from")]
    NoMonths,
    #[error(
        "position rows of {month} do not line up with {reference}: \
         expected {expected:?}, found {found:?}"
    )]
    PositionOrderMismatch {
        month: Month,
        reference: Month,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Per-year overview: months as rows, positions (catch-all, externals and
/// Total included) as columns. Built from the persisted month overviews,
/// which must all carry the identical position order for the transpose to
/// be meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSummary {
    positions: Vec<String>,
    rows: Vec<(Month, Vec<i64>)>,
}

impl YearSummary {
    pub fn build(months: Vec<(Month, Vec<(String, i64)>)>) -> Result<Self, SummaryError> {
        let (reference, first) = months.first().ok_or(SummaryError::NoMonths)?;
        let reference = *reference;
        let positions: Vec<String> = first.iter().map(|(name, _)| name.clone()).collect();
        let mut rows = Vec::with_capacity(months.len());
        for (month, entries) in months {
            let found: Vec<String> = entries.iter().map(|(name, _)| name.clone()).collect();
            if found != positions {
                return Err(SummaryError::PositionOrderMismatch {
                    month,
                    reference,
                    expected: positions,
                    found,
                });
            }
            rows.push((month, entries.into_iter().map(|(_, sum)| sum).collect()));
        }
        Ok(YearSummary { positions, rows })
    }

    pub fn positions(&self) -> &[String] {
        &self.positions
    }

    pub fn rows(&self) -> &[(Month, Vec<i64>)] {
        &self.rows
    }

    /// All sums of one position column, in month order.
    pub fn column(&self, position: &str) -> Option<Vec<i64>> {
        let idx = self.positions.iter().position(|p| p == position)?;
        Some(self.rows.iter().map(|(_, sums)| sums[idx]).collect())
    }
}

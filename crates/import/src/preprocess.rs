use ausgaben_core::{Amount, Transaction};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::statement::{RawStatement, StatementColumns, StatementError};

/// Drops rows where `column` equals any of `values`. Rules are independent
/// of each other, so their application order does not matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error(transparent)]
    Statement(#[from] StatementError),
    #[error("row {row}: cannot parse amount {value:?} in column {column:?}")]
    InvalidAmount {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: cannot parse date {value:?} with format {format:?}")]
    InvalidDate {
        row: usize,
        value: String,
        format: String,
    },
}

/// Removes the locale thousands separator (`.`) from the value column.
/// Runs before anything interprets the amount text.
pub fn strip_thousands(raw: &mut RawStatement, value_column: &str) -> Result<(), StatementError> {
    let idx = raw.column_index(value_column)?;
    raw.map_column(idx, |cell| cell.replace('.', ""));
    Ok(())
}

/// Keeps only expenditure rows, i.e. rows whose raw value text carries a
/// negative marker. Income is filtered on the text on purpose: it happens
/// before the numeric conversion, exactly like the sign of the statement.
pub fn retain_negative(raw: &mut RawStatement, value_column: &str) -> Result<(), StatementError> {
    let idx = raw.column_index(value_column)?;
    raw.retain_rows(|row| row[idx].contains('-'));
    Ok(())
}

/// Applies every exclusion rule; a row survives only if no rule excludes it.
pub fn apply_exclusions(
    raw: &mut RawStatement,
    rules: &[ExclusionRule],
) -> Result<(), StatementError> {
    for rule in rules {
        let idx = raw.column_index(&rule.column)?;
        raw.retain_rows(|row| !rule.values.iter().any(|v| v == &row[idx]));
    }
    Ok(())
}

/// The statement after typed conversion. `extra_headers` names the imported
/// columns that fill `Transaction::extras`, in order.
#[derive(Debug)]
pub struct ConvertedStatement {
    pub extra_headers: Vec<String>,
    pub transactions: Vec<Transaction>,
}

/// Converts the raw table into transactions: decimal comma to decimal
/// point, `Decimal` parse, day-first date parse. Any residual non-numeric
/// text is a data-quality error naming the 1-based data row.
pub fn into_transactions(
    raw: RawStatement,
    columns: &StatementColumns,
    date_format: &str,
) -> Result<ConvertedStatement, PreprocessError> {
    let key_idx = raw.column_index(&columns.key)?;
    let value_idx = raw.column_index(&columns.value)?;
    let date_idx = raw.column_index(&columns.date)?;

    let extra_indices: Vec<usize> = (0..raw.headers().len())
        .filter(|&i| i != key_idx && i != value_idx && i != date_idx)
        .collect();
    let extra_headers: Vec<String> = extra_indices
        .iter()
        .map(|&i| raw.headers()[i].clone())
        .collect();

    let value_column = columns.value.clone();
    let mut transactions = Vec::with_capacity(raw.len());
    for (i, row) in raw.into_rows().into_iter().enumerate() {
        let row_number = i + 1;

        let normalized = row[value_idx].replace(',', ".");
        let amount: Amount =
            normalized
                .parse()
                .map_err(|_| PreprocessError::InvalidAmount {
                    row: row_number,
                    column: value_column.clone(),
                    value: row[value_idx].clone(),
                })?;

        let date = NaiveDate::parse_from_str(row[date_idx].trim(), date_format).map_err(|_| {
            PreprocessError::InvalidDate {
                row: row_number,
                value: row[date_idx].clone(),
                format: date_format.to_string(),
            }
        })?;

        let extras = extra_indices.iter().map(|&idx| row[idx].clone()).collect();
        transactions.push(Transaction {
            date,
            description: row[key_idx].clone(),
            amount,
            extras,
        });
    }

    Ok(ConvertedStatement {
        extra_headers,
        transactions,
    })
}

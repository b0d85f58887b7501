use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Amount;

/// One bank statement line after preprocessing. The description carries the
/// configured key column (counterparty text); `extras` holds the remaining
/// imported bank columns verbatim, in header order, so position tables can
/// be written back out with the columns the statement came with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
    pub extras: Vec<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: &str, amount: Amount) -> Self {
        Transaction {
            date,
            description: description.to_string(),
            amount,
            extras: Vec::new(),
        }
    }
}

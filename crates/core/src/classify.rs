use super::category::{Category, CATCH_ALL};
use super::money::Amount;
use super::transaction::Transaction;

/// The pool of transactions not yet claimed by any position. Claiming
/// removes rows, so a transaction can be counted at most once per run.
#[derive(Debug)]
pub struct Pool {
    transactions: Vec<Transaction>,
}

impl Pool {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Pool { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Splits off every row whose description matches the category.
    pub fn claim(&mut self, category: &Category) -> Vec<Transaction> {
        let (claimed, rest): (Vec<Transaction>, Vec<Transaction>) =
            std::mem::take(&mut self.transactions)
                .into_iter()
                .partition(|tx| category.matches(&tx.description));
        self.transactions = rest;
        claimed
    }

    /// Whatever no position claimed, i.e. the catch-all rows.
    pub fn into_remaining(self) -> Vec<Transaction> {
        self.transactions
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionTotals {
    pub name: String,
    pub sum: Amount,
    pub count: usize,
}

impl PositionTotals {
    pub fn of(name: &str, rows: &[Transaction]) -> Self {
        PositionTotals {
            name: name.to_string(),
            sum: rows.iter().map(|tx| tx.amount).sum(),
            count: rows.len(),
        }
    }
}

/// One position's totals together with the rows that produced them; the
/// rows are persisted per position for audit.
#[derive(Debug)]
pub struct ClaimedPosition {
    pub totals: PositionTotals,
    pub rows: Vec<Transaction>,
}

#[derive(Debug)]
pub struct MonthClassification {
    pub positions: Vec<ClaimedPosition>,
    pub catch_all: ClaimedPosition,
}

impl MonthClassification {
    /// Sum over every bucket, catch-all included. Equals the sum over all
    /// input transactions (partition property).
    pub fn total_sum(&self) -> Amount {
        self.positions
            .iter()
            .map(|p| p.totals.sum)
            .chain(std::iter::once(self.catch_all.totals.sum))
            .sum()
    }
}

/// Classifies a month's transactions. Categories are processed in the given
/// order; matched rows leave the pool, so an earlier category claims any
/// transaction that would also match a later one.
pub fn classify(transactions: Vec<Transaction>, categories: &[Category]) -> MonthClassification {
    let mut pool = Pool::new(transactions);
    let positions = categories
        .iter()
        .map(|category| {
            let rows = pool.claim(category);
            ClaimedPosition {
                totals: PositionTotals::of(&category.name, &rows),
                rows,
            }
        })
        .collect();
    let rest = pool.into_remaining();
    let catch_all = ClaimedPosition {
        totals: PositionTotals::of(CATCH_ALL, &rest),
        rows: rest,
    };
    MonthClassification { positions, catch_all }
}

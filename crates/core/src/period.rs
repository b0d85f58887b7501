use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::Transaction;

/// The calendar year all monthly buckets are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year(pub i32);

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Year {
    pub fn new(year: i32) -> Self {
        Year(year)
    }

    pub fn start_date(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 1, 1).unwrap()
    }

    /// December 31, inclusive end (matching Month::end_date).
    pub fn end_date(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 12, 31).unwrap()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

pub const MONTHS: [Month; 12] = [
    Month::Jan,
    Month::Feb,
    Month::Mar,
    Month::Apr,
    Month::May,
    Month::Jun,
    Month::Jul,
    Month::Aug,
    Month::Sep,
    Month::Oct,
    Month::Nov,
    Month::Dec,
];

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Month {
    /// 1-based calendar month number.
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    /// 0-based position within MONTHS.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub fn from_short_name(name: &str) -> Option<Self> {
        MONTHS.into_iter().find(|m| m.short_name() == name)
    }

    pub fn start_date(self, year: Year) -> NaiveDate {
        NaiveDate::from_ymd_opt(year.0, self.number(), 1).unwrap()
    }

    /// Last day of the month, leap-year aware.
    pub fn end_date(self, year: Year) -> NaiveDate {
        let first_of_next = match self {
            Month::Dec => NaiveDate::from_ymd_opt(year.0 + 1, 1, 1).unwrap(),
            _ => NaiveDate::from_ymd_opt(year.0, self.number() + 1, 1).unwrap(),
        };
        first_of_next.pred_opt().unwrap()
    }

    pub fn range(self, year: Year) -> DateRange {
        DateRange::new(self.start_date(year), self.end_date(year))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Result of partitioning a year's transactions into monthly buckets.
#[derive(Debug)]
pub struct MonthSplit {
    pub buckets: [Vec<Transaction>; 12],
    /// Rows dated outside the configured year match no bucket and are
    /// dropped. The count is kept so the caller can report it.
    pub out_of_year: usize,
}

impl MonthSplit {
    pub fn bucket(&self, month: Month) -> &[Transaction] {
        &self.buckets[month.index()]
    }

    pub fn take_bucket(&mut self, month: Month) -> Vec<Transaction> {
        std::mem::take(&mut self.buckets[month.index()])
    }
}

/// Partitions transactions into the twelve inclusive month ranges of the
/// configured year.
pub fn split_by_month(transactions: Vec<Transaction>, year: Year) -> MonthSplit {
    let ranges: Vec<DateRange> = MONTHS.iter().map(|m| m.range(year)).collect();
    let mut buckets: [Vec<Transaction>; 12] = std::array::from_fn(|_| Vec::new());
    let mut out_of_year = 0;
    for tx in transactions {
        match ranges.iter().position(|r| r.contains(tx.date)) {
            Some(idx) => buckets[idx].push(tx),
            None => out_of_year += 1,
        }
    }
    MonthSplit { buckets, out_of_year }
}

pub mod category;
pub mod classify;
pub mod money;
pub mod period;
pub mod summary;
pub mod transaction;

pub use category::{Category, ExternalPosition, CATCH_ALL};
pub use classify::{classify, ClaimedPosition, MonthClassification, Pool, PositionTotals};
pub use money::Amount;
pub use period::{split_by_month, DateRange, Month, MonthSplit, Year, MONTHS};
pub use summary::{MonthSummary, SummaryError, SummaryRow, YearSummary, TOTAL};
pub use transaction::Transaction;

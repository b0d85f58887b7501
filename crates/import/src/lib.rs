pub mod preprocess;
pub mod statement;

pub use preprocess::{
    apply_exclusions, into_transactions, retain_negative, strip_thousands, ConvertedStatement,
    ExclusionRule, PreprocessError,
};
pub use statement::{read_from, read_statement, RawStatement, StatementColumns, StatementError};

use serde::{Deserialize, Serialize};

/// Name of the bucket collecting transactions that match no position.
pub const CATCH_ALL: &str = "Sonstiges";

/// A user-defined spending position, matched by substring identifiers
/// against the transaction description. Position order in configuration is
/// the match priority: the first listed position claims a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub identifiers: Vec<String>,
}

impl Category {
    pub fn new(name: &str, identifiers: &[&str]) -> Self {
        Category {
            name: name.to_string(),
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Case-sensitive substring match, OR over the identifiers. An empty
    /// identifier list matches nothing.
    pub fn matches(&self, description: &str) -> bool {
        self.identifiers.iter().any(|id| description.contains(id.as_str()))
    }
}

/// A position whose monthly amounts come straight from configuration, e.g.
/// rent paid from another account. Amounts are absolute whole units,
/// indexed by month position; months without an entry stay zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalPosition {
    pub name: String,
    pub amounts: [i64; 12],
}

impl ExternalPosition {
    pub fn amount_for(&self, month_index: usize) -> i64 {
        self.amounts[month_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_identifier() {
        let groceries = Category::new("Groceries", &["SUPER", "MARKET"]);
        assert!(groceries.matches("SUPERMART"));
        assert!(groceries.matches("MARKET CO"));
        assert!(!groceries.matches("UNKNOWN VENDOR"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let groceries = Category::new("Groceries", &["MARKET"]);
        assert!(!groceries.matches("market co"));
    }

    #[test]
    fn empty_identifier_list_matches_nothing() {
        let travel = Category::new("Travel", &[]);
        assert!(!travel.matches("ANYTHING"));
        assert!(!travel.matches(""));
    }
}

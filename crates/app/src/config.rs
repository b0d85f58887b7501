use ausgaben_core::{Category, ExternalPosition, Month, Year, CATCH_ALL, TOTAL};
use ausgaben_import::{ExclusionRule, StatementColumns};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config defines no positions")]
    NoPositions,
    #[error("position name {0:?} is used more than once")]
    DuplicatePosition(String),
    #[error("{0:?} collides with a derived row or output file name")]
    ReservedName(String),
    #[error("column {0:?} is interpreted but missing from columns.imported")]
    MissingImportedColumn(String),
    #[error("unknown month key {0:?} (expected Jan..Dec)")]
    UnknownMonth(String),
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

/// Names a position or external may not take: the derived rows, plus the
/// fixed per-month output files a position table would overwrite.
const RESERVED_NAMES: [&str; 6] = [CATCH_ALL, TOTAL, "month_all", "overview", "bar", "pie"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Calendar year the monthly buckets are derived from.
    pub year: i32,
    /// Output directory; one subdirectory per month is created below it.
    pub base_dir: PathBuf,
    /// The bank's yearly statement export.
    pub statement: PathBuf,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub exclude: Vec<ExclusionRule>,
    /// Ordered: the first matching position claims a transaction.
    #[serde(default, rename = "position")]
    pub positions: Vec<PositionConfig>,
    #[serde(default, rename = "external")]
    pub externals: Vec<ExternalConfig>,
    #[serde(default)]
    pub months: BTreeMap<String, MonthConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    pub key: String,
    pub value: String,
    pub date: String,
    pub imported: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    pub name: String,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalConfig {
    pub name: String,
    /// Absolute amount per month, keyed by short month name.
    #[serde(default)]
    pub amounts: BTreeMap<String, f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthConfig {
    /// Individual income entries, summed per month.
    #[serde(default)]
    pub income: Vec<f64>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.positions.is_empty() {
            return Err(ConfigError::NoPositions);
        }
        let mut seen = Vec::new();
        for name in self
            .positions
            .iter()
            .map(|p| &p.name)
            .chain(self.externals.iter().map(|e| &e.name))
        {
            if RESERVED_NAMES.contains(&name.as_str()) {
                return Err(ConfigError::ReservedName(name.clone()));
            }
            if seen.contains(&name) {
                return Err(ConfigError::DuplicatePosition(name.clone()));
            }
            seen.push(name);
        }
        for column in [&self.columns.key, &self.columns.value, &self.columns.date] {
            if !self.columns.imported.contains(column) {
                return Err(ConfigError::MissingImportedColumn(column.clone()));
            }
        }
        for key in self
            .months
            .keys()
            .chain(self.externals.iter().flat_map(|e| e.amounts.keys()))
        {
            if Month::from_short_name(key).is_none() {
                return Err(ConfigError::UnknownMonth(key.clone()));
            }
        }
        Ok(())
    }

    pub fn year(&self) -> Year {
        Year::new(self.year)
    }

    pub fn statement_columns(&self) -> StatementColumns {
        StatementColumns {
            key: self.columns.key.clone(),
            value: self.columns.value.clone(),
            date: self.columns.date.clone(),
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        self.positions
            .iter()
            .map(|p| Category {
                name: p.name.clone(),
                identifiers: p.identifiers.clone(),
            })
            .collect()
    }

    pub fn external_positions(&self) -> Vec<ExternalPosition> {
        self.externals
            .iter()
            .map(|ext| {
                let mut amounts = [0i64; 12];
                for (key, value) in &ext.amounts {
                    // Keys were validated; whole units, fraction dropped.
                    let month = Month::from_short_name(key).unwrap();
                    amounts[month.index()] = (value.trunc() as i64).abs();
                }
                ExternalPosition {
                    name: ext.name.clone(),
                    amounts,
                }
            })
            .collect()
    }

    /// Summed income per month, in month order.
    pub fn income(&self) -> [i64; 12] {
        let mut income = [0i64; 12];
        for (key, month_config) in &self.months {
            let month = Month::from_short_name(key).unwrap();
            income[month.index()] = month_config.income.iter().sum::<f64>().trunc() as i64;
        }
        income
    }

    pub fn month_dir(&self, month: Month) -> PathBuf {
        self.base_dir.join(month.short_name())
    }
}

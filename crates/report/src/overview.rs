use ausgaben_core::{MonthSummary, YearSummary};
use std::path::Path;

use crate::ReportError;

/// Writes a month overview: one row per position, catch-all and externals
/// included, with the derived Total row last.
pub fn write_month_overview(path: &Path, summary: &MonthSummary) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    writer.write_record(["Position", "Sum", "counts"])?;
    let total = summary.total();
    for row in summary.rows().iter().chain(std::iter::once(&total)) {
        writer.write_record([
            row.position.as_str(),
            &row.sum.to_string(),
            &row.count.to_string(),
        ])?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Reads a persisted month overview back in: (position, sum) in row order,
/// Total row included. The year summary is built from these.
pub fn read_month_overview(path: &Path) -> Result<Vec<(String, i64)>, ReportError> {
    let file = std::fs::File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(file);

    let headers = reader.headers()?.clone();
    let position_idx = column_index(&headers, path, "Position")?;
    let sum_idx = column_index(&headers, path, "Sum")?;

    let mut entries = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let position = record.get(position_idx).unwrap_or_default().to_string();
        let raw_sum = record.get(sum_idx).unwrap_or_default();
        let sum = raw_sum.parse().map_err(|_| ReportError::InvalidSum {
            path: path.to_path_buf(),
            row: i + 1,
            value: raw_sum.to_string(),
        })?;
        entries.push((position, sum));
    }
    Ok(entries)
}

fn column_index(
    headers: &csv::StringRecord,
    path: &Path,
    column: &str,
) -> Result<usize, ReportError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ReportError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Writes the year overview: months as rows, positions as columns.
pub fn write_year_overview(path: &Path, year: &YearSummary) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    let mut header = vec!["Month".to_string()];
    header.extend(year.positions().iter().cloned());
    writer.write_record(&header)?;

    for (month, sums) in year.rows() {
        let mut record = vec![month.to_string()];
        record.extend(sums.iter().map(|sum| sum.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ausgaben_core::{classify, Category, ExternalPosition, Month, Transaction};
    use chrono::NaiveDate;

    fn tx(description: &str, amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            description,
            amount.parse().unwrap(),
        )
    }

    fn january_summary() -> MonthSummary {
        let categories = vec![Category::new("Groceries", &["MARKET"])];
        let txs = vec![tx("MARKET CO", "-12.40"), tx("UNKNOWN", "-5.00")];
        MonthSummary::build(&classify(txs, &categories), &[], Month::Jan)
    }

    #[test]
    fn month_overview_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overview.csv");
        let summary = january_summary();
        write_month_overview(&path, &summary).unwrap();

        let entries = read_month_overview(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                ("Groceries".to_string(), 12),
                ("Sonstiges".to_string(), 5),
                ("Total".to_string(), 17),
            ]
        );
    }

    #[test]
    fn month_overview_total_row_is_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overview.csv");
        write_month_overview(&path, &january_summary()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Position;Sum;counts");
        assert_eq!(*lines.last().unwrap(), "Total;17;2");
    }

    #[test]
    fn read_rejects_non_numeric_sum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overview.csv");
        std::fs::write(&path, "Position;Sum;counts\nGroceries;abc;1\n").unwrap();
        let err = read_month_overview(&path).unwrap_err();
        assert!(matches!(err, ReportError::InvalidSum { row: 1, .. }));
    }

    #[test]
    fn read_rejects_missing_sum_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overview.csv");
        std::fs::write(&path, "Position;counts\nGroceries;1\n").unwrap();
        let err = read_month_overview(&path).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn { column, .. } if column == "Sum"));
    }

    #[test]
    fn year_overview_has_month_rows_and_position_columns() {
        let ext = ExternalPosition {
            name: "Rent".to_string(),
            amounts: [850; 12],
        };
        let entries = |month| {
            let categories = vec![Category::new("Groceries", &["MARKET"])];
            let summary = MonthSummary::build(
                &classify(vec![tx("MARKET CO", "-12.40")], &categories),
                std::slice::from_ref(&ext),
                month,
            );
            let total = summary.total();
            summary
                .rows()
                .iter()
                .chain(std::iter::once(&total))
                .map(|r| (r.position.clone(), r.sum))
                .collect::<Vec<_>>()
        };
        let year = YearSummary::build(vec![
            (Month::Jan, entries(Month::Jan)),
            (Month::Feb, entries(Month::Feb)),
        ])
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overview.csv");
        write_year_overview(&path, &year).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Month;Groceries;Sonstiges;Rent;Total");
        assert_eq!(lines[1], "Jan;12;0;850;862");
        assert_eq!(lines[2], "Feb;12;0;850;862");
    }
}

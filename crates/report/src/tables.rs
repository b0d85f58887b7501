use ausgaben_core::Transaction;
use std::path::Path;

use crate::ReportError;

/// Column names for a written transaction table: the interpreted columns
/// under their configured names, then the carried-along extras.
#[derive(Debug, Clone)]
pub struct TableHeaders {
    pub date: String,
    pub key: String,
    pub value: String,
    pub extras: Vec<String>,
}

impl TableHeaders {
    fn record(&self) -> Vec<&str> {
        let mut header = vec![self.date.as_str(), self.key.as_str(), self.value.as_str()];
        header.extend(self.extras.iter().map(String::as_str));
        header
    }
}

/// Writes a `;`-separated transaction table. Dates are written ISO and
/// amounts with a decimal point, as the typed conversion left them.
pub fn write_transactions(
    path: &Path,
    headers: &TableHeaders,
    rows: &[Transaction],
) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    writer.write_record(headers.record())?;
    for tx in rows {
        let mut record = vec![tx.date.to_string(), tx.description.clone(), tx.amount.to_string()];
        record.extend(tx.extras.iter().cloned());
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
    use ausgaben_core::Amount;
    use chrono::NaiveDate;

    fn headers() -> TableHeaders {
        TableHeaders {
            date: "Buchungstag".to_string(),
            key: "Auftraggeber".to_string(),
            value: "Betrag".to_string(),
            extras: vec!["Buchungstext".to_string()],
        }
    }

    fn tx(day: u32, description: &str, amount: &str, text: &str) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2022, 1, day).unwrap(),
            description: description.to_string(),
            amount: amount.parse().unwrap(),
            extras: vec![text.to_string()],
        }
    }

    #[test]
    fn writes_semicolon_table_with_configured_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Groceries.csv");
        let rows = vec![
            tx(3, "SUPERMART", "-45.30", "KAUF"),
            tx(4, "MARKET CO", "-12.00", "KAUF"),
        ];
        write_transactions(&path, &headers(), &rows).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Buchungstag;Auftraggeber;Betrag;Buchungstext");
        assert_eq!(lines[1], "2022-01-03;SUPERMART;-45.30;KAUF");
        assert_eq!(lines[2], "2022-01-04;MARKET CO;-12.00;KAUF");
    }

    #[test]
    fn round_trip_preserves_count_and_sum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Groceries.csv");
        let rows = vec![
            tx(3, "SUPERMART", "-45.30", "KAUF"),
            tx(4, "MARKET CO", "-12.00", "KAUF"),
        ];
        write_transactions(&path, &headers(), &rows).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let mut count = 0;
        let mut sum = Amount::zero();
        for record in reader.records() {
            let record = record.unwrap();
            count += 1;
            sum = sum + record.get(2).unwrap().parse::<Amount>().unwrap();
        }
        assert_eq!(count, rows.len());
        let expected: Amount = rows.iter().map(|t| t.amount).sum();
        assert_eq!(sum, expected);
    }

    #[test]
    fn unwritable_path_names_the_file() {
        let rows = vec![];
        let err =
            write_transactions(Path::new("/no/such/dir/out.csv"), &headers(), &rows).unwrap_err();
        assert!(err.to_string().contains("/no/such/dir/out.csv"));
    }
}

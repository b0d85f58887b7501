use anyhow::Context;
use ausgaben_chart::{month_bar, month_pie, year_line, year_stacked};
use ausgaben_core::{classify, split_by_month, MonthSummary, YearSummary, CATCH_ALL, MONTHS};
use ausgaben_import::{
    apply_exclusions, into_transactions, read_statement, retain_negative, strip_thousands,
};
use ausgaben_report::{
    read_month_overview, write_month_overview, write_transactions, write_year_overview,
    TableHeaders,
};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;

const STATEMENT_DELIMITER: u8 = b';';

/// The whole batch run: load, preprocess, split, classify per month, write
/// tables and charts, then the year overview. Outputs written before a
/// failure stay on disk; there is no rollback.
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;
    info!(year = config.year, base_dir = %config.base_dir.display(), "starting evaluation");

    for month in MONTHS {
        let dir = config.month_dir(month);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create month directory {}", dir.display()))?;
    }

    let mut raw = read_statement(
        &config.statement,
        STATEMENT_DELIMITER,
        &config.columns.imported,
    )?;
    info!(rows = raw.len(), "loaded statement");

    strip_thousands(&mut raw, &config.columns.value)?;
    retain_negative(&mut raw, &config.columns.value)?;
    apply_exclusions(&mut raw, &config.exclude)?;
    let converted = into_transactions(raw, &config.statement_columns(), &config.date_format)?;
    info!(rows = converted.transactions.len(), "retained expenditures");

    let headers = TableHeaders {
        date: config.columns.date.clone(),
        key: config.columns.key.clone(),
        value: config.columns.value.clone(),
        extras: converted.extra_headers,
    };

    let mut split = split_by_month(converted.transactions, config.year());
    if split.out_of_year > 0 {
        warn!(
            rows = split.out_of_year,
            year = config.year,
            "dropped rows dated outside the configured year"
        );
    }

    let categories = config.categories();
    let externals = config.external_positions();

    for month in MONTHS {
        let dir = config.month_dir(month);
        let transactions = split.take_bucket(month);
        write_transactions(&dir.join("month_all.csv"), &headers, &transactions)?;

        let classification = classify(transactions, &categories);
        for claimed in &classification.positions {
            let path = dir.join(format!("{}.csv", claimed.totals.name));
            write_transactions(&path, &headers, &claimed.rows)?;
        }
        write_transactions(
            &dir.join(format!("{CATCH_ALL}.csv")),
            &headers,
            &classification.catch_all.rows,
        )?;

        let summary = MonthSummary::build(&classification, &externals, month);
        let total = summary.total();
        let title = format!("Expenses {month}");
        month_bar(&dir.join("bar.svg"), &title, &summary)?;
        if total.sum == 0 {
            // A pie of all-zero slices has no angles to distribute.
            warn!(%month, "no expenditures, skipping pie chart");
        } else {
            month_pie(&dir.join("pie.svg"), &title, &summary)?;
        }
        write_month_overview(&dir.join("overview.csv"), &summary)?;
        info!(%month, sum = total.sum, count = total.count, "month evaluated");
    }

    // The year overview is built from the persisted month overviews, which
    // also revalidates what was written.
    let mut per_month = Vec::with_capacity(MONTHS.len());
    for month in MONTHS {
        let entries = read_month_overview(&config.month_dir(month).join("overview.csv"))?;
        per_month.push((month, entries));
    }
    let year_summary = YearSummary::build(per_month)?;
    write_year_overview(&config.base_dir.join("overview.csv"), &year_summary)?;

    let title = config.year.to_string();
    year_line(
        &config.base_dir.join("summary_line.svg"),
        &title,
        &year_summary,
    )?;
    year_stacked(
        &config.base_dir.join("summary_bar.svg"),
        &title,
        &year_summary,
        &config.income(),
    )?;

    info!("evaluation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
Buchungstag;Auftraggeber;Buchungstext;Betrag
03.01.2022;SUPERMART FILIALE 1;LASTSCHRIFT;-45,30
05.01.2022;MARKET CO;LASTSCHRIFT;-12,00
07.01.2022;MY EMPLOYER GMBH;LOHN;2.500,00
09.01.2022;UNKNOWN VENDOR;LASTSCHRIFT;-9,99
14.02.2022;RAILWAYS AG;LASTSCHRIFT;-23,10
28.12.2021;SUPERMART FILIALE 1;LASTSCHRIFT;-99,99
";

    fn config_toml(dir: &Path) -> String {
        format!(
            r#"
            year = 2022
            base_dir = "{base}"
            statement = "{statement}"

            [columns]
            key = "Auftraggeber"
            value = "Betrag"
            date = "Buchungstag"
            imported = ["Buchungstag", "Auftraggeber", "Buchungstext", "Betrag"]

            [[exclude]]
            column = "Buchungstext"
            values = ["LOHN"]

            [[position]]
            name = "Groceries"
            identifiers = ["SUPER", "MARKET"]

            [[position]]
            name = "Transport"
            identifiers = ["RAILWAYS"]

            [[external]]
            name = "Rent"
            [external.amounts]
            Jan = 850.0

            [months.Jan]
            income = [2500.0]
            "#,
            base = dir.join("out").display(),
            statement = dir.join("statement.csv").display(),
        )
    }

    #[test]
    fn whole_run_writes_tables_and_charts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("statement.csv"), STATEMENT).unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, config_toml(dir.path())).unwrap();

        run(&config_path).unwrap();

        let jan = dir.path().join("out/Jan");
        let overview = std::fs::read_to_string(jan.join("overview.csv")).unwrap();
        let lines: Vec<&str> = overview.lines().collect();
        assert_eq!(lines[0], "Position;Sum;counts");
        assert_eq!(lines[1], "Groceries;57;2");
        assert_eq!(lines[2], "Transport;0;0");
        assert_eq!(lines[3], "Sonstiges;9;1");
        assert_eq!(lines[4], "Rent;850;1");
        assert_eq!(lines[5], "Total;916;4");

        // The income row was excluded, the catch-all holds the unknown vendor.
        let catch_all = std::fs::read_to_string(jan.join("Sonstiges.csv")).unwrap();
        assert!(catch_all.contains("UNKNOWN VENDOR"));
        assert!(!catch_all.contains("EMPLOYER"));

        // Charts for January exist; an empty month gets no pie.
        assert!(jan.join("bar.svg").exists());
        assert!(jan.join("pie.svg").exists());
        assert!(dir.path().join("out/Mar/bar.svg").exists());
        assert!(!dir.path().join("out/Mar/pie.svg").exists());

        // February got the railways row.
        let feb = std::fs::read_to_string(dir.path().join("out/Feb/overview.csv")).unwrap();
        assert!(feb.contains("Transport;23;1"));

        // Year overview: Jan and Feb rows, December-2021 row nowhere.
        let year = std::fs::read_to_string(dir.path().join("out/overview.csv")).unwrap();
        let year_lines: Vec<&str> = year.lines().collect();
        assert_eq!(
            year_lines[0],
            "Month;Groceries;Transport;Sonstiges;Rent;Total"
        );
        assert_eq!(year_lines[1], "Jan;57;0;9;850;916");
        assert_eq!(year_lines[3], "Mar;0;0;0;0;0");
        assert!(!year.contains("99"));

        assert!(dir.path().join("out/summary_line.svg").exists());
        assert!(dir.path().join("out/summary_bar.svg").exists());
    }

    #[test]
    fn missing_statement_aborts_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, config_toml(dir.path())).unwrap();

        let err = run(&config_path).unwrap_err();
        assert!(err.to_string().contains("statement.csv"));
    }
}

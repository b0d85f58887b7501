use ausgaben_core::MonthSummary;
use plotters::prelude::*;
use std::path::Path;

use crate::{draw_error, pick_color, ChartError};

/// Vertical bars of the per-position sums, value printed above each bar.
/// The Total row is not part of the summary rows, so it never shows up as
/// a bar of its own.
pub fn month_bar(path: &Path, title: &str, summary: &MonthSummary) -> Result<(), ChartError> {
    let rows = summary.rows();
    if rows.is_empty() {
        return Err(ChartError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    let max = rows.iter().map(|r| r.sum).max().unwrap_or(0).max(1);
    let y_top = max + max / 8 + 1;

    let root = SVGBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_error(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d((0..rows.len()).into_segmented(), 0i64..y_top)
        .map_err(|e| draw_error(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => rows
                .get(*idx)
                .map(|r| r.position.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .y_desc("Euro")
        .draw()
        .map_err(|e| draw_error(path, e))?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), row.sum),
                ],
                pick_color(i).filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            bar
        }))
        .map_err(|e| draw_error(path, e))?;

    let label_offset = max / 40 + 1;
    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            Text::new(
                row.sum.to_string(),
                (SegmentValue::CenterOf(i), row.sum + label_offset),
                ("sans-serif", 16).into_font(),
            )
        }))
        .map_err(|e| draw_error(path, e))?;

    root.present().map_err(|e| draw_error(path, e))?;
    Ok(())
}

/// Pie of the per-position sums with percentage labels. A summary whose
/// sums are all zero has no angles to distribute and is rejected.
pub fn month_pie(path: &Path, title: &str, summary: &MonthSummary) -> Result<(), ChartError> {
    let rows = summary.rows();
    let total: i64 = rows.iter().map(|r| r.sum).sum();
    if total == 0 {
        return Err(ChartError::EmptyData {
            path: path.to_path_buf(),
        });
    }

    let root = SVGBackend::new(path, (800, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_error(path, e))?;
    let root = root
        .titled(title, ("sans-serif", 32))
        .map_err(|e| draw_error(path, e))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let sizes: Vec<f64> = rows.iter().map(|r| r.sum as f64).collect();
    let colors: Vec<RGBColor> = (0..rows.len()).map(pick_color).collect();
    let labels: Vec<&str> = rows.iter().map(|r| r.position.as_str()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 20).into_font());
    pie.percentages(("sans-serif", 16).into_font());
    root.draw(&pie).map_err(|e| draw_error(path, e))?;

    root.present().map_err(|e| draw_error(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ausgaben_core::{classify, Category, Month, Transaction};
    use chrono::NaiveDate;

    fn summary(amounts: &[(&str, &str)]) -> MonthSummary {
        let categories: Vec<Category> = amounts
            .iter()
            .map(|(name, _)| Category::new(name, &[*name]))
            .collect();
        let txs: Vec<Transaction> = amounts
            .iter()
            .map(|(name, amount)| {
                Transaction::new(
                    NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                    name,
                    amount.parse().unwrap(),
                )
            })
            .collect();
        MonthSummary::build(&classify(txs, &categories), &[], Month::May)
    }

    #[test]
    fn bar_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.svg");
        let summary = summary(&[("Groceries", "-57.30"), ("Travel", "-120.00")]);
        month_bar(&path, "Expenses May", &summary).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Expenses May"));
    }

    #[test]
    fn pie_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.svg");
        let summary = summary(&[("Groceries", "-57.30"), ("Travel", "-120.00")]);
        month_pie(&path, "Expenses May", &summary).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn pie_rejects_all_zero_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.svg");
        let empty = MonthSummary::build(
            &classify(vec![], &[Category::new("Travel", &["AIRLINE"])]),
            &[],
            Month::May,
        );
        assert!(matches!(
            month_pie(&path, "Expenses May", &empty),
            Err(ChartError::EmptyData { .. })
        ));
    }
}

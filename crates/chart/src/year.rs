use ausgaben_core::{YearSummary, TOTAL};
use plotters::prelude::*;
use std::path::Path;

use crate::{draw_error, pick_color, ChartError};

/// One line with markers per position column (Total included), months on
/// the x axis.
pub fn year_line(path: &Path, title: &str, year: &YearSummary) -> Result<(), ChartError> {
    let rows = year.rows();
    if rows.is_empty() {
        return Err(ChartError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    let max = rows
        .iter()
        .flat_map(|(_, sums)| sums.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    let root = SVGBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_error(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0..rows.len() - 1, 0i64..max + max / 10 + 1)
        .map_err(|e| draw_error(path, e))?;

    chart
        .configure_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|idx| {
            rows.get(*idx)
                .map(|(month, _)| month.to_string())
                .unwrap_or_default()
        })
        .x_desc("Month")
        .y_desc("Euro")
        .draw()
        .map_err(|e| draw_error(path, e))?;

    for (ci, position) in year.positions().iter().enumerate() {
        let color = pick_color(ci);
        let points: Vec<(usize, i64)> = rows
            .iter()
            .enumerate()
            .map(|(i, (_, sums))| (i, sums[ci]))
            .collect();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| draw_error(path, e))?
            .label(position)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(|e| draw_error(path, e))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(|e| draw_error(path, e))?;

    root.present().map_err(|e| draw_error(path, e))?;
    Ok(())
}

/// Stacked per-position bars per month (Total column dropped), with the
/// monthly income drawn as an overlaid line and spent / income / left
/// annotated above each bar.
pub fn year_stacked(
    path: &Path,
    title: &str,
    year: &YearSummary,
    income: &[i64],
) -> Result<(), ChartError> {
    let rows = year.rows();
    if rows.is_empty() {
        return Err(ChartError::EmptyData {
            path: path.to_path_buf(),
        });
    }
    if income.len() != rows.len() {
        return Err(ChartError::IncomeMismatch {
            path: path.to_path_buf(),
            months: rows.len(),
            incomes: income.len(),
        });
    }

    let stacked_columns: Vec<usize> = year
        .positions()
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() != TOTAL)
        .map(|(idx, _)| idx)
        .collect();
    let spent: Vec<i64> = rows
        .iter()
        .map(|(_, sums)| stacked_columns.iter().map(|&c| sums[c]).sum())
        .collect();

    let max = spent
        .iter()
        .chain(income.iter())
        .copied()
        .max()
        .unwrap_or(0)
        .max(1);
    let y_top = max + max / 5 + 1;
    let offset = max / 25 + 1;

    let root = SVGBackend::new(path, (1280, 840)).into_drawing_area();
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
                .map(|(month, _)| month.to_string())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .x_desc("Month")
        .y_desc("Euro")
        .draw()
        .map_err(|e| draw_error(path, e))?;

    // Stack the position segments month by month; `base` carries the
    // running height per month.
    let mut base = vec![0i64; rows.len()];
    for (series_idx, &col) in stacked_columns.iter().enumerate() {
        let color = pick_color(series_idx);
        let mut segments = Vec::with_capacity(rows.len());
        let mut labels = Vec::new();
        for (mi, (_, sums)) in rows.iter().enumerate() {
            let value = sums[col];
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(mi), base[mi]),
                    (SegmentValue::Exact(mi + 1), base[mi] + value),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 10, 10);
            segments.push(bar);
            if value != 0 {
                labels.push(Text::new(
                    value.to_string(),
                    (SegmentValue::CenterOf(mi), base[mi] + value / 2),
                    ("sans-serif", 14).into_font(),
                ));
            }
            base[mi] += value;
        }
        chart
            .draw_series(segments)
            .map_err(|e| draw_error(path, e))?
            .label(&year.positions()[col])
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
            });
        chart
            .draw_series(labels)
            .map_err(|e| draw_error(path, e))?;
    }

    // Income line with cross markers over the stacked bars.
    chart
        .draw_series(LineSeries::new(
            income
                .iter()
                .enumerate()
                .map(|(mi, &v)| (SegmentValue::CenterOf(mi), v)),
            BLACK.stroke_width(2),
        ))
        .map_err(|e| draw_error(path, e))?
        .label("Income")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLACK.stroke_width(2)));
    chart
        .draw_series(
            income
                .iter()
                .enumerate()
                .map(|(mi, &v)| Cross::new((SegmentValue::CenterOf(mi), v), 5, BLACK.filled())),
        )
        .map_err(|e| draw_error(path, e))?;

    // Per-month annotations: total spent, income, money left.
    let annotations = rows.iter().enumerate().flat_map(|(mi, _)| {
        let left = income[mi] - spent[mi];
        [
            Text::new(
                spent[mi].to_string(),
                (SegmentValue::CenterOf(mi), spent[mi] + offset),
                ("sans-serif", 16).into_font().color(&RED),
            ),
            Text::new(
                income[mi].to_string(),
                (SegmentValue::CenterOf(mi), income[mi] + 2 * offset),
                ("sans-serif", 16).into_font().color(&GREEN),
            ),
            Text::new(
                left.to_string(),
                (SegmentValue::CenterOf(mi), (income[mi] - 3 * offset).max(0)),
                ("sans-serif", 16).into_font().color(&BLUE),
            ),
        ]
    });
    chart
        .draw_series(annotations)
        .map_err(|e| draw_error(path, e))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(|e| draw_error(path, e))?;

    root.present().map_err(|e| draw_error(path, e))?;
    Ok(())
}

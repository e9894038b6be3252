use std::path::{Path, PathBuf};

use freerange_survey::{record::Record, scoring::RankedQuestion};
use plotters::prelude::*;

use super::{CHART_SIZE, HIGHLIGHT_COLOR, LABEL_FONT, POINT_COLOR};

const BAR_HALF_WIDTH: f64 = 0.35;

/// Horizontal bars of the mean |z - caution| per question, best first.
pub(crate) fn render_representativeness(
    ranking: &[RankedQuestion],
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = output_dir.join("question-representativeness.png");
    draw_representativeness(ranking, &path)?;
    Ok(path)
}

#[expect(clippy::cast_precision_loss)]
fn draw_representativeness(ranking: &[RankedQuestion], path: &Path) -> anyhow::Result<()> {
    let labels = ranking
        .iter()
        .map(|ranked| ranked.question.label().to_owned())
        .collect::<Vec<_>>();
    let x_max = ranking
        .iter()
        .filter_map(|ranked| ranked.mean_abs_diff)
        .fold(0.0, f64::max)
        .max(0.1)
        * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    let area = super::titled(&root, "How well each question predicts overall caution")?;
    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(440)
        .build_cartesian_2d(0.0..x_max, super::category_range(labels.len()))?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Mean |question z-score - caution| (lower is more representative)")
        .y_labels(labels.len() + 1)
        .y_label_formatter(&|y| super::category_label(&labels, *y))
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(ranking.iter().enumerate().filter_map(|(i, ranked)| {
        let y = i as f64;
        let value = ranked.mean_abs_diff?;
        Some(Rectangle::new(
            [(0.0, y - BAR_HALF_WIDTH), (value, y + BAR_HALF_WIDTH)],
            POINT_COLOR.mix(0.8).filled(),
        ))
    }))?;

    root.present()?;
    Ok(())
}

/// Vertical bars of composite years above mean, one per respondent in the given order.
pub(crate) fn render_years_above_mean(
    records: &[Record],
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = output_dir.join("years-above-mean.png");
    draw_years_above_mean(records, &path)?;
    Ok(path)
}

#[expect(clippy::cast_precision_loss)]
fn draw_years_above_mean(records: &[Record], path: &Path) -> anyhow::Result<()> {
    let y_range = super::padded_range(
        records
            .iter()
            .filter_map(|record| record.years_above_mean)
            .chain([0.0]),
        -1.0..1.0,
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    let area = super::titled(&root, "Years above the average answer, per respondent")?;
    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(super::category_range(records.len()), y_range)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Respondents, sorted by years above average")
        .y_desc("Mean years above average")
        .x_label_formatter(&|_| String::new())
        .label_style(LABEL_FONT)
        .draw()?;

    for (i, record) in records.iter().enumerate() {
        let Some(years) = record.years_above_mean else {
            continue;
        };
        let x = i as f64;
        let color = if record.highlight.is_some() {
            HIGHLIGHT_COLOR
        } else {
            POINT_COLOR
        };
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, years)],
            color.mix(0.85).filled(),
        )))?;
        if record.highlight.is_some() {
            let anchor = if years >= 0.0 { (-20, -24) } else { (-20, 8) };
            chart.draw_series(std::iter::once(
                EmptyElement::at((x, years))
                    + Text::new(
                        record.display_label(),
                        anchor,
                        TextStyle::from(LABEL_FONT).color(&HIGHLIGHT_COLOR),
                    ),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

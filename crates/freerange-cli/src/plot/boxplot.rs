use std::path::{Path, PathBuf};

use freerange_stats::boxplot::BoxSummary;
use freerange_survey::{
    aggregate::{Distributions, Variant},
    normalize::MAX_AGE,
};
use plotters::{coord::types::RangedCoordf64, prelude::*};

use super::{CHART_SIZE, LABEL_FONT, POINT_COLOR};

/// Half the thickness of one box, in category units.
pub(crate) const BOX_HALF_WIDTH: f64 = 0.3;

/// One horizontal box plot per variant, questions sorted by mean answer.
pub(crate) fn render_variants(
    distributions: &Distributions,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    Variant::ALL
        .into_iter()
        .map(|variant| {
            let path = output_dir.join(format!("{}-big.png", variant.name()));
            render_variant(distributions, variant, &path)?;
            Ok(path)
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn render_variant(
    distributions: &Distributions,
    variant: Variant,
    path: &Path,
) -> anyhow::Result<()> {
    let samples = distributions.sorted_by_mean(variant);
    let labels = samples
        .iter()
        .map(|sample| sample.question.label().to_owned())
        .collect::<Vec<_>>();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    let area = super::titled(&root, &format!("Age by question ({variant})"))?;
    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(440)
        .build_cartesian_2d(0.0..MAX_AGE, super::category_range(labels.len()))?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Age (years)")
        .y_labels(labels.len() + 1)
        .y_label_formatter(&|y| super::category_label(&labels, *y))
        .label_style(LABEL_FONT)
        .draw()?;

    for (i, sample) in samples.iter().enumerate() {
        let Some(summary) = BoxSummary::from_sorted(&sample.values) else {
            continue;
        };
        draw_horizontal_box(&mut chart, i as f64, &summary, POINT_COLOR)?;
    }

    root.present()?;
    Ok(())
}

/// Draws a box at category position `y` along a value x axis; no outliers.
pub(crate) fn draw_horizontal_box<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    y: f64,
    summary: &BoxSummary,
    color: RGBColor,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (lo, hi) = (y - BOX_HALF_WIDTH, y + BOX_HALF_WIDTH);
    let shapes = [
        PathElement::new(vec![(summary.whisker_low, y), (summary.q1, y)], color),
        PathElement::new(vec![(summary.q3, y), (summary.whisker_high, y)], color),
        PathElement::new(
            vec![(summary.whisker_low, lo + 0.1), (summary.whisker_low, hi - 0.1)],
            color,
        ),
        PathElement::new(
            vec![(summary.whisker_high, lo + 0.1), (summary.whisker_high, hi - 0.1)],
            color,
        ),
        PathElement::new(
            vec![(summary.median, lo), (summary.median, hi)],
            color.stroke_width(3),
        ),
    ];
    chart.draw_series(std::iter::once(Rectangle::new(
        [(summary.q1, lo), (summary.q3, hi)],
        color.mix(0.25).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(summary.q1, lo), (summary.q3, hi)],
        color.stroke_width(2),
    )))?;
    chart.draw_series(shapes)?;
    chart.draw_series(std::iter::once(Circle::new(
        (summary.mean, y),
        4,
        BLACK.filled(),
    )))?;
    Ok(())
}

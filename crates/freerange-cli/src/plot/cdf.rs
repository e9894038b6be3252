use std::path::{Path, PathBuf};

use freerange_survey::{
    aggregate::{Distributions, QuestionDistribution, Variant},
    normalize::MAX_AGE,
};
use plotters::prelude::*;

use super::{CHART_SIZE, LABEL_FONT};

fn variant_color(variant: Variant) -> RGBColor {
    match variant {
        Variant::Typical => RGBColor(0, 90, 181),
        Variant::Mature => RGBColor(26, 133, 44),
        Variant::Immature => RGBColor(220, 50, 32),
    }
}

/// One cumulative distribution chart per question.
pub(crate) fn render_questions(
    distributions: &Distributions,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    distributions
        .iter()
        .map(|(question, distribution)| {
            let path = output_dir.join(format!("{}-big.png", question.slug()));
            render_question(&question.title(), distribution, &path)?;
            Ok(path)
        })
        .collect()
}

fn render_question(
    title: &str,
    distribution: &QuestionDistribution,
    path: &Path,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    let area = super::titled(&root, title)?;

    let curves = distribution.curves();
    let x_max = curves
        .iter()
        .filter_map(|(_, curve)| curve.points.last().map(|(x, _)| *x))
        .fold(MAX_AGE, f64::max);

    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, 0.0..100.0)?;
    chart
        .configure_mesh()
        .x_desc("Age (years)")
        .y_desc("Respondents at or below age (%)")
        .label_style(LABEL_FONT)
        .draw()?;

    for (variant, curve) in curves {
        if curve.is_empty() {
            continue;
        }
        let color = variant_color(variant);
        chart
            .draw_series(LineSeries::new(
                step_points(&curve.points, x_max),
                color.stroke_width(3),
            ))?
            .label(variant.name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font(LABEL_FONT)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Staircase through right-continuous CDF points, held flat up to `x_end`.
fn step_points(points: &[(f64, f64)], x_end: f64) -> Vec<(f64, f64)> {
    let mut steps = Vec::with_capacity(points.len() * 2 + 1);
    let mut previous = 0.0;
    for &(x, percent) in points {
        steps.push((x, previous));
        steps.push((x, percent));
        previous = percent;
    }
    if let Some(&(x, _)) = points.last()
        && x < x_end
    {
        steps.push((x_end, previous));
    }
    steps
}

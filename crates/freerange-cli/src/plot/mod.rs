//! Chart rendering
//!
//! Every chart is a 1200x800 PNG drawn with the plotters bitmap backend.
//! Category axes (questions, areas) are plain `f64` axes with one category at
//! each integer position and a label formatter that names the positions.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use freerange_survey::pipeline::Survey;
use plotters::{coord::Shift, prelude::*};
use tracing::debug;

mod bar;
mod boxplot;
mod category;
mod cdf;
mod scatter;

pub(crate) const CHART_SIZE: (u32, u32) = (1200, 800);
pub(crate) const TITLE_FONT: (&str, u32) = ("sans-serif", 32);
pub(crate) const LABEL_FONT: (&str, u32) = ("sans-serif", 18);
pub(crate) const HIGHLIGHT_COLOR: RGBColor = RGBColor(220, 50, 32);
pub(crate) const POINT_COLOR: RGBColor = RGBColor(0, 90, 181);

/// Renders every chart into `output_dir` and returns the written paths.
pub(crate) fn render_all(
    survey: &Survey,
    output_dir: &Path,
    jitter_seed: u64,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = vec![];
    written.extend(cdf::render_questions(&survey.distributions, output_dir)?);
    written.extend(boxplot::render_variants(&survey.distributions, output_dir)?);
    written.extend(scatter::render(&survey.records, output_dir)?);
    written.extend(category::render(&survey.records, output_dir, jitter_seed)?);
    written.push(bar::render_representativeness(&survey.ranking, output_dir)?);
    written.push(bar::render_years_above_mean(
        &survey.export_records(),
        output_dir,
    )?);
    for path in &written {
        debug!(path = %path.display(), "wrote chart");
    }
    Ok(written)
}

/// Fills `root` white and stacks the title lines on top.
///
/// Returns the area below the title.
pub(crate) fn titled<'a>(
    root: &DrawingArea<BitMapBackend<'a>, Shift>,
    title: &str,
) -> anyhow::Result<DrawingArea<BitMapBackend<'a>, Shift>> {
    root.fill(&WHITE)?;
    let mut area = root.clone();
    for line in title.lines() {
        area = area.titled(line, TITLE_FONT)?;
    }
    Ok(area)
}

/// Axis range putting `count` categories at positions `0..count`.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn category_range(count: usize) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5)
}

/// Formats a category axis tick: the label at an integer position, blank elsewhere.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 || (value - rounded).abs() > 1e-6 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Value range covering `values` with some padding, or `fallback` if empty.
pub(crate) fn padded_range<I>(values: I, fallback: Range<f64>) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return fallback;
    }
    let pad = ((max - min) * 0.1).max(0.5);
    (min - pad)..(max + pad)
}

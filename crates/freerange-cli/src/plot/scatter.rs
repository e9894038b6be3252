use std::path::{Path, PathBuf};

use freerange_survey::record::Record;
use plotters::prelude::*;

use super::{CHART_SIZE, HIGHLIGHT_COLOR, LABEL_FONT, POINT_COLOR};

struct ScatterChart {
    file_name: &'static str,
    title: &'static str,
    x_desc: &'static str,
    x_value: fn(&Record) -> Option<f64>,
}

const SCATTERS: [ScatterChart; 2] = [
    ScatterChart {
        file_name: "caution-vs-age.png",
        title: "Caution vs respondent age",
        x_desc: "Respondent age (years)",
        x_value: |record| record.age.map(f64::from),
    },
    ScatterChart {
        file_name: "caution-vs-oldest-child.png",
        title: "Caution vs age of oldest child",
        x_desc: "Oldest child age (years)",
        x_value: |record| record.oldest_child_age,
    },
];

/// Caution scatter plots; highlighted respondents are labelled.
pub(crate) fn render(records: &[Record], output_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    SCATTERS
        .iter()
        .map(|scatter| {
            let path = output_dir.join(scatter.file_name);
            render_scatter(records, scatter, &path)?;
            Ok(path)
        })
        .collect()
}

fn render_scatter(records: &[Record], scatter: &ScatterChart, path: &Path) -> anyhow::Result<()> {
    let points = records
        .iter()
        .filter_map(|record| Some(((scatter.x_value)(record)?, record.caution?, record)))
        .collect::<Vec<_>>();

    let x_range = super::padded_range(points.iter().map(|(x, _, _)| *x), 0.0..1.0);
    let y_range = super::padded_range(points.iter().map(|(_, y, _)| *y), -1.0..1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    let area = super::titled(&root, scatter.title)?;
    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range)?;
    chart
        .configure_mesh()
        .x_desc(scatter.x_desc)
        .y_desc("Caution (mean z-score)")
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x_range.start, 0.0), (x_range.end, 0.0)],
        BLACK.mix(0.3),
    )))?;

    chart.draw_series(
        points
            .iter()
            .filter(|(_, _, record)| record.highlight.is_none())
            .map(|(x, y, _)| Circle::new((*x, *y), 5, POINT_COLOR.mix(0.7).filled())),
    )?;
    for (x, y, record) in points.iter().filter(|(_, _, r)| r.highlight.is_some()) {
        chart.draw_series(std::iter::once(
            EmptyElement::at((*x, *y))
                + Circle::new((0, 0), 7, HIGHLIGHT_COLOR.filled())
                + Text::new(
                    record.display_label(),
                    (10, -10),
                    TextStyle::from(LABEL_FONT).color(&HIGHLIGHT_COLOR),
                ),
        ))?;
    }

    root.present()?;
    Ok(())
}

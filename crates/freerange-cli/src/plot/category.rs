use std::path::{Path, PathBuf};

use freerange_stats::boxplot::BoxSummary;
use freerange_survey::{
    area::Area,
    record::Record,
    scoring::{self, GroupSummary},
};
use plotters::prelude::*;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use super::{CHART_SIZE, LABEL_FONT, POINT_COLOR, boxplot};

/// Largest vertical offset of a jittered point, in category units.
const JITTER: f64 = 0.25;

struct Group {
    label: String,
    cautions: Vec<f64>,
    summary: BoxSummary,
}

impl Group {
    fn from_summary<K>(group: GroupSummary<K>, label: impl FnOnce(K) -> String) -> Self {
        Self {
            label: label(group.key),
            cautions: group.cautions,
            summary: group.summary,
        }
    }
}

/// Caution box plots by current area, childhood area and parent status.
///
/// Points are jittered with a generator seeded from `seed`, so reruns draw
/// identical charts.
pub(crate) fn render(
    records: &[Record],
    output_dir: &Path,
    seed: u64,
) -> anyhow::Result<Vec<PathBuf>> {
    let area_label = |area: Area| area.label().to_owned();
    let charts = [
        (
            "caution-by-current-area.png",
            "Caution by where respondents live now",
            scoring::caution_by_current_area(records)
                .into_iter()
                .map(|g| Group::from_summary(g, area_label))
                .collect::<Vec<_>>(),
        ),
        (
            "caution-by-childhood-area.png",
            "Caution by where respondents grew up",
            scoring::caution_by_childhood_area(records)
                .into_iter()
                .map(|g| Group::from_summary(g, area_label))
                .collect(),
        ),
        (
            "caution-by-parent.png",
            "Caution by parent status",
            scoring::caution_by_parent(records)
                .into_iter()
                .map(|g| {
                    Group::from_summary(g, |is_parent| {
                        String::from(if is_parent { "parent" } else { "not a parent" })
                    })
                })
                .collect(),
        ),
    ];

    let mut rng = Pcg64::seed_from_u64(seed);
    charts
        .into_iter()
        .map(|(file_name, title, groups)| {
            let path = output_dir.join(file_name);
            render_groups(title, &groups, &mut rng, &path)?;
            Ok(path)
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn render_groups(
    title: &str,
    groups: &[Group],
    rng: &mut Pcg64,
    path: &Path,
) -> anyhow::Result<()> {
    let labels = groups
        .iter()
        .map(|g| format!("{} (n={})", g.label, g.cautions.len()))
        .collect::<Vec<_>>();
    let x_range = super::padded_range(
        groups.iter().flat_map(|g| g.cautions.iter().copied()),
        -1.0..1.0,
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    let area = super::titled(&root, title)?;
    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(220)
        .build_cartesian_2d(x_range, super::category_range(labels.len()))?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Caution (mean z-score)")
        .y_labels(labels.len() + 1)
        .y_label_formatter(&|y| super::category_label(&labels, *y))
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (0.0, -0.5),
            (0.0, super::category_range(labels.len()).end),
        ],
        BLACK.mix(0.3),
    )))?;

    for (i, group) in groups.iter().enumerate() {
        let y = i as f64;
        boxplot::draw_horizontal_box(&mut chart, y, &group.summary, POINT_COLOR)?;
        let points = group
            .cautions
            .iter()
            .map(|caution| (*caution, y + rng.random_range(-JITTER..=JITTER)))
            .collect::<Vec<_>>();
        chart.draw_series(
            points
                .into_iter()
                .map(|point| Circle::new(point, 4, BLACK.mix(0.6).filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

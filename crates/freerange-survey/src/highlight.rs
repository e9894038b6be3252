use std::cmp::Ordering;

use freerange_stats::descriptive::DescriptiveStats;

use crate::record::{Highlight, Record};

/// Tags the least cautious, most cautious and median respondents.
///
/// Requires scored records. Ties go to the earliest record, records without a
/// caution score are never tagged, and a record keeps the first tag it
/// qualifies for in the order least cautious, most cautious, median. Any
/// existing tags are cleared first.
pub fn tag_highlights(records: &mut [Record]) {
    for record in records.iter_mut() {
        record.highlight = None;
    }

    let scored = records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| record.caution.map(|c| (i, c)))
        .collect::<Vec<_>>();
    let Some(stats) = DescriptiveStats::new(scored.iter().map(|(_, c)| *c)) else {
        return;
    };

    let least = first_by(&scored, |a, b| a.total_cmp(&b));
    let most = first_by(&scored, |a, b| b.total_cmp(&a));
    let median = first_by(&scored, |a, b| {
        (a - stats.median).abs().total_cmp(&(b - stats.median).abs())
    });

    for (index, highlight) in [
        (least, Highlight::LeastCautious),
        (most, Highlight::MostCautious),
        (median, Highlight::Median),
    ] {
        let record = &mut records[index];
        if record.highlight.is_none() {
            record.highlight = Some(highlight);
        }
    }
}

/// Index of the earliest entry that no later entry beats under `cmp`.
fn first_by<F>(scored: &[(usize, f64)], cmp: F) -> usize
where
    F: Fn(f64, f64) -> Ordering,
{
    let mut best = scored[0];
    for &(index, value) in &scored[1..] {
        if cmp(value, best.1) == Ordering::Less {
            best = (index, value);
        }
    }
    best.0
}

use crate::{descriptive::DescriptiveStats, percentiles};

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary used to draw one box in a box plot.
///
/// Quartiles use linear interpolation. Whiskers extend to the most extreme
/// observed values that still lie within [`WHISKER_IQR`] interquartile ranges
/// of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub mean: f64,
    pub count: usize,
}

impl BoxSummary {
    /// Summarizes unsorted values. Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use freerange_stats::boxplot::BoxSummary;
    ///
    /// let summary = BoxSummary::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(summary.median, 3.5);
    /// assert_eq!(summary.whisker_high, 5.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Summarizes pre-sorted values. Returns `None` for an empty dataset.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let q1 = percentiles::compute_percentile(sorted_values, 25.0);
        let q3 = percentiles::compute_percentile(sorted_values, 75.0);
        let reach = WHISKER_IQR * (q3 - q1);
        let whisker_low = sorted_values
            .iter()
            .copied()
            .find(|v| *v >= q1 - reach)
            .unwrap_or(q1);
        let whisker_high = sorted_values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= q3 + reach)
            .unwrap_or(q3);
        Some(Self {
            whisker_low,
            q1,
            median: stats.median,
            q3,
            whisker_high,
            mean: stats.mean,
            count: stats.count,
        })
    }
}

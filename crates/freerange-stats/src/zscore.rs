use crate::descriptive::DescriptiveStats;

/// Standardization of a column of optional values.
///
/// The population mean and standard deviation are computed over present
/// values only. Absent values stay absent in every derived column.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    /// Statistics of the present values, `None` if the column had none.
    pub stats: Option<DescriptiveStats>,
    /// Population z-score per input position.
    pub zscores: Vec<Option<f64>>,
    /// Signed deviation from the mean per input position.
    pub deviations: Vec<Option<f64>>,
}

impl Standardized {
    /// Standardizes `values` against their own population mean and standard deviation.
    ///
    /// When all present values are equal every one of them gets a z-score of
    /// `0.0`, even if rounding left the computed standard deviation slightly
    /// above zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use freerange_stats::zscore::Standardized;
    ///
    /// let column = Standardized::new(&[Some(4.0), None, Some(8.0)]);
    /// assert_eq!(column.zscores, vec![Some(-1.0), None, Some(1.0)]);
    /// assert_eq!(column.deviations, vec![Some(-2.0), None, Some(2.0)]);
    /// ```
    #[must_use]
    pub fn new(values: &[Option<f64>]) -> Self {
        let stats = DescriptiveStats::from_present(values.iter().copied());
        let (zscores, deviations) = match &stats {
            Some(stats) => values
                .iter()
                .map(|value| {
                    value.map_or((None, None), |v| {
                        let deviation = v - stats.mean;
                        let z = if stats.min < stats.max {
                            deviation / stats.std_dev
                        } else {
                            0.0
                        };
                        (Some(z), Some(deviation))
                    })
                })
                .unzip(),
            None => (vec![None; values.len()], vec![None; values.len()]),
        };
        Self {
            stats,
            zscores,
            deviations,
        }
    }
}

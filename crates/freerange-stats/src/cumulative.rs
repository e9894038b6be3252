use crate::counter::FrequencyCounter;

/// Empirical cumulative distribution evaluated on a grid of values.
///
/// Each point is `(x, percent)` where `percent` is the share (0-100) of
/// occurrences at or below `x`. All occurrences of a value are counted
/// before moving to the next grid point, so the curve is right-continuous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeCurve {
    pub points: Vec<(f64, f64)>,
}

impl CumulativeCurve {
    /// Evaluates the distribution of `counter` on the ascending `grid`.
    ///
    /// Grid points the counter never observed repeat the running percentage,
    /// which lets several counters share one x axis. An empty counter yields
    /// an empty curve.
    ///
    /// # Panics
    ///
    /// Panics if `grid` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use freerange_stats::{counter::FrequencyCounter, cumulative::CumulativeCurve};
    ///
    /// let counter: FrequencyCounter = [5.0, 5.0, 8.0, 10.0].into_iter().collect();
    /// let curve = CumulativeCurve::on_grid(&counter, &[5.0, 6.0, 8.0, 10.0]);
    /// assert_eq!(
    ///     curve.points,
    ///     vec![(5.0, 50.0), (6.0, 50.0), (8.0, 75.0), (10.0, 100.0)]
    /// );
    /// ```
    #[must_use]
    pub fn on_grid(counter: &FrequencyCounter, grid: &[f64]) -> Self {
        assert!(
            grid.is_sorted_by(|a, b| a <= b),
            "grid must be sorted in ascending order"
        );

        if counter.is_empty() {
            return Self::default();
        }
        let total = f64::from(counter.total());

        let mut running = 0u32;
        let points = grid
            .iter()
            .map(|&x| {
                running += counter.count(x);
                (x, 100.0 * f64::from(running) / total)
            })
            .collect();
        Self { points }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

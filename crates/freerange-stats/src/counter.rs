use std::{cmp::Ordering, collections::BTreeMap};

/// `f64` key ordered by [`f64::total_cmp`].
#[derive(Debug, Clone, Copy)]
struct Key(f64);

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Occurrence counts keyed by numeric value, iterated in ascending order.
///
/// # Examples
///
/// ```
/// use freerange_stats::counter::FrequencyCounter;
///
/// let counter: FrequencyCounter = [8.0, 6.0, 8.0].into_iter().collect();
/// assert_eq!(counter.count(8.0), 2);
/// assert_eq!(counter.count(7.0), 0);
/// assert_eq!(counter.total(), 3);
/// assert_eq!(counter.iter().collect::<Vec<_>>(), vec![(6.0, 1), (8.0, 2)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyCounter {
    counts: BTreeMap<Key, u32>,
}

impl FrequencyCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `value`.
    pub fn increment(&mut self, value: f64) {
        *self.counts.entry(Key(value)).or_default() += 1;
    }

    /// Adds one occurrence of `value` if it is present.
    pub fn increment_present(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.increment(value);
        }
    }

    #[must_use]
    pub fn count(&self, value: f64) -> u32 {
        self.counts.get(&Key(value)).copied().unwrap_or(0)
    }

    /// Total number of occurrences across all values.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct values in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.counts.keys().map(|k| k.0)
    }

    /// `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u32)> + '_ {
        self.counts.iter().map(|(k, c)| (k.0, *c))
    }

    /// Every occurrence as its own value, ascending.
    ///
    /// ```
    /// # use freerange_stats::counter::FrequencyCounter;
    /// let counter: FrequencyCounter = [2.0, 1.0, 2.0].into_iter().collect();
    /// assert_eq!(counter.expand(), vec![1.0, 2.0, 2.0]);
    /// ```
    #[must_use]
    pub fn expand(&self) -> Vec<f64> {
        self.iter()
            .flat_map(|(value, count)| std::iter::repeat_n(value, count as usize))
            .collect()
    }
}

impl FromIterator<f64> for FrequencyCounter {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut counter = Self::new();
        for value in iter {
            counter.increment(value);
        }
        counter
    }
}

/// Sorted union of the distinct values observed by several counters.
///
/// ```
/// # use freerange_stats::counter::{FrequencyCounter, union_of_keys};
/// let a: FrequencyCounter = [1.0, 3.0].into_iter().collect();
/// let b: FrequencyCounter = [2.0, 3.0].into_iter().collect();
/// assert_eq!(union_of_keys([&a, &b]), vec![1.0, 2.0, 3.0]);
/// ```
#[must_use]
pub fn union_of_keys<'a, I>(counters: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a FrequencyCounter>,
{
    let mut keys = counters
        .into_iter()
        .flat_map(|counter| counter.counts.keys().copied())
        .collect::<Vec<_>>();
    keys.sort();
    keys.dedup();
    keys.into_iter().map(|k| k.0).collect()
}

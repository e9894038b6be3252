//! Per-question answer distributions
//!
//! One [`FrequencyCounter`] per question and [`Variant`], built in a single
//! scan over the records. Absent answers are skipped.

use std::fmt;

use freerange_stats::{
    counter::{self, FrequencyCounter},
    cumulative::CumulativeCurve,
    descriptive::DescriptiveStats,
};
use serde::Serialize;

use crate::{
    question::QuestionId,
    record::{Answer, Record},
    scoring,
};

/// Which age of an [`Answer`] a distribution counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Typical,
    Mature,
    Immature,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Typical, Variant::Mature, Variant::Immature];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Typical => "typical",
            Variant::Mature => "mature",
            Variant::Immature => "immature",
        }
    }

    #[must_use]
    pub fn value(self, answer: &Answer) -> Option<f64> {
        match self {
            Variant::Typical => answer.typical,
            Variant::Mature => answer.mature,
            Variant::Immature => answer.immature,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

/// Age counters for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDistribution {
    pub typical: FrequencyCounter,
    pub mature: FrequencyCounter,
    pub immature: FrequencyCounter,
}

impl QuestionDistribution {
    #[must_use]
    pub fn get(&self, variant: Variant) -> &FrequencyCounter {
        match variant {
            Variant::Typical => &self.typical,
            Variant::Mature => &self.mature,
            Variant::Immature => &self.immature,
        }
    }

    fn add(&mut self, answer: &Answer) {
        self.typical.increment_present(answer.typical);
        self.mature.increment_present(answer.mature);
        self.immature.increment_present(answer.immature);
    }

    /// Ascending union of the ages seen in any variant.
    #[must_use]
    pub fn grid(&self) -> Vec<f64> {
        counter::union_of_keys([&self.typical, &self.mature, &self.immature])
    }

    /// Cumulative curves for every variant on the shared [`grid`](Self::grid).
    ///
    /// A variant with no observations has an empty curve.
    #[must_use]
    pub fn curves(&self) -> [(Variant, CumulativeCurve); 3] {
        let grid = self.grid();
        Variant::ALL.map(|variant| (variant, CumulativeCurve::on_grid(self.get(variant), &grid)))
    }
}

/// The expanded sample of one question and variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSample {
    pub question: QuestionId,
    /// Every observed age repeated by its count, ascending.
    pub values: Vec<f64>,
    pub mean: Option<f64>,
}

/// Distributions of every catalog question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distributions {
    questions: [QuestionDistribution; QuestionId::LEN],
}

impl Distributions {
    /// Scans `records` once and counts every present age.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut questions = std::array::from_fn(|_| QuestionDistribution::default());
        for record in records {
            for (question, answer) in &record.answers {
                questions[question.index()].add(answer);
            }
        }
        Self { questions }
    }

    #[must_use]
    pub fn question(&self, question: QuestionId) -> &QuestionDistribution {
        &self.questions[question.index()]
    }

    /// Questions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &QuestionDistribution)> + '_ {
        QuestionId::ALL.into_iter().zip(&self.questions)
    }

    #[must_use]
    pub fn sample(&self, question: QuestionId, variant: Variant) -> VariantSample {
        let values = self.question(question).get(variant).expand();
        let mean = DescriptiveStats::from_sorted(&values).map(|stats| stats.mean);
        VariantSample {
            question,
            values,
            mean,
        }
    }

    /// Samples of every question for `variant`, ordered by ascending mean.
    ///
    /// Questions without observations come last, in catalog order.
    #[must_use]
    pub fn sorted_by_mean(&self, variant: Variant) -> Vec<VariantSample> {
        let mut samples = QuestionId::ALL
            .into_iter()
            .map(|question| self.sample(question, variant))
            .collect::<Vec<_>>();
        samples.sort_by(|a, b| scoring::cmp_absent_last(a.mean, b.mean));
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(row: usize, question: QuestionId, answer: Answer) -> Record {
        let mut record = Record::empty(row);
        *record.answer_mut(question) = answer;
        record
    }

    fn typical(value: f64) -> Answer {
        Answer {
            typical: Some(value),
            ..Answer::default()
        }
    }

    #[test]
    fn test_counts_skip_absent() {
        let records = [
            record_with(1, QuestionId::Bike, typical(8.0)),
            record_with(
                2,
                QuestionId::Bike,
                Answer {
                    typical: Some(8.0),
                    mature: Some(6.0),
                    immature: None,
                    ..Answer::default()
                },
            ),
            record_with(3, QuestionId::Bike, Answer::default()),
        ];
        let distributions = Distributions::from_records(&records);
        let bike = distributions.question(QuestionId::Bike);
        assert_eq!(bike.typical.count(8.0), 2);
        assert_eq!(bike.typical.total(), 2);
        assert_eq!(bike.mature.total(), 1);
        assert!(bike.immature.is_empty());
        assert!(distributions.question(QuestionId::School).typical.is_empty());
    }

    #[test]
    fn test_curves_share_grid_and_reach_full() {
        let records = [
            record_with(
                1,
                QuestionId::Transit,
                Answer {
                    typical: Some(10.0),
                    mature: Some(8.0),
                    ..Answer::default()
                },
            ),
            record_with(2, QuestionId::Transit, typical(12.0)),
            record_with(3, QuestionId::Transit, typical(12.0)),
        ];
        let distributions = Distributions::from_records(&records);
        let transit = distributions.question(QuestionId::Transit);
        assert_eq!(transit.grid(), vec![8.0, 10.0, 12.0]);

        let [(_, typical), (_, mature), (variant, immature)] = transit.curves();
        let percents = typical.points.iter().map(|(_, p)| *p).collect::<Vec<_>>();
        assert_eq!(percents.len(), 3);
        assert!((percents[0] - 0.0).abs() < 1e-9);
        assert!((percents[1] - 100.0 / 3.0).abs() < 1e-9);
        assert!((percents[2] - 100.0).abs() < 1e-9);
        assert_eq!(mature.points, vec![(8.0, 100.0), (10.0, 100.0), (12.0, 100.0)]);
        assert_eq!(variant, Variant::Immature);
        assert!(immature.is_empty());
    }

    #[test]
    fn test_sorted_by_mean_puts_empty_last() {
        let records = [
            record_with(1, QuestionId::Transit, typical(12.0)),
            record_with(2, QuestionId::Backyard, typical(4.0)),
            record_with(3, QuestionId::Backyard, typical(6.0)),
        ];
        let samples = Distributions::from_records(&records).sorted_by_mean(Variant::Typical);
        assert_eq!(samples.len(), QuestionId::LEN);
        assert_eq!(samples[0].question, QuestionId::Backyard);
        assert_eq!(samples[0].values, vec![4.0, 6.0]);
        assert_eq!(samples[0].mean, Some(5.0));
        assert_eq!(samples[1].question, QuestionId::Transit);
        assert_eq!(samples[2].question, QuestionId::Home15Min);
        assert!(samples[2..].iter().all(|s| s.mean.is_none()));
    }
}

//! Standardization and composite caution scores
//!
//! [`score_records`] fills every answer's `zscore` and `years_above_mean`
//! from the population statistics of that question's typical answers, then
//! averages them per respondent into `caution` and `years_above_mean`.
//! Absent answers contribute nothing: a respondent who answered four
//! questions has a caution averaged over those four.

use std::{cmp::Ordering, collections::BTreeMap};

use freerange_stats::{
    boxplot::BoxSummary,
    descriptive::{self, DescriptiveStats},
    percentiles::Percentiles,
    zscore::Standardized,
};

use crate::{area::Area, question::QuestionId, record::Record};

/// Percentile points reported for each question.
pub const SUMMARY_PERCENTILES: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

/// Orders present values ascending and absent values after them.
#[must_use]
pub fn cmp_absent_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Typical-answer statistics of one question.
#[derive(Debug, Clone)]
pub struct QuestionSummary {
    pub question: QuestionId,
    pub answered: usize,
    pub absent: usize,
    /// `None` when nobody answered.
    pub stats: Option<DescriptiveStats>,
    pub percentiles: Option<Percentiles>,
}

/// Standardizes every question and computes the composite scores in place.
///
/// Returns one summary per question in catalog order.
pub fn score_records(records: &mut [Record]) -> Vec<QuestionSummary> {
    let mut summaries = Vec::with_capacity(QuestionId::LEN);

    for question in QuestionId::ALL {
        let column = records
            .iter()
            .map(|record| record.answer(question).typical)
            .collect::<Vec<_>>();
        let standardized = Standardized::new(&column);

        for ((record, zscore), deviation) in records
            .iter_mut()
            .zip(&standardized.zscores)
            .zip(&standardized.deviations)
        {
            let answer = record.answer_mut(question);
            answer.zscore = *zscore;
            answer.years_above_mean = *deviation;
        }

        let mut present = column.iter().flatten().copied().collect::<Vec<_>>();
        present.sort_by(f64::total_cmp);
        let percentiles =
            (!present.is_empty()).then(|| Percentiles::from_sorted(&present, &SUMMARY_PERCENTILES));
        summaries.push(QuestionSummary {
            question,
            answered: present.len(),
            absent: column.len() - present.len(),
            stats: standardized.stats,
            percentiles,
        });
    }

    for record in records.iter_mut() {
        record.caution = descriptive::mean_of_present(record.answers.values().map(|a| a.zscore));
        record.years_above_mean =
            descriptive::mean_of_present(record.answers.values().map(|a| a.years_above_mean));
    }

    summaries
}

/// How closely one question tracks respondents' overall caution.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedQuestion {
    pub question: QuestionId,
    /// Mean of `|zscore - caution|`; `None` when no respondent has both.
    pub mean_abs_diff: Option<f64>,
    pub respondents: usize,
}

/// Ranks questions from most to least representative of overall caution.
///
/// Requires [`score_records`] to have run. Questions nobody can be compared
/// on come last, in catalog order.
#[must_use]
pub fn representativeness_ranking(records: &[Record]) -> Vec<RankedQuestion> {
    let mut ranking = QuestionId::ALL
        .into_iter()
        .map(|question| {
            let diffs = records
                .iter()
                .filter_map(|record| {
                    let zscore = record.answer(question).zscore?;
                    Some((zscore - record.caution?).abs())
                })
                .collect::<Vec<_>>();
            RankedQuestion {
                question,
                mean_abs_diff: descriptive::mean_of_present(diffs.iter().copied().map(Some)),
                respondents: diffs.len(),
            }
        })
        .collect::<Vec<_>>();
    ranking.sort_by(|a, b| cmp_absent_last(a.mean_abs_diff, b.mean_abs_diff));
    ranking
}

/// Caution values of the respondents sharing one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary<K> {
    pub key: K,
    pub cautions: Vec<f64>,
    pub summary: BoxSummary,
}

/// Groups present caution scores by a category key.
///
/// Records without caution or without a key are left out. Groups come out in
/// key order; empty groups are not listed.
pub fn caution_by<K, F>(records: &[Record], key: F) -> Vec<GroupSummary<K>>
where
    K: Ord + Copy,
    F: Fn(&Record) -> Option<K>,
{
    let mut groups = BTreeMap::<K, Vec<f64>>::new();
    for record in records {
        if let (Some(k), Some(caution)) = (key(record), record.caution) {
            groups.entry(k).or_default().push(caution);
        }
    }
    groups
        .into_iter()
        .filter_map(|(key, cautions)| {
            let summary = BoxSummary::new(cautions.iter().copied())?;
            Some(GroupSummary {
                key,
                cautions,
                summary,
            })
        })
        .collect()
}

#[must_use]
pub fn caution_by_current_area(records: &[Record]) -> Vec<GroupSummary<Area>> {
    caution_by(records, |r| r.current_area)
}

#[must_use]
pub fn caution_by_childhood_area(records: &[Record]) -> Vec<GroupSummary<Area>> {
    caution_by(records, |r| r.childhood_area)
}

#[must_use]
pub fn caution_by_parent(records: &[Record]) -> Vec<GroupSummary<bool>> {
    caution_by(records, |r| Some(r.is_parent))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    /// Builds records from typical answers, one inner array per respondent.
    fn records(rows: &[&[(QuestionId, f64)]]) -> Vec<Record> {
        rows.iter()
            .enumerate()
            .map(|(i, answers)| {
                let mut record = Record::empty(i + 1);
                for (question, value) in *answers {
                    record.answer_mut(*question).typical = Some(*value);
                }
                record
            })
            .collect()
    }

    fn sample() -> Vec<Record> {
        use QuestionId::{Bike, School, Transit};
        records(&[
            &[(Bike, 6.0), (School, 8.0), (Transit, 10.0)],
            &[(Bike, 8.0), (School, 10.0)],
            &[(Bike, 10.0), (Transit, 14.0)],
            &[(Bike, 12.0), (School, 12.0), (Transit, 12.0)],
            &[],
        ])
    }

    #[test]
    fn test_zscores_are_standardized_per_question() {
        let mut records = sample();
        score_records(&mut records);
        for question in [QuestionId::Bike, QuestionId::School, QuestionId::Transit] {
            let zscores = records
                .iter()
                .filter_map(|r| r.answer(question).zscore)
                .collect::<Vec<_>>();
            let stats = DescriptiveStats::new(zscores).unwrap();
            assert_close(stats.mean, 0.0);
            assert_close(stats.std_dev, 1.0);
        }
        for record in &records {
            for answer in record.answers.values() {
                assert_eq!(answer.typical.is_some(), answer.zscore.is_some());
                assert_eq!(answer.typical.is_some(), answer.years_above_mean.is_some());
            }
        }
    }

    #[test]
    fn test_caution_averages_only_answered_questions() {
        let mut records = sample();
        score_records(&mut records);
        for record in &records {
            let zscores = record
                .answers
                .values()
                .filter_map(|a| a.zscore)
                .collect::<Vec<_>>();
            match record.caution {
                Some(caution) => {
                    #[expect(clippy::cast_precision_loss)]
                    let expected = zscores.iter().sum::<f64>() / zscores.len() as f64;
                    assert_close(caution, expected);
                }
                None => assert!(zscores.is_empty()),
            }
        }
        assert_eq!(records[4].caution, None);
        assert_eq!(records[4].years_above_mean, None);

        // Bike mean is 9, transit mean is 12: (1 + 2) / 2.
        assert_close(records[2].years_above_mean.unwrap(), 1.5);
    }

    #[test]
    fn test_zero_spread_gives_zero_zscore() {
        let mut records = records(&[
            &[(QuestionId::Bike, 7.0)],
            &[(QuestionId::Bike, 7.0)],
        ]);
        score_records(&mut records);
        for record in &records {
            assert_eq!(record.answer(QuestionId::Bike).zscore, Some(0.0));
            assert_eq!(record.caution, Some(0.0));
        }
    }

    #[test]
    fn test_summaries_count_absent() {
        let mut records = sample();
        let summaries = score_records(&mut records);
        assert_eq!(summaries.len(), QuestionId::LEN);
        let bike = &summaries[QuestionId::Bike.index()];
        assert_eq!((bike.answered, bike.absent), (4, 1));
        assert_close(bike.stats.as_ref().unwrap().mean, 9.0);
        let percentiles = bike.percentiles.as_ref().unwrap();
        assert_close(percentiles.get(50.0).unwrap(), 9.0);
        let home = &summaries[QuestionId::HomeNight.index()];
        assert_eq!(home.answered, 0);
        assert!(home.stats.is_none());
        assert!(home.percentiles.is_none());
    }

    #[test]
    fn test_ranking_orders_by_mean_abs_diff() {
        let mut records = sample();
        score_records(&mut records);
        let ranking = representativeness_ranking(&records);
        assert_eq!(ranking.len(), QuestionId::LEN);
        let scored = ranking
            .iter()
            .take_while(|r| r.mean_abs_diff.is_some())
            .collect::<Vec<_>>();
        assert_eq!(scored.len(), 3);
        assert!(scored.windows(2).all(|w| w[0].mean_abs_diff <= w[1].mean_abs_diff));
        assert_eq!(ranking[3].question, QuestionId::Home15Min);
        assert_eq!(ranking[3].respondents, 0);
    }

    #[test]
    fn test_caution_by_groups_and_skips_absent() {
        let mut records = sample();
        records[0].current_area = Some(Area::Rural);
        records[1].current_area = Some(Area::Urban);
        records[2].current_area = Some(Area::Rural);
        records[4].current_area = Some(Area::Urban);
        score_records(&mut records);

        let groups = caution_by_current_area(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, Area::Urban);
        assert_eq!(groups[0].cautions.len(), 1);
        assert_eq!(groups[1].key, Area::Rural);
        assert_eq!(groups[1].cautions.len(), 2);
        assert_eq!(groups[1].summary.count, 2);

        let parents = caution_by_parent(&records);
        assert_eq!(parents.len(), 1);
        assert!(!parents[0].key);
        assert_eq!(parents[0].cautions.len(), 4);
    }

    #[test]
    fn test_cmp_absent_last() {
        let mut values = [None, Some(2.0), Some(-1.0), None];
        values.sort_by(|a, b| cmp_absent_last(*a, *b));
        assert_eq!(values, [Some(-1.0), Some(2.0), None, None]);
    }
}

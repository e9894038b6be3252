//! The whole analysis in one value
//!
//! [`Survey`] runs every pass in order: parse, aggregate, score, rank and
//! highlight. Everything is computed before the caller writes any output, so a
//! malformed row never leaves partial charts behind.

use std::io;

use crate::{
    aggregate::Distributions,
    export,
    highlight,
    parser::{ParseError, SurveyParser},
    record::Record,
    scoring::{self, QuestionSummary, RankedQuestion},
};

#[derive(Debug, Clone)]
pub struct Survey {
    /// Scored records in input order.
    pub records: Vec<Record>,
    pub distributions: Distributions,
    pub summaries: Vec<QuestionSummary>,
    pub ranking: Vec<RankedQuestion>,
}

impl Survey {
    /// Parses a tab-separated table and analyzes it.
    pub fn from_reader<R>(parser: &SurveyParser, reader: R) -> Result<Self, ParseError>
    where
        R: io::Read,
    {
        let records = parser.parse_reader(reader)?;
        Ok(Self::from_records(records))
    }

    /// Analyzes already parsed records.
    #[must_use]
    pub fn from_records(mut records: Vec<Record>) -> Self {
        let distributions = Distributions::from_records(&records);
        let summaries = scoring::score_records(&mut records);
        let ranking = scoring::representativeness_ranking(&records);
        highlight::tag_highlights(&mut records);
        Self {
            records,
            distributions,
            summaries,
            ranking,
        }
    }

    /// Records in export order.
    #[must_use]
    pub fn export_records(&self) -> Vec<Record> {
        let mut records = self.records.clone();
        export::sort_for_export(&mut records);
        records
    }

    /// Number of records with at least one typical answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.answered_count() > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        parser::tests::{header_cells, row_cells, to_tsv},
        question::QuestionId,
        record::Highlight,
    };

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap();
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    /// Cells for one respondent answering only the bike and school questions.
    fn answers<'a>(bike: &'a str, school: &'a str) -> [&'a str; QuestionId::LEN] {
        let mut cells = [""; QuestionId::LEN];
        cells[QuestionId::Bike.index()] = bike;
        cells[QuestionId::School.index()] = school;
        cells
    }

    fn fixture() -> String {
        to_tsv(&[
            header_cells(),
            row_cells(
                "35",
                "Man",
                "0",
                "",
                "Small town",
                "",
                answers("6", "N/A"),
                answers("5-7", ""),
            ),
            row_cells(
                "42",
                "Woman",
                "",
                "7",
                "",
                "",
                answers("8-10", "10"),
                answers("", ""),
            ),
            row_cells(
                "",
                "",
                "3+",
                "15",
                "Small town",
                "Small town",
                answers("about 12 years old", "14"),
                answers("", "12 to 16"),
            ),
        ])
    }

    #[test]
    fn test_end_to_end() {
        let survey = Survey::from_reader(&SurveyParser::default(), fixture().as_bytes()).unwrap();
        assert_eq!(survey.records.len(), 3);
        assert_eq!(survey.answered_count(), 3);

        let parents = survey.records.iter().map(|r| r.is_parent).collect::<Vec<_>>();
        assert_eq!(parents, vec![false, true, true]);

        let bike = survey.distributions.question(QuestionId::Bike);
        assert_eq!(bike.typical.iter().collect::<Vec<_>>(), vec![(6.0, 1), (9.0, 1), (12.0, 1)]);
        assert_eq!(bike.mature.iter().collect::<Vec<_>>(), vec![(5.0, 1)]);
        assert_eq!(bike.immature.iter().collect::<Vec<_>>(), vec![(7.0, 1)]);
        let school = survey.distributions.question(QuestionId::School);
        assert_eq!(school.typical.total(), 2);
        assert_eq!(school.mature.iter().collect::<Vec<_>>(), vec![(12.0, 1)]);
        assert!(survey.distributions.question(QuestionId::Transit).typical.is_empty());

        // Bike: mean 9, population std sqrt(6). School: mean 12, std 2.
        let z = 3.0 / 6.0_f64.sqrt();
        let [first, second, third] = &survey.records[..] else {
            panic!("expected three records");
        };
        assert_close(first.answer(QuestionId::Bike).zscore, -z);
        assert_eq!(first.answer(QuestionId::School).zscore, None);
        assert_close(first.caution, -z);
        assert_close(second.caution, -0.5);
        assert_close(third.caution, f64::midpoint(z, 1.0));
        assert_close(first.years_above_mean, -3.0);
        assert_close(second.years_above_mean, -1.0);
        assert_close(third.years_above_mean, 2.5);

        assert_eq!(first.highlight, Some(Highlight::LeastCautious));
        assert_eq!(second.highlight, Some(Highlight::Median));
        assert_eq!(third.highlight, Some(Highlight::MostCautious));

        let rows = survey
            .export_records()
            .iter()
            .map(|r| r.row)
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![1, 2, 3]);

        assert_eq!(survey.ranking.len(), QuestionId::LEN);
        assert!(survey.ranking[..2].iter().all(|r| r.mean_abs_diff.is_some()));
        assert!(survey.ranking[2..].iter().all(|r| r.mean_abs_diff.is_none()));
    }

    #[test]
    fn test_malformed_row_aborts() {
        let mut tsv = fixture();
        tsv.push_str("2024-05-01\t50\tWoman\n");
        assert!(Survey::from_reader(&SurveyParser::default(), tsv.as_bytes()).is_err());
    }
}

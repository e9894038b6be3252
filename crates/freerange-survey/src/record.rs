//! One survey respondent and their cleaned answers
//!
//! A [`Record`] is built once by the parser and then enriched in place:
//! scoring fills the per-answer z-scores and deviations plus the composite
//! scores, and the highlight pass may attach a [`Highlight`] tag.
//!
//! Every numeric field is `Option<f64>`. `None` means "absent" and serializes
//! as JSON `null`, never as `0`.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{area::Area, question::QuestionId};

/// A respondent's answer to one catalog question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Direct answer: the age at which a child can do this unsupervised.
    pub typical: Option<f64>,
    /// Earliest plausible age from the clarification.
    pub mature: Option<f64>,
    /// Latest plausible age from the clarification.
    pub immature: Option<f64>,
    /// Population z-score of `typical` for this question.
    pub zscore: Option<f64>,
    /// `typical` minus the question's mean typical answer.
    pub years_above_mean: Option<f64>,
}

/// Tag marking a respondent singled out in charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    LeastCautious,
    Median,
    MostCautious,
}

impl Highlight {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Highlight::LeastCautious => "least cautious",
            Highlight::Median => "median",
            Highlight::MostCautious => "most cautious",
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// 1-based data row in the input file.
    pub row: usize,
    pub age: Option<u32>,
    pub oldest_child_age: Option<f64>,
    pub current_area: Option<Area>,
    pub childhood_area: Option<Area>,
    pub num_children: Option<String>,
    pub is_parent: bool,
    pub gender: Option<String>,
    /// Always holds every question in [`QuestionId::ALL`].
    pub answers: BTreeMap<QuestionId, Answer>,
    /// Mean of the available per-question z-scores.
    pub caution: Option<f64>,
    /// Mean of the available per-question `years_above_mean`.
    pub years_above_mean: Option<f64>,
    pub highlight: Option<Highlight>,
}

impl Record {
    /// Creates a record with no answers and no demographics.
    ///
    /// The answer map is pre-filled with an absent [`Answer`] for every question.
    #[must_use]
    pub fn empty(row: usize) -> Self {
        Self {
            row,
            age: None,
            oldest_child_age: None,
            current_area: None,
            childhood_area: None,
            num_children: None,
            is_parent: false,
            gender: None,
            answers: QuestionId::ALL
                .into_iter()
                .map(|q| (q, Answer::default()))
                .collect(),
            caution: None,
            years_above_mean: None,
            highlight: None,
        }
    }

    #[must_use]
    pub fn answer(&self, question: QuestionId) -> Answer {
        self.answers.get(&question).copied().unwrap_or_default()
    }

    pub fn answer_mut(&mut self, question: QuestionId) -> &mut Answer {
        self.answers.entry(question).or_default()
    }

    /// Number of questions with a present typical answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| a.typical.is_some()).count()
    }

    /// Short label used in charts, e.g. `"#12 (most cautious)"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        match self.highlight {
            Some(highlight) => format!("#{} ({highlight})", self.row),
            None => format!("#{}", self.row),
        }
    }
}

/// Derives parent status from the children answers.
///
/// A `num_children` bucket wins when present; otherwise a known oldest-child
/// age implies a parent.
#[must_use]
pub fn derive_is_parent(num_children: Option<&str>, oldest_child_age: Option<f64>) -> bool {
    match num_children {
        Some(bucket) => bucket != "0",
        None => oldest_child_age.is_some(),
    }
}

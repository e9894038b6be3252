//! Tab-separated survey table parsing
//!
//! The first line is the header: the literal survey prompts. Each later line
//! is one respondent. Columns are located by exact header text once, then
//! read positionally for every row.
//!
//! # Duplicate headers
//!
//! Every question prompt appears twice: first as the direct-answer column,
//! then again after the [`CLARIFY_MARKER`] column as the free-text
//! clarification. Clarification lookups start strictly after the marker.
//!
//! Parsing is all-or-nothing: a missing header, a short row, or a cell the
//! normalizer cannot read aborts with a [`ParseError`].

use std::io;

use csv::{ReaderBuilder, StringRecord};

use crate::{
    area,
    normalize::{NormalizeError, Normalizer},
    question::QuestionId,
    record::{self, Record},
};

pub const AGE_COLUMN: &str = "What's your age?";
pub const OLDEST_CHILD_COLUMN: &str = "How old is your oldest child, if you have one?";
pub const CURRENT_AREA_COLUMN: &str = "Which best describes where you live now?";
pub const CHILDHOOD_AREA_COLUMN: &str = "Which best describes where you grew up?";
pub const NUM_CHILDREN_COLUMN: &str = "How many children do you have?";
pub const GENDER_COLUMN: &str = "What's your gender?";
pub const CLARIFY_MARKER: &str = "Anything you'd like to clarify about your answers above?";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("failed to read survey table")]
    Read(csv::Error),
    #[display("survey table has no header row")]
    MissingHeader,
    #[display("missing header column {column:?}")]
    MissingColumn { column: String },
    #[display("row {row}: no cell for column {column:?}")]
    MissingCell { row: usize, column: String },
    #[display("row {row}: unparseable respondent age {raw:?}")]
    RespondentAge { row: usize, raw: String },
    #[display("row {row}: unreadable value in column {column:?}")]
    Normalize {
        row: usize,
        column: String,
        source: NormalizeError,
    },
}

impl From<csv::Error> for ParseError {
    fn from(error: csv::Error) -> Self {
        ParseError::Read(error)
    }
}

/// Resolved column positions for one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub age: usize,
    pub oldest_child: usize,
    pub current_area: usize,
    pub childhood_area: usize,
    pub num_children: usize,
    pub gender: usize,
    pub marker: usize,
    /// `(typical, clarification)` column per question, in catalog order.
    pub questions: [(usize, usize); QuestionId::LEN],
}

impl Columns {
    /// Locates every required column in `headers`.
    pub fn resolve<S>(headers: &[S]) -> Result<Self, ParseError>
    where
        S: AsRef<str>,
    {
        let marker = find_column(headers, CLARIFY_MARKER)?;
        let mut questions = [(0, 0); QuestionId::LEN];
        for (slot, question) in questions.iter_mut().zip(QuestionId::ALL) {
            let typical = find_column(headers, question.prompt())?;
            let clarification = find_column_after(headers, question.prompt(), marker)?;
            *slot = (typical, clarification);
        }
        Ok(Self {
            age: find_column(headers, AGE_COLUMN)?,
            oldest_child: find_column(headers, OLDEST_CHILD_COLUMN)?,
            current_area: find_column(headers, CURRENT_AREA_COLUMN)?,
            childhood_area: find_column(headers, CHILDHOOD_AREA_COLUMN)?,
            num_children: find_column(headers, NUM_CHILDREN_COLUMN)?,
            gender: find_column(headers, GENDER_COLUMN)?,
            marker,
            questions,
        })
    }

    #[must_use]
    pub fn question(&self, question: QuestionId) -> (usize, usize) {
        self.questions[question.index()]
    }
}

/// Index of the first header equal to `name`.
pub fn find_column<S>(headers: &[S], name: &str) -> Result<usize, ParseError>
where
    S: AsRef<str>,
{
    headers
        .iter()
        .position(|h| h.as_ref() == name)
        .ok_or_else(|| ParseError::MissingColumn {
            column: name.to_owned(),
        })
}

/// Index of the first header equal to `name` strictly after position `start`.
///
/// # Examples
///
/// ```
/// use freerange_survey::parser::find_column_after;
///
/// let headers = ["a", "marker", "a"];
/// assert_eq!(find_column_after(&headers, "a", 1).unwrap(), 2);
/// assert!(find_column_after(&headers, "a", 2).is_err());
/// ```
pub fn find_column_after<S>(headers: &[S], name: &str, start: usize) -> Result<usize, ParseError>
where
    S: AsRef<str>,
{
    headers
        .iter()
        .enumerate()
        .skip(start + 1)
        .find_map(|(i, h)| (h.as_ref() == name).then_some(i))
        .ok_or_else(|| ParseError::MissingColumn {
            column: format!("{name} (after {CLARIFY_MARKER:?})"),
        })
}

/// Reads survey tables into [`Record`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurveyParser {
    pub normalizer: Normalizer,
}

impl SurveyParser {
    /// Parses a whole tab-separated table, header included.
    pub fn parse_reader<R>(&self, reader: R) -> Result<Vec<Record>, ParseError>
    where
        R: io::Read,
    {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);
        let mut rows = reader.records();

        let header = rows.next().ok_or(ParseError::MissingHeader)??;
        let headers = header.iter().collect::<Vec<_>>();
        let columns = Columns::resolve(&headers)?;

        let mut records = vec![];
        for (i, row) in rows.enumerate() {
            let row = row?;
            if row.iter().all(str::is_empty) {
                continue;
            }
            records.push(self.parse_row(&columns, &headers, i + 1, &row)?);
        }
        Ok(records)
    }

    /// Builds one record from a data row.
    pub fn parse_row(
        &self,
        columns: &Columns,
        headers: &[&str],
        row_number: usize,
        row: &StringRecord,
    ) -> Result<Record, ParseError> {
        let cells = Cells {
            row,
            headers,
            row_number,
        };
        let mut record = Record::empty(row_number);

        let age = cells.get(columns.age)?.trim();
        record.age = if age.is_empty() {
            None
        } else {
            Some(age.parse().map_err(|_| ParseError::RespondentAge {
                row: row_number,
                raw: age.to_owned(),
            })?)
        };

        record.oldest_child_age =
            cells.normalized(columns.oldest_child, |t| self.normalizer.normalize_age(t))?;
        record.current_area = cells.normalized(columns.current_area, area::normalize_area)?;
        record.childhood_area = cells.normalized(columns.childhood_area, area::normalize_area)?;
        record.num_children = cells.text(columns.num_children)?;
        record.gender = cells.text(columns.gender)?;
        record.is_parent =
            record::derive_is_parent(record.num_children.as_deref(), record.oldest_child_age);

        for question in QuestionId::ALL {
            let (typical_col, clarification_col) = columns.question(question);
            let typical =
                cells.normalized(typical_col, |t| self.normalizer.normalize_age(t))?;
            let (mature, immature) = cells.normalized(clarification_col, |t| {
                self.normalizer.normalize_age_range(t)
            })?;
            let answer = record.answer_mut(question);
            answer.typical = typical;
            answer.mature = mature;
            answer.immature = immature;
        }

        Ok(record)
    }
}

/// Positional cell access with row/column context for errors.
struct Cells<'a> {
    row: &'a StringRecord,
    headers: &'a [&'a str],
    row_number: usize,
}

impl<'a> Cells<'a> {
    fn column_name(&self, index: usize) -> String {
        self.headers.get(index).copied().unwrap_or_default().to_owned()
    }

    fn get(&self, index: usize) -> Result<&'a str, ParseError> {
        self.row.get(index).ok_or_else(|| ParseError::MissingCell {
            row: self.row_number,
            column: self.column_name(index),
        })
    }

    fn text(&self, index: usize) -> Result<Option<String>, ParseError> {
        let text = self.get(index)?.trim();
        Ok((!text.is_empty()).then(|| text.to_owned()))
    }

    fn normalized<T, F>(&self, index: usize, normalize: F) -> Result<T, ParseError>
    where
        F: FnOnce(&str) -> Result<T, NormalizeError>,
    {
        normalize(self.get(index)?).map_err(|source| ParseError::Normalize {
            row: self.row_number,
            column: self.column_name(index),
            source,
        })
    }
}

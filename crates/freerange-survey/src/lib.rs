//! Cleaning and scoring of the free-range parenting survey
//!
//! This crate turns the raw tab-separated survey export into scored
//! respondent records and per-question answer distributions.
//!
//! # Overview
//!
//! The analysis is a single linear pass:
//!
//! 1. **Parse** ([`parser::SurveyParser`]): resolve header columns and build one
//!    [`record::Record`] per row
//! 2. **Normalize** ([`normalize::Normalizer`], [`area::normalize_area`]): turn
//!    free-text ages and area choices into numbers and categories
//! 3. **Aggregate** ([`aggregate::Distributions`]): count typical, mature and
//!    immature ages per question
//! 4. **Score** ([`scoring::score_records`]): z-scores per question, composite
//!    caution and years above mean per respondent
//! 5. **Highlight** ([`highlight::tag_highlights`]): tag the least cautious, median
//!    and most cautious respondents
//! 6. **Export** ([`export::sort_for_export`]): order records for the JSON export
//!
//! [`pipeline::Survey`] runs all of them.
//!
//! # Absent answers
//!
//! "Not applicable", blank and hedged answers are `None` throughout. They never
//! count as zero and never enter a mean, a standard deviation or a counter.
//!
//! # Examples
//!
//! ```
//! use freerange_survey::normalize::{normalize_age, normalize_age_range};
//!
//! assert_eq!(normalize_age("5-10").unwrap(), Some(7.5));
//! assert_eq!(normalize_age("18 months").unwrap(), Some(1.5));
//! assert_eq!(normalize_age("never").unwrap(), Some(18.0));
//! assert_eq!(normalize_age("N/A").unwrap(), None);
//! assert_eq!(normalize_age_range("7+").unwrap(), (Some(7.0), None));
//! ```

pub mod aggregate;
pub mod area;
pub mod export;
pub mod highlight;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod question;
pub mod record;
pub mod scoring;

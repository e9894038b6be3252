//! Fixed catalog of survey questions
//!
//! Every question asks "at what age can a child do X unsupervised". The
//! catalog is immutable: its order is the order used for reports, exports
//! and chart files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one of the 13 catalog questions.
///
/// Serializes to its slug (e.g. `"home_15min"`), which is also used as the
/// key in exported answer maps and as the chart file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionId {
    #[serde(rename = "home_15min")]
    Home15Min,
    #[serde(rename = "home_3hr")]
    Home3Hr,
    #[serde(rename = "home_night")]
    HomeNight,
    #[serde(rename = "street_low")]
    StreetLow,
    #[serde(rename = "street_medium")]
    StreetMedium,
    #[serde(rename = "street_busy")]
    StreetBusy,
    #[serde(rename = "school")]
    School,
    #[serde(rename = "backyard")]
    Backyard,
    #[serde(rename = "frontyard")]
    Frontyard,
    #[serde(rename = "sidewalk")]
    Sidewalk,
    #[serde(rename = "playground")]
    Playground,
    #[serde(rename = "transit")]
    Transit,
    #[serde(rename = "bike")]
    Bike,
}

const SCHOOL_CAVEAT: &str = ", assuming they can cross all the streets";

impl QuestionId {
    pub const LEN: usize = 13;

    /// All questions in catalog order.
    pub const ALL: [QuestionId; Self::LEN] = [
        QuestionId::Home15Min,
        QuestionId::Home3Hr,
        QuestionId::HomeNight,
        QuestionId::StreetLow,
        QuestionId::StreetMedium,
        QuestionId::StreetBusy,
        QuestionId::School,
        QuestionId::Backyard,
        QuestionId::Frontyard,
        QuestionId::Sidewalk,
        QuestionId::Playground,
        QuestionId::Transit,
        QuestionId::Bike,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            QuestionId::Home15Min => "home_15min",
            QuestionId::Home3Hr => "home_3hr",
            QuestionId::HomeNight => "home_night",
            QuestionId::StreetLow => "street_low",
            QuestionId::StreetMedium => "street_medium",
            QuestionId::StreetBusy => "street_busy",
            QuestionId::School => "school",
            QuestionId::Backyard => "backyard",
            QuestionId::Frontyard => "frontyard",
            QuestionId::Sidewalk => "sidewalk",
            QuestionId::Playground => "playground",
            QuestionId::Transit => "transit",
            QuestionId::Bike => "bike",
        }
    }

    /// Canonical prompt text, exactly as it appears in the survey header row.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            QuestionId::Home15Min => "Spend fifteen minutes home alone",
            QuestionId::Home3Hr => "Spend three hours home alone",
            QuestionId::HomeNight => "Spend the night home alone",
            QuestionId::StreetLow => "Cross a low-traffic street",
            QuestionId::StreetMedium => "Cross a medium-traffic street",
            QuestionId::StreetBusy => "Cross a busy road",
            QuestionId::School => {
                "Walk to/from school or a friend's house, assuming they can cross all the streets"
            }
            QuestionId::Backyard => "Play in an unfenced backyard",
            QuestionId::Frontyard => "Play in an unfenced front yard",
            QuestionId::Sidewalk => "Play on the sidewalk in front of their house",
            QuestionId::Playground => "Play at a playground they can walk home from",
            QuestionId::Transit => "Take public transit",
            QuestionId::Bike => "Bike, scooter, or skate around the neighborhood",
        }
    }

    /// Chart title: the prompt with the long caveat moved to its own line.
    #[must_use]
    pub fn title(self) -> String {
        self.prompt().replace(
            SCHOOL_CAVEAT,
            "\n(assuming they can cross all the streets)",
        )
    }

    /// Axis label: the prompt without the long caveat.
    #[must_use]
    pub fn label(self) -> &'static str {
        let prompt = self.prompt();
        prompt.strip_suffix(SCHOOL_CAVEAT).unwrap_or(prompt)
    }

    /// Position of this question in [`QuestionId::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.slug(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_index() {
        for (i, question) in QuestionId::ALL.into_iter().enumerate() {
            assert_eq!(question.index(), i);
        }
    }

    #[test]
    fn test_serializes_as_slug() {
        for question in QuestionId::ALL {
            let json = serde_json::to_string(&question).unwrap();
            assert_eq!(json, format!("\"{}\"", question.slug()));
            assert_eq!(serde_json::from_str::<QuestionId>(&json).unwrap(), question);
        }
    }

    #[test]
    fn test_prompts_are_unique() {
        let mut prompts = QuestionId::ALL.map(QuestionId::prompt).to_vec();
        prompts.sort_unstable();
        prompts.dedup();
        assert_eq!(prompts.len(), QuestionId::LEN);
    }

    #[test]
    fn test_school_title_is_split() {
        assert_eq!(
            QuestionId::School.title(),
            "Walk to/from school or a friend's house\n(assuming they can cross all the streets)"
        );
        assert_eq!(QuestionId::Bike.title(), QuestionId::Bike.prompt());
    }

    #[test]
    fn test_labels_are_short() {
        assert_eq!(
            QuestionId::School.label(),
            "Walk to/from school or a friend's house"
        );
        assert_eq!(QuestionId::Transit.label(), QuestionId::Transit.prompt());
        assert!(QuestionId::ALL.iter().all(|q| q.label().len() <= 50));
    }
}

use std::fmt;

use serde::{Serialize, ser::SerializeStruct as _};

use crate::normalize::NormalizeError;

/// Housing density of a place, from densest to sparsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Area {
    VeryUrban,
    Urban,
    InnerSuburb,
    OuterSuburb,
    SmallTown,
    Rural,
}

impl Area {
    pub const ALL: [Area; 6] = [
        Area::VeryUrban,
        Area::Urban,
        Area::InnerSuburb,
        Area::OuterSuburb,
        Area::SmallTown,
        Area::Rural,
    ];

    /// Ordinal code, 1 (very urban) to 6 (rural).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Area::VeryUrban => 1,
            Area::Urban => 2,
            Area::InnerSuburb => 3,
            Area::OuterSuburb => 4,
            Area::SmallTown => 5,
            Area::Rural => 6,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Area::VeryUrban => "very urban",
            Area::Urban => "urban",
            Area::InnerSuburb => "inner suburb",
            Area::OuterSuburb => "outer suburb",
            Area::SmallTown => "small town",
            Area::Rural => "rural",
        }
    }

    /// Answer option text as offered in the survey.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Area::VeryUrban => "Dense city: mostly apartment buildings, can walk to most things",
            Area::Urban => "City: mix of apartments and houses, can walk to many things",
            Area::InnerSuburb => "Inner suburb: mostly houses with sidewalks, can walk to some things",
            Area::OuterSuburb => "Outer suburb: houses, most trips by car",
            Area::SmallTown => "Small town",
            Area::Rural => "Rural: farms or large lots, few neighbors nearby",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

impl Serialize for Area {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Area", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("label", self.label())?;
        state.end()
    }
}

/// Classifies an area answer.
///
/// Blank answers are `Ok(None)`. Any text outside the fixed option list is an
/// error; the list has to be extended by hand.
///
/// # Examples
///
/// ```
/// use freerange_survey::area::{Area, normalize_area};
///
/// assert_eq!(normalize_area("Small town").unwrap(), Some(Area::SmallTown));
/// assert_eq!(normalize_area("").unwrap(), None);
/// assert!(normalize_area("On a boat").is_err());
/// ```
pub fn normalize_area(text: &str) -> Result<Option<Area>, NormalizeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Area::ALL
        .into_iter()
        .find(|area| area.description() == text)
        .map(Some)
        .ok_or_else(|| NormalizeError::UnknownArea {
            raw: text.to_owned(),
        })
}

//! Free-text age normalization
//!
//! Survey answers are typed by hand, so the same age shows up as `"10"`,
//! `"10 years old"`, `"~10"`, `"10 (almost 10)"` or `"10, but only with a
//! phone"`. This module turns such text into a number of years.
//!
//! # Pipeline
//!
//! ```text
//! raw text
//!     ↓ classify_absent        -> None ("no usable signal")
//!     ↓ rule table (in order)  -> canonical short text, or the never-age
//!     ↓ range split            -> collapsed with RangeCollapse
//!     ↓ unit suffix            -> months / 12, weeks / 52
//!     ↓ decimal parse          -> NormalizeError on failure
//! ```
//!
//! The rule table and the absent lists are hand-curated from real answers.
//! An answer that falls through every rule and still does not parse is a
//! fatal [`NormalizeError`]: the fix is to add a rule, not to guess.

use std::sync::LazyLock;

use regex::Regex;

/// Top of the age scale. Answers meaning "not during childhood" map here.
pub const MAX_AGE: f64 = 18.0;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum NormalizeError {
    #[display("unparseable age answer {raw:?}")]
    UnparseableAge { raw: String },
    #[display("unknown area description {raw:?}")]
    UnknownArea { raw: String },
}

/// How a two-sided answer such as `"5-10"` becomes a single age.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RangeCollapse {
    /// Arithmetic mean of both bounds.
    #[default]
    Midpoint,
    Lower,
    Upper,
}

impl RangeCollapse {
    #[must_use]
    pub fn collapse(self, lower: f64, upper: f64) -> f64 {
        match self {
            RangeCollapse::Midpoint => f64::midpoint(lower, upper),
            RangeCollapse::Lower => lower,
            RangeCollapse::Upper => upper,
        }
    }
}

/// Modelling choices applied while normalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizePolicy {
    /// Age assigned to "never" / "no" answers.
    pub never_age: f64,
    pub range_collapse: RangeCollapse,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            never_age: MAX_AGE,
            range_collapse: RangeCollapse::Midpoint,
        }
    }
}

/// Exact answers that carry no numeric signal.
const NOT_APPLICABLE: &[&str] = &[
    "N/A",
    "N/a",
    "n/a",
    "NA",
    "na",
    "N/a--none here",
    "-",
    "?",
    "100",
    "110",
    "Don't know",
    "Don’t know",
    "don't know",
    "Not sure",
    "not sure",
    "Unsure",
    "unsure",
    "idk",
    "IDK",
];

/// Prefixes of hedged answers that carry no numeric signal.
const HEDGED_PREFIXES: &[&str] = &[
    "The age where they can",
    "Different for each of these",
    "Wouldn’t",
    "Wouldn't",
    "It depends",
    "Depends",
    "depends",
    "Hard to say",
    "No idea",
    "Not applicable",
];

/// Clarifications rewritten whole before range parsing.
const RANGE_OVERRIDES: &[(&str, &str)] = &[("6 with a friend, 9 alone, 12 after dark", "6-12")];

/// Unit suffixes and the divisor converting them to years, longest first.
const UNIT_SUFFIXES: &[(&str, f64)] = &[
    ("years old", 1.0),
    ("year old", 1.0),
    ("years", 1.0),
    ("year", 1.0),
    ("yrs", 1.0),
    ("yo", 1.0),
    ("months", 12.0),
    ("month", 12.0),
    ("weeks", 52.0),
    ("week", 52.0),
];

const RANGE_SEPARATOR: char = '-';

/// Returns `true` if the answer carries no usable numeric signal.
///
/// # Examples
///
/// ```
/// use freerange_survey::normalize::classify_absent;
///
/// assert!(classify_absent("   "));
/// assert!(classify_absent("N/A"));
/// assert!(classify_absent("Different for each of these, honestly"));
/// assert!(!classify_absent("0"));
/// assert!(!classify_absent("never"));
/// ```
#[must_use]
pub fn classify_absent(text: &str) -> bool {
    let text = text.trim();
    text.is_empty()
        || NOT_APPLICABLE.contains(&text)
        || HEDGED_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

#[derive(Debug)]
enum Matcher {
    /// The whole cleaned text equals the literal.
    Exact(&'static str),
    /// The literal occurs anywhere in the cleaned text.
    Substring(&'static str),
    Pattern(Regex),
}

#[derive(Debug)]
enum Replacement {
    /// Replace the matched part (or the whole text for [`Matcher::Exact`]).
    Text(&'static str),
    /// Stop rewriting: the answer is the policy's never-age.
    Never,
}

#[derive(Debug)]
struct Rule {
    matcher: Matcher,
    replacement: Replacement,
}

enum Rewritten {
    Text(String),
    Never,
}

impl Rule {
    fn exact(from: &'static str, to: &'static str) -> Self {
        Self {
            matcher: Matcher::Exact(from),
            replacement: Replacement::Text(to),
        }
    }

    fn substring(from: &'static str, to: &'static str) -> Self {
        Self {
            matcher: Matcher::Substring(from),
            replacement: Replacement::Text(to),
        }
    }

    fn pattern(pattern: &str, to: &'static str) -> Self {
        Self {
            matcher: Matcher::Pattern(Regex::new(pattern).expect("rule pattern must be valid")),
            replacement: Replacement::Text(to),
        }
    }

    fn never(matcher: Matcher) -> Self {
        Self {
            matcher,
            replacement: Replacement::Never,
        }
    }

    fn apply(&self, text: String) -> Rewritten {
        let matched = match &self.matcher {
            Matcher::Exact(from) => text == *from,
            Matcher::Substring(from) => text.contains(from),
            Matcher::Pattern(regex) => regex.is_match(&text),
        };
        if !matched {
            return Rewritten::Text(text);
        }
        let Replacement::Text(to) = self.replacement else {
            return Rewritten::Never;
        };
        let rewritten = match &self.matcher {
            Matcher::Exact(_) => to.to_owned(),
            Matcher::Substring(from) => text.replace(from, to),
            Matcher::Pattern(regex) => regex.replace_all(&text, to).into_owned(),
        };
        Rewritten::Text(rewritten.trim().to_owned())
    }
}

/// Ordered rewrite rules over lowercased, trimmed answers.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // not achievable during childhood
        Rule::never(Matcher::Exact("never")),
        Rule::never(Matcher::Exact("no")),
        Rule::never(Matcher::Exact("nope")),
        Rule::never(Matcher::Exact("not until 18")),
        Rule::never(Matcher::Exact("not until they're 18")),
        Rule::never(Matcher::Exact("not until they’re 18")),
        Rule::never(Matcher::Substring("not as a child")),
        Rule::never(Matcher::Substring("not while they live")),
        // trailing remarks
        Rule::substring(" (almost 10)", ""),
        Rule::pattern(r"\s*\([^)]*\)\s*$", ""),
        // caveats after the primary number
        Rule::pattern(
            r"^(\d+(?:\.\d+)?(?:\s*(?:years old|years|months|weeks))?)\s*[,;].*$",
            "${1}",
        ),
        Rule::pattern(
            r"^(\d+(?:\.\d+)?)\s+(?:but|if|with|for|unless|depending|once|when)\b.*$",
            "${1}",
        ),
        // word answers
        Rule::exact("newborn", "0"),
        Rule::exact("birth", "0"),
        Rule::exact("any age", "0"),
        Rule::exact("always", "0"),
        Rule::exact("teen", "13"),
        Rule::exact("teenager", "13"),
        Rule::exact("a teenager", "13"),
        Rule::exact("middle school", "11"),
        Rule::exact("high school", "14"),
        // approximation markers
        Rule::substring("~", ""),
        Rule::substring("ish", ""),
        Rule::pattern(
            r"^(?:around|about|maybe|probably|approx\.?|approximately|at least)\s+",
            "",
        ),
        // range spellings
        Rule::substring("–", "-"),
        Rule::substring("—", "-"),
        Rule::substring(" to ", "-"),
        Rule::pattern(r"^(\d+(?:\.\d+)?)\s*(?:or|/)\s*(\d+(?:\.\d+)?)$", "${1}-${2}"),
        // uncertainty markers
        Rule::substring("+", ""),
        Rule::substring("?", ""),
        Rule::pattern(r"\s*-\s*", "-"),
    ]
});

/// Age normalizer parameterized by a [`NormalizePolicy`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Normalizer {
    pub policy: NormalizePolicy,
}

impl Normalizer {
    #[must_use]
    pub fn new(policy: NormalizePolicy) -> Self {
        Self { policy }
    }

    /// Converts a free-text age answer into years.
    ///
    /// Returns `Ok(None)` for absent answers.
    ///
    /// # Examples
    ///
    /// ```
    /// use freerange_survey::normalize::{NormalizePolicy, Normalizer, RangeCollapse};
    ///
    /// let normalizer = Normalizer::new(NormalizePolicy {
    ///     never_age: 21.0,
    ///     range_collapse: RangeCollapse::Lower,
    /// });
    /// assert_eq!(normalizer.normalize_age("never").unwrap(), Some(21.0));
    /// assert_eq!(normalizer.normalize_age("5-10").unwrap(), Some(5.0));
    /// ```
    pub fn normalize_age(&self, text: &str) -> Result<Option<f64>, NormalizeError> {
        if classify_absent(text) {
            return Ok(None);
        }

        let mut cleaned = text.trim().to_lowercase();
        for rule in RULES.iter() {
            match rule.apply(cleaned) {
                Rewritten::Text(text) => cleaned = text,
                Rewritten::Never => return Ok(Some(self.policy.never_age)),
            }
        }

        let unparseable = || NormalizeError::UnparseableAge {
            raw: text.to_owned(),
        };
        let age = match cleaned.split_once(RANGE_SEPARATOR) {
            Some((lower, upper)) => {
                let lower = parse_years(lower).ok_or_else(unparseable)?;
                let upper = parse_years(upper).ok_or_else(unparseable)?;
                self.policy.range_collapse.collapse(lower, upper)
            }
            None => parse_years(&cleaned).ok_or_else(unparseable)?,
        };
        Ok(Some(age))
    }

    /// Converts a free-text clarification into an `(early, late)` band.
    ///
    /// # Examples
    ///
    /// ```
    /// use freerange_survey::normalize::Normalizer;
    ///
    /// let normalizer = Normalizer::default();
    /// assert_eq!(normalizer.normalize_age_range("8 to 10").unwrap(), (Some(8.0), Some(10.0)));
    /// assert_eq!(normalizer.normalize_age_range("9").unwrap(), (Some(9.0), Some(9.0)));
    /// ```
    pub fn normalize_age_range(
        &self,
        text: &str,
    ) -> Result<(Option<f64>, Option<f64>), NormalizeError> {
        if classify_absent(text) {
            return Ok((None, None));
        }

        let trimmed = text.trim();
        let text = RANGE_OVERRIDES
            .iter()
            .find(|(from, _)| *from == trimmed)
            .map_or(trimmed, |(_, to)| *to);
        let text = text
            .replace(" to ", "-")
            .replace(" To ", "-")
            .replace(['–', '—'], "-");

        let Some((early, late)) = text.split_once(RANGE_SEPARATOR) else {
            if let Some(lower) = text.strip_suffix('+') {
                return Ok((self.normalize_age(lower)?, None));
            }
            let age = self.normalize_age(&text)?;
            return Ok((age, age));
        };
        Ok((
            self.normalize_age(early.trim())?,
            self.normalize_age(late.trim())?,
        ))
    }
}

/// [`Normalizer::normalize_age`] with the default policy.
pub fn normalize_age(text: &str) -> Result<Option<f64>, NormalizeError> {
    Normalizer::default().normalize_age(text)
}

/// [`Normalizer::normalize_age_range`] with the default policy.
pub fn normalize_age_range(text: &str) -> Result<(Option<f64>, Option<f64>), NormalizeError> {
    Normalizer::default().normalize_age_range(text)
}

/// Parses a plain or unit-suffixed number into years.
fn parse_years(text: &str) -> Option<f64> {
    let text = text.trim();
    let (number, divisor) = UNIT_SUFFIXES
        .iter()
        .find_map(|(suffix, divisor)| text.strip_suffix(suffix).map(|n| (n, *divisor)))
        .unwrap_or((text, 1.0));
    let value = number.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value / divisor)
}

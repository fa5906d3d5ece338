//! Entry filtering and sorting for list views
//!
//! [`select`] is a pure function: it borrows the entries, filters them
//! with an [`EntryFilter`] (all criteria ANDed) and returns a new,
//! sorted vector of references. The input is never reordered.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::error::ParseError;
use super::model::{Entry, PopularityLevel};

/// Sentinel that disables the category and popularity filters
pub const ALL: &str = "all";

/// True for an empty value or the `all` sentinel in any case
pub fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

/// Sort order for list views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Locale-aware ascending by name
    #[default]
    Name,
    /// High → medium → low, ties keep input order
    Popularity,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Popularity => "popularity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "popularity" => Ok(SortKey::Popularity),
            other => Err(ParseError::SortKey(other.to_string())),
        }
    }
}

/// Filter criteria, combined with logical AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Case-insensitive substring of name, description, category or a use case
    pub query: Option<String>,
    /// Case-insensitive category name
    pub category: Option<String>,
    pub popularity: Option<PopularityLevel>,
}

impl EntryFilter {
    /// A filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query; an empty query matches everything
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    /// Set the category filter; `"all"` clears it
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!is_all(&category)).then_some(category);
        self
    }

    pub fn popularity(mut self, level: PopularityLevel) -> Self {
        self.popularity = Some(level);
        self
    }

    /// Build a filter from raw request parameters
    ///
    /// Missing parameters and the `"all"` sentinel disable their criterion.
    pub fn from_params(
        query: Option<&str>,
        category: Option<&str>,
        popularity: Option<&str>,
    ) -> Result<Self, ParseError> {
        let mut filter = EntryFilter::new();
        if let Some(q) = query {
            filter = filter.query(q);
        }
        if let Some(c) = category {
            filter = filter.category(c);
        }
        if let Some(p) = popularity.filter(|p| !is_all(p)) {
            filter = filter.popularity(p.parse()?);
        }
        Ok(filter)
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.category.is_none() && self.popularity.is_none()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let hit = entry.name.to_lowercase().contains(&needle)
                || entry.description.to_lowercase().contains(&needle)
                || entry.category.to_lowercase().contains(&needle)
                || entry
                    .use_cases
                    .iter()
                    .any(|u| u.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if entry.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }

        if let Some(level) = self.popularity {
            if entry.popularity.level != level {
                return false;
            }
        }

        true
    }
}

/// Filter then sort `entries`, returning the matching subset
pub fn select<'a, I>(entries: I, filter: &EntryFilter, sort: SortKey) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut results: Vec<&Entry> = entries.into_iter().filter(|e| filter.matches(e)).collect();
    sort_entries(&mut results, sort);
    results
}

/// Stable in-place sort of a result list
pub fn sort_entries(entries: &mut [&Entry], sort: SortKey) {
    match sort {
        SortKey::Name => entries.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::Popularity => {
            entries.sort_by(|a, b| b.popularity.level.rank().cmp(&a.popularity.level.rank()))
        }
    }
}

/// Root-collation order of punctuation and symbols, before digits and letters
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Locale-style string ordering
///
/// Compares in three levels like a root-locale collator. The primary
/// level folds case and accents and orders punctuation before symbols,
/// digits and letters. Accents break primary ties (unaccented first),
/// then case (lowercase first), then code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<(u8, u32)> {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .map(primary_weight)
            .collect()
    };
    let accents = |s: &str| -> Vec<Option<char>> {
        s.nfd()
            .map(|c| is_combining_mark(c).then_some(c))
            .collect()
    };

    primary(a)
        .cmp(&primary(b))
        .then_with(|| accents(a).cmp(&accents(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        return (0, 0);
    }
    if let Some(position) = PUNCTUATION_ORDER.chars().position(|p| p == c) {
        return (0, position as u32);
    }
    if c.is_alphabetic() {
        (3, c as u32)
    } else if c.is_numeric() {
        (2, c as u32)
    } else {
        (1, c as u32)
    }
}

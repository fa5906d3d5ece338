//! Name ↔ URL slug mapping
//!
//! [`to_slug`] is the canonical routing key. [`from_slug`] is a lossy
//! display helper and must never be used to resolve a route: routes are
//! resolved by recomputing the slug of every known name and comparing
//! (see [`resolve`]). Distinct names can collapse to the same slug; the
//! first one in input order wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Catalog, Category, Entry};

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_ ]+").expect("static slug pattern"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("static slug pattern"));

/// Words rendered in a fixed form by [`from_slug`]
const ACRONYMS: &[(&str, &str)] = &[
    ("ai", "AI"),
    ("api", "API"),
    ("ui", "UI"),
    ("ux", "UX"),
    ("ci", "CI"),
    ("cd", "CD"),
    ("sql", "SQL"),
    ("nosql", "NoSQL"),
    ("json", "JSON"),
    ("xml", "XML"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("js", "JS"),
    ("ts", "TS"),
];

/// Convert a display name into its URL slug
///
/// Lowercases, drops everything except ASCII word characters and spaces,
/// then turns each run of spaces into a single hyphen. Leading and
/// trailing spaces become leading and trailing hyphens.
pub fn to_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    SPACES.replace_all(&stripped, "-").into_owned()
}

/// Best-effort display name for a slug
pub fn from_slug(slug: &str) -> String {
    slug.replace('-', " ")
        .split(' ')
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    if let Some((_, canonical)) = ACRONYMS.iter().find(|(key, _)| *key == lowered) {
        return (*canonical).to_string();
    }

    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First item whose name slugs to `slug`
pub fn resolve<'a, T, I, F>(items: I, slug: &str, name: F) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> &str,
    T: 'a,
{
    items.into_iter().find(|item| to_slug(name(item)) == slug)
}

impl Catalog {
    /// Resolve an entry slug, first match in document order
    pub fn resolve_entry(&self, slug: &str) -> Option<(&str, &Entry)> {
        self.entries
            .iter()
            .find(|(_, entry)| to_slug(&entry.name) == slug)
    }

    /// Resolve a category slug, first match in catalog order
    pub fn resolve_category(&self, slug: &str) -> Option<&Category> {
        resolve(&self.categories, slug, |c| c.name.as_str())
    }
}

//! Catalog document model
//!
//! The catalog is a single JSON document with three parts: metadata,
//! an ordered list of categories and a map of entries keyed by an
//! opaque id. Key order of the entry map is preserved because it is the
//! input order for stable sorting and first-match slug resolution.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::{CatalogError, ParseError};

/// The root aggregate of the directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Title, totals and provenance
    #[serde(default)]
    pub metadata: CatalogMetadata,

    /// Categories in display order
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Entries keyed by opaque id, in document order
    #[serde(default, rename = "servers")]
    pub entries: Entries,
}

/// Catalog metadata block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogMetadata {
    pub title: String,
    pub description: String,
    pub total_servers: u64,
    pub total_categories: u64,
    pub collection_date: String,
    pub version: String,
    /// Free-text descriptors of where the data came from
    pub sources: Vec<String>,
}

/// A named grouping of entries with display metadata
///
/// `count` and `servers` are denormalized when the catalog is generated
/// and are not kept in sync with the entries. Treat them as display hints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    /// Stored entry count (display hint only)
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub description: String,

    /// Display glyph
    #[serde(default)]
    pub icon: String,

    /// Display color token
    #[serde(default)]
    pub color: String,

    /// Preview list of entry names (display hint only)
    #[serde(default)]
    pub servers: Vec<String>,
}

/// One catalog item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Free text, matched against category names case-insensitively
    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_link: Option<String>,

    #[serde(default, rename = "creator_maintainer")]
    pub maintainer: String,

    #[serde(default, rename = "installation_instructions")]
    pub install_instructions: String,

    #[serde(default)]
    pub documentation_links: Vec<String>,

    #[serde(default, rename = "popularity_indicators")]
    pub popularity: PopularityIndicators,

    #[serde(default)]
    pub last_updated: String,

    /// Where this record was collected from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub use_cases: Vec<String>,

    #[serde(default)]
    pub examples: Vec<String>,
}

/// Popularity level plus optional numeric signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopularityIndicators {
    pub level: PopularityLevel,

    #[serde(default)]
    pub github_stars: Option<u64>,

    #[serde(default)]
    pub npm_downloads: Option<u64>,

    #[serde(default)]
    pub community_mentions: u64,
}

/// Coarse popularity bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularityLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl PopularityLevel {
    /// Ordinal used for popularity sorting (high sorts first)
    pub fn rank(self) -> u8 {
        match self {
            PopularityLevel::High => 3,
            PopularityLevel::Medium => 2,
            PopularityLevel::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PopularityLevel::High => "high",
            PopularityLevel::Medium => "medium",
            PopularityLevel::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PopularityLevel::High => "High",
            PopularityLevel::Medium => "Medium",
            PopularityLevel::Low => "Low",
        }
    }

    /// Star rating shown next to list cards
    pub fn stars(self) -> &'static str {
        match self {
            PopularityLevel::High => "★★★",
            PopularityLevel::Medium => "★★",
            PopularityLevel::Low => "★",
        }
    }
}

impl fmt::Display for PopularityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PopularityLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(PopularityLevel::High),
            "medium" => Ok(PopularityLevel::Medium),
            "low" => Ok(PopularityLevel::Low),
            other => Err(ParseError::Popularity(other.to_string())),
        }
    }
}

/// Entry map that keeps document order
#[derive(Debug, Clone, Default)]
pub struct Entries {
    items: Vec<(String, Entry)>,
    /// Position of each id in `items`
    index: HashMap<String, usize>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an entry, replacing any existing one with the same id in place
    pub fn insert(&mut self, id: impl Into<String>, entry: Entry) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&position) => self.items[position].1 = entry,
            None => {
                self.index.insert(id.clone(), self.items.len());
                self.items.push((id, entry));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.index.get(id).map(|&position| &self.items[position].1)
    }

    /// Iterate `(id, entry)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.items.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Iterate entries in document order
    pub fn values(&self) -> impl Iterator<Item = &Entry> {
        self.items.iter().map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Entry)> for Entries {
    fn from_iter<T: IntoIterator<Item = (K, Entry)>>(iter: T) -> Self {
        let mut entries = Entries::new();
        for (id, entry) in iter {
            entries.insert(id, entry);
        }
        entries
    }
}

impl Serialize for Entries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (id, entry) in &self.items {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of entry id to entry")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Entries::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, entry)) = map.next_entry::<String, Entry>()? {
                    entries.insert(id, entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Catalog {
    /// Parse a catalog document; `origin` names the file or URL in errors
    pub fn from_json(content: &str, origin: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Find a category by name, ignoring case
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        let wanted = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
    }

    /// Entries whose category matches `name` case-insensitively, in document order
    pub fn entries_in_category<'a>(&'a self, name: &str) -> Vec<&'a Entry> {
        let wanted = name.to_lowercase();
        self.entries
            .values()
            .filter(|e| e.category.to_lowercase() == wanted)
            .collect()
    }

    /// Live number of entries in a category (never the stored `count`)
    pub fn live_count(&self, name: &str) -> usize {
        let wanted = name.to_lowercase();
        self.entries
            .values()
            .filter(|e| e.category.to_lowercase() == wanted)
            .count()
    }

    /// Entries whose category matches no known category
    pub fn orphaned_entries(&self) -> Vec<&Entry> {
        self.entries
            .values()
            .filter(|e| self.category_named(&e.category).is_none())
            .collect()
    }
}

impl Entry {
    /// Repository link, treating an empty string as absent
    pub fn repository(&self) -> Option<&str> {
        self.repository_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// First documentation link, if any
    pub fn primary_documentation(&self) -> Option<&str> {
        self.documentation_links.first().map(|s| s.as_str())
    }

    pub fn level(&self) -> PopularityLevel {
        self.popularity.level
    }
}

/// Cut `text` to at most `max_len` characters, appending `...` when cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod model_tests {
    use super::*;

    fn sample_json() -> &'static str {
        r##"{
  "metadata": {
    "title": "MCP Navigator",
    "description": "Directory",
    "total_servers": 3,
    "total_categories": 1,
    "collection_date": "2025-01-15",
    "version": "1.0.0",
    "sources": ["Official repository"]
  },
  "categories": [
    {"name": "Search", "count": 2, "description": "Search tools", "icon": "S", "color": "#3B82F6", "servers": ["Zeta"]}
  ],
  "servers": {
    "zeta": {
      "name": "Zeta",
      "description": "Last by name, first in document",
      "category": "search",
      "repository_link": "https://github.com/example/zeta",
      "creator_maintainer": "Example",
      "installation_instructions": "npx zeta",
      "documentation_links": ["https://example.com/zeta"],
      "popularity_indicators": {"level": "high", "github_stars": 120, "npm_downloads": null, "community_mentions": 4},
      "last_updated": "2025-01-01",
      "source": "official",
      "use_cases": ["web search"],
      "examples": ["find docs"]
    },
    "alpha": {
      "name": "Alpha",
      "category": "Databases",
      "popularity_indicators": {"level": "low"}
    }
  }
}"##
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let catalog = Catalog::from_json(sample_json(), "sample").unwrap();
        let ids: Vec<&str> = catalog.entries.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let catalog = Catalog::from_json(sample_json(), "sample").unwrap();
        let alpha = catalog.entries.get("alpha").unwrap();
        assert!(alpha.description.is_empty());
        assert!(alpha.use_cases.is_empty());
        assert!(alpha.repository().is_none());
        assert_eq!(alpha.level(), PopularityLevel::Low);

        let zeta = catalog.entries.get("zeta").unwrap();
        assert_eq!(zeta.popularity.github_stars, Some(120));
        assert_eq!(zeta.popularity.npm_downloads, None);
        assert_eq!(zeta.maintainer, "Example");
        assert_eq!(zeta.install_instructions, "npx zeta");
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = Catalog::from_json("{\"servers\": []}", "data/bad.json").unwrap_err();
        assert!(err.to_string().contains("data/bad.json"));
    }

    #[test]
    fn test_category_membership_is_case_insensitive() {
        let catalog = Catalog::from_json(sample_json(), "sample").unwrap();
        assert_eq!(catalog.live_count("SEARCH"), 1);
        assert!(catalog.category_named("search").is_some());

        let orphans: Vec<&str> = catalog
            .orphaned_entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(orphans, vec!["Alpha"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut entries = Entries::new();
        entries.insert("a", Entry { name: "A".into(), ..Default::default() });
        entries.insert("b", Entry { name: "B".into(), ..Default::default() });
        entries.insert("a", Entry { name: "A2".into(), ..Default::default() });

        let names: Vec<&str> = entries.values().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
        assert_eq!(entries.get("a").unwrap().name, "A2");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_duplicate_document_keys_keep_first_position() {
        let json = r#"{"servers": {
            "a": {"name": "First"},
            "b": {"name": "Second"},
            "a": {"name": "Replaced"}
        }}"#;
        let catalog = Catalog::from_json(json, "dupes").unwrap();
        let ids: Vec<&str> = catalog.entries.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(catalog.entries.get("a").unwrap().name, "Replaced");
        assert!(catalog.entries.get("c").is_none());
    }

    #[test]
    fn test_empty_repository_link_is_absent() {
        let entry = Entry {
            repository_link: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(entry.repository().is_none());
    }

    #[test]
    fn test_popularity_level_parsing() {
        assert_eq!("medium".parse::<PopularityLevel>(), Ok(PopularityLevel::Medium));
        assert!("High".parse::<PopularityLevel>().is_err());
        assert!(PopularityLevel::High.rank() > PopularityLevel::Medium.rank());
        assert_eq!(PopularityLevel::Medium.stars(), "★★");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
    }
}

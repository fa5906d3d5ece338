//! Catalog consistency report
//!
//! Checks a loaded catalog for the ways its denormalized fields and
//! entry data drift apart. Nothing here mutates the catalog.

use serde::Serialize;
use std::collections::BTreeMap;

use super::model::Catalog;
use super::slug::to_slug;

const GITHUB_PREFIX: &str = "https://github.com/";

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Stored category count vs. live entry count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountDrift {
    pub category: String,
    pub stored: u64,
    pub live: u64,
}

/// Result of checking a catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    pub total_entries: usize,
    pub total_categories: usize,
    /// Live entry count per category string as written on the entries
    pub category_breakdown: BTreeMap<String, usize>,
    pub count_drift: Vec<CountDrift>,
    /// `(stored, live)` when metadata.total_servers is stale
    pub total_servers_drift: Option<(u64, u64)>,
    /// `(stored, live)` when metadata.total_categories is stale
    pub total_categories_drift: Option<(u64, u64)>,
    /// Entries whose category matches no known category
    pub orphaned: Vec<String>,
    /// Field name → names of entries missing it
    pub missing_fields: BTreeMap<String, Vec<String>>,
    /// `(entry, link)` pairs with a non-GitHub repository link
    pub repository_issues: Vec<(String, String)>,
    /// Slug → distinct names that collapse onto it
    pub slug_collisions: BTreeMap<String, Vec<String>>,
    /// Name → ids of every entry carrying it, when more than one does
    pub duplicate_names: BTreeMap<String, Vec<String>>,
}

impl CatalogReport {
    pub fn build(catalog: &Catalog) -> Self {
        let mut report = CatalogReport {
            total_entries: catalog.entries.len(),
            total_categories: catalog.categories.len(),
            ..Default::default()
        };

        for entry in catalog.entries.values() {
            let category = if entry.category.is_empty() {
                "Unknown".to_string()
            } else {
                entry.category.clone()
            };
            *report.category_breakdown.entry(category).or_default() += 1;
        }

        for category in &catalog.categories {
            let live = catalog.live_count(&category.name) as u64;
            if live != category.count {
                report.count_drift.push(CountDrift {
                    category: category.name.clone(),
                    stored: category.count,
                    live,
                });
            }
        }

        let live_total = catalog.entries.len() as u64;
        if catalog.metadata.total_servers != live_total {
            report.total_servers_drift = Some((catalog.metadata.total_servers, live_total));
        }
        let live_categories = catalog.categories.len() as u64;
        if catalog.metadata.total_categories != live_categories {
            report.total_categories_drift =
                Some((catalog.metadata.total_categories, live_categories));
        }

        report.orphaned = catalog
            .orphaned_entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();

        for entry in catalog.entries.values() {
            let display_name = if entry.name.is_empty() {
                "Unknown".to_string()
            } else {
                entry.name.clone()
            };

            // Required fields
            let checks = [
                ("name", entry.name.trim().is_empty()),
                ("description", entry.description.trim().is_empty()),
                ("category", entry.category.trim().is_empty()),
                ("repository_link", entry.repository().is_none()),
                (
                    "installation_instructions",
                    entry.install_instructions.trim().is_empty(),
                ),
            ];
            for (field, missing) in checks {
                if missing {
                    report
                        .missing_fields
                        .entry(field.to_string())
                        .or_default()
                        .push(display_name.clone());
                }
            }

            if let Some(link) = entry.repository() {
                if !link.starts_with(GITHUB_PREFIX) {
                    report
                        .repository_issues
                        .push((display_name.clone(), link.to_string()));
                }
            }
        }

        let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (id, entry) in catalog.entries.iter() {
            by_name
                .entry(entry.name.trim().to_string())
                .or_default()
                .push(id.to_string());
        }
        report.duplicate_names = by_name
            .into_iter()
            .filter(|(name, ids)| !name.is_empty() && ids.len() > 1)
            .collect();

        let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in catalog.entries.values() {
            let names = by_slug.entry(to_slug(&entry.name)).or_default();
            if !names.contains(&entry.name) {
                names.push(entry.name.clone());
            }
        }
        report.slug_collisions = by_slug
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .collect();

        report
    }

    /// Human-readable findings with their severity
    pub fn findings(&self) -> Vec<(Severity, String)> {
        let mut findings = Vec::new();

        for (field, names) in &self.missing_fields {
            findings.push((
                Severity::Error,
                format!("{} entries missing '{}': {}", names.len(), field, preview(names)),
            ));
        }

        for (name, ids) in &self.duplicate_names {
            findings.push((
                Severity::Error,
                format!("Name '{}' is used by {} entries: {}", name, ids.len(), ids.join(", ")),
            ));
        }

        // Only the first entry in document order is reachable by slug
        for (slug, names) in &self.slug_collisions {
            findings.push((
                Severity::Warning,
                format!("Slug '{}' is shared by: {}", slug, names.join(", ")),
            ));
        }

        if !self.orphaned.is_empty() {
            findings.push((
                Severity::Warning,
                format!(
                    "{} entries match no category: {}",
                    self.orphaned.len(),
                    preview(&self.orphaned)
                ),
            ));
        }

        for drift in &self.count_drift {
            findings.push((
                Severity::Warning,
                format!(
                    "Category '{}' stores count {} but has {} entries",
                    drift.category, drift.stored, drift.live
                ),
            ));
        }

        if let Some((stored, live)) = self.total_servers_drift {
            findings.push((
                Severity::Warning,
                format!("metadata.total_servers is {stored} but the catalog has {live} entries"),
            ));
        }

        if let Some((stored, live)) = self.total_categories_drift {
            findings.push((
                Severity::Warning,
                format!(
                    "metadata.total_categories is {stored} but the catalog has {live} categories"
                ),
            ));
        }

        for (name, link) in &self.repository_issues {
            findings.push((
                Severity::Warning,
                format!("{name}: repository link is not a GitHub URL ({link})"),
            ));
        }

        findings
    }

    pub fn error_count(&self) -> usize {
        self.findings()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Warning)
            .count()
    }

    /// True when there are no errors (warnings allowed)
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

fn preview(names: &[String]) -> String {
    let shown: Vec<&str> = names.iter().take(3).map(|s| s.as_str()).collect();
    if names.len() > 3 {
        format!("{}, ...", shown.join(", "))
    } else {
        shown.join(", ")
    }
}

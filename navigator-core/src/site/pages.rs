//! Page models
//!
//! [`render`] turns a [`Route`] and the current [`LoadState`] into the
//! data a view needs. Pages borrow from the loaded catalog; nothing is
//! copied out of it except slugs.

use serde::Serialize;

use super::info::{
    DataSource, Section, ABOUT_SECTIONS, CONTACT_EMAIL, CONTACT_GITHUB, CONTACT_SECTIONS,
    DATA_SOURCES, DATA_SOURCES_SECTIONS,
};
use super::route::{BrowseParams, Route};
use crate::catalog::query::select;
use crate::catalog::slug::to_slug;
use crate::catalog::{Catalog, Category, Entry, LoadState, PopularityLevel};
use crate::config::{OrphanPolicy, SiteConfig};

/// Name of the synthetic category holding unmatched entries
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNCATEGORIZED_SLUG: &str = "uncategorized";

const UNCATEGORIZED_ICON: &str = "📦";
const UNCATEGORIZED_COLOR: &str = "#6B7280";

/// Everything a view needs to draw one route
#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page<'a> {
    Loading,
    Failed { message: &'a str },
    Home(HomePage<'a>),
    Browse(BrowsePage<'a>),
    Categories(CategoriesPage<'a>),
    Category(CategoryPage<'a>),
    Detail(DetailPage<'a>),
    About(InfoPage<'a>),
    Contact(InfoPage<'a>),
    DataSources(InfoPage<'a>),
    NotFound(NotFound),
}

/// An entry as shown in a list, with its detail-page slug
#[derive(Debug, Clone, Serialize)]
pub struct EntryCard<'a> {
    pub slug: String,
    #[serde(flatten)]
    pub entry: &'a Entry,
}

impl<'a> EntryCard<'a> {
    pub fn new(entry: &'a Entry) -> Self {
        Self {
            slug: to_slug(&entry.name),
            entry,
        }
    }
}

/// A category card
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary<'a> {
    pub name: &'a str,
    pub slug: String,
    pub icon: &'a str,
    pub color: &'a str,
    pub description: &'a str,
    /// Stored count from the document (display hint only)
    pub count: u64,
    /// Entries actually in the category
    pub live_count: usize,
    pub preview: Vec<&'a str>,
}

impl<'a> CategorySummary<'a> {
    fn from_category(catalog: &'a Catalog, category: &'a Category, preview_limit: usize) -> Self {
        Self {
            name: &category.name,
            slug: to_slug(&category.name),
            icon: &category.icon,
            color: &category.color,
            description: &category.description,
            count: category.count,
            live_count: catalog.live_count(&category.name),
            preview: category
                .servers
                .iter()
                .take(preview_limit)
                .map(|s| s.as_str())
                .collect(),
        }
    }

    fn uncategorized(orphans: &[&'a Entry], preview_limit: usize) -> Self {
        Self {
            name: UNCATEGORIZED,
            slug: UNCATEGORIZED_SLUG.to_string(),
            icon: UNCATEGORIZED_ICON,
            color: UNCATEGORIZED_COLOR,
            description: "Entries whose category is not listed",
            count: orphans.len() as u64,
            live_count: orphans.len(),
            preview: orphans
                .iter()
                .take(preview_limit)
                .map(|e| e.name.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub total_entries: usize,
    pub featured: Vec<EntryCard<'a>>,
    pub categories: Vec<CategorySummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct BrowsePage<'a> {
    pub params: BrowseParams,
    pub results: Vec<EntryCard<'a>>,
    /// Category names offered by the category filter
    pub category_options: Vec<&'a str>,
}

impl BrowsePage<'_> {
    /// "Showing N server(s)"
    pub fn summary_line(&self) -> String {
        let n = self.results.len();
        format!("Showing {} server{}", n, if n == 1 { "" } else { "s" })
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesPage<'a> {
    /// Sorted by live count, largest first
    pub categories: Vec<CategorySummary<'a>>,
    pub total_entries: usize,
    pub average_per_category: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage<'a> {
    pub category: CategorySummary<'a>,
    pub entries: Vec<EntryCard<'a>>,
    /// Other categories to explore, in catalog order
    pub others: Vec<CategorySummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DetailPage<'a> {
    pub id: &'a str,
    pub slug: String,
    pub entry: &'a Entry,
    /// Resolved category, `None` for an orphaned entry
    pub category: Option<&'a Category>,
    /// Breadcrumb target
    pub category_slug: String,
    pub related: Vec<EntryCard<'a>>,
}

/// Totals shown on informational pages
#[derive(Debug, Serialize)]
pub struct CatalogStats<'a> {
    pub total_entries: usize,
    pub total_categories: usize,
    pub collection_date: &'a str,
    pub version: &'a str,
    pub sources: &'a [String],
}

impl<'a> CatalogStats<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            total_entries: catalog.entries.len(),
            total_categories: catalog.categories.len(),
            collection_date: &catalog.metadata.collection_date,
            version: &catalog.metadata.version,
            sources: &catalog.metadata.sources,
        }
    }
}

/// About, contact and data-source pages
#[derive(Debug, Serialize)]
pub struct InfoPage<'a> {
    pub title: &'static str,
    pub sections: &'static [Section],
    /// `(label, href)` pairs
    pub links: Vec<(&'static str, String)>,
    pub data_sources: &'static [DataSource],
    /// Present once the catalog is loaded
    pub stats: Option<CatalogStats<'a>>,
}

impl<'a> InfoPage<'a> {
    fn about(catalog: Option<&'a Catalog>) -> Self {
        Self {
            title: "About MCP Navigator",
            sections: ABOUT_SECTIONS,
            links: vec![(
                "Official MCP repository",
                "https://github.com/modelcontextprotocol/servers".to_string(),
            )],
            data_sources: DATA_SOURCES,
            stats: catalog.map(CatalogStats::new),
        }
    }

    fn contact(catalog: Option<&'a Catalog>) -> Self {
        Self {
            title: "Contact Us",
            sections: CONTACT_SECTIONS,
            links: vec![
                ("Email", format!("mailto:{CONTACT_EMAIL}")),
                ("GitHub", CONTACT_GITHUB.to_string()),
            ],
            data_sources: &[],
            stats: catalog.map(CatalogStats::new),
        }
    }

    fn data_sources(catalog: Option<&'a Catalog>) -> Self {
        Self {
            title: "Data Sources",
            sections: DATA_SOURCES_SECTIONS,
            links: Vec::new(),
            data_sources: DATA_SOURCES,
            stats: catalog.map(CatalogStats::new),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotFoundKind {
    Entry,
    Category,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub kind: NotFoundKind,
    pub target: String,
}

impl NotFound {
    pub fn message(&self) -> String {
        match self.kind {
            NotFoundKind::Entry => format!("MCP server not found: {}", self.target),
            NotFoundKind::Category => format!("Category not found: {}", self.target),
            NotFoundKind::Path => format!("Page not found: {}", self.target),
        }
    }
}

/// A category link in the footer
#[derive(Debug, Serialize)]
pub struct CategoryLink<'a> {
    pub name: &'a str,
    pub slug: String,
    pub icon: &'a str,
}

/// Footer contents
#[derive(Debug, Serialize)]
pub struct Footer<'a> {
    pub build_time: String,
    pub total_entries: Option<usize>,
    /// Leading catalog categories, empty until the catalog is loaded
    pub categories: Vec<CategoryLink<'a>>,
}

pub fn footer<'a>(state: &'a LoadState, config: &SiteConfig) -> Footer<'a> {
    let categories = state
        .catalog()
        .map(|catalog| {
            catalog
                .categories
                .iter()
                .take(config.footer_categories_limit)
                .map(|category| CategoryLink {
                    name: &category.name,
                    slug: to_slug(&category.name),
                    icon: &category.icon,
                })
                .collect()
        })
        .unwrap_or_default();

    Footer {
        build_time: config.build_time_display(),
        total_entries: state.catalog().map(|c| c.entries.len()),
        categories,
    }
}

/// Build the page for `route` from the current load state
///
/// Informational pages render in every state. Everything else waits
/// for the catalog.
pub fn render<'a>(route: &Route, state: &'a LoadState, config: &SiteConfig) -> Page<'a> {
    match route {
        Route::About => Page::About(InfoPage::about(state.catalog())),
        Route::Contact => Page::Contact(InfoPage::contact(state.catalog())),
        Route::DataSources => Page::DataSources(InfoPage::data_sources(state.catalog())),
        _ => match state {
            LoadState::Loading => Page::Loading,
            LoadState::Failed(message) => Page::Failed {
                message: message.as_str(),
            },
            LoadState::Ready(catalog) => render_ready(route, catalog, config),
        },
    }
}

fn render_ready<'a>(route: &Route, catalog: &'a Catalog, config: &SiteConfig) -> Page<'a> {
    match route {
        Route::Home => Page::Home(home(catalog, config)),
        Route::Browse(params) => Page::Browse(browse(catalog, params)),
        Route::Categories => Page::Categories(categories(catalog, config)),
        Route::Category(slug) => match category(catalog, slug, config) {
            Some(page) => Page::Category(page),
            None => Page::NotFound(NotFound {
                kind: NotFoundKind::Category,
                target: slug.clone(),
            }),
        },
        Route::Detail(slug) => match detail(catalog, slug, config) {
            Some(page) => Page::Detail(page),
            None => Page::NotFound(NotFound {
                kind: NotFoundKind::Entry,
                target: slug.clone(),
            }),
        },
        Route::About => Page::About(InfoPage::about(Some(catalog))),
        Route::Contact => Page::Contact(InfoPage::contact(Some(catalog))),
        Route::DataSources => Page::DataSources(InfoPage::data_sources(Some(catalog))),
        Route::NotFound(path) => Page::NotFound(NotFound {
            kind: NotFoundKind::Path,
            target: path.clone(),
        }),
    }
}

/// Category cards in catalog order, plus the orphan bucket when enabled
pub fn summaries<'a>(catalog: &'a Catalog, config: &SiteConfig) -> Vec<CategorySummary<'a>> {
    let mut summaries: Vec<_> = catalog
        .categories
        .iter()
        .map(|c| CategorySummary::from_category(catalog, c, config.preview_limit))
        .collect();
    summaries.extend(uncategorized(catalog, config));
    summaries
}

fn uncategorized<'a>(catalog: &'a Catalog, config: &SiteConfig) -> Option<CategorySummary<'a>> {
    if config.orphan_policy != OrphanPolicy::Bucket
        || catalog.resolve_category(UNCATEGORIZED_SLUG).is_some()
    {
        return None;
    }
    let orphans = catalog.orphaned_entries();
    if orphans.is_empty() {
        return None;
    }
    Some(CategorySummary::uncategorized(&orphans, config.preview_limit))
}

fn home<'a>(catalog: &'a Catalog, config: &SiteConfig) -> HomePage<'a> {
    let featured = catalog
        .entries
        .values()
        .filter(|e| e.level() == PopularityLevel::High)
        .take(config.featured_limit)
        .map(EntryCard::new)
        .collect();

    HomePage {
        title: &catalog.metadata.title,
        description: &catalog.metadata.description,
        total_entries: catalog.entries.len(),
        featured,
        categories: summaries(catalog, config),
    }
}

fn browse<'a>(catalog: &'a Catalog, params: &BrowseParams) -> BrowsePage<'a> {
    let results = select(catalog.entries.values(), &params.filter(), params.sort)
        .into_iter()
        .map(EntryCard::new)
        .collect();

    BrowsePage {
        params: params.clone(),
        results,
        category_options: catalog.categories.iter().map(|c| c.name.as_str()).collect(),
    }
}

fn categories<'a>(catalog: &'a Catalog, config: &SiteConfig) -> CategoriesPage<'a> {
    let mut categories = summaries(catalog, config);
    // Stable: equal counts keep catalog order
    categories.sort_by(|a, b| b.live_count.cmp(&a.live_count));

    let total_entries = catalog.entries.len();
    let average_per_category = if categories.is_empty() {
        0
    } else {
        (total_entries as f64 / categories.len() as f64).round() as usize
    };

    CategoriesPage {
        categories,
        total_entries,
        average_per_category,
    }
}

fn category<'a>(catalog: &'a Catalog, slug: &str, config: &SiteConfig) -> Option<CategoryPage<'a>> {
    if let Some(found) = catalog.resolve_category(slug) {
        return Some(CategoryPage {
            category: CategorySummary::from_category(catalog, found, config.preview_limit),
            entries: catalog
                .entries_in_category(&found.name)
                .into_iter()
                .map(EntryCard::new)
                .collect(),
            others: other_categories(catalog, &found.name, config),
        });
    }

    if slug != UNCATEGORIZED_SLUG {
        return None;
    }
    let summary = uncategorized(catalog, config)?;
    Some(CategoryPage {
        category: summary,
        entries: catalog
            .orphaned_entries()
            .into_iter()
            .map(EntryCard::new)
            .collect(),
        others: other_categories(catalog, UNCATEGORIZED, config),
    })
}

fn other_categories<'a>(
    catalog: &'a Catalog,
    current: &str,
    config: &SiteConfig,
) -> Vec<CategorySummary<'a>> {
    catalog
        .categories
        .iter()
        .filter(|c| c.name != current)
        .take(config.other_categories_limit)
        .map(|c| CategorySummary::from_category(catalog, c, config.preview_limit))
        .collect()
}

fn detail<'a>(catalog: &'a Catalog, slug: &str, config: &SiteConfig) -> Option<DetailPage<'a>> {
    let (id, entry) = catalog.resolve_entry(slug)?;
    let category = catalog.category_named(&entry.category);

    let category_slug = match category {
        Some(found) => to_slug(&found.name),
        None if uncategorized(catalog, config).is_some() => UNCATEGORIZED_SLUG.to_string(),
        None => to_slug(&entry.category),
    };

    let wanted = entry.category.to_lowercase();
    let related = catalog
        .entries
        .values()
        .filter(|other| other.name != entry.name && other.category.to_lowercase() == wanted)
        .take(config.related_limit)
        .map(EntryCard::new)
        .collect();

    Some(DetailPage {
        id,
        slug: to_slug(&entry.name),
        entry,
        category,
        category_slug,
        related,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortKey;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        let json = r##"{
  "metadata": {"title": "MCP Navigator", "description": "Directory", "total_servers": 6,
               "collection_date": "2025-01-15", "sources": ["GitHub"]},
  "categories": [
    {"name": "Search", "count": 9, "servers": ["Brave Search", "Exa", "Tavily", "Kagi"]},
    {"name": "Databases", "count": 1, "servers": []},
    {"name": "AI & ML", "count": 2, "servers": []}
  ],
  "servers": {
    "brave": {"name": "Brave Search", "category": "Search", "popularity_indicators": {"level": "high"}},
    "exa": {"name": "Exa", "category": "search", "popularity_indicators": {"level": "medium"}},
    "tavily": {"name": "Tavily", "category": "SEARCH", "popularity_indicators": {"level": "high"}},
    "kagi": {"name": "Kagi", "category": "Search", "popularity_indicators": {"level": "low"}},
    "pg": {"name": "Postgres", "category": "Databases", "popularity_indicators": {"level": "high"}},
    "stray": {"name": "Stray", "category": "Misc", "popularity_indicators": {"level": "low"}}
  }
}"##;
        Catalog::from_json(json, "test").unwrap()
    }

    fn names<'a>(cards: &[EntryCard<'a>]) -> Vec<&'a str> {
        cards.iter().map(|c| c.entry.name.as_str()).collect()
    }

    #[test]
    fn test_loading_and_failed_states() {
        let config = SiteConfig::default();
        assert!(matches!(
            render(&Route::Home, &LoadState::Loading, &config),
            Page::Loading
        ));

        let failed = LoadState::Failed("HTTP 404".to_string());
        match render(&Route::Detail("x".to_string()), &failed, &config) {
            Page::Failed { message } => assert_eq!(message, "HTTP 404"),
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn test_info_pages_render_without_catalog() {
        let config = SiteConfig::default();
        match render(&Route::DataSources, &LoadState::Loading, &config) {
            Page::DataSources(page) => {
                assert!(page.stats.is_none());
                assert_eq!(page.data_sources.len(), 4);
            }
            other => panic!("unexpected page: {other:?}"),
        }

        let ready = LoadState::Ready(catalog());
        match render(&Route::About, &ready, &config) {
            Page::About(page) => {
                let stats = page.stats.unwrap();
                assert_eq!(stats.total_entries, 6);
                assert_eq!(stats.collection_date, "2025-01-15");
            }
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn test_home_featured_in_document_order() {
        let state = LoadState::Ready(catalog());
        let config = SiteConfig {
            featured_limit: 2,
            ..Default::default()
        };
        let Page::Home(page) = render(&Route::Home, &state, &config) else {
            panic!("expected home page");
        };
        assert_eq!(names(&page.featured), vec!["Brave Search", "Tavily"]);
        assert_eq!(page.categories.len(), 3);
        assert_eq!(page.categories[0].preview, vec!["Brave Search", "Exa", "Tavily"]);
    }

    #[test]
    fn test_browse_empty_result_is_not_an_error() {
        let state = LoadState::Ready(catalog());
        let route = Route::Browse(BrowseParams::search("nothing matches this"));
        let Page::Browse(page) = render(&route, &state, &SiteConfig::default()) else {
            panic!("expected browse page");
        };
        assert!(page.results.is_empty());
        assert_eq!(page.summary_line(), "Showing 0 servers");
        assert_eq!(page.category_options, vec!["Search", "Databases", "AI & ML"]);
    }

    #[test]
    fn test_browse_popularity_sort() {
        let state = LoadState::Ready(catalog());
        let route = Route::Browse(BrowseParams {
            category: Some("search".to_string()),
            sort: SortKey::Popularity,
            ..Default::default()
        });
        let Page::Browse(page) = render(&route, &state, &SiteConfig::default()) else {
            panic!("expected browse page");
        };
        assert_eq!(
            names(&page.results),
            vec!["Brave Search", "Tavily", "Exa", "Kagi"]
        );
    }

    #[test]
    fn test_categories_sorted_by_live_count() {
        let state = LoadState::Ready(catalog());
        let Page::Categories(page) = render(&Route::Categories, &state, &SiteConfig::default())
        else {
            panic!("expected categories page");
        };
        let order: Vec<(&str, usize)> = page
            .categories
            .iter()
            .map(|c| (c.name, c.live_count))
            .collect();
        // Stored counts say AI & ML outranks Databases; live data disagrees
        assert_eq!(order, vec![("Search", 4), ("Databases", 1), ("AI & ML", 0)]);
        assert_eq!(page.total_entries, 6);
        assert_eq!(page.average_per_category, 2);
    }

    #[test]
    fn test_category_page_members_and_miss() {
        let state = LoadState::Ready(catalog());
        let config = SiteConfig::default();
        let Page::Category(page) = render(&Route::category("Search"), &state, &config) else {
            panic!("expected category page");
        };
        assert_eq!(
            names(&page.entries),
            vec!["Brave Search", "Exa", "Tavily", "Kagi"]
        );
        assert_eq!(page.category.count, 9);
        let others: Vec<&str> = page.others.iter().map(|c| c.name).collect();
        assert_eq!(others, vec!["Databases", "AI & ML"]);

        match render(&Route::Category("misc".to_string()), &state, &config) {
            Page::NotFound(missing) => assert_eq!(missing.kind, NotFoundKind::Category),
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn test_detail_related_entries() {
        let state = LoadState::Ready(catalog());
        let config = SiteConfig::default();
        let Page::Detail(page) = render(&Route::entry("Exa"), &state, &config) else {
            panic!("expected detail page");
        };
        assert_eq!(page.id, "exa");
        assert_eq!(page.category_slug, "search");
        assert_eq!(names(&page.related), vec!["Brave Search", "Tavily", "Kagi"]);

        let missing = render(&Route::Detail("no-such".to_string()), &state, &config);
        assert!(matches!(missing, Page::NotFound(NotFound { kind: NotFoundKind::Entry, .. })));
    }

    #[test]
    fn test_orphans_excluded_by_default() {
        let state = LoadState::Ready(catalog());
        let config = SiteConfig::default();
        let Page::Categories(page) = render(&Route::Categories, &state, &config) else {
            panic!("expected categories page");
        };
        assert!(page.categories.iter().all(|c| c.slug != UNCATEGORIZED_SLUG));
        assert!(matches!(
            render(&Route::Category(UNCATEGORIZED_SLUG.to_string()), &state, &config),
            Page::NotFound(_)
        ));
    }

    #[test]
    fn test_orphan_bucket() {
        let state = LoadState::Ready(catalog());
        let config = SiteConfig {
            orphan_policy: OrphanPolicy::Bucket,
            ..Default::default()
        };

        let Page::Category(page) =
            render(&Route::Category(UNCATEGORIZED_SLUG.to_string()), &state, &config)
        else {
            panic!("expected category page");
        };
        assert_eq!(page.category.name, UNCATEGORIZED);
        assert_eq!(names(&page.entries), vec!["Stray"]);

        let Page::Detail(detail) = render(&Route::entry("Stray"), &state, &config) else {
            panic!("expected detail page");
        };
        assert!(detail.category.is_none());
        assert_eq!(detail.category_slug, UNCATEGORIZED_SLUG);
    }

    #[test]
    fn test_other_categories_are_limited() {
        let state = LoadState::Ready(catalog());
        let config = SiteConfig {
            other_categories_limit: 1,
            ..Default::default()
        };
        let Page::Category(page) = render(&Route::category("Databases"), &state, &config) else {
            panic!("expected category page");
        };
        let others: Vec<&str> = page.others.iter().map(|c| c.name).collect();
        assert_eq!(others, vec!["Search"]);
        assert_eq!(page.others[0].live_count, 4);
    }

    #[test]
    fn test_footer_categories() {
        let config = SiteConfig {
            footer_categories_limit: 2,
            build_time: Some("2025-01-15T00:00:00Z".to_string()),
            ..Default::default()
        };
        let loading = footer(&LoadState::Loading, &config);
        assert!(loading.categories.is_empty());
        assert_eq!(loading.total_entries, None);

        let state = LoadState::Ready(catalog());
        let ready = footer(&state, &config);
        let slugs: Vec<&str> = ready.categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["search", "databases"]);
        assert_eq!(ready.total_entries, Some(6));
        assert_eq!(ready.build_time, "2025-01-15T00:00:00Z");
    }

    #[test]
    fn test_page_json_is_tagged() {
        let state = LoadState::Ready(catalog());
        let page = render(&Route::entry("Postgres"), &state, &SiteConfig::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"], "detail");
        assert_eq!(json["entry"]["name"], "Postgres");
    }
}

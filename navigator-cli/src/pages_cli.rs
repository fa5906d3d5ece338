//! Terminal rendering of site pages
//!
//! Prints whatever [`render`] returns for a route, either as tables and
//! plain text or as pretty JSON.

use anyhow::Result;
use clap::ValueEnum;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use navigator_core::catalog::slug::{from_slug, to_slug};
use navigator_core::catalog::{truncate_text, CatalogReport, LoadState, Severity};
use navigator_core::config::SiteConfig;
use navigator_core::site::info::DataSource;
use navigator_core::site::{
    footer, render, BrowsePage, CategoriesPage, CategoryPage, CategorySummary, DetailPage,
    EntryCard, HomePage, InfoPage, Page, Route,
};

/// Result layout for list pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Compact table
    #[default]
    Grid,
    /// One block per server with full descriptions
    List,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub view: View,
}

/// Table row for server lists
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Popularity")]
    popularity: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Link")]
    link: String,
}

/// Table row for category cards
#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Servers")]
    servers: usize,
    #[tabled(rename = "Includes")]
    preview: String,
    #[tabled(rename = "Link")]
    link: String,
}

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "Source")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Reliability")]
    reliability: String,
    #[tabled(rename = "URL")]
    url: String,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Servers")]
    servers: usize,
}

fn table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

fn entry_rows(cards: &[EntryCard<'_>], config: &SiteConfig) -> Vec<EntryRow> {
    cards
        .iter()
        .map(|card| EntryRow {
            name: card.entry.name.clone(),
            category: card.entry.category.clone(),
            popularity: card.entry.level().stars().to_string(),
            description: truncate_text(&card.entry.description, config.description_limit),
            link: config.href(&Route::Detail(card.slug.clone()).path()),
        })
        .collect()
}

fn category_rows(summaries: &[CategorySummary<'_>], config: &SiteConfig) -> Vec<CategoryRow> {
    summaries
        .iter()
        .map(|summary| CategoryRow {
            icon: summary.icon.to_string(),
            name: summary.name.to_string(),
            servers: summary.live_count,
            preview: summary.preview.join(", "),
            link: config.href(&Route::Category(summary.slug.clone()).path()),
        })
        .collect()
}

fn source_rows(sources: &[DataSource]) -> Vec<SourceRow> {
    sources
        .iter()
        .map(|source| SourceRow {
            name: source.name.to_string(),
            kind: source.kind.label().to_string(),
            reliability: source.reliability.label().to_string(),
            url: source.url.unwrap_or("-").to_string(),
        })
        .collect()
}

/// Render `route` and print it; exits with status 1 when the page is an
/// error or a miss
pub fn execute(route: &Route, state: &LoadState, config: &SiteConfig, output: Output) -> Result<()> {
    let page = render(route, state, config);

    if output.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page, state, config, output.view);
    }

    match page {
        Page::Loading | Page::Failed { .. } | Page::NotFound(_) => std::process::exit(1),
        _ => Ok(()),
    }
}

fn print_page(page: &Page<'_>, state: &LoadState, config: &SiteConfig, view: View) {
    match page {
        Page::Loading => eprintln!("Loading MCP data..."),
        Page::Failed { message } => {
            eprintln!("Error: Failed to load MCP data");
            eprintln!("{message}");
        }
        Page::NotFound(missing) => {
            eprintln!("{}", missing.message());
            eprintln!("Browse all servers: {}", config.href("/browse"));
        }
        Page::Home(home) => print_home(home, config),
        Page::Browse(browse) => print_browse(browse, config, view),
        Page::Categories(categories) => print_categories(categories, config),
        Page::Category(category) => print_category(category, config),
        Page::Detail(detail) => print_detail(detail, config),
        Page::About(info) | Page::Contact(info) | Page::DataSources(info) => print_info(info),
    }

    if !matches!(page, Page::Loading | Page::Failed { .. } | Page::NotFound(_)) {
        print_footer(state, config);
    }
}

fn print_footer(state: &LoadState, config: &SiteConfig) {
    let details = footer(state, config);

    println!();
    match details.total_entries {
        Some(total) => println!("MCP Navigator · {total} servers · built {}", details.build_time),
        None => println!("MCP Navigator · built {}", details.build_time),
    }
    if !details.categories.is_empty() {
        let links: Vec<String> = details
            .categories
            .iter()
            .map(|c| {
                let link = config.href(&Route::Category(c.slug.clone()).path());
                format!("{} {}", c.name, link)
            })
            .collect();
        println!("Categories: {}", links.join(" · "));
    }
}

fn print_home(home: &HomePage<'_>, config: &SiteConfig) {
    println!("{}", home.title);
    if !home.description.is_empty() {
        println!("{}", home.description);
    }
    println!("\nSearch: {}", config.href("/browse?q=<query>"));

    if !home.featured.is_empty() {
        println!("\nFeatured MCP Servers\n");
        println!("{}", table(&entry_rows(&home.featured, config)));
    }

    if !home.categories.is_empty() {
        println!("\nBrowse by Category\n");
        println!("{}", table(&category_rows(&home.categories, config)));
    }
}

fn print_browse(browse: &BrowsePage<'_>, config: &SiteConfig, view: View) {
    if browse.results.is_empty() {
        println!("No MCP servers found.");
        println!("Try adjusting your search or filters.");
        return;
    }

    println!("{}\n", browse.summary_line());
    match view {
        View::Grid => println!("{}", table(&entry_rows(&browse.results, config))),
        View::List => {
            for card in &browse.results {
                let entry = card.entry;
                println!("{}  {}", entry.name, entry.level().stars());
                println!("  Category: {}", entry.category);
                println!("  {}", entry.description);
                if let Some(repository) = entry.repository() {
                    println!("  Repository: {repository}");
                }
                println!("  {}", config.href(&Route::Detail(card.slug.clone()).path()));
                println!();
            }
        }
    }
}

fn print_categories(page: &CategoriesPage<'_>, config: &SiteConfig) {
    println!("MCP Categories\n");
    println!("{}", table(&category_rows(&page.categories, config)));
    println!(
        "\n{} servers across {} categories, {} per category on average",
        page.total_entries,
        page.categories.len(),
        page.average_per_category
    );
}

fn print_category(page: &CategoryPage<'_>, config: &SiteConfig) {
    let category = &page.category;
    println!("{} {}", category.icon, category.name);
    if !category.description.is_empty() {
        println!("{}", category.description);
    }
    println!();

    if page.entries.is_empty() {
        println!("No MCP servers found.");
    } else {
        println!("{} server(s)\n", page.entries.len());
        println!("{}", table(&entry_rows(&page.entries, config)));
    }

    if !page.others.is_empty() {
        println!("\nExplore Other Categories\n");
        println!("{}", table(&category_rows(&page.others, config)));
    }
}

fn print_detail(page: &DetailPage<'_>, config: &SiteConfig) {
    let entry = page.entry;
    let category_name = page
        .category
        .map(|c| c.name.as_str())
        .unwrap_or(entry.category.as_str());

    println!("Home > {} > {}\n", category_name, entry.name);
    println!("{}", entry.name);
    println!("{}\n", entry.description);

    println!("Popularity: {} {}", entry.level().stars(), entry.level().label());
    if let Some(stars) = entry.popularity.github_stars {
        println!("GitHub stars: {stars}");
    }
    if let Some(downloads) = entry.popularity.npm_downloads {
        println!("npm downloads: {downloads}");
    }
    println!(
        "Category: {} ({})",
        category_name,
        config.href(&Route::Category(page.category_slug.clone()).path())
    );
    if !entry.maintainer.is_empty() {
        println!("Maintainer: {}", entry.maintainer);
    }
    if !entry.last_updated.is_empty() {
        println!("Last updated: {}", entry.last_updated);
    }
    if let Some(repository) = entry.repository() {
        println!("Repository: {repository}");
    }
    if let Some(source) = &entry.source {
        println!("Source: {source}");
    }

    if !entry.install_instructions.is_empty() {
        println!("\nInstallation\n  {}", entry.install_instructions);
    }

    print_list("Documentation", &entry.documentation_links);
    print_list("Use Cases", &entry.use_cases);
    print_list("Examples", &entry.examples);

    if !page.related.is_empty() {
        println!("\nRelated MCP Servers\n");
        println!("{}", table(&entry_rows(&page.related, config)));
    }
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{heading}");
    for item in items {
        println!("  - {item}");
    }
}

fn print_info(page: &InfoPage<'_>) {
    println!("{}", page.title);
    for section in page.sections {
        println!("\n{}\n  {}", section.heading, section.body);
    }

    for (label, href) in &page.links {
        println!("{label}: {href}");
    }

    if !page.data_sources.is_empty() {
        println!("\nData Source Details\n");
        println!("{}", table(&source_rows(page.data_sources)));
    }

    if let Some(stats) = &page.stats {
        println!("\nMCP Statistics");
        println!("  Servers: {}", stats.total_entries);
        println!("  Categories: {}", stats.total_categories);
        if !stats.collection_date.is_empty() {
            println!("  Collected: {}", stats.collection_date);
        }
        if !stats.version.is_empty() {
            println!("  Version: {}", stats.version);
        }
        if !stats.sources.is_empty() {
            println!("  Primary sources: {}", stats.sources.join(", "));
        }
    }
}

/// Run the catalog consistency checks; exits with status 1 on errors
pub fn execute_validate(state: &LoadState, json: bool) -> Result<()> {
    let catalog = match state {
        LoadState::Ready(catalog) => catalog,
        LoadState::Failed(message) => {
            eprintln!("Error: Failed to load MCP data");
            eprintln!("{message}");
            std::process::exit(1);
        }
        LoadState::Loading => {
            eprintln!("Error: catalog did not finish loading");
            std::process::exit(1);
        }
    };

    let report = CatalogReport::build(catalog);
    let findings = report.findings();

    if json {
        let output = serde_json::json!({
            "clean": report.is_clean(),
            "total_errors": report.error_count(),
            "total_warnings": report.warning_count(),
            "report": report,
            "findings": findings.iter().map(|(severity, message)| {
                serde_json::json!({
                    "severity": severity,
                    "message": message,
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Total servers: {}", report.total_entries);
        println!("Total categories: {}\n", report.total_categories);

        let rows: Vec<BreakdownRow> = report
            .category_breakdown
            .iter()
            .map(|(category, servers)| BreakdownRow {
                category: category.clone(),
                servers: *servers,
            })
            .collect();
        println!("{}\n", table(&rows));

        if findings.is_empty() {
            println!("✅ No issues found");
        }
        for (severity, message) in &findings {
            match severity {
                Severity::Error => println!("❌ {message}"),
                Severity::Warning => println!("⚠️  {message}"),
            }
        }
        println!(
            "\n{} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

pub fn print_slug(text: &str, reverse: bool) {
    if reverse {
        println!("{}", from_slug(text));
    } else {
        println!("{}", to_slug(text));
    }
}

//! mcp-navigator - browse the MCP server directory from a terminal
//!
//! Every command builds one catalog store, loads it once and prints the
//! page for a single route.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use navigator_core::catalog::query::is_all;
use navigator_core::catalog::{source_for, CatalogStore, PopularityLevel, SortKey};
use navigator_core::config::SiteConfig;
use navigator_core::site::{BrowseParams, Route};

mod pages_cli;

use pages_cli::{Output, View};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "mcp-navigator",
    about = "Discover and explore Model Context Protocol servers",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Site configuration file (YAML)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document: a file path or an http(s) URL
    #[clap(long, global = true)]
    data: Option<String>,

    /// Base path the site is served under, used for printed links
    #[clap(long, global = true)]
    base_path: Option<String>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit structured JSON traces on stderr
    #[clap(long, global = true)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Featured servers and category overview
    Home {
        #[clap(long)]
        json: bool,
    },

    /// Search and filter the directory
    Browse {
        /// Matches name, description, category and use cases
        query: Option<String>,

        /// Category name, or "all"
        #[clap(long)]
        category: Option<String>,

        /// high, medium or low
        #[clap(long)]
        popularity: Option<PopularityLevel>,

        /// name or popularity
        #[clap(long, default_value = "name")]
        sort: SortKey,

        #[clap(long, value_enum, default_value = "grid")]
        view: View,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// All categories, largest first
    Categories {
        #[clap(long)]
        json: bool,
    },

    /// Servers in one category
    Category {
        /// Category slug, e.g. "ai-ml"
        slug: String,

        #[clap(long)]
        json: bool,
    },

    /// Show detailed information about a server
    Show {
        /// Server slug, e.g. "brave-search"
        slug: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Render any site path, e.g. "/browse?q=search&sort=popularity"
    Open {
        path: String,

        #[clap(long)]
        json: bool,
    },

    /// About MCP Navigator
    About,

    /// Contact details
    Contact,

    /// Where the directory data comes from
    Sources,

    /// Check the catalog for drift and missing fields
    Validate {
        #[clap(long)]
        json: bool,
    },

    /// Convert a name to its URL slug (or back with --reverse)
    Slug {
        text: String,

        /// Turn a slug back into a display name
        #[clap(long)]
        reverse: bool,
    },
}

impl Command {
    /// Route to render and how to print it; `None` for commands that are
    /// not pages
    fn route(&self, config: &SiteConfig) -> Option<(Route, Output)> {
        let text = Output::default();
        let json = |json: bool| Output {
            json,
            ..Output::default()
        };

        let routed = match self {
            Command::Home { json: j } => (Route::Home, json(*j)),
            Command::Browse {
                query,
                category,
                popularity,
                sort,
                view,
                json: j,
            } => {
                let params = BrowseParams {
                    query: query.clone().unwrap_or_default(),
                    category: category.clone().filter(|c| !is_all(c)),
                    popularity: *popularity,
                    sort: *sort,
                };
                (
                    Route::Browse(params),
                    Output {
                        json: *j,
                        view: *view,
                    },
                )
            }
            Command::Categories { json: j } => (Route::Categories, json(*j)),
            Command::Category { slug, json: j } => (Route::Category(slug.clone()), json(*j)),
            Command::Show { slug, json: j } => (Route::Detail(slug.clone()), json(*j)),
            Command::Open { path, json: j } => (Route::parse(path, &config.base_path), json(*j)),
            Command::About => (Route::About, text),
            Command::Contact => (Route::Contact, text),
            Command::Sources => (Route::DataSources, text),
            Command::Validate { .. } | Command::Slug { .. } => return None,
        };
        Some(routed)
    }
}

/// Initialize tracing; all log output goes to stderr
fn initialize_tracing(log_level: &LogLevel, trace: bool) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if trace {
        if let Ok(parsed) = "navigator_core=trace".parse() {
            filter = filter.add_directive(parsed);
        }

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();

        tracing::info!("MCP Navigator tracing enabled");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Defaults, file and environment, then command-line flags
fn site_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_source = data.clone();
    }
    if let Some(base_path) = &cli.base_path {
        config.base_path = base_path.clone();
    }
    debug!("Site config: {:?}", config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, cli.trace);

    if let Command::Slug { text, reverse } = &cli.command {
        pages_cli::print_slug(text, *reverse);
        return Ok(());
    }

    let config = site_config(&cli)?;
    let store = CatalogStore::new(source_for(&config.data_source));
    let state = store.load().await;

    match cli.command.route(&config) {
        Some((route, output)) => pages_cli::execute(&route, &state, &config, output),
        None => {
            let json = matches!(cli.command, Command::Validate { json: true });
            pages_cli::execute_validate(&state, json)
        }
    }
}

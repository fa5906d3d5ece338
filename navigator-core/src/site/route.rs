//! Site routes
//!
//! Paths look like `/browse?q=search&sort=popularity`,
//! `/category/<slug>` and `/mcp/<slug>`. Slugs are never decoded back
//! into names here; resolution happens against the loaded catalog.

use serde::Serialize;

use crate::catalog::query::is_all;
use crate::catalog::slug::to_slug;
use crate::catalog::{EntryFilter, PopularityLevel, SortKey};
use crate::config::normalize_base_path;

/// A parsed site location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Browse(BrowseParams),
    Categories,
    Category(String),
    Detail(String),
    About,
    Contact,
    DataSources,
    NotFound(String),
}

/// Search, filter and sort state of the browse page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrowseParams {
    pub query: String,
    /// Category name, `None` for all
    pub category: Option<String>,
    /// `None` for all levels
    pub popularity: Option<PopularityLevel>,
    pub sort: SortKey,
}

impl BrowseParams {
    /// Browse state for a free-text search
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn filter(&self) -> EntryFilter {
        let mut filter = EntryFilter::new().query(self.query.clone());
        if let Some(category) = &self.category {
            filter = filter.category(category.clone());
        }
        if let Some(level) = self.popularity {
            filter = filter.popularity(level);
        }
        filter
    }

    /// Parse `key=value` pairs; unknown tokens fall back to defaults
    pub fn from_query_string(query: &str) -> Self {
        let mut params = BrowseParams::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => params.query = value.into_owned(),
                "category" if !is_all(&value) => {
                    params.category = Some(value.into_owned())
                }
                "popularity" => params.popularity = value.parse().ok(),
                "sort" => params.sort = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        params
    }

    /// Encode non-default parameters as a query string
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            serializer.append_pair("q", &self.query);
        }
        if let Some(category) = &self.category {
            serializer.append_pair("category", category);
        }
        if let Some(level) = self.popularity {
            serializer.append_pair("popularity", level.as_str());
        }
        if self.sort != SortKey::default() {
            serializer.append_pair("sort", self.sort.as_str());
        }
        serializer.finish()
    }
}

impl Route {
    /// Parse a request path served under `base_path`
    pub fn parse(path: &str, base_path: &str) -> Route {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path, ""),
        };

        let path = strip_base(path, base_path);
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["browse"] => Route::Browse(BrowseParams::from_query_string(query)),
            // Legacy capitalised link
            ["categories"] | ["Categories"] => Route::Categories,
            ["category", slug] => Route::Category((*slug).to_string()),
            ["mcp", slug] => Route::Detail((*slug).to_string()),
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            ["data-sources"] => Route::DataSources,
            _ => Route::NotFound(format!("/{}", segments.join("/"))),
        }
    }

    /// Route to an entry's detail page
    pub fn entry(name: &str) -> Route {
        Route::Detail(to_slug(name))
    }

    /// Route to a category page
    pub fn category(name: &str) -> Route {
        Route::Category(to_slug(name))
    }

    /// Canonical path, without the base path
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Browse(params) => {
                let query = params.to_query_string();
                if query.is_empty() {
                    "/browse".to_string()
                } else {
                    format!("/browse?{query}")
                }
            }
            Route::Categories => "/categories".to_string(),
            Route::Category(slug) => format!("/category/{slug}"),
            Route::Detail(slug) => format!("/mcp/{slug}"),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::DataSources => "/data-sources".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

fn strip_base<'a>(path: &'a str, base_path: &str) -> &'a str {
    let base = normalize_base_path(base_path);
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base.as_str()) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

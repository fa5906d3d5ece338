//! Site structure: routes, page models and static content
//!
//! A view asks [`render`] for the page at a [`Route`] and draws whatever
//! comes back. Routing never touches the catalog; page building never
//! performs I/O.

pub mod info;
mod pages;
mod route;

pub use pages::{
    footer, render, summaries, BrowsePage, CatalogStats, CategoriesPage, CategoryLink,
    CategoryPage, CategorySummary, DetailPage, EntryCard, Footer, HomePage, InfoPage, NotFound,
    NotFoundKind, Page, UNCATEGORIZED, UNCATEGORIZED_SLUG,
};
pub use route::{BrowseParams, Route};

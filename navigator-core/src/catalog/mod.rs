//! MCP Navigator Catalog - directory data access
//!
//! This module owns everything that touches the catalog document:
//! - Parsing the bundled JSON directory into typed entries and categories
//! - Loading it exactly once per session through a [`CatalogStore`]
//! - Filtering and sorting entries for list views
//! - Mapping entry and category names to URL slugs and back
//!
//! # Architecture
//!
//! ```text
//! data/comprehensive_mcp_directory.json
//!            │
//!            ▼
//!     CatalogSource (file / http)
//!            │  fetched once
//!            ▼
//!     CatalogStore  Loading → Ready | Failed
//!            │  read-many
//!            ▼
//!     query::select + slug::resolve  →  site pages
//! ```

mod error;
mod model;
pub mod query;
pub mod slug;
mod source;
mod store;
mod validate;

pub use error::{CatalogError, ParseError};
pub use model::{
    truncate_text, Catalog, CatalogMetadata, Category, Entries, Entry, PopularityIndicators,
    PopularityLevel,
};
pub use query::{EntryFilter, SortKey};
pub use source::{source_for, CatalogSource, FileSource, HttpSource, StaticSource};
pub use store::{CatalogStore, LoadState};
pub use validate::{CatalogReport, CountDrift, Severity};

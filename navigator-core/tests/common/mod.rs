//! Shared helpers for integration tests

#![allow(dead_code)]

use navigator_core::catalog::{Catalog, CatalogStore, FileSource, LoadState};
use std::path::PathBuf;
use std::sync::{Arc, Once};

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Path to a file under `tests/fixtures/`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A store over the shared fixture, already loaded
pub async fn loaded_fixture_store() -> (CatalogStore, Arc<LoadState>) {
    init_test_logging();
    let store = CatalogStore::new(Box::new(FileSource::new(fixture_path("catalog.json"))));
    let state = store.load().await;
    (store, state)
}

pub fn fixture_catalog() -> Catalog {
    let content = std::fs::read_to_string(fixture_path("catalog.json")).unwrap();
    Catalog::from_json(&content, "fixture").unwrap()
}

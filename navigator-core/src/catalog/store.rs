//! Session-wide catalog store
//!
//! The store is created once at startup, populated once, then read by
//! any number of views. Its state moves from `Loading` to either
//! `Ready` or `Failed` and never changes again.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::model::Catalog;
use super::source::CatalogSource;

/// Observable lifecycle of the catalog
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Catalog),
    Failed(String),
}

impl LoadState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Single-fetch, read-many holder of the catalog
pub struct CatalogStore {
    source: Box<dyn CatalogSource>,
    resolved: OnceCell<Arc<LoadState>>,
    loading: Arc<LoadState>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("source", &self.source.describe())
            .field("state", &self.state())
            .finish()
    }
}

impl CatalogStore {
    /// Create a store in the `Loading` state; nothing is fetched yet
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self {
            source,
            resolved: OnceCell::new(),
            loading: Arc::new(LoadState::Loading),
        }
    }

    /// Current state; every reader gets the same shared instance
    pub fn state(&self) -> Arc<LoadState> {
        self.resolved
            .get()
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.loading))
    }

    /// Fetch the catalog if no fetch has happened yet and return the
    /// resolved state
    ///
    /// Concurrent callers wait on the same fetch. Later calls return the
    /// stored result without touching the source again, including after
    /// a failure.
    pub async fn load(&self) -> Arc<LoadState> {
        self.resolved
            .get_or_init(|| async {
                let origin = self.source.describe();
                let state = match self.source.fetch().await {
                    Ok(catalog) => {
                        info!(
                            "Loaded catalog from {}: {} entries, {} categories",
                            origin,
                            catalog.entries.len(),
                            catalog.categories.len()
                        );
                        LoadState::Ready(catalog)
                    }
                    Err(e) => {
                        warn!("Failed to load catalog from {}: {}", origin, e);
                        LoadState::Failed(e.to_string())
                    }
                };
                Arc::new(state)
            })
            .await
            .clone()
    }

    /// The catalog, once `Ready`
    pub fn catalog(&self) -> Option<&Catalog> {
        self.resolved.get().and_then(|state| state.catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, StaticSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn fetch(&self) -> Result<Catalog, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                Err(CatalogError::Status {
                    url: "http://localhost/data.json".to_string(),
                    status: 503,
                })
            } else {
                Ok(Catalog::default())
            }
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let store = CatalogStore::new(Box::new(StaticSource::new("inline", "{}")));
        assert!(store.state().is_loading());
        assert!(store.catalog().is_none());
    }

    #[tokio::test]
    async fn test_load_is_terminal_and_shared() {
        let store = CatalogStore::new(Box::new(StaticSource::new("inline", "{}")));
        let first = store.load().await;
        let second = store.load().await;
        assert!(first.catalog().is_some());
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &store.state()));
    }

    #[tokio::test]
    async fn test_failure_is_terminal_without_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = CatalogStore::new(Box::new(CountingSource {
            calls: Arc::clone(&calls),
            fail: true,
        }));

        let state = store.load().await;
        let message = state.error().unwrap();
        assert!(message.contains("503"));
        assert!(store.catalog().is_none());

        store.load().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_loads_fetch_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(CatalogStore::new(Box::new(CountingSource {
            calls: Arc::clone(&calls),
            fail: false,
        })));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.load().await })
            })
            .collect();

        let mut states = Vec::new();
        for handle in handles {
            states.push(handle.await.unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(states.iter().all(|s| Arc::ptr_eq(s, &states[0])));
    }
}

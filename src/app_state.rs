//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::RecordStore;
use crate::metrics::ApiMetrics;
use crate::templates::Pages;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once in `main` (or in a test) and cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record storage (PostgreSQL in production).
    pub store: Arc<dyn RecordStore>,
    /// Compiled HTML templates.
    pub pages: Arc<Pages>,
    /// Prometheus registry.
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Bundles the given dependencies.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, pages: Pages, metrics: ApiMetrics) -> Self {
        Self {
            store,
            pages: Arc::new(pages),
            metrics,
        }
    }
}

//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use inventory_core::storage::ProductRepository;

use crate::config::StorageBackend;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Product repository for the configured backend.
    pub products: Arc<dyn ProductRepository>,
    /// Which backend `products` talks to.
    pub backend: StorageBackend,
    /// Root token cancelled on shutdown.
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>, backend: StorageBackend) -> Self {
        Self {
            products,
            backend,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token for a single request, cancelled when the server shuts down.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Cancels every in-flight store operation.
    pub fn signal_shutdown(&self) {
        self.shutdown.cancel();
    }

    /// State backed by an empty in-memory SQLite database.
    #[cfg(all(test, feature = "sqlite"))]
    pub async fn in_memory() -> Self {
        let repository = crate::storage::sqlite::SqliteRepository::new_in_memory()
            .await
            .expect("in-memory database");
        Self::new(Arc::new(repository), StorageBackend::Sqlite)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_cancels_request_tokens() {
        let state = AppState::in_memory().await;
        let token = state.request_token();

        assert!(!token.is_cancelled());
        state.signal_shutdown();
        assert!(token.is_cancelled());
        assert!(state.request_token().is_cancelled());
    }
}

//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! [`ProductRepository`](inventory_core::storage::ProductRepository). Each
//! backend sits behind a feature flag; both are enabled by default and the
//! active one is chosen at startup from [`Config::backend`].
//!
//! # Feature Flags
//!
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! # Examples
//!
//! Build with only SQLite:
//! ```bash
//! cargo build -p inventory --no-default-features --features sqlite
//! ```

use std::sync::Arc;

use anyhow::Result;
use inventory_core::storage::ProductRepository;

use crate::config::{Config, StorageBackend};

#[cfg(not(any(feature = "sqlite", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'dynamodb' feature. \
    Example: cargo build -p inventory --features sqlite"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Opens the repository selected by `config`.
pub async fn connect(config: &Config) -> Result<Arc<dyn ProductRepository>> {
    match config.backend {
        #[cfg(feature = "dynamodb")]
        StorageBackend::DynamoDb => {
            let settings = &config.dynamodb;
            tracing::info!(
                table = %settings.table_name,
                index = %settings.name_index,
                endpoint = ?settings.endpoint_url,
                "Using DynamoDB storage"
            );
            let repository: Arc<dyn ProductRepository> =
                Arc::new(dynamodb::DynamoDbRepository::from_settings(settings).await);
            Ok(repository)
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
            let repository: Arc<dyn ProductRepository> =
                Arc::new(sqlite::SqliteRepository::new(&config.sqlite_path).await?);
            Ok(repository)
        }
        #[allow(unreachable_patterns)]
        backend => anyhow::bail!(
            "Storage backend '{}' is not compiled in; rebuild with the '{}' feature",
            backend.name(),
            backend.name()
        ),
    }
}

use std::{env, fmt, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_TABLE_NAME: &str = "Products";
const DEFAULT_NAME_INDEX: &str = "ProductName-Index";
const DEFAULT_SQLITE_PATH: &str = "inventory.db";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4200";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend '{0}' (expected 'dynamodb' or 'sqlite')")]
    UnknownBackend(String),
}

/// The store products are persisted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    DynamoDb,
    Sqlite,
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DynamoDb => "dynamodb",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(Self::DynamoDb),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// DynamoDB connection and table settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbSettings {
    /// Products table name (default: "Products")
    pub table_name: String,
    /// Secondary index keyed by institution and product name (default: "ProductName-Index")
    pub name_index: String,
    /// Custom endpoint URL, for local DynamoDB
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: StorageBackend,
    pub dynamodb: DynamoDbSettings,
    /// Path to SQLite database file (default: "inventory.db")
    pub sqlite_path: String,
    /// Timeout applied to each HTTP request (default: 10)
    pub request_timeout_seconds: u64,
    /// Origins allowed by CORS (default: "http://localhost:4200")
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORAGE_BACKEND` - `dynamodb` or `sqlite` (default: `sqlite` when
    ///   `SQLITE_PATH` is set, `dynamodb` otherwise)
    /// - `PRODUCTS_TABLE_NAME` - DynamoDB table (default: "Products")
    /// - `PRODUCTS_NAME_INDEX` - DynamoDB name index (default: "ProductName-Index")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `SQLITE_PATH` - SQLite database path (default: "inventory.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - HTTP request timeout (default: 10)
    /// - `CORS_ALLOWED_ORIGINS` - Comma separated origins (default: "http://localhost:4200")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let sqlite_path = lookup("SQLITE_PATH");
        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None if sqlite_path.is_some() => StorageBackend::Sqlite,
            None => StorageBackend::DynamoDb,
        };

        Ok(Self {
            backend,
            dynamodb: DynamoDbSettings {
                table_name: lookup("PRODUCTS_TABLE_NAME")
                    .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
                name_index: lookup("PRODUCTS_NAME_INDEX")
                    .unwrap_or_else(|| DEFAULT_NAME_INDEX.to_string()),
                endpoint_url: lookup("AWS_ENDPOINT_URL"),
                region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            },
            sqlite_path: sqlite_path.unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StorageBackend::DynamoDb,
            dynamodb: DynamoDbSettings {
                table_name: DEFAULT_TABLE_NAME.to_string(),
                name_index: DEFAULT_NAME_INDEX.to_string(),
                endpoint_url: None,
                region: DEFAULT_REGION.to_string(),
            },
            sqlite_path: DEFAULT_SQLITE_PATH.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

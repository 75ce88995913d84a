//! Error types for DynamoDB tooling.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DynamodbError>;

#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Institution code must be 10 digits, got '{0}'")]
    InvalidInstitutionCode(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,
}

impl DynamodbError {
    /// Wraps any displayable SDK or builder error.
    pub fn sdk(err: impl std::fmt::Display) -> Self {
        Self::AwsSdk(err.to_string())
    }
}

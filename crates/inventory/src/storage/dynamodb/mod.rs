//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! [`ProductRepository`](inventory_core::storage::ProductRepository) using
//! `aws-sdk-dynamodb`. Reads are expressed as structured requests, driven
//! page by page, and decoded through a typed attribute codec; writes are
//! single-item conditional transactions.

mod client;
mod codec;
mod conversions;
mod error;
mod expressions;
mod keys;
mod pagination;
mod repository;
mod writes;

#[cfg(test)]
pub(crate) mod testing;

pub use repository::DynamoDbRepository;

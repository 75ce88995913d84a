//! The store client seam.
//!
//! Repositories talk to DynamoDB only through [`TableClient`], so tests can
//! swap the SDK client for an in-process table.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{Put, Select, TransactWriteItem, Update};
use aws_sdk_dynamodb::Client;
use inventory_core::storage::{RepositoryError, Result};

use super::codec::Item;
use super::error::{
    is_condition_failure, map_query_error, map_scan_error, map_transact_write_error,
};
use super::expressions::{QueryRequest, ScanRequest};
use super::writes::ConditionalWrite;

/// One page of results and the key to resume from, if any.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}

/// Outcome of a conditional transactional write that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Committed,
    ConditionFailed,
}

/// Minimal store surface consumed by the DynamoDB repository.
#[async_trait]
pub trait TableClient: Send + Sync {
    async fn scan(&self, request: ScanRequest) -> Result<Page>;

    async fn query(&self, request: QueryRequest) -> Result<Page>;

    /// Submits a single-item transaction. Transport failures are `Err`;
    /// a failed condition is `Ok(WriteOutcome::ConditionFailed)`.
    async fn transact_write(&self, write: ConditionalWrite) -> Result<WriteOutcome>;
}

#[async_trait]
impl TableClient for Client {
    async fn scan(&self, request: ScanRequest) -> Result<Page> {
        let output = Client::scan(self)
            .table_name(request.table_name)
            .select(Select::AllAttributes)
            .set_exclusive_start_key(request.exclusive_start_key)
            .send()
            .await
            .map_err(map_scan_error)?;

        Ok(Page {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn query(&self, request: QueryRequest) -> Result<Page> {
        let key_condition = request.key_condition_expression();
        let filter = request.filter_expression();
        let names = request.expression_attribute_names();
        let values = request.expression_attribute_values();

        let output = Client::query(self)
            .table_name(request.table_name)
            .set_index_name(request.index_name)
            .key_condition_expression(key_condition)
            .set_filter_expression(filter)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .scan_index_forward(true)
            .set_exclusive_start_key(request.exclusive_start_key)
            .send()
            .await
            .map_err(map_query_error)?;

        Ok(Page {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn transact_write(&self, write: ConditionalWrite) -> Result<WriteOutcome> {
        let condition = write.condition_expression();
        let names = write.expression_attribute_names();
        let values = write.expression_attribute_values();
        let update_expression = write.update_expression();

        let transact_item = match write {
            ConditionalWrite::Insert { table_name, item } => {
                let put = Put::builder()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .condition_expression(condition)
                    .set_expression_attribute_names(Some(names))
                    .build()
                    .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
                TransactWriteItem::builder().put(put).build()
            }
            ConditionalWrite::Update {
                table_name, key, ..
            } => {
                let update = Update::builder()
                    .table_name(table_name)
                    .set_key(Some(key))
                    .set_update_expression(update_expression)
                    .condition_expression(condition)
                    .set_expression_attribute_names(Some(names))
                    .set_expression_attribute_values(values)
                    .build()
                    .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
                TransactWriteItem::builder().update(update).build()
            }
        };

        match self
            .transact_write_items()
            .transact_items(transact_item)
            .send()
            .await
        {
            Ok(_) => Ok(WriteOutcome::Committed),
            Err(err) if is_condition_failure(&err) => Ok(WriteOutcome::ConditionFailed),
            Err(err) => Err(map_transact_write_error(err)),
        }
    }
}

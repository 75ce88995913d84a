//! DynamoDB repository implementation.
//!
//! Implements [`ProductRepository`] from `inventory_core::storage` on top of a
//! [`TableClient`].

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use tokio_util::sync::CancellationToken;

use inventory_core::product::{Clock, Product, ProductQuery, SystemClock};
use inventory_core::storage::{
    require_insertable, require_institution_code, require_query, require_updatable,
    PageRequest, ProductRepository, RepositoryError, Result,
};

use super::client::{TableClient, WriteOutcome};
use super::codec::Item;
use super::conversions::item_to_product;
use super::expressions::{build_product_query, QueryRequest, ScanRequest};
use super::pagination::fetch_all;
use super::writes::{insert_write, update_write};
use crate::config::DynamoDbSettings;

const ENTITY_TYPE: &str = "Product";

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository<C = Client> {
    client: C,
    table_name: String,
    name_index: String,
    clock: Arc<dyn Clock>,
}

impl<C: TableClient> DynamoDbRepository<C> {
    /// Creates a new repository over the given table and name index.
    pub fn new(client: C, table_name: impl Into<String>, name_index: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            name_index: name_index.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp `Created` and `Updated`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn scan_products(&self, cancel: &CancellationToken) -> Result<Vec<Product>> {
        tracing::debug!(table = %self.table_name, "Scanning products");
        let base = ScanRequest::new(&self.table_name);
        let items = fetch_all(cancel, |start| {
            self.client.scan(base.clone().starting_at(start))
        })
        .await?;
        decode(&items)
    }

    async fn query_items(
        &self,
        request: QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        tracing::debug!(
            table = %self.table_name,
            index = ?request.index_name,
            key_condition = %request.key_condition_expression(),
            filter = ?request.filter_expression(),
            "Querying products"
        );
        let items = fetch_all(cancel, |start| {
            self.client.query(request.clone().starting_at(start))
        })
        .await?;

        let mut products = decode(&items)?;
        products.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        Ok(products)
    }
}

impl DynamoDbRepository<Client> {
    /// Creates a repository from settings, loading AWS configuration from the
    /// default credential chain.
    pub async fn from_settings(settings: &DynamoDbSettings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region.clone()));
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        Self::new(
            Client::new(&config),
            &settings.table_name,
            &settings.name_index,
        )
    }
}

fn decode(items: &[Item]) -> Result<Vec<Product>> {
    items.iter().map(item_to_product).collect()
}

fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(RepositoryError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl<C: TableClient> ProductRepository for DynamoDbRepository<C> {
    async fn list_products(
        &self,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        let mut products = self.scan_products(cancel).await?;
        products.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(page.slice(products))
    }

    async fn list_products_by_institution(
        &self,
        institution_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        require_institution_code(institution_code)?;
        let request = build_product_query(
            &self.table_name,
            &self.name_index,
            &ProductQuery::new(institution_code),
        );
        self.query_items(request, cancel).await
    }

    async fn query_products(
        &self,
        query: &ProductQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        require_query(query)?;
        let request = build_product_query(&self.table_name, &self.name_index, query);
        self.query_items(request, cancel).await
    }

    async fn insert_product(&self, product: &Product, cancel: &CancellationToken) -> Result<()> {
        require_insertable(product)?;
        ensure_active(cancel)?;

        let write = insert_write(&self.table_name, product, &self.clock.timestamp());
        match self.client.transact_write(write).await? {
            WriteOutcome::Committed => {
                tracing::info!(product = %product.key(), "Product inserted");
                Ok(())
            }
            WriteOutcome::ConditionFailed => Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY_TYPE,
                id: product.key().to_string(),
            }),
        }
    }

    async fn update_product(&self, product: &Product, cancel: &CancellationToken) -> Result<()> {
        require_updatable(product)?;
        ensure_active(cancel)?;

        let write = update_write(&self.table_name, product, &self.clock.timestamp());
        match self.client.transact_write(write).await? {
            WriteOutcome::Committed => {
                tracing::info!(product = %product.key(), "Product updated");
                Ok(())
            }
            WriteOutcome::ConditionFailed => Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: product.key().to_string(),
            }),
        }
    }
}

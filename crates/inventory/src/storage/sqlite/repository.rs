//! SQLite repository implementation.
//!
//! Implements [`ProductRepository`] from `inventory_core::storage` using SQLite.
//! Insert and update are single statements, so the existence check and the
//! write are one atomic unit inside the database.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use tokio_util::sync::CancellationToken;

use inventory_core::product::{Clock, Product, ProductQuery, SystemClock};
use inventory_core::storage::{
    require_insertable, require_institution_code, require_query, require_updatable,
    PageRequest, ProductRepository, RepositoryError, Result,
};

use super::conversions::row_to_product;
use super::error::map_tokio_rusqlite_error;
use super::schema;

const ENTITY_TYPE: &str = "Product";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn collect_products(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> tokio_rusqlite::Result<Vec<Product>> {
    let rows = stmt.query_map(params, row_to_product).map_err(wrap_err)?;

    let mut products = Vec::new();
    for row_result in rows {
        products.push(row_result.map_err(wrap_err)?);
    }
    Ok(products)
}

/// Races a read against cancellation.
async fn cancellable<T>(
    cancel: &CancellationToken,
    read: impl Future<Output = Result<T>>,
) -> Result<T> {
    if cancel.is_cancelled() {
        return Err(RepositoryError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RepositoryError::Cancelled),
        result = read => result,
    }
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
    clock: Arc<dyn Clock>,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self {
            conn,
            clock: Arc::new(SystemClock),
        })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self {
            conn,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used to stamp `Created` and `Updated`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn list_products(
        &self,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        let limit = i64::from(page.page_size());
        // Past i64::MAX no row can be reached anyway
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        tracing::debug!(limit, offset, "Listing products");

        let read = self.conn.call(move |conn| {
            let mut stmt = conn
                .prepare(schema::SELECT_PRODUCTS_PAGE)
                .map_err(wrap_err)?;
            collect_products(&mut stmt, rusqlite::params![limit, offset])
        });
        cancellable(cancel, async {
            read.await
                .map_err(|e| map_tokio_rusqlite_error(e, ENTITY_TYPE, "*"))
        })
        .await
    }

    async fn list_products_by_institution(
        &self,
        institution_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        require_institution_code(institution_code)?;
        let code = institution_code.to_string();
        tracing::debug!(institution_code = %code, "Listing products by institution");

        let read = self.conn.call(move |conn| {
            let mut stmt = conn
                .prepare(schema::SELECT_PRODUCTS_BY_INSTITUTION)
                .map_err(wrap_err)?;
            collect_products(&mut stmt, [&code])
        });
        cancellable(cancel, async {
            read.await
                .map_err(|e| map_tokio_rusqlite_error(e, ENTITY_TYPE, institution_code))
        })
        .await
    }

    async fn query_products(
        &self,
        query: &ProductQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>> {
        require_query(query)?;
        let code = query.institution_code.clone();
        let id_prefix = query.product_id_prefix.clone();
        let name_prefix = query.product_name_prefix.clone();
        let in_stocked = query.in_stocked;
        let created = query.created_filter().map(str::to_string);
        let updated = query.updated_filter().map(str::to_string);
        tracing::debug!(institution_code = %code, ?query, "Querying products");

        let read = self.conn.call(move |conn| {
            let mut stmt = conn
                .prepare(schema::SELECT_PRODUCTS_MATCHING)
                .map_err(wrap_err)?;
            collect_products(
                &mut stmt,
                rusqlite::params![code, id_prefix, name_prefix, in_stocked, created, updated],
            )
        });
        cancellable(cancel, async {
            read.await.map_err(|e| {
                map_tokio_rusqlite_error(e, ENTITY_TYPE, query.institution_code.as_str())
            })
        })
        .await
    }

    async fn insert_product(&self, product: &Product, cancel: &CancellationToken) -> Result<()> {
        require_insertable(product)?;
        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        let institution_code = product.institution_code.clone();
        let product_id = product.product_id.clone();
        let product_name = product.product_name.clone();
        let in_stocked = product.in_stocked;
        let created = match product.created.as_deref() {
            Some(created) if !created.is_empty() => created.to_string(),
            _ => self.clock.timestamp(),
        };
        let updated = product.updated.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PRODUCT,
                    rusqlite::params![
                        institution_code,
                        product_id,
                        product_name,
                        in_stocked,
                        created,
                        updated
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY_TYPE, product.key().to_string()))?;

        tracing::info!(product = %product.key(), "Product inserted");
        Ok(())
    }

    async fn update_product(&self, product: &Product, cancel: &CancellationToken) -> Result<()> {
        require_updatable(product)?;
        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        let institution_code = product.institution_code.clone();
        let product_id = product.product_id.clone();
        let product_name = product.product_name.clone();
        let in_stocked = product.in_stocked;
        let updated = self.clock.timestamp();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_PRODUCT,
                        rusqlite::params![
                            institution_code,
                            product_id,
                            product_name,
                            in_stocked,
                            updated
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY_TYPE, product.key().to_string()))?;

        tracing::info!(product = %product.key(), "Product updated");
        Ok(())
    }
}

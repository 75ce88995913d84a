use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::product::{Product, ProductQuery};

use super::{PageRequest, Result};

/// Repository for product inventory operations.
///
/// Every backend must return equivalent results for equivalent stored data.
/// Each call observes `cancel`; a cancelled token fails the call with
/// [`RepositoryError::Cancelled`](super::RepositoryError::Cancelled) and
/// discards any partially fetched results.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Lists one page of all products, ordered by institution code then product ID.
    async fn list_products(
        &self,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>>;

    /// Lists every product of an institution, ascending by product ID.
    async fn list_products_by_institution(
        &self,
        institution_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>>;

    /// Searches an institution's products, ascending by product ID.
    async fn query_products(
        &self,
        query: &ProductQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>>;

    /// Inserts a new product. Fails with `AlreadyExists` if the key is taken.
    async fn insert_product(&self, product: &Product, cancel: &CancellationToken) -> Result<()>;

    /// Updates an existing product. Fails with `NotFound` if the key is absent.
    ///
    /// Only a non-empty `product_name` and a present `in_stocked` are applied;
    /// `updated` is always refreshed and `created` is never touched.
    async fn update_product(&self, product: &Product, cancel: &CancellationToken) -> Result<()>;
}

use serde::{Deserialize, Serialize};

/// Composite identity of a product.
///
/// `institution_code` is the partition discriminator and `product_id` orders
/// products within an institution. Both are immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductKey {
    pub institution_code: String,
    pub product_id: String,
}

impl ProductKey {
    pub fn new(institution_code: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            institution_code: institution_code.into(),
            product_id: product_id.into(),
        }
    }
}

impl std::fmt::Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.institution_code, self.product_id)
    }
}

/// A product held in an institution's inventory.
///
/// Optional fields are `None` when the attribute is absent from storage,
/// which is distinct from a stored zero or empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub institution_code: String,
    pub product_id: String,
    pub product_name: String,
    /// Units in stock.
    pub in_stocked: Option<i32>,
    /// Creation timestamp (`yyyyMMddHHmmss`, UTC). Set once at insert.
    pub created: Option<String>,
    /// Last mutation timestamp (`yyyyMMddHHmmss`, UTC).
    pub updated: Option<String>,
}

impl Product {
    /// Creates a product with no stock count and no timestamps.
    pub fn new(
        institution_code: impl Into<String>,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            institution_code: institution_code.into(),
            product_id: product_id.into(),
            product_name: product_name.into(),
            in_stocked: None,
            created: None,
            updated: None,
        }
    }

    pub fn with_in_stocked(mut self, in_stocked: i32) -> Self {
        self.in_stocked = Some(in_stocked);
        self
    }

    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = Some(updated.into());
        self
    }

    /// Returns the composite key of this product.
    pub fn key(&self) -> ProductKey {
        ProductKey::new(&self.institution_code, &self.product_id)
    }

    /// Ordering used by every listing: institution first, then product ID.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.institution_code, &self.product_id)
    }
}

use super::Product;

/// Search criteria within a single institution.
///
/// Prefixes are matched case-sensitively against the start of the attribute.
/// An empty prefix matches everything. Optional filters only participate
/// when they carry a non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub institution_code: String,
    pub product_id_prefix: String,
    pub product_name_prefix: String,
    pub in_stocked: Option<i32>,
    /// Prefix of the `Created` timestamp, typically a `yyyyMMdd` date.
    pub created_prefix: Option<String>,
    /// Prefix of the `Updated` timestamp, typically a `yyyyMMdd` date.
    pub updated_prefix: Option<String>,
}

impl ProductQuery {
    pub fn new(institution_code: impl Into<String>) -> Self {
        Self {
            institution_code: institution_code.into(),
            ..Self::default()
        }
    }

    pub fn with_product_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.product_id_prefix = prefix.into();
        self
    }

    pub fn with_product_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.product_name_prefix = prefix.into();
        self
    }

    pub fn with_in_stocked(mut self, in_stocked: i32) -> Self {
        self.in_stocked = Some(in_stocked);
        self
    }

    pub fn with_created_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.created_prefix = Some(prefix.into());
        self
    }

    pub fn with_updated_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.updated_prefix = Some(prefix.into());
        self
    }

    /// The `Created` prefix filter, if it is active.
    pub fn created_filter(&self) -> Option<&str> {
        non_empty(self.created_prefix.as_deref())
    }

    /// The `Updated` prefix filter, if it is active.
    pub fn updated_filter(&self) -> Option<&str> {
        non_empty(self.updated_prefix.as_deref())
    }

    /// Returns true if the product satisfies every active criterion.
    ///
    /// A product without a `Created`/`Updated` value never matches an active
    /// prefix filter on that attribute.
    pub fn matches(&self, product: &Product) -> bool {
        if product.institution_code != self.institution_code {
            return false;
        }
        if !product.product_id.starts_with(&self.product_id_prefix) {
            return false;
        }
        if !product.product_name.starts_with(&self.product_name_prefix) {
            return false;
        }
        if let Some(in_stocked) = self.in_stocked {
            if product.in_stocked != Some(in_stocked) {
                return false;
            }
        }
        if let Some(prefix) = self.created_filter() {
            if !has_prefix(product.created.as_deref(), prefix) {
                return false;
            }
        }
        if let Some(prefix) = self.updated_filter() {
            if !has_prefix(product.updated.as_deref(), prefix) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn has_prefix(value: Option<&str>, prefix: &str) -> bool {
    value.is_some_and(|v| v.starts_with(prefix))
}

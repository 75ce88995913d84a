//! Eager key and payload validation shared by every backend.
//!
//! Repositories call these before touching the store so a missing key never
//! reaches the wire as a null-key transport error.

use crate::product::{Product, ProductQuery};

use super::{RepositoryError, Result};

pub const INSTITUTION_CODE: &str = "InstitutionCode";
pub const PRODUCT_ID: &str = "ProductId";

/// Fails with `MissingKey` when the partition key is empty.
pub fn require_institution_code(institution_code: &str) -> Result<()> {
    if institution_code.is_empty() {
        return Err(RepositoryError::MissingKey(INSTITUTION_CODE));
    }
    Ok(())
}

/// Fails with `InvalidData` unless the code is exactly ten ASCII digits.
///
/// Applied at the API edge to codes taken from a URL path.
pub fn require_institution_code_format(institution_code: &str) -> Result<()> {
    if institution_code.len() == 10 && institution_code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(RepositoryError::InvalidData(format!(
            "InstitutionCode must be 10 digits, got '{institution_code}'"
        )))
    }
}

/// Fails with `MissingKey` when either half of the composite key is empty.
pub fn require_product_key(product: &Product) -> Result<()> {
    require_institution_code(&product.institution_code)?;
    if product.product_id.is_empty() {
        return Err(RepositoryError::MissingKey(PRODUCT_ID));
    }
    Ok(())
}

fn require_valid_stock(product: &Product) -> Result<()> {
    match product.in_stocked {
        Some(in_stocked) if in_stocked < 0 => Err(RepositoryError::InvalidData(format!(
            "InStocked must not be negative, got {in_stocked}"
        ))),
        _ => Ok(()),
    }
}

/// Validates a product about to be inserted.
pub fn require_insertable(product: &Product) -> Result<()> {
    require_product_key(product)?;
    require_valid_stock(product)?;
    if product.product_name.is_empty() {
        return Err(RepositoryError::InvalidData(
            "ProductName must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates a partial update: the key must be complete, other fields are optional.
pub fn require_updatable(product: &Product) -> Result<()> {
    require_product_key(product)?;
    require_valid_stock(product)
}

pub fn require_query(query: &ProductQuery) -> Result<()> {
    require_institution_code(&query.institution_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_institution_code_is_missing_key() {
        assert_eq!(
            require_institution_code(""),
            Err(RepositoryError::MissingKey("InstitutionCode"))
        );
        assert!(require_institution_code("9900000001").is_ok());
    }

    #[test]
    fn test_institution_code_format_is_ten_ascii_digits() {
        assert!(require_institution_code_format("9900000001").is_ok());
        for code in ["990000001", "99000000012", "99000000a1", "９９00000001", ""] {
            assert!(
                matches!(
                    require_institution_code_format(code),
                    Err(RepositoryError::InvalidData(_))
                ),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_product_id_is_missing_key() {
        let product = Product::new("9900000001", "", "Widget");
        assert_eq!(
            require_product_key(&product),
            Err(RepositoryError::MissingKey("ProductId"))
        );
    }

    #[test]
    fn test_institution_code_checked_before_product_id() {
        let product = Product::new("", "", "Widget");
        assert_eq!(
            require_product_key(&product),
            Err(RepositoryError::MissingKey("InstitutionCode"))
        );
    }

    #[test]
    fn test_insert_requires_product_name() {
        let product = Product::new("9900000001", "P001", "");
        assert!(matches!(
            require_insertable(&product),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_update_allows_empty_product_name() {
        let product = Product::new("9900000001", "P001", "");
        assert!(require_updatable(&product).is_ok());
    }

    #[test]
    fn test_negative_stock_is_invalid() {
        let product = Product::new("9900000001", "P001", "Widget").with_in_stocked(-1);

        assert!(matches!(
            require_insertable(&product),
            Err(RepositoryError::InvalidData(_))
        ));
        assert!(matches!(
            require_updatable(&product),
            Err(RepositoryError::InvalidData(_))
        ));
        assert!(require_updatable(&product.with_in_stocked(0)).is_ok());
    }

    #[test]
    fn test_query_requires_institution_code() {
        assert_eq!(
            require_query(&ProductQuery::default()),
            Err(RepositoryError::MissingKey("InstitutionCode"))
        );
    }
}

use serde::{Deserialize, Serialize};

use inventory_core::{
    product::{Product, ProductQuery},
    storage::RepositoryError,
};

/// Request body for inserting, updating and searching products.
///
/// Every field is optional on the wire; which ones matter depends on the
/// operation. For a search, `ProductId`, `ProductName`, `Created` and
/// `Updated` are prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductRequest {
    pub institution_code: String,
    pub product_id: String,
    pub product_name: String,
    pub in_stocked: Option<i32>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl ProductRequest {
    /// Binds the request to the institution named in the URL path.
    ///
    /// An empty body code takes the path value; a different one is rejected.
    pub fn for_institution(mut self, institution_code: &str) -> Result<Self, RepositoryError> {
        if self.institution_code.is_empty() {
            self.institution_code = institution_code.to_string();
        } else if self.institution_code != institution_code {
            return Err(RepositoryError::InvalidData(format!(
                "InstitutionCode '{}' does not match path '{}'",
                self.institution_code, institution_code
            )));
        }
        Ok(self)
    }

    pub fn into_product(self) -> Product {
        Product {
            institution_code: self.institution_code,
            product_id: self.product_id,
            product_name: self.product_name,
            in_stocked: self.in_stocked,
            created: self.created,
            updated: self.updated,
        }
    }

    pub fn into_query(self) -> ProductQuery {
        ProductQuery {
            institution_code: self.institution_code,
            product_id_prefix: self.product_id,
            product_name_prefix: self.product_name,
            in_stocked: self.in_stocked,
            created_prefix: self.created,
            updated_prefix: self.updated,
        }
    }
}

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductResponse {
    pub institution_code: String,
    pub product_id: String,
    pub product_name: String,
    pub in_stocked: Option<i32>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            institution_code: product.institution_code,
            product_id: product.product_id,
            product_name: product.product_name,
            in_stocked: product.in_stocked,
            created: product.created,
            updated: product.updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_pascal_case_with_defaults() {
        let request: ProductRequest =
            serde_json::from_str(r#"{"ProductId":"P001","InStocked":4}"#).unwrap();

        assert_eq!(request.product_id, "P001");
        assert_eq!(request.in_stocked, Some(4));
        assert!(request.institution_code.is_empty());
        assert!(request.product_name.is_empty());
        assert!(request.created.is_none());
    }

    #[test]
    fn test_for_institution_fills_empty_code() {
        let request = ProductRequest::default()
            .for_institution("9900000001")
            .unwrap();
        assert_eq!(request.institution_code, "9900000001");
    }

    #[test]
    fn test_for_institution_rejects_mismatch() {
        let request = ProductRequest {
            institution_code: "9900000002".to_string(),
            ..ProductRequest::default()
        };

        assert!(matches!(
            request.for_institution("9900000001"),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_into_query_treats_fields_as_prefixes() {
        let query = ProductRequest {
            institution_code: "9900000001".to_string(),
            product_id: "P0".to_string(),
            product_name: "Wid".to_string(),
            in_stocked: None,
            created: Some("20240301".to_string()),
            updated: None,
        }
        .into_query();

        assert_eq!(
            query,
            ProductQuery::new("9900000001")
                .with_product_id_prefix("P0")
                .with_product_name_prefix("Wid")
                .with_created_prefix("20240301")
        );
    }

    #[test]
    fn test_response_serializes_stored_attribute_names() {
        let response = ProductResponse::from(
            Product::new("9900000001", "P001", "Widget").with_updated("20240301120000"),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["InstitutionCode"], "9900000001");
        assert_eq!(json["ProductName"], "Widget");
        assert_eq!(json["Updated"], "20240301120000");
        assert!(json["InStocked"].is_null());
    }
}

//! Insert-only and update-only conditional writes.
//!
//! Each write is a single-item transaction whose condition is evaluated by
//! the store atomically with the write. There is no client-side existence
//! check.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use inventory_core::product::Product;

use super::codec::Item;
use super::conversions::{product_key, product_to_item};
use super::keys::{
    name_placeholder, value_placeholder, INSTITUTION_CODE, IN_STOCKED, PRODUCT_ID, PRODUCT_NAME,
    UPDATED,
};

/// A conditional single-item write.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalWrite {
    /// Put the full item; requires both key attributes to be absent.
    Insert { table_name: String, item: Item },
    /// `SET` the listed attributes; requires both key attributes to be present.
    Update {
        table_name: String,
        key: Item,
        assignments: Vec<(&'static str, AttributeValue)>,
    },
}

impl ConditionalWrite {
    pub fn condition_expression(&self) -> String {
        let function = match self {
            Self::Insert { .. } => "attribute_not_exists",
            Self::Update { .. } => "attribute_exists",
        };
        format!(
            "{function}({}) AND {function}({})",
            name_placeholder(INSTITUTION_CODE),
            name_placeholder(PRODUCT_ID)
        )
    }

    pub fn update_expression(&self) -> Option<String> {
        match self {
            Self::Insert { .. } => None,
            Self::Update { assignments, .. } => {
                let sets = assignments
                    .iter()
                    .map(|(attribute, _)| {
                        format!(
                            "{} = {}",
                            name_placeholder(attribute),
                            value_placeholder(attribute)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("SET {sets}"))
            }
        }
    }

    pub fn expression_attribute_names(&self) -> HashMap<String, String> {
        let mut names: HashMap<String, String> = [INSTITUTION_CODE, PRODUCT_ID]
            .into_iter()
            .map(|attribute| (name_placeholder(attribute), attribute.to_string()))
            .collect();
        if let Self::Update { assignments, .. } = self {
            for (attribute, _) in assignments {
                names.insert(name_placeholder(attribute), attribute.to_string());
            }
        }
        names
    }

    /// `None` for inserts, whose condition binds no values.
    pub fn expression_attribute_values(&self) -> Option<HashMap<String, AttributeValue>> {
        match self {
            Self::Insert { .. } => None,
            Self::Update { assignments, .. } => Some(
                assignments
                    .iter()
                    .map(|(attribute, value)| (value_placeholder(attribute), value.clone()))
                    .collect(),
            ),
        }
    }
}

/// Builds the insert for `product`, stamping `Created` with `now` when unset.
pub fn insert_write(table_name: &str, product: &Product, now: &str) -> ConditionalWrite {
    let mut product = product.clone();
    if product.created.as_deref().is_none_or(str::is_empty) {
        product.created = Some(now.to_string());
    }

    ConditionalWrite::Insert {
        table_name: table_name.to_string(),
        item: product_to_item(&product),
    }
}

/// Builds the partial update for `product`.
///
/// `ProductName` is set only when non-empty and `InStocked` only when
/// present. `Updated` is always set to `now`. `Created` is never written.
pub fn update_write(table_name: &str, product: &Product, now: &str) -> ConditionalWrite {
    let mut assignments = Vec::new();
    if !product.product_name.is_empty() {
        assignments.push((
            PRODUCT_NAME,
            AttributeValue::S(product.product_name.clone()),
        ));
    }
    if let Some(in_stocked) = product.in_stocked {
        assignments.push((IN_STOCKED, AttributeValue::N(in_stocked.to_string())));
    }
    assignments.push((UPDATED, AttributeValue::S(now.to_string())));

    ConditionalWrite::Update {
        table_name: table_name.to_string(),
        key: product_key(product),
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::super::keys::CREATED;
    use super::*;

    const NOW: &str = "20240301120000";

    #[test]
    fn test_insert_requires_absent_key() {
        let write = insert_write("Products", &Product::new("9900000001", "P001", "Widget"), NOW);

        assert_eq!(
            write.condition_expression(),
            "attribute_not_exists(#InstitutionCode) AND attribute_not_exists(#ProductId)"
        );
        assert_eq!(write.update_expression(), None);
        assert_eq!(write.expression_attribute_values(), None);
        assert_eq!(write.expression_attribute_names().len(), 2);
    }

    #[test]
    fn test_insert_stamps_created_when_unset() {
        let write = insert_write("Products", &Product::new("9900000001", "P001", "Widget"), NOW);

        let ConditionalWrite::Insert { item, .. } = write else {
            panic!("expected insert");
        };
        assert_eq!(item[CREATED], AttributeValue::S(NOW.to_string()));
        assert!(!item.contains_key(UPDATED));
    }

    #[test]
    fn test_insert_stamps_created_when_empty() {
        let product = Product::new("9900000001", "P001", "Widget").with_created("");
        let ConditionalWrite::Insert { item, .. } = insert_write("Products", &product, NOW) else {
            panic!("expected insert");
        };
        assert_eq!(item[CREATED], AttributeValue::S(NOW.to_string()));
    }

    #[test]
    fn test_insert_keeps_supplied_fields() {
        let product = Product::new("9900000001", "P001", "Widget")
            .with_in_stocked(4)
            .with_created("20230101000000")
            .with_updated("20230102000000");
        let ConditionalWrite::Insert { item, .. } = insert_write("Products", &product, NOW) else {
            panic!("expected insert");
        };

        assert_eq!(item[CREATED], AttributeValue::S("20230101000000".to_string()));
        assert_eq!(item[UPDATED], AttributeValue::S("20230102000000".to_string()));
        assert_eq!(item[IN_STOCKED], AttributeValue::N("4".to_string()));
    }

    #[test]
    fn test_update_requires_present_key() {
        let write = update_write("Products", &Product::new("9900000001", "P001", ""), NOW);
        assert_eq!(
            write.condition_expression(),
            "attribute_exists(#InstitutionCode) AND attribute_exists(#ProductId)"
        );
    }

    #[test]
    fn test_update_with_only_key_sets_updated() {
        let write = update_write("Products", &Product::new("9900000001", "P001", ""), NOW);

        assert_eq!(
            write.update_expression().as_deref(),
            Some("SET #Updated = :Updated")
        );
        let values = write.expression_attribute_values().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[":Updated"], AttributeValue::S(NOW.to_string()));
    }

    #[test]
    fn test_update_sets_supplied_fields() {
        let product = Product::new("9900000001", "P001", "Gadget")
            .with_in_stocked(0)
            .with_created("19990101000000");
        let write = update_write("Products", &product, NOW);

        assert_eq!(
            write.update_expression().as_deref(),
            Some("SET #ProductName = :ProductName, #InStocked = :InStocked, #Updated = :Updated")
        );
        let names = write.expression_attribute_names();
        assert!(!names.contains_key("#Created"));
        assert_eq!(names["#ProductName"], PRODUCT_NAME);
    }

    #[test]
    fn test_update_key_contains_only_key_attributes() {
        let product = Product::new("9900000001", "P001", "Gadget").with_in_stocked(3);
        let ConditionalWrite::Update { key, .. } = update_write("Products", &product, NOW) else {
            panic!("expected update");
        };

        assert_eq!(key.len(), 2);
        assert_eq!(key[PRODUCT_ID], AttributeValue::S("P001".to_string()));
    }
}

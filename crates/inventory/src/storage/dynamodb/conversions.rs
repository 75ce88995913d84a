//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB items and [`Product`].
//! These are testable in isolation without DynamoDB access.

use aws_sdk_dynamodb::types::AttributeValue;
use inventory_core::product::Product;
use inventory_core::storage::Result;

use super::codec::{get_value, required_string, Item};
use super::keys::{CREATED, INSTITUTION_CODE, IN_STOCKED, PRODUCT_ID, PRODUCT_NAME, UPDATED};

/// Convert a Product to a DynamoDB item.
///
/// Absent optional fields are omitted rather than written as `NULL`.
pub fn product_to_item(product: &Product) -> Item {
    let mut item = product_key(product);

    item.insert(
        PRODUCT_NAME.to_string(),
        AttributeValue::S(product.product_name.clone()),
    );
    if let Some(in_stocked) = product.in_stocked {
        item.insert(
            IN_STOCKED.to_string(),
            AttributeValue::N(in_stocked.to_string()),
        );
    }
    if let Some(created) = &product.created {
        item.insert(CREATED.to_string(), AttributeValue::S(created.clone()));
    }
    if let Some(updated) = &product.updated {
        item.insert(UPDATED.to_string(), AttributeValue::S(updated.clone()));
    }

    item
}

/// The primary key attributes of a product.
pub fn product_key(product: &Product) -> Item {
    let mut key = Item::new();
    key.insert(
        INSTITUTION_CODE.to_string(),
        AttributeValue::S(product.institution_code.clone()),
    );
    key.insert(
        PRODUCT_ID.to_string(),
        AttributeValue::S(product.product_id.clone()),
    );
    key
}

/// Convert a DynamoDB item to a Product.
pub fn item_to_product(item: &Item) -> Result<Product> {
    Ok(Product {
        institution_code: required_string(item, INSTITUTION_CODE)?,
        product_id: required_string(item, PRODUCT_ID)?,
        product_name: get_value(item, PRODUCT_NAME, String::new())?,
        in_stocked: get_value(item, IN_STOCKED, None)?,
        created: get_value(item, CREATED, None)?,
        updated: get_value(item, UPDATED, None)?,
    })
}

//! Demo product generation and insert-only seeding.

use std::collections::HashMap;

use aws_sdk_dynamodb::{operation::put_item::PutItemError, types::AttributeValue, Client};
use chrono::{DateTime, Utc};
use inventory_core::{
    product::{format_timestamp, Product},
    storage::require_institution_code_format,
};

use super::error::{DynamodbError, Result};

const PRODUCT_NAMES: [&str; 8] = [
    "Surgical Mask",
    "Nitrile Gloves",
    "Gauze Pad",
    "Saline Solution",
    "Syringe 5ml",
    "Thermometer",
    "Bandage Roll",
    "Alcohol Swab",
];

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: u32,
    pub already_present: u32,
}

pub fn validate_institution_code(institution_code: &str) -> Result<()> {
    require_institution_code_format(institution_code)
        .map_err(|_| DynamodbError::InvalidInstitutionCode(institution_code.to_string()))
}

/// Generate `count` deterministic products for an institution.
pub fn generate_products(institution_code: &str, count: u32, now: DateTime<Utc>) -> Vec<Product> {
    let created = format_timestamp(now);
    (1..=count)
        .map(|n| {
            let base = PRODUCT_NAMES[(n as usize - 1) % PRODUCT_NAMES.len()];
            let batch = (n - 1) / PRODUCT_NAMES.len() as u32;
            let name = if batch == 0 {
                base.to_string()
            } else {
                format!("{base} #{}", batch + 1)
            };
            Product::new(institution_code, format!("P{n:04}"), name)
                .with_in_stocked(((n * 37) % 200) as i32)
                .with_created(created.clone())
        })
        .collect()
}

fn product_to_item(product: &Product) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        (
            "InstitutionCode".to_string(),
            AttributeValue::S(product.institution_code.clone()),
        ),
        (
            "ProductId".to_string(),
            AttributeValue::S(product.product_id.clone()),
        ),
        (
            "ProductName".to_string(),
            AttributeValue::S(product.product_name.clone()),
        ),
    ]);
    if let Some(in_stocked) = product.in_stocked {
        item.insert(
            "InStocked".to_string(),
            AttributeValue::N(in_stocked.to_string()),
        );
    }
    if let Some(created) = &product.created {
        item.insert("Created".to_string(), AttributeValue::S(created.clone()));
    }
    if let Some(updated) = &product.updated {
        item.insert("Updated".to_string(), AttributeValue::S(updated.clone()));
    }
    item
}

/// Insert products one by one, skipping keys that already exist.
pub async fn seed_products(
    client: &Client,
    table_name: &str,
    products: &[Product],
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for product in products {
        let result = client
            .put_item()
            .table_name(table_name)
            .set_item(Some(product_to_item(product)))
            .condition_expression(
                "attribute_not_exists(#InstitutionCode) AND attribute_not_exists(#ProductId)",
            )
            .expression_attribute_names("#InstitutionCode", "InstitutionCode")
            .expression_attribute_names("#ProductId", "ProductId")
            .send()
            .await;

        match result {
            Ok(_) => report.inserted += 1,
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(PutItemError::ConditionalCheckFailedException(_))
                ) =>
            {
                report.already_present += 1
            }
            Err(err) => return Err(DynamodbError::sdk(err)),
        }
    }

    Ok(report)
}

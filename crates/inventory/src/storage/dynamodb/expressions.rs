//! Request and expression building for reads.
//!
//! Conditions are kept structured until the request is sent, so every
//! placeholder that appears in an expression is bound exactly once and no
//! placeholder is bound without being referenced.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use inventory_core::product::ProductQuery;

use super::codec::Item;
use super::keys::{
    name_placeholder, value_placeholder, CREATED, INSTITUTION_CODE, IN_STOCKED, PRODUCT_ID,
    PRODUCT_NAME, UPDATED,
};

// ============================================================================
// Conditions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    BeginsWith,
}

/// A single predicate over one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: &'static str,
    pub comparison: Comparison,
    pub value: AttributeValue,
}

impl Condition {
    pub fn equals(attribute: &'static str, value: AttributeValue) -> Self {
        Self {
            attribute,
            comparison: Comparison::Equals,
            value,
        }
    }

    pub fn begins_with(attribute: &'static str, prefix: &str) -> Self {
        Self {
            attribute,
            comparison: Comparison::BeginsWith,
            value: AttributeValue::S(prefix.to_string()),
        }
    }

    /// Renders the predicate using `#name` / `:value` placeholders.
    pub fn render(&self) -> String {
        let name = name_placeholder(self.attribute);
        let value = value_placeholder(self.attribute);
        match self.comparison {
            Comparison::Equals => format!("{name} = {value}"),
            Comparison::BeginsWith => format!("begins_with({name}, {value})"),
        }
    }
}

fn join(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(Condition::render)
        .collect::<Vec<_>>()
        .join(" AND ")
}

// ============================================================================
// Requests
// ============================================================================

/// A full-table scan, one page at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub table_name: String,
    pub exclusive_start_key: Option<Item>,
}

impl ScanRequest {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            exclusive_start_key: None,
        }
    }

    pub fn starting_at(mut self, key: Option<Item>) -> Self {
        self.exclusive_start_key = key;
        self
    }
}

/// A key-condition query, optionally against a secondary index.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table_name: String,
    pub index_name: Option<String>,
    pub key_conditions: Vec<Condition>,
    pub filters: Vec<Condition>,
    pub exclusive_start_key: Option<Item>,
}

impl QueryRequest {
    pub fn starting_at(mut self, key: Option<Item>) -> Self {
        self.exclusive_start_key = key;
        self
    }

    pub fn key_condition_expression(&self) -> String {
        join(&self.key_conditions)
    }

    /// `None` when no filter predicate is active.
    pub fn filter_expression(&self) -> Option<String> {
        (!self.filters.is_empty()).then(|| join(&self.filters))
    }

    pub fn expression_attribute_names(&self) -> HashMap<String, String> {
        self.conditions()
            .map(|c| (name_placeholder(c.attribute), c.attribute.to_string()))
            .collect()
    }

    pub fn expression_attribute_values(&self) -> HashMap<String, AttributeValue> {
        self.conditions()
            .map(|c| (value_placeholder(c.attribute), c.value.clone()))
            .collect()
    }

    fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.key_conditions.iter().chain(self.filters.iter())
    }
}

/// Builds the query for a product search.
///
/// A non-empty name prefix routes the query through the name index, where
/// `ProductName` is the sort key; the `ProductId` prefix then becomes a
/// filter. Otherwise the base table is queried and the `ProductId` prefix
/// stays in the key condition. Empty prefixes and inactive filters are
/// left out entirely.
pub fn build_product_query(
    table_name: &str,
    name_index: &str,
    query: &ProductQuery,
) -> QueryRequest {
    let mut key_conditions = vec![Condition::equals(
        INSTITUTION_CODE,
        AttributeValue::S(query.institution_code.clone()),
    )];
    let mut filters = Vec::new();

    let index_name = if query.product_name_prefix.is_empty() {
        if !query.product_id_prefix.is_empty() {
            key_conditions.push(Condition::begins_with(PRODUCT_ID, &query.product_id_prefix));
        }
        None
    } else {
        key_conditions.push(Condition::begins_with(
            PRODUCT_NAME,
            &query.product_name_prefix,
        ));
        if !query.product_id_prefix.is_empty() {
            filters.push(Condition::begins_with(PRODUCT_ID, &query.product_id_prefix));
        }
        Some(name_index.to_string())
    };

    if let Some(in_stocked) = query.in_stocked {
        filters.push(Condition::equals(
            IN_STOCKED,
            AttributeValue::N(in_stocked.to_string()),
        ));
    }
    if let Some(prefix) = query.created_filter() {
        filters.push(Condition::begins_with(CREATED, prefix));
    }
    if let Some(prefix) = query.updated_filter() {
        filters.push(Condition::begins_with(UPDATED, prefix));
    }

    QueryRequest {
        table_name: table_name.to_string(),
        index_name,
        key_conditions,
        filters,
        exclusive_start_key: None,
    }
}

//! In-process stand-in for a DynamoDB table.
//!
//! Evaluates the structured conditions of each request, returns results in
//! pages of a fixed size, and applies insert-only / update-only conditions
//! the way the store does.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use inventory_core::product::Product;
use inventory_core::storage::{RepositoryError, Result};

use super::client::{Page, TableClient, WriteOutcome};
use super::codec::Item;
use super::conversions::{item_to_product, product_to_item};
use super::expressions::{Comparison, Condition, QueryRequest, ScanRequest};
use super::keys::{INSTITUTION_CODE, PRODUCT_ID, PRODUCT_NAME};
use super::writes::ConditionalWrite;

type Key = (String, String);

pub struct FakeTable {
    items: Mutex<BTreeMap<Key, Item>>,
    page_size: usize,
    failure: Mutex<Option<RepositoryError>>,
    queries: Mutex<Vec<QueryRequest>>,
    page_requests: Mutex<usize>,
}

impl FakeTable {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            page_size,
            failure: Mutex::new(None),
            queries: Mutex::new(Vec::new()),
            page_requests: Mutex::new(0),
        }
    }

    /// Stores a product directly, bypassing conditions.
    pub fn seed(&self, product: &Product) {
        self.items
            .lock()
            .unwrap()
            .insert(key_of(&product_to_item(product)), product_to_item(product));
    }

    /// Stores a raw item directly.
    pub fn seed_item(&self, item: Item) {
        self.items.lock().unwrap().insert(key_of(&item), item);
    }

    /// Makes every subsequent call fail with `error`.
    pub fn fail_with(&self, error: RepositoryError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn get(&self, institution_code: &str, product_id: &str) -> Option<Product> {
        self.items
            .lock()
            .unwrap()
            .get(&(institution_code.to_string(), product_id.to_string()))
            .map(|item| item_to_product(item).unwrap())
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<QueryRequest> {
        self.queries.lock().unwrap().clone()
    }

    pub fn page_requests(&self) -> usize {
        *self.page_requests.lock().unwrap()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn paginate(&self, candidates: Vec<Item>, start: Option<&Item>) -> Page {
        *self.page_requests.lock().unwrap() += 1;

        let skip = match start {
            Some(start) => {
                let start = key_of(start);
                candidates
                    .iter()
                    .position(|item| key_of(item) == start)
                    .map_or(candidates.len(), |pos| pos + 1)
            }
            None => 0,
        };
        let items: Vec<Item> = candidates
            .iter()
            .skip(skip)
            .take(self.page_size)
            .cloned()
            .collect();
        let last_evaluated_key = (skip + items.len() < candidates.len())
            .then(|| items.last().map(key_item))
            .flatten();

        Page {
            items,
            last_evaluated_key,
        }
    }
}

fn string_attribute(item: &Item, name: &str) -> String {
    match item.get(name) {
        Some(AttributeValue::S(s)) => s.clone(),
        _ => String::new(),
    }
}

fn key_of(item: &Item) -> Key {
    (
        string_attribute(item, INSTITUTION_CODE),
        string_attribute(item, PRODUCT_ID),
    )
}

fn key_item(item: &Item) -> Item {
    [INSTITUTION_CODE, PRODUCT_ID]
        .into_iter()
        .filter_map(|name| item.get(name).map(|v| (name.to_string(), v.clone())))
        .collect()
}

fn evaluate(condition: &Condition, item: &Item) -> bool {
    let Some(actual) = item.get(condition.attribute) else {
        return false;
    };
    match condition.comparison {
        Comparison::Equals => actual == &condition.value,
        Comparison::BeginsWith => match (actual, &condition.value) {
            (AttributeValue::S(actual), AttributeValue::S(prefix)) => actual.starts_with(prefix),
            _ => false,
        },
    }
}

#[async_trait]
impl TableClient for FakeTable {
    async fn scan(&self, request: ScanRequest) -> Result<Page> {
        self.check_failure()?;
        let candidates: Vec<Item> = self.items.lock().unwrap().values().cloned().collect();
        Ok(self.paginate(candidates, request.exclusive_start_key.as_ref()))
    }

    async fn query(&self, request: QueryRequest) -> Result<Page> {
        self.check_failure()?;
        self.queries.lock().unwrap().push(request.clone());

        let mut candidates: Vec<Item> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| request.key_conditions.iter().all(|c| evaluate(c, item)))
            .cloned()
            .collect();
        if request.index_name.is_some() {
            candidates.sort_by_key(|item| {
                (string_attribute(item, PRODUCT_NAME), key_of(item))
            });
        }

        // Filters apply after the page is cut, as on the real store.
        let mut page = self.paginate(candidates, request.exclusive_start_key.as_ref());
        page.items
            .retain(|item| request.filters.iter().all(|c| evaluate(c, item)));
        Ok(page)
    }

    async fn transact_write(&self, write: ConditionalWrite) -> Result<WriteOutcome> {
        self.check_failure()?;
        let mut items = self.items.lock().unwrap();

        match write {
            ConditionalWrite::Insert { item, .. } => {
                let key = key_of(&item);
                if items.contains_key(&key) {
                    return Ok(WriteOutcome::ConditionFailed);
                }
                items.insert(key, item);
            }
            ConditionalWrite::Update {
                key, assignments, ..
            } => {
                let Some(stored) = items.get_mut(&key_of(&key)) else {
                    return Ok(WriteOutcome::ConditionFailed);
                };
                for (attribute, value) in assignments {
                    stored.insert(attribute.to_string(), value);
                }
            }
        }
        Ok(WriteOutcome::Committed)
    }
}

#[async_trait]
impl<T: TableClient + ?Sized> TableClient for Arc<T> {
    async fn scan(&self, request: ScanRequest) -> Result<Page> {
        (**self).scan(request).await
    }

    async fn query(&self, request: QueryRequest) -> Result<Page> {
        (**self).query(request).await
    }

    async fn transact_write(&self, write: ConditionalWrite) -> Result<WriteOutcome> {
        (**self).transact_write(write).await
    }
}

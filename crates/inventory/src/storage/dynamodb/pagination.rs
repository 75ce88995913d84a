//! Drives a paginated scan or query to completion.

use std::future::Future;

use inventory_core::storage::{RepositoryError, Result};
use tokio_util::sync::CancellationToken;

use super::client::Page;
use super::codec::Item;

/// Fetches every page, feeding each continuation key into the next request.
///
/// `fetch_page` receives the exclusive start key for the page (`None` for the
/// first one). Pages are requested strictly one after another. Any failed
/// page aborts the whole fetch and discards what was accumulated so far.
///
/// A continuation key identical to the one just sent means the store made no
/// progress; that fails with `PaginationStalled` instead of looping. The
/// token is checked before every page and raced against the in-flight
/// request.
pub async fn fetch_all<F, Fut>(cancel: &CancellationToken, mut fetch_page: F) -> Result<Vec<Item>>
where
    F: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<Page>>,
{
    let mut items = Vec::new();
    let mut start_key: Option<Item> = None;
    let mut pages = 0usize;

    loop {
        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RepositoryError::Cancelled),
            page = fetch_page(start_key.clone()) => page?,
        };
        pages += 1;
        items.extend(page.items);

        match page.last_evaluated_key {
            Some(next) if !next.is_empty() => {
                if start_key.as_ref() == Some(&next) {
                    return Err(RepositoryError::PaginationStalled);
                }
                start_key = Some(next);
            }
            _ => break,
        }
    }

    tracing::debug!(pages, items = items.len(), "Fetched all pages");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use aws_sdk_dynamodb::types::AttributeValue;

    use super::*;

    fn product_item(id: &str) -> Item {
        let mut item = Item::new();
        item.insert("ProductId".to_string(), AttributeValue::S(id.to_string()));
        item
    }

    fn key(id: &str) -> Item {
        product_item(id)
    }

    fn page(ids: &[&str], last_key: Option<Item>) -> Page {
        Page {
            items: ids.iter().map(|id| product_item(id)).collect(),
            last_evaluated_key: last_key,
        }
    }

    #[tokio::test]
    async fn test_single_page_without_token() {
        let cancel = CancellationToken::new();
        let mut calls = 0;

        let items = fetch_all(&cancel, |_| {
            calls += 1;
            std::future::ready(Ok(page(&["P1", "P2"], None)))
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_accumulates_pages_in_order() {
        let cancel = CancellationToken::new();
        let mut pages = vec![
            page(&["P1", "P2", "P3"], Some(key("P3"))),
            page(&["P4", "P5"], None),
        ]
        .into_iter();
        let mut start_keys = Vec::new();

        let items = fetch_all(&cancel, |start| {
            start_keys.push(start);
            std::future::ready(Ok(pages.next().unwrap()))
        })
        .await
        .unwrap();

        let ids: Vec<_> = items
            .iter()
            .map(|item| item["ProductId"].as_s().unwrap().clone())
            .collect();
        assert_eq!(ids, ["P1", "P2", "P3", "P4", "P5"]);
        assert_eq!(start_keys, [None, Some(key("P3"))]);
    }

    #[tokio::test]
    async fn test_empty_continuation_key_terminates() {
        let cancel = CancellationToken::new();

        let items = fetch_all(&cancel, |_| {
            std::future::ready(Ok(page(&["P1"], Some(Item::new()))))
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_page_discards_accumulated_items() {
        let cancel = CancellationToken::new();
        let mut pages = vec![
            Ok(page(&["P1"], Some(key("P1")))),
            Err(RepositoryError::Transport("Throughput exceeded, please retry".to_string())),
        ]
        .into_iter();

        let result = fetch_all(&cancel, |_| std::future::ready(pages.next().unwrap())).await;

        assert_eq!(
            result,
            Err(RepositoryError::Transport(
                "Throughput exceeded, please retry".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_repeated_continuation_key_is_stalled() {
        let cancel = CancellationToken::new();
        let mut calls = 0;

        let result = fetch_all(&cancel, |_| {
            calls += 1;
            std::future::ready(Ok(page(&["P1"], Some(key("P1")))))
        })
        .await;

        assert_eq!(result, Err(RepositoryError::PaginationStalled));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_page() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut calls = 0;

        let result = fetch_all(&cancel, |_| {
            calls += 1;
            std::future::ready(Ok(page(&["P1"], None)))
        })
        .await;

        assert_eq!(result, Err(RepositoryError::Cancelled));
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_page() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = fetch_all(&cancel, |_| std::future::pending::<Result<Page>>()).await;

        assert_eq!(result, Err(RepositoryError::Cancelled));
    }
}

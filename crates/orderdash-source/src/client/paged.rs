use std::time::Duration;

use super::{orders_from_document, FetchOptions, OrderSourceClient};
use crate::error::SourceError;
use crate::types::RawOrder;

impl OrderSourceClient {
    /// Collects orders across `?page=N` pages, starting at page 1.
    ///
    /// Stops at `max_pages`, at the first page without orders, or at the
    /// first failed page after page 1; whatever was collected so far is
    /// returned. `page_delay_ms` is slept between pages.
    ///
    /// # Errors
    ///
    /// Returns the error of page 1 if the very first fetch fails, so that a
    /// dead source is distinguishable from an empty one.
    pub async fn fetch_all_pages(
        &self,
        base_url: &str,
        options: &FetchOptions,
        max_pages: usize,
        page_delay_ms: u64,
    ) -> Result<Vec<RawOrder>, SourceError> {
        let mut all_orders = Vec::new();

        for page in 1..=max_pages.max(1) {
            if page > 1 && page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(page_delay_ms)).await;
            }

            let url = page_url(base_url, page);
            let document = match self.fetch(&url, options).await {
                Ok(document) => document,
                Err(err) if page == 1 => return Err(err),
                Err(err) => {
                    tracing::warn!(page, error = %err, "page fetch failed; ending collection");
                    break;
                }
            };

            let orders = orders_from_document(&document);
            if orders.is_empty() {
                tracing::info!(page, "no orders on page; collection complete");
                break;
            }

            tracing::info!(page, count = orders.len(), "collected order page");
            all_orders.extend(orders);
        }

        tracing::info!(total = all_orders.len(), "paged order collection finished");
        Ok(all_orders)
    }
}

/// Appends `page=N` using `?` or `&` depending on whether `base_url`
/// already has a query string.
pub(crate) fn page_url(base_url: &str, page: usize) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}page={page}")
}

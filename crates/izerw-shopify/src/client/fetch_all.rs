//! Full-catalog fetch loop for `ShopifyClient`.

use std::time::Duration;

use crate::error::ShopifyError;
use crate::pagination::extract_next_cursor;
use crate::types::ShopifyProduct;

use super::ShopifyClient;
use super::MAX_PAGES;

impl ShopifyClient {
    /// Fetches every product by following `Link` header cursors from the
    /// first page until no `rel="next"` link remains.
    ///
    /// `inter_request_delay_ms` is slept between pages (not before the first).
    ///
    /// All-or-nothing: a failure on any page discards what was already
    /// fetched, so callers never see a truncated catalog.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`], and returns
    /// [`ShopifyError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn fetch_all_products(
        &self,
        shop_url: &str,
        limit: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<ShopifyProduct>, ShopifyError> {
        let mut all_products: Vec<ShopifyProduct> = Vec::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=MAX_PAGES {
            if page_number > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let (response, link_header) = self
                .fetch_products_page(shop_url, limit, cursor.as_deref())
                .await?;

            tracing::debug!(
                shop_url,
                page_number,
                count = response.products.len(),
                "fetched products page"
            );
            all_products.extend(response.products);

            cursor = extract_next_cursor(link_header.as_deref());
            if cursor.is_none() {
                return Ok(all_products);
            }
        }

        Err(ShopifyError::PaginationLimit {
            shop_url: shop_url.to_owned(),
            max_pages: MAX_PAGES,
        })
    }
}

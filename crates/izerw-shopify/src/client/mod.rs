//! HTTP client for a storefront's public `products.json` endpoint.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ShopifyError;
use crate::rate_limit::retry_with_backoff;
use crate::types::ShopifyProductsResponse;

pub use origin::extract_store_origin;
#[cfg(test)]
use origin::extract_domain;

/// Maximum number of pages followed before giving up, guarding against
/// cursors that cycle.
pub(super) const MAX_PAGES: usize = 200;

/// Client for `GET {origin}/products.json`.
///
/// Maps 429, 404, and other non-2xx responses to typed errors and retries
/// 429s and network failures with exponential backoff. Pagination cursors
/// come back to the caller alongside each page.
pub struct ShopifyClient {
    client: Client,
    /// Additional attempts after the first failure.
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ShopifyClient {
    /// Builds a client with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of products and the raw `Link` header, retrying
    /// transient failures.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ShopifyError::NotFound`]: HTTP 404.
    /// - [`ShopifyError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ShopifyError::Http`]: network or TLS failure after all retries.
    /// - [`ShopifyError::Deserialize`]: the body is not a products payload.
    /// - [`ShopifyError::InvalidShopUrl`]: `shop_url` has no usable origin.
    pub async fn fetch_products_page(
        &self,
        shop_url: &str,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<(ShopifyProductsResponse, Option<String>), ShopifyError> {
        let url = Self::products_url(shop_url, limit, page_info)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ShopifyError::RateLimited {
                        domain: origin::extract_domain(shop_url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ShopifyError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ShopifyError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let link_header = response
                    .headers()
                    .get(reqwest::header::LINK)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);

                let body = response.text().await?;
                let parsed = serde_json::from_str::<ShopifyProductsResponse>(&body).map_err(
                    |e| ShopifyError::Deserialize {
                        context: format!("products page from {shop_url}"),
                        source: e,
                    },
                )?;

                Ok((parsed, link_header))
            }
        })
        .await
    }

    /// Builds `{origin}/products.json?limit=N[&page_info=CURSOR]`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidShopUrl`] if the origin is not a valid
    /// URL base.
    fn products_url(
        shop_url: &str,
        limit: u32,
        page_info: Option<&str>,
    ) -> Result<String, ShopifyError> {
        let origin = extract_store_origin(shop_url);
        let mut url = reqwest::Url::parse(&format!("{origin}/products.json")).map_err(|e| {
            ShopifyError::InvalidShopUrl {
                shop_url: shop_url.to_owned(),
                reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
            }
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(cursor) = page_info {
                query.append_pair("page_info", cursor);
            }
        }

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;

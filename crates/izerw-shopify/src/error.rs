use thiserror::Error;

/// Failures talking to a storefront or interpreting its catalog.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Connection, TLS, or timeout failure.
    #[error("storefront request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storefront {domain} is rate limiting requests (retry in {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    /// Usually a password-protected store or a wrong shop URL.
    #[error("no product feed at {url}")]
    NotFound { url: String },

    #[error("storefront returned HTTP {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("product {product_id} cannot be listed: {reason}")]
    Normalization { product_id: String, reason: String },

    #[error("gave up on {shop_url} after {max_pages} catalog pages")]
    PaginationLimit { shop_url: String, max_pages: usize },

    #[error("shop URL \"{shop_url}\" is unusable: {reason}")]
    InvalidShopUrl { shop_url: String, reason: String },
}

//! Live commerce client backed by a cached snapshot of the storefront catalog.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use izerw_core::{AppConfig, Category, ConnectionStatus, PageResult, Product};
use izerw_shopify::{normalize_product, ShopifyClient};
use tokio::sync::RwLock;

use crate::commerce::CommerceClient;
use crate::error::CommerceError;
use crate::query;

/// How the full catalog is pulled and how long it is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Products requested per upstream page.
    pub fetch_limit: u32,
    pub inter_request_delay_ms: u64,
    pub ttl: Duration,
}

impl SnapshotOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fetch_limit: config.fetch_limit,
            inter_request_delay_ms: config.inter_request_delay_ms,
            ttl: Duration::from_secs(config.cache_ttl_secs),
        }
    }
}

struct Snapshot {
    products: Arc<Vec<Product>>,
    loaded_at: Instant,
}

/// [`CommerceClient`] over a storefront's public `products.json`.
///
/// The whole catalog is fetched once per TTL and every listing or search is
/// answered from that snapshot, so `total` and `total_pages` are exact.
/// Failed loads are not cached: the next call goes upstream again.
pub struct ShopifyCommerce {
    client: ShopifyClient,
    shop_url: String,
    options: SnapshotOptions,
    snapshot: RwLock<Option<Snapshot>>,
    connected: AtomicBool,
}

impl ShopifyCommerce {
    #[must_use]
    pub fn new(
        client: ShopifyClient,
        shop_url: impl Into<String>,
        options: SnapshotOptions,
    ) -> Self {
        Self {
            client,
            shop_url: shop_url.into(),
            options,
            snapshot: RwLock::new(None),
            connected: AtomicBool::new(false),
        }
    }

    /// Builds the HTTP client and snapshot options from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::InvalidRequest`] if `config` has no shop URL,
    /// or [`CommerceError::Upstream`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, CommerceError> {
        let shop_url = config.shop_url.clone().ok_or_else(|| {
            CommerceError::InvalidRequest("no shop URL configured".to_owned())
        })?;
        let client = ShopifyClient::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )?;
        Ok(Self::new(client, shop_url, SnapshotOptions::from_config(config)))
    }

    #[must_use]
    pub fn shop_url(&self) -> &str {
        &self.shop_url
    }

    /// Drops the cached snapshot so the next query reloads from upstream.
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    /// The current catalog, reloading it when missing or older than the TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Upstream`] if the catalog cannot be fetched.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CommerceError> {
        if let Some(products) = self.fresh_snapshot().await {
            return Ok(products);
        }

        let mut guard = self.snapshot.write().await;
        // Another caller may have reloaded while we waited for the lock.
        if let Some(snapshot) = guard.as_ref() {
            if snapshot.loaded_at.elapsed() < self.options.ttl {
                return Ok(Arc::clone(&snapshot.products));
            }
        }

        match self.load().await {
            Ok(products) => {
                let products = Arc::new(products);
                *guard = Some(Snapshot {
                    products: Arc::clone(&products),
                    loaded_at: Instant::now(),
                });
                self.connected.store(true, Ordering::Relaxed);
                Ok(products)
            }
            Err(e) => {
                *guard = None;
                self.connected.store(false, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    async fn fresh_snapshot(&self) -> Option<Arc<Vec<Product>>> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| s.loaded_at.elapsed() < self.options.ttl)
            .map(|s| Arc::clone(&s.products))
    }

    async fn load(&self) -> Result<Vec<Product>, CommerceError> {
        let started = Instant::now();
        let raw = self
            .client
            .fetch_all_products(
                &self.shop_url,
                self.options.fetch_limit,
                self.options.inter_request_delay_ms,
            )
            .await?;
        let fetched = raw.len();

        let products: Vec<Product> = raw
            .into_iter()
            .filter_map(|product| match normalize_product(product) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(shop_url = %self.shop_url, error = %e, "skipping product");
                    None
                }
            })
            .collect();

        tracing::info!(
            shop_url = %self.shop_url,
            fetched,
            kept = products.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "catalog snapshot loaded"
        );
        Ok(products)
    }
}

#[async_trait]
impl CommerceClient for ShopifyCommerce {
    async fn get_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        category: Option<Category>,
    ) -> Result<PageResult, CommerceError> {
        let products = self.products().await?;
        query::list_page(&products, page, page_size, search, category)
    }

    async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Product>, CommerceError> {
        let products = self.products().await?;
        Ok(query::search(&products, query, limit))
    }

    fn connection_status(&self) -> ConnectionStatus {
        let connected = self.connected.load(Ordering::Relaxed);
        ConnectionStatus {
            is_connected: connected,
            using_live_data: connected,
        }
    }
}

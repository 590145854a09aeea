//! The commerce client contract the view-model drives.

use std::sync::Arc;

use async_trait::async_trait;
use izerw_core::{Category, ConnectionStatus, PageResult, Product};

use crate::error::CommerceError;

/// Lists and searches products against a storefront.
///
/// Implementations own their transport concerns (timeouts, retries, caching).
/// Callers see one result or one error per call.
#[async_trait]
pub trait CommerceClient: Send + Sync {
    /// One page of products, optionally narrowed by search text and category.
    ///
    /// `page` is 1-based. `pagination.total` counts every matching product and
    /// is stable across pages of the same query.
    async fn get_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        category: Option<Category>,
    ) -> Result<PageResult, CommerceError>;

    /// Up to `limit` products matching `query`, without pagination metadata.
    async fn search_products(&self, query: &str, limit: usize)
        -> Result<Vec<Product>, CommerceError>;

    /// Last known connection state. Never performs I/O.
    fn connection_status(&self) -> ConnectionStatus;
}

#[async_trait]
impl<T: CommerceClient + ?Sized> CommerceClient for Box<T> {
    async fn get_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        category: Option<Category>,
    ) -> Result<PageResult, CommerceError> {
        (**self).get_products(page, page_size, search, category).await
    }

    async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Product>, CommerceError> {
        (**self).search_products(query, limit).await
    }

    fn connection_status(&self) -> ConnectionStatus {
        (**self).connection_status()
    }
}

#[async_trait]
impl<T: CommerceClient + ?Sized> CommerceClient for Arc<T> {
    async fn get_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        category: Option<Category>,
    ) -> Result<PageResult, CommerceError> {
        (**self).get_products(page, page_size, search, category).await
    }

    async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Product>, CommerceError> {
        (**self).search_products(query, limit).await
    }

    fn connection_status(&self) -> ConnectionStatus {
        (**self).connection_status()
    }
}

//! Offline commerce client that serves products from a JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use izerw_core::{Category, ConnectionStatus, PageResult, Product};
use serde::Deserialize;

use crate::commerce::CommerceClient;
use crate::error::CommerceError;
use crate::query;

/// Accepts either a bare array of products or `{"products": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    List(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

/// [`CommerceClient`] over a fixed product list. Always reports connected,
/// never live.
#[derive(Debug, Clone)]
pub struct FixtureCommerce {
    products: Vec<Product>,
    source: Option<PathBuf>,
}

impl FixtureCommerce {
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products,
            source: None,
        }
    }

    /// Reads and parses a fixture file.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::FixtureIo`]: the file cannot be read.
    /// - [`CommerceError::FixtureParse`]: the file is not a product list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CommerceError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: FixtureFile =
            serde_json::from_str(&raw).map_err(|source| CommerceError::FixtureParse {
                path: path.to_path_buf(),
                source,
            })?;
        let products = match parsed {
            FixtureFile::List(products) | FixtureFile::Wrapped { products } => products,
        };

        tracing::info!(path = %path.display(), count = products.len(), "fixture catalog loaded");
        Ok(Self {
            products,
            source: Some(path.to_path_buf()),
        })
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CommerceClient for FixtureCommerce {
    async fn get_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        category: Option<Category>,
    ) -> Result<PageResult, CommerceError> {
        query::list_page(&self.products, page, page_size, search, category)
    }

    async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Product>, CommerceError> {
        Ok(query::search(&self.products, query, limit))
    }

    fn connection_status(&self) -> ConnectionStatus {
        ConnectionStatus {
            is_connected: true,
            using_live_data: false,
        }
    }
}

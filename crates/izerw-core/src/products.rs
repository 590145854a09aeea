use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryFilter;

/// Result cap for free-text search. Search results are always a single page.
pub const SEARCH_RESULT_LIMIT: usize = 24;

/// Image shown when a product has no usable image.
pub const IMAGE_PLACEHOLDER_URL: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// A catalog product as the storefront presents it. Read-only from the view's
/// perspective; owned and sourced by the commerce client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable upstream identifier, stored as a string to avoid precision loss.
    pub id: String,
    pub title: String,
    /// Vendor as configured in the storefront.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Storefront `product_type`, e.g. `"Deck Hardware"`.
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Plain-text description (HTML already stripped).
    #[serde(default)]
    pub description: Option<String>,
    /// Numeric price of the default variant.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Pre-formatted price string. Takes precedence over `price` for display.
    #[serde(default)]
    pub display_price: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Returns the image flagged primary, else the first image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
    }

    /// URL of the primary image, or [`IMAGE_PLACEHOLDER_URL`] when there is none.
    #[must_use]
    pub fn image_url_or_placeholder(&self) -> &str {
        self.primary_image()
            .map(|img| img.url.as_str())
            .filter(|url| !url.is_empty())
            .unwrap_or(IMAGE_PLACEHOLDER_URL)
    }

    /// The price as shown to users: the pre-formatted string when present,
    /// otherwise the numeric price with a `$` prefix and two decimals.
    #[must_use]
    pub fn formatted_price(&self) -> Option<String> {
        if let Some(display) = self.display_price.as_deref().filter(|s| !s.is_empty()) {
            return Some(display.to_owned());
        }
        self.price.map(|p| format!("${:.2}", p.round_dp(2)))
    }

    /// Sum of known variant inventory, or `None` when no variant reports stock.
    #[must_use]
    pub fn total_inventory(&self) -> Option<i64> {
        self.variants
            .iter()
            .filter_map(|v| v.inventory_quantity)
            .fold(None, |acc, qty| Some(acc.unwrap_or(0) + qty))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub total: usize,
    pub total_pages: u32,
}

/// One page of products plus pagination metadata. Replaced wholesale on
/// every fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResult {
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionStatus {
    pub is_connected: bool,
    pub using_live_data: bool,
}

impl ConnectionStatus {
    pub const DISCONNECTED: ConnectionStatus = ConnectionStatus {
        is_connected: false,
        using_live_data: false,
    };
}

/// The tuple that fully determines the next fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIntent {
    /// 1-based page number.
    pub page: u32,
    pub category: CategoryFilter,
    pub search: Option<String>,
}

impl Default for QueryIntent {
    fn default() -> Self {
        Self {
            page: 1,
            category: CategoryFilter::All,
            search: None,
        }
    }
}

impl QueryIntent {
    /// The trimmed search text, if a search is active.
    #[must_use]
    pub fn active_search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn is_search(&self) -> bool {
        self.active_search().is_some()
    }
}

//! Response types for a storefront's public `products.json` endpoint.
//!
//! Only the fields the catalog displays are modelled; everything else in the
//! payload is ignored by serde.
//!
//! - `product_type` is the storefront's category label and may be `""`.
//! - `vendor` is the manufacturer shown on product cards.
//! - Variant `inventory_quantity` is usually absent from the public endpoint.
//!   It is present when the store exposes it, so it is modelled as optional.
//! - `image` is the featured image; `images` is the full ordered gallery.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    pub products: Vec<ShopifyProduct>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    /// Numeric product ID, e.g. `7421094527063`.
    pub id: i64,

    pub title: String,

    /// URL slug, e.g. `"southco-e3-compression-latch"`.
    pub handle: String,

    /// Raw HTML description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub vendor: Option<String>,

    /// Featured image.
    #[serde(default)]
    pub image: Option<ShopifyImage>,

    #[serde(default)]
    pub images: Vec<ShopifyImage>,

    pub variants: Vec<ShopifyVariant>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    pub id: i64,

    /// `"Default Title"` for single-variant products.
    pub title: String,

    /// May be an empty string on some stores.
    #[serde(default)]
    pub sku: Option<String>,

    /// Decimal string, e.g. `"42.50"`.
    pub price: String,

    #[serde(default = "default_available")]
    pub available: bool,

    /// 1-based; `1` is the storefront default variant.
    #[serde(default)]
    pub position: Option<i32>,

    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyImage {
    #[serde(default)]
    pub id: Option<i64>,
    /// CDN URL.
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    /// 1-based gallery position.
    #[serde(default)]
    pub position: Option<i32>,
}

/// Missing `available` is treated as in stock.
fn default_available() -> bool {
    true
}

pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
mod rate_limit;
pub mod types;

pub use client::ShopifyClient;
pub use error::ShopifyError;
pub use normalize::normalize_product;
pub use types::{ShopifyImage, ShopifyProduct, ShopifyProductsResponse, ShopifyVariant};

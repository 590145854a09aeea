//! Catalog browsing: the commerce client contract, its live and offline
//! implementations, the catalog view-model, and text presentation.

pub mod commerce;
pub mod controller;
pub mod error;
pub mod fixture;
pub mod present;
pub mod query;
pub mod shopify;
pub mod view_model;

pub use commerce::CommerceClient;
pub use controller::CatalogController;
pub use error::CommerceError;
pub use fixture::FixtureCommerce;
pub use present::ViewMode;
pub use shopify::{ShopifyCommerce, SnapshotOptions};
pub use view_model::{CatalogViewModel, FetchKind, FetchRequest, Fetched, Phase};

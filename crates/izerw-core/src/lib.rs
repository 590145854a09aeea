pub mod app_config;
pub mod category;
pub mod config;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::{Category, CategoryFilter};
pub use config::load_app_config_with_overrides;
pub use products::{
    ConnectionStatus, PageResult, Pagination, Product, ProductImage, ProductVariant, QueryIntent,
    IMAGE_PLACEHOLDER_URL, SEARCH_RESULT_LIMIT,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

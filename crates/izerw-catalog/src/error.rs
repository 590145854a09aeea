use std::path::PathBuf;

use izerw_shopify::ShopifyError;
use thiserror::Error;

/// Failures surfaced by a [`crate::CommerceClient`].
#[derive(Debug, Error)]
pub enum CommerceError {
    #[error(transparent)]
    Upstream(#[from] ShopifyError),

    #[error("could not read fixture {}: {source}", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse fixture {}: {source}", path.display())]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

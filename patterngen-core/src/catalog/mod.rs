//! Catalog access - pattern records, payload sources and user profiles
//!
//! # Architecture
//!
//! ```text
//! Catalog service
//!     │
//!     ├── /api/catalog/content/pattern        ← CatalogSource (remote or fixture)
//!     └── /api/identity/users/profile/{id}    ← ProfileResolver
//!            │
//!            ▼
//!     decode_patterns → Vec<CatalogPattern>
//! ```

mod pattern;
mod profile;
mod source;

pub use pattern::{decode_patterns, CatalogData, CatalogPattern, ImageUrl};
pub use profile::{ProfileResolver, RemoteProfileResolver, StaticProfileResolver, UserInfo};
pub use source::{CatalogSource, FixtureCatalogSource, RemoteCatalogSource, SAMPLE_CATALOG};

use crate::config::PipelineConfig;
use crate::error::{CatalogError, Result};

/// Decode JSON `null` as the field's default, like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// HTTP client shared by the remote source and resolver
fn http_client(config: &PipelineConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.http_timeout())
        .build()
        .map_err(CatalogError::HttpClient)
}

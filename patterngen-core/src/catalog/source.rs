//! Catalog sources - where the pattern payload comes from
//!
//! This trait allows swapping between:
//! - the live catalog service (HTTP)
//! - a static fixture (embedded sample or a JSON file), for dry runs and tests

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::http_client;
use crate::config::PipelineConfig;
use crate::error::{CatalogError, Result};

/// Sample payload shipped with the crate
pub const SAMPLE_CATALOG: &str = include_str!("../../fixtures/sample_catalog.json");

/// Trait for catalog payload providers
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the raw catalog payload (a JSON array of patterns)
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Source identifier for logging
    fn name(&self) -> &'static str;
}

/// Fetches patterns from `{base}/api/catalog/content/pattern`
pub struct RemoteCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteCatalogSource {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            url: format!("{}/api/catalog/content/pattern", config.base_url()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalogSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        debug!("Fetching catalog patterns from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| CatalogError::Fetch {
                url: self.url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| CatalogError::Fetch {
            url: self.url.clone(),
            source,
        })?;

        debug!("Fetched {} bytes of catalog data", body.len());
        Ok(body.to_vec())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Serves a fixed payload instead of calling the catalog service
#[derive(Debug, Clone)]
pub enum FixtureCatalogSource {
    /// In-memory payload
    Inline(String),
    /// JSON file read on every fetch
    File(PathBuf),
}

impl FixtureCatalogSource {
    /// The sample payload shipped with the crate
    pub fn sample() -> Self {
        Self::Inline(SAMPLE_CATALOG.to_string())
    }

    pub fn inline(payload: impl Into<String>) -> Self {
        Self::Inline(payload.into())
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalogSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            FixtureCatalogSource::Inline(payload) => Ok(payload.as_bytes().to_vec()),
            FixtureCatalogSource::File(path) => {
                debug!("Reading catalog fixture from {}", path.display());
                tokio::fs::read(path)
                    .await
                    .map_err(|source| CatalogError::FixtureRead {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

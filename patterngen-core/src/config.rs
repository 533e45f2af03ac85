//! Pipeline configuration
//!
//! Every endpoint and output location the pipeline touches is carried here
//! and passed into [`crate::Pipeline::new`]. A YAML file may override any
//! field; missing fields fall back to the defaults below.
//!
//! ```yaml
//! base_url: https://meshery.layer5.io
//! output_root: ./site
//! http_timeout_secs: 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Default catalog service
pub const DEFAULT_BASE_URL: &str = "https://meshery.layer5.io";

/// Default location of the light/dark design snapshots
pub const DEFAULT_DESIGN_ASSET_BASE_URL: &str = "https://raw.githubusercontent.com/layer5labs/meshery-extensions-packages/master/action-assets/design-assets";

/// Image used when a manifest declares no services
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/assets/images/logos/service-mesh-pattern.svg";

/// Raw content root the rendered pages link manifests from
pub const DEFAULT_RAW_CONTENT_BASE_URL: &str =
    "https://raw.githubusercontent.com/meshery/meshery.io/master";

/// Top-level pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Catalog and identity service root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory (relative to `output_root`) receiving per-pattern manifests
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Directory (relative to `output_root`) receiving rendered pages
    #[serde(default = "default_collections_dir")]
    pub collections_dir: PathBuf,

    /// Root every output path is resolved against
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Base URL for synthesized light/dark snapshot images
    #[serde(default = "default_design_asset_base_url")]
    pub design_asset_base_url: String,

    /// Image path used for manifests without services
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Base URL for the page's raw manifest link
    #[serde(default = "default_raw_content_base_url")]
    pub raw_content_base_url: String,

    /// Version stamped into every package descriptor
    #[serde(default = "default_package_version")]
    pub package_version: String,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// User agent sent with every HTTP request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_dir: default_catalog_dir(),
            collections_dir: default_collections_dir(),
            output_root: default_output_root(),
            design_asset_base_url: default_design_asset_base_url(),
            placeholder_image: default_placeholder_image(),
            raw_content_base_url: default_raw_content_base_url(),
            package_version: default_package_version(),
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("catalog")
}

fn default_collections_dir() -> PathBuf {
    PathBuf::from("collections/_catalog")
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_design_asset_base_url() -> String {
    DEFAULT_DESIGN_ASSET_BASE_URL.to_string()
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

fn default_raw_content_base_url() -> String {
    DEFAULT_RAW_CONTENT_BASE_URL.to_string()
}

fn default_package_version() -> String {
    "1.0.0".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("patterngen/", env!("CARGO_PKG_VERSION")).to_string()
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: the defaults are returned instead.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content).map_err(|source| CatalogError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("base_url", &self.base_url),
            ("design_asset_base_url", &self.design_asset_base_url),
            ("raw_content_base_url", &self.raw_content_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CatalogError::InvalidConfig(format!(
                    "{field} must start with http:// or https:// (got '{url}')"
                )));
            }
        }

        if self.http_timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "http_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.package_version.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "package_version cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Timeout for HTTP requests
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Catalog service root without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `{output_root}/{catalog_dir}/{id}`
    pub fn pattern_dir(&self, pattern_id: &str) -> PathBuf {
        self.output_root.join(&self.catalog_dir).join(pattern_id)
    }

    /// `{output_root}/{collections_dir}/{type}`
    pub fn type_dir(&self, type_slug: &str) -> PathBuf {
        self.output_root.join(&self.collections_dir).join(type_slug)
    }
}

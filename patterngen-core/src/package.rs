//! Package descriptor (artifacthub-pkg.yml)
//!
//! Describes a pattern as a distributable package: name, version, creation
//! time, owner, links to the manifest and the catalog metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::CatalogPattern;

/// Description used when a pattern has no info text
pub const DEFAULT_DESCRIPTION: &str = "A Meshery design";

/// License stamped into every descriptor
pub const PACKAGE_LICENSE: &str = "Apache-2.0";

/// Documentation page for designs
pub const PACKAGE_HOME_URL: &str = "https://docs.meshery.io/concepts/logical/designs";

/// Annotation holding the pattern's type label
pub const TYPE_ANNOTATION: &str = "catalog/type";

/// Annotation holding the pattern's caveats
pub const CAVEATS_ANNOTATION: &str = "catalog/caveats";

/// A package descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    pub version: String,

    /// Kebab-cased display name
    pub name: String,

    pub display_name: String,

    /// UTC, RFC 3339, whole seconds
    pub created_at: String,

    pub description: String,

    pub license: String,

    #[serde(rename = "homeURL")]
    pub home_url: String,

    /// Compatibility labels
    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub links: Vec<Link>,

    pub provider: Provider,

    pub readme: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<Screenshot>,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// Package owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub title: String,
    pub url: String,
}

impl PackageDescriptor {
    /// Build the descriptor for a pattern whose manifest lives at `manifest_path`
    pub fn build(
        pattern: &CatalogPattern,
        manifest_path: &str,
        version: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        let data = &pattern.catalog_data;

        let description = if data.pattern_info.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            data.pattern_info.clone()
        };

        let mut readme = data.pattern_info.clone();
        if !data.pattern_caveats.is_empty() {
            readme.push_str("\n\n#### Caveats and Considerations\n\n");
            readme.push_str(&data.pattern_caveats);
        }

        let screenshots = data
            .image_url
            .snapshot_urls()
            .into_iter()
            .map(|url| Screenshot {
                title: format!("{} snapshot", pattern.name),
                url,
            })
            .collect();

        let mut annotations = BTreeMap::new();
        annotations.insert(TYPE_ANNOTATION.to_string(), data.pattern_type.clone());
        annotations.insert(CAVEATS_ANNOTATION.to_string(), data.pattern_caveats.clone());

        Self {
            version: version.to_string(),
            name: kebab_case(&pattern.name),
            display_name: pattern.name.clone(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            description,
            license: PACKAGE_LICENSE.to_string(),
            home_url: PACKAGE_HOME_URL.to_string(),
            keywords: data.compatibility.clone(),
            links: vec![Link {
                name: "download".to_string(),
                url: manifest_path.to_string(),
            }],
            provider: Provider {
                name: pattern.user_id.clone(),
            },
            readme,
            screenshots,
            annotations,
        }
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }

    /// Parse descriptor from YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }
}

/// "Pod Readiness (v2)" -> "pod-readiness-v2"
pub fn kebab_case(value: &str) -> String {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

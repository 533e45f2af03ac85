//! Catalog pattern records
//!
//! The catalog endpoint returns a JSON array of patterns. Each pattern
//! carries its deployment manifest as text plus display metadata under
//! `catalog_data`.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

use super::null_as_default;
use crate::error::{CatalogError, Result};

/// A pattern as published in the catalog
///
/// Missing and `null` fields both decode to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogPattern {
    /// Unique pattern identifier
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Deployment manifest (YAML text)
    #[serde(deserialize_with = "null_as_default")]
    pub pattern_file: String,

    /// Display metadata
    #[serde(deserialize_with = "null_as_default")]
    pub catalog_data: CatalogData,

    /// Owning user identifier
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
}

/// Display metadata attached to a pattern
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    /// Free-text description
    #[serde(deserialize_with = "null_as_default")]
    pub pattern_info: String,

    /// Free-text caveats and considerations
    #[serde(deserialize_with = "null_as_default")]
    pub pattern_caveats: String,

    /// Type label (e.g. "Deployment", "Service Mesh")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub pattern_type: String,

    /// Snapshot image(s)
    #[serde(rename = "imageURL")]
    pub image_url: ImageUrl,

    /// Compatibility labels (e.g. "kubernetes")
    #[serde(deserialize_with = "null_as_default")]
    pub compatibility: Vec<String>,
}

/// The `imageURL` field, which the catalog publishes in three shapes
///
/// Supports:
/// - missing or `null` - no image, one is synthesized from the pattern id
/// - `"https://..."` - a single image
/// - `["https://...", "https://..."]` - several images
///
/// Any other shape is rejected at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageUrl {
    #[default]
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl ImageUrl {
    /// Image URLs usable as package screenshots
    pub fn snapshot_urls(&self) -> Vec<String> {
        match self {
            ImageUrl::Absent => Vec::new(),
            ImageUrl::Single(url) => vec![url.clone()],
            ImageUrl::Multiple(urls) => urls.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for ImageUrl {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ImageUrlVisitor;

        impl<'de> Visitor<'de> for ImageUrlVisitor {
            type Value = ImageUrl;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("imageURL as a string, a list of strings, or null")
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ImageUrl::Absent)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ImageUrl::Absent)
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ImageUrl::Single(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ImageUrl::Single(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut urls = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                // Non-string elements fail here instead of being dropped
                while let Some(url) = seq.next_element::<String>()? {
                    urls.push(url);
                }
                Ok(ImageUrl::Multiple(urls))
            }
        }

        deserializer.deserialize_any(ImageUrlVisitor)
    }
}

/// Decode the catalog payload into an ordered list of patterns
///
/// Any malformed record fails the whole payload.
pub fn decode_patterns(payload: &[u8]) -> Result<Vec<CatalogPattern>> {
    serde_json::from_slice(payload).map_err(|source| CatalogError::Decode { source })
}

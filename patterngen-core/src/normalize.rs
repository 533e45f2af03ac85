//! Per-pattern field derivation
//!
//! Turns a raw [`CatalogPattern`] into the strings the page and package
//! writers interpolate.

use crate::catalog::{CatalogPattern, ImageUrl};
use crate::page::yaml_scalar;

/// Type label used when a pattern has none
pub const DEFAULT_PATTERN_TYPE: &str = "Deployment";

/// Literal written in place of empty text so the front matter never holds a bare key
pub const EMPTY_TEXT_MARKER: &str = "\"\"";

/// Fields derived from one pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPattern {
    pub type_slug: String,
    pub image_url: String,
    pub info: String,
    pub caveats: String,
    pub compatibility: String,
}

impl NormalizedPattern {
    pub fn from_pattern(pattern: &CatalogPattern, design_asset_base_url: &str) -> Self {
        let data = &pattern.catalog_data;
        Self {
            type_slug: pattern_type_slug(&data.pattern_type),
            image_url: resolve_image_url(&pattern.id, &data.image_url, design_asset_base_url),
            info: quoted_or_raw(&data.pattern_info),
            caveats: quoted_or_raw(&data.pattern_caveats),
            compatibility: compatibility_block(&data.compatibility),
        }
    }
}

/// Lowercase the type label and replace spaces with hyphens
pub fn pattern_type_slug(pattern_type: &str) -> String {
    let pattern_type = if pattern_type.is_empty() {
        DEFAULT_PATTERN_TYPE
    } else {
        pattern_type
    };
    pattern_type.replace(' ', "-").to_lowercase()
}

/// Comma-separated image URL(s) for the page's `image:` field
///
/// Patterns without images get the light/dark snapshot pair published
/// under `design_asset_base_url`.
pub fn resolve_image_url(pattern_id: &str, image_url: &ImageUrl, design_asset_base_url: &str) -> String {
    match image_url {
        ImageUrl::Absent => {
            let base = design_asset_base_url.trim_end_matches('/');
            format!("{base}/{pattern_id}-light.png,{base}/{pattern_id}-dark.png")
        }
        ImageUrl::Single(url) => url.clone(),
        ImageUrl::Multiple(urls) => urls.join(","),
    }
}

pub fn quoted_or_raw(value: &str) -> String {
    if value.is_empty() {
        EMPTY_TEXT_MARKER.to_string()
    } else {
        value.to_string()
    }
}

/// One `    - label` line per compatibility label, quoted where needed
pub fn compatibility_block(compatibility: &[String]) -> String {
    compatibility
        .iter()
        .map(|label| format!("    - {}", yaml_scalar(label)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogData;
    use pretty_assertions::assert_eq;

    const ASSETS: &str = "https://assets.example.com/design";

    #[test]
    fn test_type_slug() {
        assert_eq!(pattern_type_slug("Service Mesh"), "service-mesh");
        assert_eq!(pattern_type_slug(""), "deployment");
        assert_eq!(pattern_type_slug("deployment"), "deployment");
        assert_eq!(pattern_type_slug("Observability And Tracing"), "observability-and-tracing");
    }

    #[test]
    fn test_absent_image_synthesizes_pair() {
        let url = resolve_image_url("abc", &ImageUrl::Absent, ASSETS);
        assert_eq!(
            url,
            "https://assets.example.com/design/abc-light.png,https://assets.example.com/design/abc-dark.png"
        );

        // Trailing slash on the base does not double up
        let url = resolve_image_url("abc", &ImageUrl::Absent, "https://assets.example.com/design/");
        assert!(url.starts_with("https://assets.example.com/design/abc-light.png,"));
    }

    #[test]
    fn test_single_image_verbatim() {
        let image = ImageUrl::Single("https://example.com/x.png?v=1".to_string());
        assert_eq!(resolve_image_url("abc", &image, ASSETS), "https://example.com/x.png?v=1");
    }

    #[test]
    fn test_multiple_images_joined_in_order() {
        let image = ImageUrl::Multiple(vec![
            "b.png".to_string(),
            "a.png".to_string(),
            "c.png".to_string(),
        ]);
        assert_eq!(resolve_image_url("abc", &image, ASSETS), "b.png,a.png,c.png");
        assert_eq!(resolve_image_url("abc", &ImageUrl::Multiple(vec![]), ASSETS), "");
    }

    #[test]
    fn test_quoted_or_raw() {
        assert_eq!(quoted_or_raw(""), "\"\"");
        assert_eq!(quoted_or_raw("Some info"), "Some info");
    }

    #[test]
    fn test_compatibility_block() {
        assert_eq!(compatibility_block(&[]), "");
        assert_eq!(
            compatibility_block(&["kubernetes".to_string(), "istio".to_string()]),
            "    - kubernetes\n    - istio"
        );
        assert_eq!(
            compatibility_block(&["Kubernetes: 1.28".to_string(), "#edge".to_string()]),
            "    - \"Kubernetes: 1.28\"\n    - \"#edge\""
        );
    }

    #[test]
    fn test_from_pattern() {
        let pattern = CatalogPattern {
            id: "p-1".to_string(),
            name: "Canary".to_string(),
            catalog_data: CatalogData {
                pattern_info: "Rolls out gradually".to_string(),
                pattern_type: "Traffic Management".to_string(),
                compatibility: vec!["kubernetes".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        let normalized = NormalizedPattern::from_pattern(&pattern, ASSETS);
        assert_eq!(normalized.type_slug, "traffic-management");
        assert!(normalized.image_url.contains("p-1-dark.png"));
        assert_eq!(normalized.info, "Rolls out gradually");
        assert_eq!(normalized.caveats, "\"\"");
        assert_eq!(normalized.compatibility, "    - kubernetes");
    }
}

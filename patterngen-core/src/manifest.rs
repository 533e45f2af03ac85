//! Deployment manifest inspection
//!
//! A pattern's manifest is YAML with a top-level `services` mapping. Pages
//! for manifests that declare no services show a placeholder image instead
//! of a snapshot.

use serde_yaml_ng::Value;

/// Whether the manifest declares at least one service
///
/// Absent, `null` and empty `services` values all count as "no services",
/// as does a manifest that is not a YAML mapping at all.
pub fn declares_services(manifest: &str) -> bool {
    let document: Value = match serde_yaml_ng::from_str(manifest) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!("Manifest is not valid YAML: {}", e);
            return false;
        }
    };

    match document.get("services") {
        None | Some(Value::Null) => false,
        Some(Value::Mapping(services)) => !services.is_empty(),
        Some(Value::Sequence(services)) => !services.is_empty(),
        Some(Value::String(services)) => !services.trim().is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_present() {
        let manifest = r#"
name: Pod Readiness
services:
  readiness-pod:
    type: Pod
    model: kubernetes
"#;
        assert!(declares_services(manifest));
    }

    #[test]
    fn test_services_missing_or_empty() {
        assert!(!declares_services("name: Empty\n"));
        assert!(!declares_services("name: Empty\nservices:\n"));
        assert!(!declares_services("name: Empty\nservices: {}\n"));
        assert!(!declares_services("name: Empty\nservices: []\n"));
        assert!(!declares_services("name: Empty\nservices: ''\n"));
    }

    #[test]
    fn test_non_mapping_manifests() {
        assert!(!declares_services(""));
        assert!(!declares_services("- just\n- a list\n"));
        assert!(!declares_services("key: [unterminated"));
    }

    #[test]
    fn test_nested_services_key_does_not_count() {
        let manifest = "name: Nested\nspec:\n  services:\n    a: {}\n";
        assert!(!declares_services(manifest));
    }
}

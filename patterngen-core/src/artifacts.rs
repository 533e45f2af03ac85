//! Output artifact writers
//!
//! Per pattern:
//!
//! ```text
//! {output_root}/
//! ├── catalog/{id}/
//! │   ├── deploy.yml            ← manifest, verbatim
//! │   └── artifacthub-pkg.yml   ← package descriptor
//! └── collections/_catalog/{type}/
//!     └── {id}.md               ← rendered page
//! ```
//!
//! Writes are independent: a failure part-way leaves the earlier files in place.

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::{CatalogError, Result};
use crate::package::PackageDescriptor;

pub const MANIFEST_FILE: &str = "deploy.yml";
pub const PACKAGE_FILE: &str = "artifacthub-pkg.yml";

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| CatalogError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the manifest to `catalog/{id}/deploy.yml`
pub fn write_manifest(config: &PipelineConfig, pattern_id: &str, manifest: &str) -> Result<PathBuf> {
    let dir = config.pattern_dir(pattern_id);
    create_dir(&dir)?;

    let path = dir.join(MANIFEST_FILE);
    write_file(&path, manifest.as_bytes())?;
    tracing::debug!("Wrote manifest {}", path.display());
    Ok(path)
}

/// Path recorded as the descriptor's download link: `{catalog_dir}/{id}/deploy.yml`
///
/// Relative to the output root so the descriptor does not depend on where
/// the generator ran.
pub fn manifest_link(config: &PipelineConfig, pattern_id: &str) -> String {
    config
        .catalog_dir
        .join(pattern_id)
        .join(MANIFEST_FILE)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Serialize and write the descriptor to `catalog/{id}/artifacthub-pkg.yml`
pub fn write_package(
    config: &PipelineConfig,
    pattern_id: &str,
    descriptor: &PackageDescriptor,
) -> Result<PathBuf> {
    let yaml = descriptor.to_yaml().map_err(|source| CatalogError::Serialize {
        pattern_id: pattern_id.to_string(),
        source,
    })?;

    let dir = config.pattern_dir(pattern_id);
    create_dir(&dir)?;

    let path = dir.join(PACKAGE_FILE);
    write_file(&path, yaml.as_bytes())?;
    tracing::debug!("Wrote package descriptor {}", path.display());
    Ok(path)
}

/// Result of writing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    pub path: PathBuf,
    /// Whether this write created the type directory
    pub created_type_dir: bool,
}

/// Write the page to `collections/_catalog/{type}/{id}.md`
pub fn write_page(
    config: &PipelineConfig,
    type_slug: &str,
    pattern_id: &str,
    content: &str,
) -> Result<WrittenPage> {
    let dir = config.type_dir(type_slug);
    let created_type_dir = !dir.exists();
    if created_type_dir {
        tracing::info!("{} doesn't exist. Creating directory...", type_slug);
        create_dir(&dir)?;
    }

    let path = dir.join(format!("{pattern_id}.md"));
    write_file(&path, content.as_bytes())?;
    tracing::debug!("Wrote page {}", path.display());

    Ok(WrittenPage {
        path,
        created_type_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> PipelineConfig {
        PipelineConfig {
            output_root: temp_dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_manifest_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let manifest = "name: Verbatim\n# comment kept\nservices: {}\n";

        let path = write_manifest(&config, "p-1", manifest).unwrap();
        assert_eq!(path, temp_dir.path().join("catalog/p-1/deploy.yml"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), manifest);
    }

    #[test]
    fn test_manifest_link_is_relative() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        assert_eq!(manifest_link(&config, "p-1"), "catalog/p-1/deploy.yml");
    }

    #[test]
    fn test_write_page_creates_type_dir_once() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let first = write_page(&config, "service-mesh", "a", "---\n---\n").unwrap();
        assert!(first.created_type_dir);
        assert_eq!(
            first.path,
            temp_dir.path().join("collections/_catalog/service-mesh/a.md")
        );

        let second = write_page(&config, "service-mesh", "b", "---\n---\n").unwrap();
        assert!(!second.created_type_dir);
        assert!(second.path.exists());
    }

    #[test]
    fn test_write_into_unwritable_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A file where the catalog directory should be
        std::fs::write(temp_dir.path().join("catalog"), "not a dir").unwrap();
        let config = config_in(&temp_dir);

        let result = write_manifest(&config, "p-1", "name: x\n");
        assert!(matches!(result, Err(CatalogError::Write { .. })));
    }
}

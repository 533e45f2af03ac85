//! The pattern-to-catalog-entry pipeline
//!
//! `fetch → decode → for each pattern { normalize → manifest → package →
//! profile → page }`, strictly one pattern at a time.
//!
//! Fetch and decode failures abort the run. Anything that goes wrong inside
//! a single pattern is logged, recorded in the [`RunSummary`], and the next
//! pattern is processed.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::artifacts::{self, WrittenPage};
use crate::catalog::{
    decode_patterns, CatalogPattern, CatalogSource, ProfileResolver, RemoteCatalogSource,
    RemoteProfileResolver,
};
use crate::config::PipelineConfig;
use crate::error::{CatalogError, Result};
use crate::manifest;
use crate::normalize::NormalizedPattern;
use crate::package::PackageDescriptor;
use crate::page::{render_page, PageContext};

/// Clock used for package timestamps
pub type Clock = fn() -> DateTime<Utc>;

/// Catalog content generator
pub struct Pipeline {
    config: PipelineConfig,
    source: Box<dyn CatalogSource>,
    profiles: Box<dyn ProfileResolver>,
    clock: Clock,
}

/// What was written for one pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternOutcome {
    pub pattern_id: String,
    pub type_slug: String,
    pub page: WrittenPage,
    /// The manifest declared no services, so the page shows the placeholder image
    pub used_placeholder: bool,
}

/// A pattern that could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFailure {
    pub pattern_id: String,
    pub reason: String,
}

/// Result of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: Vec<PatternOutcome>,
    pub failed: Vec<PatternFailure>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Type directories created during this run, in creation order
    pub fn types_created(&self) -> Vec<&str> {
        self.processed
            .iter()
            .filter(|outcome| outcome.page.created_type_dir)
            .map(|outcome| outcome.type_slug.as_str())
            .collect()
    }
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn CatalogSource>,
        profiles: Box<dyn ProfileResolver>,
    ) -> Self {
        Self {
            config,
            source,
            profiles,
            clock: Utc::now,
        }
    }

    /// Pipeline backed by the live catalog and identity services
    pub fn remote(config: PipelineConfig) -> Result<Self> {
        let source = RemoteCatalogSource::new(&config)?;
        let profiles = RemoteProfileResolver::new(&config)?;
        Ok(Self::new(config, Box::new(source), Box::new(profiles)))
    }

    /// Override the clock (fixed timestamps make output reproducible)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the catalog and write every pattern
    pub async fn run(&self) -> Result<RunSummary> {
        info!("Fetching catalog patterns ({} source)", self.source.name());
        let payload = self.source.fetch().await?;
        let patterns = decode_patterns(&payload)?;
        info!("Decoded {} catalog patterns", patterns.len());

        let mut summary = RunSummary::default();
        for pattern in &patterns {
            match self.process_pattern(pattern).await {
                Ok(outcome) => {
                    info!("Processed pattern {}", outcome.pattern_id);
                    summary.processed.push(outcome);
                }
                Err(e) => {
                    let reason = format!("{:#}", anyhow::Error::new(e));
                    warn!("Failed to write pattern '{}': {}", pattern.id, reason);
                    summary.failed.push(PatternFailure {
                        pattern_id: pattern.id.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            "Catalog run complete: {} written, {} failed",
            summary.processed.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Write the manifest, package descriptor and page for one pattern
    pub async fn process_pattern(&self, pattern: &CatalogPattern) -> Result<PatternOutcome> {
        let normalized =
            NormalizedPattern::from_pattern(pattern, &self.config.design_asset_base_url);

        ensure_path_component(&pattern.id, &pattern.id, "id")?;
        ensure_path_component(&pattern.id, &normalized.type_slug, "type")?;

        artifacts::write_manifest(&self.config, &pattern.id, &pattern.pattern_file)?;

        let used_placeholder = !manifest::declares_services(&pattern.pattern_file);
        let image = if used_placeholder {
            debug!(
                "Pattern {} declares no services, using placeholder image",
                pattern.id
            );
            self.config.placeholder_image.as_str()
        } else {
            normalized.image_url.as_str()
        };

        let descriptor = PackageDescriptor::build(
            pattern,
            &artifacts::manifest_link(&self.config, &pattern.id),
            &self.config.package_version,
            (self.clock)(),
        );
        artifacts::write_package(&self.config, &pattern.id, &descriptor)?;

        let user = self.profiles.resolve(&pattern.user_id).await;

        let content = render_page(
            &PageContext {
                pattern,
                normalized: &normalized,
                user: &user,
                image,
            },
            &self.config,
        );
        let page = artifacts::write_page(&self.config, &normalized.type_slug, &pattern.id, &content)?;

        Ok(PatternOutcome {
            pattern_id: pattern.id.clone(),
            type_slug: normalized.type_slug,
            page,
            used_placeholder,
        })
    }
}

/// Reject values that would escape their output directory
fn ensure_path_component(pattern_id: &str, value: &str, what: &str) -> Result<()> {
    let reason = if value.is_empty() {
        Some(format!("{what} is empty"))
    } else if value == "." || value == ".." {
        Some(format!("{what} '{value}' is not a valid directory name"))
    } else if value.contains(['/', '\\']) {
        Some(format!("{what} '{value}' contains a path separator"))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidPattern {
            pattern_id: pattern_id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

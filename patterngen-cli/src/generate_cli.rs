//! `patterngen generate` - run the catalog pipeline

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::info;

use patterngen_core::catalog::{FixtureCatalogSource, RemoteProfileResolver};
use patterngen_core::{Pipeline, PipelineConfig, RunSummary};

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Override the catalog service URL
    #[clap(long)]
    pub base_url: Option<String>,

    /// Directory the catalog and collections trees are written under
    #[clap(long, short)]
    pub output_root: Option<PathBuf>,

    /// Read patterns from a JSON file instead of the catalog service
    /// (the bundled sample when no file is given)
    #[clap(long, num_args = 0..=1, value_name = "FILE")]
    pub fixture: Option<Option<PathBuf>>,

    /// Exit non-zero when any pattern fails to write
    #[clap(long)]
    pub fail_on_errors: bool,
}

impl GenerateArgs {
    /// Apply command-line overrides on top of the file configuration
    pub fn apply(&self, mut config: PipelineConfig) -> Result<PipelineConfig> {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(output_root) = &self.output_root {
            config.output_root = output_root.clone();
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub async fn execute(self, config: PipelineConfig) -> Result<()> {
        let config = self.apply(config)?;

        let pipeline = match &self.fixture {
            None => Pipeline::remote(config).context("Failed to set up catalog client")?,
            Some(fixture) => {
                let source = match fixture {
                    Some(path) => FixtureCatalogSource::from_file(path),
                    None => FixtureCatalogSource::sample(),
                };
                // Fixture patterns still resolve their owners against the live service
                let profiles = RemoteProfileResolver::new(&config)
                    .context("Failed to set up profile client")?;
                Pipeline::new(config, Box::new(source), Box::new(profiles))
            }
        };

        info!(
            "Writing catalog content under {}",
            pipeline.config().output_root.display()
        );

        let summary = pipeline
            .run()
            .await
            .context("Catalog generation failed")?;

        print_summary(&summary);

        if self.fail_on_errors && !summary.is_success() {
            std::process::exit(1);
        }

        Ok(())
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Pattern")]
    pattern: String,
    #[tabled(rename = "Type")]
    pattern_type: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Page")]
    page: String,
}

fn print_summary(summary: &RunSummary) {
    if summary.total() == 0 {
        println!("Catalog is empty, nothing written.");
        return;
    }

    if !summary.processed.is_empty() {
        let rows: Vec<OutcomeRow> = summary
            .processed
            .iter()
            .map(|outcome| OutcomeRow {
                pattern: outcome.pattern_id.clone(),
                pattern_type: outcome.type_slug.clone(),
                image: if outcome.used_placeholder {
                    "placeholder".to_string()
                } else {
                    "snapshot".to_string()
                },
                page: outcome.page.path.display().to_string(),
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();
        println!("{table}");
    }

    let created = summary.types_created();
    if !created.is_empty() {
        println!("New type directories: {}", created.join(", "));
    }

    println!(
        "\n{} pattern(s) written, {} failed",
        summary.processed.len(),
        summary.failed.len()
    );

    for failure in &summary.failed {
        eprintln!("  ✗ {}: {}", failure.pattern_id, failure.reason);
    }
}

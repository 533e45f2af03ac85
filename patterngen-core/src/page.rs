//! Catalog page rendering
//!
//! Each pattern gets a Markdown page whose front matter drives the static
//! site's catalog layout. The page has no body.

use crate::catalog::{CatalogPattern, UserInfo};
use crate::config::PipelineConfig;
use crate::normalize::NormalizedPattern;
use serde_yaml_ng::Value;

/// Everything a page interpolates
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub pattern: &'a CatalogPattern,
    pub normalized: &'a NormalizedPattern,
    pub user: &'a UserInfo,
    /// Final image after the services check
    pub image: &'a str,
}

/// Render the page for one pattern
pub fn render_page(ctx: &PageContext<'_>, config: &PipelineConfig) -> String {
    let id = &ctx.pattern.id;
    let catalog_dir = config.catalog_dir.to_string_lossy().replace('\\', "/");
    let raw_url = format!(
        "{}/{}/{}/deploy.yml",
        config.raw_content_base_url.trim_end_matches('/'),
        catalog_dir.trim_matches('/'),
        id
    );

    let mut lines = vec![
        "---".to_string(),
        "layout: item".to_string(),
        format!("name: {}", yaml_scalar(&ctx.pattern.name)),
        format!("userId: {}", yaml_scalar(&ctx.pattern.user_id)),
        format!("userName: {}", yaml_scalar(&ctx.user.full_name())),
        format!("userAvatarURL: {}", yaml_scalar(&ctx.user.avatar_url)),
        format!("type: {}", yaml_scalar(&ctx.normalized.type_slug)),
        "compatibility:".to_string(),
    ];
    if !ctx.normalized.compatibility.is_empty() {
        lines.push(ctx.normalized.compatibility.clone());
    }
    lines.extend([
        format!("patternId: {}", yaml_scalar(id)),
        format!("image: {}", yaml_scalar(ctx.image)),
        format!("patternInfo: |2\n{}", indent_block(&ctx.normalized.info)),
        format!("patternCaveats: |2\n{}", indent_block(&ctx.normalized.caveats)),
        format!("URL: '{}'", raw_url.replace('\'', "''")),
        format!("downloadLink: {}", yaml_scalar(&format!("{id}/deploy.yml"))),
        "---".to_string(),
    ]);

    let mut page = lines.join("\n");
    page.push('\n');
    page
}

/// Indent every non-blank line by two spaces for a literal block scalar
///
/// Paired with the `|2` indicator so text whose first line starts with
/// spaces keeps its indentation.
fn indent_block(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emit a single-line YAML value, double-quoting it only when written
/// plain it would change the front matter's structure
pub fn yaml_scalar(value: &str) -> String {
    if needs_quoting(value) {
        // JSON string syntax is a valid YAML double-quoted scalar
        serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
    } else {
        value.to_string()
    }
}

fn needs_quoting(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    let starts_with_indicator = value.starts_with([
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
        '`',
    ]);

    if starts_with_indicator
        || value.trim() != value
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.contains(['\n', '\r', '\t'])
    {
        return true;
    }

    // Plain text YAML would resolve to a bool, null, number or collection
    !matches!(
        serde_yaml_ng::from_str::<Value>(value),
        Ok(Value::String(parsed)) if parsed == value
    )
}

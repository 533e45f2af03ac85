//! Test helper functions for integration tests

use chrono::{DateTime, TimeZone, Utc};
use patterngen_core::catalog::{StaticProfileResolver, UserInfo};
use patterngen_core::PipelineConfig;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Get the fixtures base path
pub fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Default configuration writing into `root`
pub fn config_for(root: &Path) -> PipelineConfig {
    PipelineConfig {
        output_root: root.to_path_buf(),
        ..Default::default()
    }
}

pub fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

/// Profiles for the users referenced by the fixtures
pub fn profiles() -> StaticProfileResolver {
    StaticProfileResolver::new()
        .with_profile(UserInfo {
            user_id: "user-1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            avatar_url: "https://example.com/ada.png".to_string(),
        })
        .with_profile(UserInfo {
            user_id: "user-2".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            avatar_url: "https://example.com/grace.png".to_string(),
        })
}

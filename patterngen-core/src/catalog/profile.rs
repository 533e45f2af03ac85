//! User profile lookup
//!
//! Pages show the owning user's name and avatar. A profile that cannot be
//! fetched never fails the pattern: the resolver degrades to an empty
//! [`UserInfo`] and logs a warning.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{http_client, null_as_default};
use crate::config::PipelineConfig;
use crate::error::Result;

/// Profile record from the identity service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
}

impl UserInfo {
    /// "{first} {last}", as rendered on pages
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Trait for user profile providers
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    /// Resolve a user id to a profile; failures yield `UserInfo::default()`
    async fn resolve(&self, user_id: &str) -> UserInfo;
}

/// Looks users up at `{base}/api/identity/users/profile/{id}`
pub struct RemoteProfileResolver {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteProfileResolver {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn profile_url(&self, user_id: &str) -> String {
        format!("{}/api/identity/users/profile/{}", self.base_url, user_id)
    }

    async fn try_resolve(&self, url: &str) -> anyhow::Result<UserInfo> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }

        Ok(response.json::<UserInfo>().await?)
    }
}

#[async_trait]
impl ProfileResolver for RemoteProfileResolver {
    async fn resolve(&self, user_id: &str) -> UserInfo {
        let url = self.profile_url(user_id);
        debug!("Fetching user profile from {}", url);

        match self.try_resolve(&url).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Failed to fetch profile for user '{}': {:#}", user_id, e);
                UserInfo::default()
            }
        }
    }
}

/// In-memory profiles; unknown users resolve to an empty profile
#[derive(Debug, Clone, Default)]
pub struct StaticProfileResolver {
    profiles: HashMap<String, UserInfo>,
}

impl StaticProfileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, info: UserInfo) -> Self {
        self.profiles.insert(info.user_id.clone(), info);
        self
    }
}

#[async_trait]
impl ProfileResolver for StaticProfileResolver {
    async fn resolve(&self, user_id: &str) -> UserInfo {
        self.profiles.get(user_id).cloned().unwrap_or_default()
    }
}

//! Startup configuration for the product API client.
//!
//! Resolved once at process start and handed to the client; nothing reads
//! the environment after that.

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const INSTANCE_ID_VAR: &str = "INSTANCE_ID";
pub const TOKEN_VAR: &str = "API_TOKEN";

/// Backend address, instance selector and optional bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub instance_id: String,
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: &str, instance_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            instance_id: instance_id.to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = get(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let instance_id = get(INSTANCE_ID_VAR).ok_or(ConfigError::Missing(INSTANCE_ID_VAR))?;

        let mut config = Self::new(&base_url, &instance_id);
        config.token = get(TOKEN_VAR);
        Ok(config)
    }
}

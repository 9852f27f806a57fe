//! Environment-driven configuration for the external services.

use std::env;

use thiserror::Error;

use backoffice_core::TeamId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(String),
}

/// Connection surface of the backing services.
///
/// Collection/bucket/team ids are provisioning artifacts of the backing
/// project, so they arrive from the environment rather than code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the document/auth/storage service.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    /// Collection holding the product catalog.
    pub products_collection: String,
    /// Team whose memberships carry backoffice role grants.
    pub dashboard_team: TeamId,
    /// Bucket holding product imagery.
    pub images_bucket: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` is this over `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::Missing(key.to_string()))
        };

        Ok(Self {
            endpoint: require("BACKOFFICE_ENDPOINT")?,
            project_id: require("BACKOFFICE_PROJECT_ID")?,
            database_id: require("BACKOFFICE_DATABASE_ID")?,
            products_collection: require("BACKOFFICE_PRODUCTS_COLLECTION")?,
            dashboard_team: TeamId::new(require("BACKOFFICE_DASHBOARD_TEAM_ID")?),
            images_bucket: require("BACKOFFICE_IMAGES_BUCKET")?,
        })
    }
}

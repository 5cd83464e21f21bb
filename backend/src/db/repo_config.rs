//! Repository configuration file support.
//!
//! These sections are embedded in the service configuration file
//! (`[repository]` and `[postgres]`), and can also be read standalone.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::db::PostgresConfig;

/// Repository configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub postgres: PostgresSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    /// `local`, `postgres` or `pg`. When absent the type is detected from the environment.
    #[serde(rename = "type", default)]
    pub repo_type: Option<String>,
}

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostgresSettings {
    /// Empty means "take it from `DATABASE_URL` / `PG_DATABASE_URL`".
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn env_database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("PG_DATABASE_URL"))
        .ok()
        .filter(|url| !url.is_empty())
}

impl RepositoryConfig {
    /// Resolve the repository type.
    ///
    /// Precedence: `REPOSITORY_TYPE` env var, then the `[repository] type`
    /// setting, then Postgres if a database URL is configured, otherwise Local.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        let explicit = std::env::var("REPOSITORY_TYPE")
            .ok()
            .or_else(|| self.repository.repo_type.clone());

        if let Some(raw) = explicit {
            return RepositoryType::from_str(&raw).map_err(|e| {
                RepositoryError::configuration(format!("Invalid repository type: {}", e))
            });
        }

        if !self.postgres.database_url.is_empty() || env_database_url().is_some() {
            Ok(RepositoryType::Postgres)
        } else {
            Ok(RepositoryType::Local)
        }
    }

    /// Build a [`PostgresConfig`] from the `[postgres]` section.
    ///
    /// Returns `Ok(None)` when the resolved type is not Postgres.
    #[cfg(feature = "postgres-repo")]
    pub fn to_postgres_config(&self) -> Result<Option<PostgresConfig>, RepositoryError> {
        if self.repository_type()? != RepositoryType::Postgres {
            return Ok(None);
        }

        let database_url = if self.postgres.database_url.is_empty() {
            env_database_url().ok_or_else(|| {
                RepositoryError::configuration(
                    "Postgres repository requires 'postgres.database_url' or DATABASE_URL",
                )
            })?
        } else {
            self.postgres.database_url.clone()
        };

        Ok(Some(PostgresConfig {
            database_url,
            max_pool_size: self.postgres.max_connections,
            min_pool_size: self.postgres.min_connections,
            connection_timeout_sec: self.postgres.connect_timeout,
            idle_timeout_sec: self.postgres.idle_timeout,
        }))
    }

    /// Convert to PostgresConfig when the feature is disabled.
    #[cfg(not(feature = "postgres-repo"))]
    pub fn to_postgres_config(&self) -> Result<Option<PostgresConfig>, RepositoryError> {
        if self.repository_type()? == RepositoryType::Postgres {
            return Err(RepositoryError::configuration(
                "Postgres repository feature not enabled",
            ));
        }

        Ok(None)
    }
}

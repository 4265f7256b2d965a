//! Database connection settings sourced from the environment.

use crate::error::{CoreError, CoreResult};
use std::env;

/// Environment variable naming the database host.
pub const ENV_HOST: &str = "MYSQL_HOST";
/// Environment variable holding the root credential.
pub const ENV_ROOT_PASSWORD: &str = "MYSQL_ROOT_PASSWORD";
/// Environment variable naming the target database.
pub const ENV_DATABASE: &str = "MYSQL_DATABASE";

/// Connection settings for the migration target database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub root_password: String,
    pub database: String,
}

impl DbConfig {
    /// Build a config, rejecting empty values.
    ///
    /// Errors name the environment variable that would have supplied the
    /// missing value, so the message is actionable either way the config
    /// was constructed.
    pub fn new(host: String, root_password: String, database: String) -> CoreResult<Self> {
        if host.is_empty() {
            return Err(CoreError::MissingEnv {
                name: ENV_HOST.to_string(),
            });
        }
        if root_password.is_empty() {
            return Err(CoreError::MissingEnv {
                name: ENV_ROOT_PASSWORD.to_string(),
            });
        }
        if database.is_empty() {
            return Err(CoreError::MissingEnv {
                name: ENV_DATABASE.to_string(),
            });
        }
        Ok(Self {
            host,
            root_password,
            database,
        })
    }

    /// Read `MYSQL_HOST`, `MYSQL_ROOT_PASSWORD` and `MYSQL_DATABASE`.
    ///
    /// An unset variable is treated the same as an empty one.
    pub fn from_env() -> CoreResult<Self> {
        Self::new(
            env::var(ENV_HOST).unwrap_or_default(),
            env::var(ENV_ROOT_PASSWORD).unwrap_or_default(),
            env::var(ENV_DATABASE).unwrap_or_default(),
        )
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Environment configuration.

use std::env;

/// Variable naming the DynamoDB table that holds the items.
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Configuration could not be read from the environment.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}

/// Settings shared by every handler.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Name of the items table.
    pub table_name: String,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup(TABLE_NAME_VAR)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(TABLE_NAME_VAR))?;
        Ok(Self { table_name })
    }
}

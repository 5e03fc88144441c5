//! Process configuration read once at startup.

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// MongoDB connection string (env: DATABASE_URL)
    pub database_url: Option<String>,
    /// Database holding the bakery collections (env: DATABASE_NAME)
    pub database_name: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// `host:port` as handed to the listener, which resolves host names.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

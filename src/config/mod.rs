//! Configuration management for the users API
//!
//! Settings are read from environment variables (and an optional `.env`
//! file). Everything has a default, so the server starts with no
//! configuration at all.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// What to do when the `filter` query parameter fails its rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryValidation {
    /// Log the failures and serve the listing anyway
    #[default]
    Log,
    /// Reject the request with 400
    Enforce,
}

impl FromStr for QueryValidation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(QueryValidation::Log),
            "enforce" => Ok(QueryValidation::Enforce),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid query validation mode: '{}'. Expected: log or enforce",
                s
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Current environment
    pub environment: Environment,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// CORS allowed origins, comma separated
    pub cors_allowed_origins: Option<String>,

    /// Query parameter validation mode for user listing
    pub query_validation: QueryValidation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            environment: Environment::Development,
            log_level: "info".to_string(),
            cors_allowed_origins: None,
            query_validation: QueryValidation::Log,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .map(|s| s.parse::<Environment>())
            .unwrap_or(Ok(Environment::Development))?;

        let host = env::var("HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidValue("HOST must be an IP address".to_string()))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").ok();

        let query_validation = env::var("QUERY_VALIDATION")
            .map(|s| s.parse::<QueryValidation>())
            .unwrap_or(Ok(QueryValidation::Log))?;

        Ok(Config {
            host,
            port,
            environment,
            log_level,
            cors_allowed_origins,
            query_validation,
        })
    }
}

//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MINIMART_TOKEN_SECRET` - Token signing secret (min 32 chars)
//!
//! ## Optional
//! - `MINIMART_DATABASE_URL` - `SQLite` connection string (default: sqlite:minimart.db)
//! - `MINIMART_HOST` - Bind address (default: 127.0.0.1)
//! - `MINIMART_PORT` - Listen port (default: 8080)
//! - `MINIMART_ASSETS_DIR` - Static asset directory served at the web root (default: assets)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Token signing secret
    pub token_secret: SecretString,
    /// Directory of static assets served at the web root
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the token secret fails the minimum-length check.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url =
            SecretString::from(get_env_or_default("MINIMART_DATABASE_URL", "sqlite:minimart.db"));
        let host = get_env_or_default("MINIMART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MINIMART_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MINIMART_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MINIMART_PORT".to_string(), e.to_string()))?;
        let token_secret = SecretString::from(get_required_env("MINIMART_TOKEN_SECRET")?);
        validate_token_secret(&token_secret, "MINIMART_TOKEN_SECRET")?;
        let assets_dir = PathBuf::from(get_env_or_default("MINIMART_ASSETS_DIR", "assets"));

        Ok(Self {
            database_url,
            host,
            port,
            token_secret,
            assets_dir,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the token secret meets minimum length requirements.
fn validate_token_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

//! Environment-driven application configuration.

use crate::error::config::ConfigError;

/// Cookie name used for the session id when `SESSION_COOKIE_NAME` is unset.
pub static DEFAULT_SESSION_COOKIE_NAME: &str = "sessionid";

/// Address the server binds to when `BIND_ADDRESS` is unset.
pub static DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub session_cookie_name: String,
    pub bind_address: String,
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - `SESSION_COOKIE_NAME` is empty or contains
    ///   characters not allowed in a cookie name
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let session_cookie_name = match std::env::var("SESSION_COOKIE_NAME") {
            Ok(name) => validate_cookie_name(name)?,
            Err(_) => DEFAULT_SESSION_COOKIE_NAME.to_string(),
        };

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            database_url,
            session_cookie_name,
            bind_address,
        })
    }
}

fn validate_cookie_name(name: String) -> Result<String, ConfigError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(name)
    } else {
        Err(ConfigError::InvalidEnvValue {
            var: "SESSION_COOKIE_NAME".to_string(),
            reason: format!("{name:?} is not a valid cookie name"),
        })
    }
}

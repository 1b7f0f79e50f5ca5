use std::env;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_POSTNL_BASE_URL: &str = "https://api-sandbox.postnl.nl/v2";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, built once at startup and shared read-only by every request
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret expected in `X-Client-Token`; `None` means open mode
    pub client_token: Option<String>,
    pub postnl_base_url: String,
    pub postnl_api_key: String,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is loaded first when present,
    /// which keeps local development close to the deployed Lambda setup.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty strings count as unset, matching how the deployment UI clears a variable
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_token = read("CLIENT_TOKEN");
        if client_token.is_none() {
            warn!("CLIENT_TOKEN not set, address check endpoint is open");
        }

        let postnl_base_url = read("POSTNL_BASE_URL")
            .unwrap_or_else(|| DEFAULT_POSTNL_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let postnl_api_key = read("POSTNL_API_KEY")
            .ok_or(ConfigError::Missing("POSTNL_API_KEY"))?;

        let allowed_origins = read("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let port = match read("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            client_token,
            postnl_base_url,
            postnl_api_key,
            allowed_origins,
            port,
        })
    }
}

/// Split a comma separated allow-list, dropping blank entries
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

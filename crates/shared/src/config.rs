//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Integration platform configuration.
    pub integration: IntegrationConfig,
    /// Import configuration.
    #[serde(default)]
    pub import: ImportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a single request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    60
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
///
/// Tokens are issued by the auth collaborator, so only the verification
/// secret is configured here.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key shared with the auth collaborator.
    pub secret: String,
}

/// Integration platform configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationConfig {
    /// Base URL of the integration platform API.
    #[serde(default = "default_api_uri")]
    pub api_uri: String,
    /// Workspace key, used as the token issuer.
    pub workspace_key: String,
    /// Workspace secret, used to sign customer tokens.
    pub workspace_secret: String,
    /// Lifetime of generated customer tokens in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Per-request timeout in seconds.
    #[serde(default = "default_integration_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_uri() -> String {
    "https://api.integration.app".to_string()
}

fn default_token_ttl() -> u64 {
    7200 // 2 hours
}

fn default_integration_timeout() -> u64 {
    30
}

/// Import configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Maximum number of pages fetched in one import.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

fn default_max_pages() -> usize {
    1000
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLINK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

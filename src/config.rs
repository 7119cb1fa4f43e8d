use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port, shared by the HTTP routes and the WebSocket endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins, comma separated
    pub cors_origins: Option<String>,

    /// Level for this crate and tower_http when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Directory holding host.html, view.html and the static assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Number of documents in the catalog of every new room
    #[serde(default = "default_total_pdfs")]
    pub total_pdfs: u32,

    /// Periodically drop rooms that have no members left
    #[serde(default)]
    pub reap_empty_rooms: bool,

    #[serde(default = "default_reap_interval_secs")]
    pub reap_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        envy::from_env::<Config>().map_err(ConfigError::EnvError)
    }

    /// Build a configuration from explicit key/value pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(ConfigError::EnvError)
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Catalog size handed to new rooms, never below one.
    pub fn room_total_pdfs(&self) -> u32 {
        self.total_pdfs.max(1)
    }

    /// Allowed CORS origins, empty when CORS is not configured.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "dev" || self.environment.to_lowercase() == "development"
    }

    /// Fallback `EnvFilter` directives used when RUST_LOG is unset.
    /// Development additionally traces axum extractor rejections.
    pub fn log_filter(&self) -> String {
        let mut filter = format!("slide_relay={0},tower_http={0},info", self.log_level);
        if self.is_development() {
            filter.push_str(",axum::rejection=trace");
        }
        filter
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            cors_origins: None,
            service_name: default_service_name(),
            static_dir: default_static_dir(),
            total_pdfs: default_total_pdfs(),
            reap_empty_rooms: false,
            reap_interval_secs: default_reap_interval_secs(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_service_name() -> String {
    "slide-relay".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_total_pdfs() -> u32 {
    3
}

fn default_reap_interval_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_vars(Vec::new()).expect("defaults");
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.total_pdfs, 3);
        assert_eq!(config.static_dir, "static");
        assert!(!config.reap_empty_rooms);
        assert_eq!(config.reap_interval_secs, 300);
        assert!(config.is_development());
        assert!(config.cors_origin_list().is_empty());
        assert_eq!(
            config.log_filter(),
            "slide_relay=debug,tower_http=debug,info,axum::rejection=trace"
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8080"),
            ("TOTAL_PDFS", "7"),
            ("REAP_EMPTY_ROOMS", "true"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("ENVIRONMENT", "prod"),
            ("LOG_LEVEL", "warn"),
        ]))
        .expect("config");
        assert_eq!(config.port, 8080);
        assert_eq!(config.room_total_pdfs(), 7);
        assert!(config.reap_empty_rooms);
        assert!(!config.is_development());
        assert_eq!(config.log_filter(), "slide_relay=warn,tower_http=warn,info");
        assert_eq!(
            config.cors_origin_list(),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn zero_catalog_size_is_raised_to_one() {
        let config = Config::from_vars(vars(&[("TOTAL_PDFS", "0")])).expect("config");
        assert_eq!(config.room_total_pdfs(), 1);
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = Config::from_vars(vars(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(err.to_string().starts_with("Environment variable error"));
    }
}

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path to the sqlite file. `":memory:"` runs fully in memory, which is
    /// what the test suites use.
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "ServerConfig::default")]
    pub server: ServerConfig,
    #[serde(default = "DatabaseConfig::default")]
    pub database: DatabaseConfig,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl ServerConfig {
    /// Full bind address, e.g. `"127.0.0.1:8080"`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde defaults
// ---------------------------------------------------------------------------

pub fn default_bind() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_max_connections() -> usize {
    1000
}

pub fn default_db_path() -> String {
    "products.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_localhost() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.database.path, "products.db");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9999
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.addr(), "127.0.0.1:9999");
        assert_eq!(config.server.max_connections, 1000);
    }
}

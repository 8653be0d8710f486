use std::fs;
use tracing::{debug, error, info};

use crate::types::server_config::{AppConfig, ConfigError};

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    info!("Loading configuration from: {}", path);

    let contents = fs::read_to_string(path)?;
    debug!("Processing file: {}", path);

    let config = parse_config(&contents)?;

    info!("Configuration loaded successfully");
    debug!("Config: {:?}", config);

    Ok(config)
}

/// Parse and validate a TOML configuration document.
///
/// Split out from [`load_config`] so tests can exercise the parsing and
/// validation rules without touching the filesystem.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    if contents.trim().is_empty() {
        error!("Configuration file is empty");
        return Err(ConfigError::InvalidConfig("empty file".into()));
    }

    let config: AppConfig = toml::from_str(contents)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.bind.is_empty() {
        return Err(ConfigError::InvalidConfig("bind cannot be empty".into()));
    }

    if config.server.max_connections == 0 {
        return Err(ConfigError::InvalidConfig(
            "max_connections must be greater than 0".into(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::InvalidConfig(
            "database path cannot be empty".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_config() {
        let config = parse_config(
            r#"
            [server]
            bind = "0.0.0.0"
            port = 8080
            max_connections = 64

            [database]
            path = ":memory:"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.database.path, ":memory:");
    }

    #[test]
    fn rejects_an_empty_file() {
        let err = parse_config("  \n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_max_connections() {
        let err = parse_config(
            r#"
            [server]
            max_connections = 0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_config("this is not toml = [").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}

pub mod error_response;
pub mod product;
pub mod server_config;

pub use self::error_response::ErrorResponse;
pub use self::product::{DataValidationError, Product};
pub use self::server_config::{AppConfig, ConfigError, DatabaseConfig, ServerConfig};

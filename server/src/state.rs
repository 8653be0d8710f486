use std::sync::Arc;

use tokio_rusqlite::Connection;

use shared::types::AppConfig;

/// Per-request application state. Cheap to clone: the connection is a
/// handle onto a single background sqlite thread and the config is shared.
#[derive(Clone)]
pub struct AppState {
    pub db: Connection,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

mod config;
mod error;
mod routes;
mod schemas;

pub use config::{Config, DatabaseConfig, ServerConfig};
pub use error::ApiError;
pub use routes::{router, AppState, GREETING, UPLOAD_ACK};
pub use schemas::*;

use anyhow::Result;
use byteshop_core::{AppStore, MemoryAppStore};
use byteshop_db::Database;
use std::sync::Arc;

/// Open the storage backend named in the configuration
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn AppStore>> {
    match config.backend.as_str() {
        "sqlite" => {
            // Create parent directory for database if it doesn't exist
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let db = Database::new_with_config(&config.path, config.pool_config()).await?;
            db.migrate().await?;
            let stored = db.apps().count().await?;
            tracing::info!(
                "Database initialized at {} ({} apps stored)",
                config.path.display(),
                stored
            );
            Ok(Arc::new(db))
        }
        "memory" => {
            tracing::warn!("Using in-memory store; uploads are lost on restart");
            Ok(Arc::new(MemoryAppStore::new()))
        }
        other => {
            anyhow::bail!("Invalid database backend: {}. Must be 'sqlite' or 'memory'", other);
        }
    }
}

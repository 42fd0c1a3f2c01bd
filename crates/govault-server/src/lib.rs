//! GoVault Relationship Server
//!
//! HTTP surface over the relationship engine. Serves related-document
//! lookups, impact reports and candidate-record analysis to the vault UI.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use govault_engine::RelationshipEngine;
use govault_store::{SqliteRecordStore, StoreError};
use handlers::{create_router, AppState, StoreProvider};
use std::fs::File;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding or seed file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vault database error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Import the configured seed snapshot, if any
pub fn seed_database(config: &ServerConfig) -> Result<usize, ServerError> {
    let Some(seed_file) = &config.seed_file else {
        return Ok(0);
    };

    let mut store = SqliteRecordStore::new(&config.database_path)?;
    let imported = store.import_snapshot(File::open(seed_file)?)?;
    info!("Imported {} records from {}", imported, seed_file.display());
    Ok(imported)
}

/// Start the HTTP server
///
/// Validates configuration, seeds the vault if requested, and starts the
/// axum server.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing(&config.log_level);
    config.validate()?;

    info!("Starting GoVault relationship server");
    info!("Bind address: {}", config.bind_addr());
    info!("Vault database: {}", config.database_path.display());
    info!("Fetch timeout: {} ms", config.fetch_timeout_ms);

    seed_database(&config)?;

    let engine = RelationshipEngine::new(config.engine.clone());
    let stores = StoreProvider::new(config.database_path.clone(), config.fetch_timeout());
    let app = create_router(AppState::new(engine, stores));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seed_database() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        let mut seed = File::create(&seed_path).unwrap();
        seed.write_all(br#"[{"id": "prop-1", "category": "Property", "fields": {"address": "1 Elm St"}}]"#)
            .unwrap();

        let mut config = ServerConfig::default_test_config();
        config.database_path = dir.path().join("vault.db");
        config.seed_file = Some(seed_path);

        assert_eq!(seed_database(&config).unwrap(), 1);
        assert_eq!(SqliteRecordStore::new(&config.database_path).unwrap().count().unwrap(), 1);
    }

    #[test]
    fn test_no_seed_file() {
        let config = ServerConfig::default_test_config();
        assert_eq!(seed_database(&config).unwrap(), 0);
    }
}

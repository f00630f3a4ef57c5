use super::config::{DatabaseConfig, redact_database_url};
use crate::error::{ApiError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

/// Open a pooled SeaORM connection from config
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(&config.url);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .sqlx_logging(true);

    let conn = Database::connect(opt).await.map_err(|e| {
        ApiError::internal(format!("Failed to connect to database: {}", e))
    })?;

    tracing::info!(
        url = %redact_database_url(&config.url),
        max_connections = config.max_connections,
        "Database connected"
    );

    Ok(conn)
}

/// Ping the database to check connection health
pub async fn ping(conn: &DatabaseConnection) -> Result<()> {
    conn.ping()
        .await
        .map_err(|e| ApiError::internal(format!("Database ping failed: {}", e)))
}

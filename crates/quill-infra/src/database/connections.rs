use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

/// Pooled connection to the posts database.
///
/// Constructed once at startup and handed to the repositories; clones share
/// the same pool.
#[cfg(feature = "postgres")]
// sea-orm's `mock` feature (enabled for this crate's tests) makes `DbConn` non-Clone.
#[cfg_attr(not(test), derive(Clone))]
pub struct DatabaseConnection {
    pub conn: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnection {
    /// Open the connection pool.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}-{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { conn })
    }

    /// Check the database answers.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}

/// Database connection pool management
///
/// Creates the PostgreSQL connection pool used by the Postgres stores and
/// verifies connectivity before the server starts accepting requests.
///
/// # Example
///
/// ```no_run
/// use inkpost_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let config = PoolConfig {
///     url: std::env::var("DATABASE_URL").unwrap(),
///     ..Default::default()
/// };
/// let pool = create_pool(config).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections to keep warm
    pub min_connections: u32,

    /// Timeout for acquiring a connection (seconds)
    pub acquire_timeout_seconds: u64,

    /// How long a connection may sit idle before being closed (seconds)
    pub idle_timeout_seconds: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
        }
    }
}

/// Creates a PostgreSQL connection pool and pings the database
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable,
/// or the connectivity check fails.
pub async fn create_pool(config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        max_connections = config.max_connections,
        "creating database pool"
    );

    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds));

    if let Some(idle) = config.idle_timeout_seconds {
        options = options.idle_timeout(Duration::from_secs(idle));
    }

    let pool = options.connect(&config.url).await?;

    // Fail at startup rather than on the first request.
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!("database pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(config.idle_timeout_seconds.is_some());
    }
}

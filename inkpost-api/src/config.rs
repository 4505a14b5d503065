/// Configuration management for the API server
///
/// Loads configuration from environment variables into a type-safe struct.
/// Missing or malformed signing material aborts startup; it is never a
/// per-request error.
///
/// # Environment Variables
///
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8080)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `JWT_SECRET`: token signing secret, at least 32 bytes (required)
/// - `JWT_ALGORITHM`: signing algorithm name, e.g. HS256 (required)
/// - `TOKEN_TTL_MINUTES`: access token lifetime (default: 30)
/// - `RUST_LOG`: log filter (default: info)

use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for token signing
    ///
    /// Must be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Signing algorithm, agreed upon at deployment time
    pub algorithm: Algorithm,

    /// Access token lifetime in minutes
    pub token_ttl_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, the signing
    /// secret is too short, or the algorithm name is not recognized.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let algorithm_name = env::var("JWT_ALGORITHM")
            .map_err(|_| anyhow::anyhow!("JWT_ALGORITHM environment variable is required"))?;

        let algorithm = Algorithm::from_str(&algorithm_name)
            .map_err(|_| anyhow::anyhow!("unsupported JWT_ALGORITHM: {}", algorithm_name))?;

        let token_ttl_minutes = env::var("TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                secret,
                algorithm,
                token_ttl_minutes,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

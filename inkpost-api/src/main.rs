//! # Inkpost API Server
//!
//! A small blog/user API with token authentication:
//! - form-encoded login minting signed bearer tokens (`POST /token`)
//! - user registration and CRUD
//! - bearer-token-protected article endpoints
//! - a websocket broadcast board
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p inkpost-api
//! ```

use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost_api::app::{build_router, AppState};
use inkpost_api::config::Config;
use inkpost_shared::auth::token::{TokenIssuer, TokenVerifier};
use inkpost_shared::db::pool::{create_pool, PoolConfig};
use inkpost_shared::store::{PgArticleStore, PgCredentialStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpost_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Inkpost API v{} starting", env!("CARGO_PKG_VERSION"));

    // A missing secret or algorithm fails here, before any request.
    let config = Config::from_env()?;

    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    let users = Arc::new(PgCredentialStore::new(pool.clone()));
    let articles = Arc::new(PgArticleStore::new(pool));

    let issuer = Arc::new(TokenIssuer::new(
        &config.auth.secret,
        config.auth.algorithm,
        Duration::minutes(config.auth.token_ttl_minutes),
    ));
    let verifier = Arc::new(TokenVerifier::new(
        &config.auth.secret,
        config.auth.algorithm,
    ));

    let bind_address = config.bind_address();
    let state = AppState::new(users, articles, issuer, verifier, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

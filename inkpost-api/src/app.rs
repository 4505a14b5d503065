/// Application state and router builder
///
/// The state is the explicitly constructed server context: every
/// collaborator (stores, token issuer/verifier, websocket registry,
/// configuration) is resolved once at startup and injected here, then
/// handed to handlers via Axum's `State` extractor. Nothing is re-resolved
/// per request.
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health              # health check (public)
/// ├── POST /token               # login, form-encoded (public)
/// ├── /user                     # user CRUD (public)
/// │   ├── POST   /
/// │   ├── GET    /
/// │   ├── GET    /me            # protected: resolved identity
/// │   ├── GET    /:id
/// │   ├── PUT    /:id
/// │   └── DELETE /:id
/// ├── /articles                 # protected by the bearer guard
/// │   ├── POST /
/// │   └── GET  /:id
/// └── GET  /ws                  # websocket board (public)
/// ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use inkpost_shared::auth::token::{TokenIssuer, TokenVerifier};
use inkpost_shared::models::user::User;
use inkpost_shared::store::{ArticleStore, CredentialStore};

use crate::{config::Config, error::ApiError, routes, ws::ClientRegistry};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the
/// fields are all cheaply cloneable `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// User credential store
    pub users: Arc<dyn CredentialStore>,

    /// Article store
    pub articles: Arc<dyn ArticleStore>,

    /// Token issuer
    pub issuer: Arc<TokenIssuer>,

    /// Token verifier
    pub verifier: Arc<TokenVerifier>,

    /// Websocket board client registry
    pub board: Arc<ClientRegistry>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state from its collaborators
    pub fn new(
        users: Arc<dyn CredentialStore>,
        articles: Arc<dyn ArticleStore>,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        config: Config,
    ) -> Self {
        Self {
            users,
            articles,
            issuer,
            verifier,
            board: Arc::new(ClientRegistry::new()),
            config: Arc::new(config),
        }
    }
}

/// The authenticated user resolved by the bearer guard
///
/// Inserted into request extensions; handlers extract it with
/// `Extension<CurrentUser>`.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(
            "/me",
            get(routes::users::get_me).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                bearer_guard,
            )),
        )
        .route("/", post(routes::users::create_user))
        .route("/", get(routes::users::list_users))
        .route("/:id", get(routes::users::get_user))
        .route("/:id", put(routes::users::update_user))
        .route("/:id", delete(routes::users::delete_user));

    // Article routes sit behind the bearer guard as a group.
    let article_routes = Router::new()
        .route("/", post(routes::articles::create_article))
        .route("/:id", get(routes::articles::get_article))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_guard,
        ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/token", post(routes::auth::get_token))
        .route("/ws", get(crate::ws::board_handler))
        .nest("/user", user_routes)
        .nest("/articles", article_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Bearer token guard
///
/// Precondition for every endpoint requiring identity:
///
/// 1. Extract the bearer token from the Authorization header
/// 2. Verify signature and expiry
/// 3. Resolve the subject to a user via the credential store
/// 4. Inject the resolved [`CurrentUser`] for the wrapped handler
///
/// Every failure collapses into [`ApiError::Unauthenticated`]; the caller
/// never learns which step rejected the request.
async fn bearer_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let subject = state
        .verifier
        .verify(token, Utc::now())
        .map_err(|_| ApiError::Unauthenticated)?;

    // A valid token whose subject no longer exists is rejected the same
    // way as a bad token.
    let user = state
        .users
        .get_by_username(&subject)
        .await
        .map_err(|_| ApiError::Unauthenticated)?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

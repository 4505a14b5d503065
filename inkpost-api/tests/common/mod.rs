/// Common test utilities for integration tests
///
/// Builds an app instance over the in-memory stores so the end-to-end
/// tests run without a database, and provides request/response helpers
/// for driving the router through tower.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use chrono::Duration;
use jsonwebtoken::Algorithm;
use tower::ServiceExt;

use inkpost_api::app::{build_router, AppState};
use inkpost_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};
use inkpost_shared::auth::token::{TokenIssuer, TokenVerifier};
use inkpost_shared::store::{MemoryArticleStore, MemoryCredentialStore};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context holding the app and its collaborators
pub struct TestContext {
    pub app: axum::Router,
    pub issuer: Arc<TokenIssuer>,
}

impl TestContext {
    /// Builds a fresh app over empty in-memory stores
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "unused-in-memory".to_string(),
                max_connections: 1,
            },
            auth: AuthConfig {
                secret: TEST_SECRET.to_string(),
                algorithm: Algorithm::HS256,
                token_ttl_minutes: 30,
            },
        };

        let issuer = Arc::new(TokenIssuer::new(
            TEST_SECRET,
            Algorithm::HS256,
            Duration::minutes(30),
        ));
        let verifier = Arc::new(TokenVerifier::new(TEST_SECRET, Algorithm::HS256));

        let state = AppState::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryArticleStore::new()),
            issuer.clone(),
            verifier,
            config,
        );

        TestContext {
            app: build_router(state),
            issuer,
        }
    }

    /// Sends a JSON request, optionally with a bearer token
    pub async fn json_request(
        &self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Sends a GET request, optionally with a bearer token
    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder.body(Body::empty()).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Sends a form-encoded login request
    pub async fn login_request(&self, username: &str, password: &str) -> Response {
        let form = format!("username={}&password={}", username, password);
        let request = Request::builder()
            .method("POST")
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Registers a user, asserting success
    pub async fn register(&self, username: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .json_request(
                "POST",
                "/user",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    /// Registers and logs in, returning the access token
    pub async fn register_and_login(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> String {
        self.register(username, email, password).await;

        let response = self.login_request(username, password).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }
}

/// Reads a response body as JSON
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Reads a response body as raw bytes
pub async fn read_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

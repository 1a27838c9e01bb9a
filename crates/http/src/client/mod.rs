//! MockTail HTTP client
//!
//! Every authenticated call goes through the interceptor in
//! [`MocktailClient::send`]: tokens close to expiry are refreshed first, the
//! `Authorization` header is attached, and a 401 on a protected page ends
//! the session.

pub mod access_tokens;
pub mod auth;
pub mod cancel;
pub mod config;
pub mod error;
pub mod projects;
mod refresh;
pub mod templates;

pub use cancel::cancellable;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use refresh::RefreshOutcome;

use chrono::Utc;
use mocktail_core::{Navigator, RouteTable, Session, TokenStore, force_login};
use refresh::SessionRefresher;
use reqwest::{Client, ClientBuilder, StatusCode, header};
use std::sync::Arc;
use tracing::{debug, warn};

struct ClientInner {
    http: Client,
    config: ClientConfig,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    routes: &'static RouteTable,
    refresher: SessionRefresher,
}

/// MockTail API client
///
/// Cloning is cheap; clones share the session and the refresh coalescing.
#[derive(Clone)]
pub struct MocktailClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for MocktailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MocktailClient")
            .field("base_url", &self.inner.config.base_url)
            .finish_non_exhaustive()
    }
}

impl PartialEq for MocktailClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl MocktailClient {
    /// Create a client guarding the application's standard routes
    pub fn new(
        config: ClientConfig,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        Self::with_routes(config, tokens, navigator, RouteTable::standard())
    }

    /// Create a client with a custom route table
    pub fn with_routes(
        config: ClientConfig,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
        routes: &'static RouteTable,
    ) -> Result<Self, ClientError> {
        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = config.timeout {
                client_builder = client_builder.timeout(timeout);
            }
            client_builder = client_builder.user_agent(config.user_agent.clone());
        }

        let http = client_builder.build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                tokens,
                navigator,
                routes,
                refresher: SessionRefresher::default(),
            }),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The session owner
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Current stored session
    pub fn session(&self) -> Session {
        self.inner.tokens.read()
    }

    /// Create a request builder for an endpoint path such as `auth/login`
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let request = self
            .inner
            .http
            .request(method, self.inner.config.endpoint(path));
        with_credentials(request)
    }

    /// Refresh the session now, sharing a refresh already in flight
    pub async fn refresh_session(&self) -> RefreshOutcome {
        let Some(user_id) = self.inner.tokens.user_id() else {
            return RefreshOutcome::NoUser;
        };
        self.inner
            .refresher
            .refresh(&self.inner.http, &self.inner.config, &self.inner.tokens, &user_id)
            .await
    }

    /// Pre-request step of the interceptor
    ///
    /// Returns the `Authorization` header value to attach, if any.
    async fn authorize(&self) -> Result<Option<String>, ClientError> {
        let session = self.inner.tokens.read();
        let lookahead = chrono::Duration::from_std(self.inner.config.refresh_lookahead)
            .unwrap_or_else(|_| chrono::Duration::zero());

        if session.needs_refresh(Utc::now(), lookahead) && session.user_id.is_some() {
            debug!("Access token near expiry, refreshing before request");
            let outcome = self.refresh_session().await;
            if !outcome.is_success() {
                warn!(?outcome, "Session refresh failed");
                force_login(&self.inner.tokens, self.inner.navigator.as_ref());
                return Err(ClientError::SessionExpired);
            }
            return Ok(self.inner.tokens.read().authorization_header());
        }

        Ok(session.authorization_header())
    }

    /// Send a request through the interceptor
    pub async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let mut request = request;
        if let Some(authorization) = self.authorize().await? {
            request = request.header(header::AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            let current = self.inner.navigator.current_path();
            if self.inner.routes.is_protected_path(&current) {
                force_login(&self.inner.tokens, self.inner.navigator.as_ref());
            }
        }

        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }

    /// Execute an authenticated request and decode the JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Execute an authenticated request, ignoring the body
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await.map(drop)
    }

    /// Execute a request that bypasses the interceptor
    pub async fn execute_public<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = public_response(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request that bypasses the interceptor, ignoring the body
    pub async fn execute_public_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        public_response(request).await.map(drop)
    }
}

async fn public_response(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

/// Send the refresh cookie with browser requests
#[cfg(target_arch = "wasm32")]
fn with_credentials(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
const fn with_credentials(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    request
}

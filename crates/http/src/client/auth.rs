//! Authentication endpoints

use super::{ClientError, MocktailClient, RefreshOutcome};
use crate::types::{Credentials, LoginResponse, ServiceAvailability};
use chrono::Utc;
use mocktail_core::{AccessToken, AuthorizedUser};
use reqwest::Method;
use tracing::{debug, info, warn};

impl MocktailClient {
    /// Log in and start a session
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let request = self.request(Method::POST, "auth/login").json(credentials);
        let response: LoginResponse = self.execute_public(request).await?;

        self.tokens()
            .begin(&response.access_token, &response.authorized_user.id)?;
        info!(user = %response.authorized_user.id, "Logged in");
        Ok(response)
    }

    /// Create an account; does not log in
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let request = self.request(Method::POST, "auth/register").json(credentials);
        self.execute_public_empty(request).await
    }

    /// End the session on the server and locally
    ///
    /// Server errors are logged; the local session is cleared regardless.
    pub async fn logout(&self) {
        let request = self.request(Method::POST, "auth/logout");
        if let Err(e) = self.execute_empty(request).await {
            warn!(error = %e, "Logout request failed");
        }
        self.tokens().clear();
        info!("Logged out");
    }

    /// Profile of the logged-in user
    pub async fn profile(&self) -> Result<AuthorizedUser, ClientError> {
        let request = self.request(Method::GET, "auth/profile");
        self.execute(request).await
    }

    /// Ask the server whether the current token is still accepted
    pub async fn check_status(&self) -> Result<(), ClientError> {
        let request = self.request(Method::GET, "auth/check-status");
        self.execute_empty(request).await
    }

    pub async fn check_auth_availability(&self) -> Result<ServiceAvailability, ClientError> {
        let request = self.request(Method::GET, "auth/check-availability");
        self.execute_public(request).await
    }

    /// Recover the session left by a previous page load
    ///
    /// A still-valid access token is reused; otherwise the session is
    /// refreshed for the cached user. Returns `None` and clears the store
    /// when there is nothing to restore.
    pub async fn restore_session(&self) -> Option<AccessToken> {
        let session = self.session();
        session.user_id.as_ref()?;

        let lookahead = chrono::Duration::from_std(self.config().refresh_lookahead)
            .unwrap_or_else(|_| chrono::Duration::zero());
        if session.access_token.is_some() && !session.needs_refresh(Utc::now(), lookahead) {
            debug!("Reusing stored access token");
            return session.access_token();
        }

        match self.refresh_session().await {
            RefreshOutcome::Refreshed => self.session().access_token(),
            outcome => {
                debug!(?outcome, "No session to restore");
                self.tokens().clear();
                None
            }
        }
    }
}

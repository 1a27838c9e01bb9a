//! Session refresh with request coalescing
//!
//! At most one refresh request is in flight. Callers that arrive while it
//! runs wait for it and receive the same outcome instead of sending their
//! own request.

use super::config::ClientConfig;
use crate::types::RefreshRequest;
use mocktail_core::{TokenGrant, TokenStore};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Result of a refresh attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// No session owner is cached
    NoUser,
    /// No refresh token is stored; nothing was sent
    NoRefreshToken,
    /// The server answered with a non-success status
    Rejected(u16),
    Transport(String),
    /// The new tokens could not be persisted
    Storage(String),
}

impl RefreshOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Refreshed)
    }
}

#[derive(Debug, Default)]
pub(crate) struct SessionRefresher {
    last: Mutex<Option<RefreshOutcome>>,
    completed: AtomicU64,
}

impl SessionRefresher {
    /// Exchange the stored refresh token for a new pair, sharing any
    /// refresh that is already running
    pub(crate) async fn refresh(
        &self,
        http: &reqwest::Client,
        config: &ClientConfig,
        tokens: &TokenStore,
        user_id: &str,
    ) -> RefreshOutcome {
        let Some(refresh_token) = tokens.read().refresh_token else {
            debug!("No refresh token stored, skipping refresh");
            return RefreshOutcome::NoRefreshToken;
        };

        let seen = self.completed.load(Ordering::Acquire);
        let mut last = self.last.lock().await;
        if self.completed.load(Ordering::Acquire) != seen {
            if let Some(outcome) = last.as_ref() {
                debug!(?outcome, "Joined in-flight refresh");
                return outcome.clone();
            }
        }

        let outcome = perform(http, config, tokens, user_id, &refresh_token).await;
        *last = Some(outcome.clone());
        self.completed.fetch_add(1, Ordering::AcqRel);
        outcome
    }
}

async fn perform(
    http: &reqwest::Client,
    config: &ClientConfig,
    tokens: &TokenStore,
    user_id: &str,
    refresh_token: &str,
) -> RefreshOutcome {
    let request = http
        .post(config.endpoint("auth/refresh-token"))
        .json(&RefreshRequest {
            user_id,
            refresh_token,
        });
    #[cfg(target_arch = "wasm32")]
    let request = request.fetch_credentials_include();

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Token refresh request failed");
            return RefreshOutcome::Transport(e.to_string());
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Token refresh rejected");
        return RefreshOutcome::Rejected(status.as_u16());
    }

    let grant: TokenGrant = match response.json().await {
        Ok(grant) => grant,
        Err(e) => {
            warn!(error = %e, "Malformed token refresh response");
            return RefreshOutcome::Transport(e.to_string());
        }
    };

    match tokens.store(&grant) {
        Ok(()) => {
            debug!("Session refreshed");
            RefreshOutcome::Refreshed
        }
        Err(e) => RefreshOutcome::Storage(e.to_string()),
    }
}

//! Persistent session tokens
//!
//! [`TokenStore`] is the single owner of the session: access token, refresh
//! token, token type, absolute expiry and the id of the user the session
//! belongs to. Every entry is written and cleared together, so "is there a
//! refreshable session" has exactly one answer.

use crate::config::{AuthConfig, StorageKeys};
use crate::error::CoreResult;
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::sync::Arc;
use tracing::debug;

/// Token pair issued by login or refresh
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds; the server sends either a number or a numeric string
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    AuthConfig::DEFAULT_TOKEN_TYPE.to_string()
}

/// Render-friendly copy of the access token; never carries the refresh token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub token_type: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Snapshot of everything the token store holds
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
}

impl Session {
    /// True when the token expires within `lookahead` of `now`, or already has
    pub fn needs_refresh(&self, now: DateTime<Utc>, lookahead: Duration) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at
                .checked_sub_signed(lookahead)
                .is_none_or(|due| due < now)
        })
    }

    /// `Authorization` header value, if an access token is stored
    pub fn authorization_header(&self) -> Option<String> {
        let token = self.access_token.as_deref()?;
        let token_type = self
            .token_type
            .as_deref()
            .unwrap_or(AuthConfig::DEFAULT_TOKEN_TYPE);
        Some(format!("{token_type} {token}"))
    }

    /// Derived access token for the auth state
    pub fn access_token(&self) -> Option<AccessToken> {
        self.access_token.as_ref().map(|value| AccessToken {
            value: value.clone(),
            token_type: self
                .token_type
                .clone()
                .unwrap_or_else(default_token_type),
            expires_at: self.expires_at,
        })
    }

    /// How long until the session should be refreshed proactively
    ///
    /// Returns zero when the refresh point has already passed and `None`
    /// when no expiry is known.
    pub fn refresh_delay(&self, now: DateTime<Utc>, margin: Duration) -> Option<std::time::Duration> {
        let due = self
            .expires_at?
            .checked_sub_signed(margin)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Some(due.signed_duration_since(now).to_std().unwrap_or_default())
    }

    /// [`Self::refresh_delay`] in milliseconds, capped to what a browser timer accepts
    pub fn refresh_delay_millis(&self, now: DateTime<Utc>, margin: Duration) -> Option<u32> {
        self.refresh_delay(now, margin).map(|delay| {
            u32::try_from(delay.as_millis())
                .unwrap_or(u32::MAX)
                .min(AuthConfig::MAX_TIMER_DELAY_MS)
        })
    }
}

/// Storage-backed owner of the session tokens
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Create a token store over the given storage
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Create a token store over shared storage
    pub fn from_shared(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist a grant with its expiry computed from the current time
    pub fn store(&self, grant: &TokenGrant) -> CoreResult<()> {
        self.store_at(grant, Utc::now())
    }

    /// Persist a grant with its expiry computed from `now`
    ///
    /// A grant without a refresh token leaves the stored one in place.
    pub fn store_at(&self, grant: &TokenGrant, now: DateTime<Utc>) -> CoreResult<()> {
        let lifetime = i64::try_from(grant.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        let expires_at = now
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.storage
            .set(StorageKeys::ACCESS_TOKEN, &grant.access_token)?;
        self.storage
            .set(StorageKeys::TOKEN_TYPE, &grant.token_type)?;
        self.storage.set(
            StorageKeys::TOKEN_EXPIRY,
            &expires_at.timestamp_millis().to_string(),
        )?;
        if let Some(refresh_token) = &grant.refresh_token {
            self.storage
                .set(StorageKeys::REFRESH_TOKEN, refresh_token)?;
        }

        debug!(expires_at = %expires_at, "Stored session tokens");
        Ok(())
    }

    /// Start a session: store the grant and the user it belongs to
    pub fn begin(&self, grant: &TokenGrant, user_id: &str) -> CoreResult<()> {
        self.store(grant)?;
        self.storage.set(StorageKeys::AUTHORIZED_USER_ID, user_id)
    }

    /// Read the stored session; missing or malformed entries read as `None`
    pub fn read(&self) -> Session {
        let expires_at = self
            .storage
            .get(StorageKeys::TOKEN_EXPIRY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        Session {
            access_token: self.storage.get(StorageKeys::ACCESS_TOKEN),
            token_type: self.storage.get(StorageKeys::TOKEN_TYPE),
            expires_at,
            refresh_token: self.storage.get(StorageKeys::REFRESH_TOKEN),
            user_id: self.storage.get(StorageKeys::AUTHORIZED_USER_ID),
        }
    }

    /// Id of the user owning the stored session
    pub fn user_id(&self) -> Option<String> {
        self.storage.get(StorageKeys::AUTHORIZED_USER_ID)
    }

    /// Remove every session entry
    pub fn clear(&self) {
        for key in StorageKeys::SESSION {
            self.storage.remove(key);
        }
        debug!("Cleared session tokens");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn grant(access: &str, refresh: Option<&str>, expires_in: u64) -> TokenGrant {
        TokenGrant {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_store_then_read_round_trip() {
        let store = TokenStore::new(MemoryStorage::new());
        let before = Utc::now();

        store.store(&grant("A", Some("B"), 3600)).unwrap();
        let session = store.read();

        assert_eq!(session.access_token.as_deref(), Some("A"));
        assert_eq!(session.refresh_token.as_deref(), Some("B"));
        let expected = before.timestamp_millis() + 3_600_000;
        let actual = session.expires_at.unwrap().timestamp_millis();
        assert!((actual - expected).abs() < 1_000, "expiry off by {}ms", actual - expected);
    }

    #[test]
    fn test_read_empty_store_yields_nulls() {
        let store = TokenStore::new(MemoryStorage::new());
        assert_eq!(store.read(), Session::default());
    }

    #[test]
    fn test_malformed_expiry_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(StorageKeys::TOKEN_EXPIRY, "tomorrow").unwrap();
        let store = TokenStore::new(storage);
        assert!(store.read().expires_at.is_none());
    }

    #[test]
    fn test_grant_without_refresh_token_keeps_previous_one() {
        let store = TokenStore::new(MemoryStorage::new());
        store.store(&grant("A", Some("B"), 60)).unwrap();
        store.store(&grant("C", None, 60)).unwrap();

        let session = store.read();
        assert_eq!(session.access_token.as_deref(), Some("C"));
        assert_eq!(session.refresh_token.as_deref(), Some("B"));
    }

    #[test]
    fn test_clear_removes_tokens_and_user_marker() {
        let storage = MemoryStorage::new();
        storage.set(StorageKeys::THEME, "dark").unwrap();
        let store = TokenStore::new(storage.clone());
        store.begin(&grant("A", Some("B"), 60), "user-1").unwrap();
        assert_eq!(store.user_id().as_deref(), Some("user-1"));

        store.clear();

        assert_eq!(store.read(), Session::default());
        // Unrelated preferences survive
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_needs_refresh_uses_lookahead() {
        let now = Utc::now();
        let lookahead = Duration::seconds(AuthConfig::REFRESH_LOOKAHEAD_SECS);
        let session = |secs: i64| Session {
            expires_at: Some(now + Duration::seconds(secs)),
            ..Session::default()
        };

        assert!(session(10).needs_refresh(now, lookahead));
        assert!(session(-5).needs_refresh(now, lookahead));
        assert!(!session(120).needs_refresh(now, lookahead));
        assert!(!Session::default().needs_refresh(now, lookahead));
    }

    #[test]
    fn test_authorization_header_defaults_to_bearer() {
        let session = Session {
            access_token: Some("abc".to_string()),
            ..Session::default()
        };
        assert_eq!(session.authorization_header().as_deref(), Some("Bearer abc"));
        assert!(Session::default().authorization_header().is_none());
    }

    #[test]
    fn test_refresh_delay() {
        let now = Utc::now();
        let session = Session {
            expires_at: Some(now + Duration::seconds(65)),
            ..Session::default()
        };
        let delay = session.refresh_delay(now, Duration::seconds(5)).unwrap();
        assert_eq!(delay.as_secs(), 60);

        let overdue = Session {
            expires_at: Some(now - Duration::seconds(1)),
            ..Session::default()
        };
        assert_eq!(
            overdue.refresh_delay(now, Duration::seconds(5)),
            Some(std::time::Duration::ZERO)
        );
    }

    #[test]
    fn test_refresh_delay_millis_is_capped_for_long_lifetimes() {
        let store = TokenStore::new(MemoryStorage::new());
        let now = Utc::now();
        store.store_at(&grant("A", Some("B"), 30 * 24 * 3600), now).unwrap();

        let margin = Duration::seconds(AuthConfig::PROACTIVE_REFRESH_MARGIN_SECS);
        let millis = store.read().refresh_delay_millis(now, margin).unwrap();
        assert_eq!(millis, AuthConfig::MAX_TIMER_DELAY_MS);

        // Lifetimes too large to represent clamp to the maximum date
        store.store_at(&grant("A", Some("B"), u64::MAX), now).unwrap();
        let millis = store.read().refresh_delay_millis(now, margin).unwrap();
        assert_eq!(millis, AuthConfig::MAX_TIMER_DELAY_MS);

        let short = Session {
            expires_at: Some(now + Duration::seconds(65)),
            ..Session::default()
        };
        assert_eq!(short.refresh_delay_millis(now, margin), Some(60_000));
    }

    #[test]
    fn test_extreme_stored_expiry_does_not_panic() {
        let storage = MemoryStorage::new();
        let store = TokenStore::new(storage.clone());
        let earliest = DateTime::<Utc>::MIN_UTC.timestamp_millis();
        storage
            .set(StorageKeys::TOKEN_EXPIRY, &earliest.to_string())
            .unwrap();

        let session = store.read();
        let now = Utc::now();
        assert!(session.expires_at.is_some());
        assert!(session.needs_refresh(now, Duration::seconds(AuthConfig::REFRESH_LOOKAHEAD_SECS)));
        assert_eq!(
            session.refresh_delay(now, Duration::seconds(5)),
            Some(std::time::Duration::ZERO)
        );
    }

    #[test]
    fn test_grant_accepts_string_lifetime() {
        let grant: TokenGrant = serde_json::from_str(
            r#"{"accessToken":"A","tokenType":"Bearer","expiresIn":"3600"}"#,
        )
        .unwrap();
        assert_eq!(grant.expires_in, 3600);
        assert!(grant.refresh_token.is_none());
    }
}

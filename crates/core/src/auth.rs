//! Authentication state container
//!
//! [`AuthStore`] holds the tab-lifetime auth state and notifies subscribers
//! when it changes. It is constructed once at application start and handed
//! to every consumer, so there is no "provider not mounted" state.

use crate::session::AccessToken;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Whether the current tab holds an authenticated session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthStatus {
    /// Bootstrap: not yet determined
    #[default]
    Unknown,
    Authorized,
    /// Checked and unauthenticated
    Unauthorized,
}

impl AuthStatus {
    pub fn is_authorized(self) -> bool {
        self == Self::Authorized
    }
}

impl From<bool> for AuthStatus {
    fn from(authorized: bool) -> Self {
        if authorized {
            Self::Authorized
        } else {
            Self::Unauthorized
        }
    }
}

/// Profile of the logged-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedUser {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthorizedUser {
    /// Name to show in the UI
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Authentication state
///
/// `status` is `Authorized` exactly when `access_token` is set; the reducer
/// keeps the two in step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub access_token: Option<AccessToken>,
    pub status: AuthStatus,
    pub authorized_user: Option<AuthorizedUser>,
}

/// Authentication state updates
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    UpdateAccessToken(Option<AccessToken>),
    UpdateIsAuthorized(bool),
    UpdateAuthorizedUserData(Option<AuthorizedUser>),
}

impl AuthState {
    /// Apply an action, returning `None` when the state would not change
    pub fn reduce(&self, action: AuthAction) -> Option<Self> {
        match action {
            AuthAction::UpdateAccessToken(Some(token)) => {
                if self.access_token.as_ref() == Some(&token) {
                    return None;
                }
                Some(Self {
                    access_token: Some(token),
                    status: AuthStatus::Authorized,
                    authorized_user: self.authorized_user.clone(),
                })
            }
            AuthAction::UpdateAccessToken(None) => self.signed_out(),
            AuthAction::UpdateIsAuthorized(authorized) => {
                if self.status == AuthStatus::from(authorized) {
                    return None;
                }
                if !authorized {
                    return self.signed_out();
                }
                if self.access_token.is_none() {
                    warn!("Ignoring authorization without an access token");
                    return None;
                }
                Some(Self {
                    status: AuthStatus::Authorized,
                    ..self.clone()
                })
            }
            AuthAction::UpdateAuthorizedUserData(user) => {
                if self.authorized_user == user {
                    return None;
                }
                Some(Self {
                    authorized_user: user,
                    ..self.clone()
                })
            }
        }
    }

    fn signed_out(&self) -> Option<Self> {
        let next = Self {
            access_token: None,
            status: AuthStatus::Unauthorized,
            authorized_user: None,
        };
        (next != *self).then_some(next)
    }
}

type Listener = Rc<dyn Fn(&Rc<AuthState>)>;

struct StoreInner {
    state: Rc<AuthState>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// Observable auth state container
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct AuthStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &self.inner.borrow().state)
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Create a store in the bootstrap state
    pub fn new() -> Self {
        Self::with_state(AuthState::default())
    }

    pub fn with_state(state: AuthState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: Rc::new(state),
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> Rc<AuthState> {
        self.inner.borrow().state.clone()
    }

    pub fn status(&self) -> AuthStatus {
        self.inner.borrow().state.status
    }

    /// Apply an action and notify subscribers if the state changed
    ///
    /// Returns whether a change happened.
    pub fn dispatch(&self, action: AuthAction) -> bool {
        let (state, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let Some(next) = inner.state.reduce(action) else {
                return false;
            };
            inner.state = Rc::new(next);
            let listeners: Vec<Listener> = inner
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect();
            (inner.state.clone(), listeners)
        };

        debug!(status = ?state.status, "Auth state changed");
        // Listeners run after the borrow is released so they may dispatch again
        for listener in listeners {
            listener(&state);
        }
        true
    }

    pub fn update_access_token(&self, token: Option<AccessToken>) -> bool {
        self.dispatch(AuthAction::UpdateAccessToken(token))
    }

    pub fn update_is_authorized(&self, authorized: bool) -> bool {
        self.dispatch(AuthAction::UpdateIsAuthorized(authorized))
    }

    pub fn update_authorized_user_data(&self, user: Option<AuthorizedUser>) -> bool {
        self.dispatch(AuthAction::UpdateAuthorizedUserData(user))
    }

    /// Register a listener; it is removed when the returned handle is dropped
    pub fn subscribe(&self, listener: impl Fn(&Rc<AuthState>) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle that keeps a listener registered
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<RefCell<StoreInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn token(value: &str) -> AccessToken {
        AccessToken {
            value: value.to_string(),
            token_type: "Bearer".to_string(),
            expires_at: None,
        }
    }

    fn user() -> AuthorizedUser {
        AuthorizedUser {
            id: "user-1".to_string(),
            user_name: Some("ada@example.com".to_string()),
            email: Some("ada@example.com".to_string()),
        }
    }

    fn counting(store: &AuthStore) -> (Rc<Cell<usize>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let subscription = store.subscribe(move |_| seen.set(seen.get() + 1));
        (count, subscription)
    }

    #[test]
    fn test_store_starts_undetermined() {
        let store = AuthStore::new();
        assert_eq!(store.status(), AuthStatus::Unknown);
        assert!(store.state().access_token.is_none());
    }

    #[test]
    fn test_update_is_authorized_is_idempotent() {
        let store = AuthStore::new();
        let (count, _subscription) = counting(&store);

        assert!(store.update_access_token(Some(token("A"))));
        assert_eq!(count.get(), 1);

        assert!(!store.update_is_authorized(true));
        assert!(!store.update_is_authorized(true));
        assert_eq!(count.get(), 1);

        assert!(store.update_is_authorized(false));
        assert!(!store.update_is_authorized(false));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_bootstrap_resolves_to_unauthorized_once() {
        let store = AuthStore::new();
        let (count, _subscription) = counting(&store);

        store.update_is_authorized(false);
        store.update_is_authorized(false);

        assert_eq!(store.status(), AuthStatus::Unauthorized);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_authorized_status_tracks_access_token() {
        let store = AuthStore::new();

        store.update_access_token(Some(token("A")));
        assert_eq!(store.status(), AuthStatus::Authorized);

        store.update_authorized_user_data(Some(user()));
        store.update_access_token(None);

        let state = store.state();
        assert_eq!(state.status, AuthStatus::Unauthorized);
        assert!(state.access_token.is_none());
        assert!(state.authorized_user.is_none());
    }

    #[test]
    fn test_authorizing_without_token_is_ignored() {
        let store = AuthStore::new();
        assert!(!store.update_is_authorized(true));
        assert_eq!(store.status(), AuthStatus::Unknown);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let store = AuthStore::new();
        let (count, subscription) = counting(&store);
        assert_eq!(store.subscriber_count(), 1);

        drop(subscription);
        store.update_access_token(Some(token("A")));

        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_listener_may_dispatch_reentrantly() {
        let store = AuthStore::new();
        let handle = store.clone();
        let _subscription = store.subscribe(move |state| {
            if state.status.is_authorized() && state.authorized_user.is_none() {
                handle.update_authorized_user_data(Some(user()));
            }
        });

        store.update_access_token(Some(token("A")));

        assert_eq!(store.state().authorized_user, Some(user()));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let anonymous = AuthorizedUser {
            id: "user-9".to_string(),
            user_name: None,
            email: None,
        };
        assert_eq!(anonymous.display_name(), "user-9");
        assert_eq!(user().display_name(), "ada@example.com");
    }
}

//! Session lifecycle: restore on load, status polling, proactive refresh

use crate::app::AppServices;
use crate::hooks::use_auth_state;
use crate::platform::BrowserNavigator;
use chrono::{Duration, Utc};
use gloo::timers::callback::{Interval, Timeout};
use mocktail_core::{AuthConfig, AuthStore, force_login};
use mocktail_http::{ClientError, MocktailClient};
use tracing::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SessionKeeperProps {
    pub services: AppServices,
}

/// Drives the session in the background; renders nothing
#[function_component(SessionKeeper)]
pub fn session_keeper(props: &SessionKeeperProps) -> Html {
    let AppServices { auth, client } = props.services.clone();
    let state = use_auth_state(&auth);

    // Restore the previous session once per page load
    {
        let auth = auth.clone();
        let client = client.clone();
        use_effect_with((), move |_| {
            spawn_local(restore(auth, client));
        });
    }

    // Poll auth/check-status while authorized
    {
        let auth = auth.clone();
        let client = client.clone();
        use_effect_with(state.status, move |status| {
            let interval = status.is_authorized().then(|| {
                Interval::new(AuthConfig::STATUS_POLL_INTERVAL_MS, move || {
                    spawn_local(check_status(auth.clone(), client.clone()));
                })
            });
            move || drop(interval)
        });
    }

    // Refresh shortly before the access token expires
    {
        let expires_at = state.access_token.as_ref().and_then(|t| t.expires_at);
        use_effect_with(expires_at, move |expires_at| {
            let timeout = expires_at.map(|_| {
                let margin = Duration::seconds(AuthConfig::PROACTIVE_REFRESH_MARGIN_SECS);
                let millis = client
                    .session()
                    .refresh_delay_millis(Utc::now(), margin)
                    .unwrap_or_default();
                debug!(millis, "Scheduled proactive refresh");
                Timeout::new(millis, move || spawn_local(refresh(auth, client)))
            });
            move || drop(timeout)
        });
    }

    html! {}
}

async fn restore(auth: AuthStore, client: MocktailClient) {
    let Some(token) = client.restore_session().await else {
        auth.update_is_authorized(false);
        return;
    };

    info!("Session restored");
    auth.update_access_token(Some(token));
    match client.profile().await {
        Ok(user) => {
            auth.update_authorized_user_data(Some(user));
        }
        Err(e) => warn!(error = %e, "Failed to load profile"),
    }
}

async fn check_status(auth: AuthStore, client: MocktailClient) {
    match client.check_status().await {
        Ok(()) => {}
        Err(ClientError::AuthenticationFailed(_) | ClientError::SessionExpired) => {
            warn!("Session no longer accepted");
            client.tokens().clear();
            auth.update_access_token(None);
        }
        Err(e) => warn!(error = %e, "Status check failed"),
    }
}

async fn refresh(auth: AuthStore, client: MocktailClient) {
    let outcome = client.refresh_session().await;
    if outcome.is_success() {
        auth.update_access_token(client.session().access_token());
    } else {
        warn!(?outcome, "Proactive refresh failed");
        force_login(client.tokens(), &BrowserNavigator);
        auth.update_access_token(None);
    }
}

//! Hooks over the auth store and cancellable fetches

use mocktail_core::{AuthState, AuthStore};
use mocktail_http::{CancellationToken, ClientError, cancellable};
use std::future::Future;
use std::rc::Rc;
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Current auth state, re-rendering on every change
#[hook]
pub fn use_auth_state(store: &AuthStore) -> Rc<AuthState> {
    let state = use_state(|| store.state());
    {
        let state = state.clone();
        use_effect_with(store.clone(), move |store| {
            // Catch changes made between render and subscription
            state.set(store.state());
            let subscription = store.subscribe(move |next| state.set(next.clone()));
            move || drop(subscription)
        });
    }
    (*state).clone()
}

/// Progress of a page fetch
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// Run `fetch` whenever `deps` change
///
/// The fetch is cancelled when the deps change again or the component
/// unmounts, and a cancelled fetch never touches the returned state.
#[hook]
pub fn use_fetch<D, T, F, Fut>(deps: D, fetch: F) -> UseStateHandle<FetchState<T>>
where
    D: PartialEq + Clone + 'static,
    T: 'static,
    F: FnOnce(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let state = use_state(|| FetchState::Loading);
    {
        let state = state.clone();
        use_effect_with(deps, move |deps| {
            let token = CancellationToken::new();
            let guard = token.clone();
            state.set(FetchState::Loading);
            let request = fetch(deps.clone());

            spawn_local(async move {
                match cancellable(&token, request).await {
                    Ok(value) => state.set(FetchState::Ready(value)),
                    Err(ClientError::Cancelled) => {}
                    Err(e) => {
                        error!(error = %e, "Fetch failed");
                        state.set(FetchState::Failed(e.to_string()));
                    }
                }
            });

            move || guard.cancel()
        });
    }
    state
}

//! Project API token management

use super::{ErrorNotice, bind_input};
use crate::components::LoadingSpinner;
use crate::hooks::{FetchState, use_fetch};
use crate::router::Route;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use mocktail_core::{AccessTokenAction, AccessTokenList, ProjectAccessToken};
use mocktail_http::MocktailClient;
use mocktail_http::types::CreateAccessTokenRequest;
use std::rc::Rc;
use tracing::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Format produced by `<input type="datetime-local">`
const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Parse a `datetime-local` value entered in the browser's time zone
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), DATETIME_LOCAL).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

fn format_timestamp(at: Option<DateTime<Utc>>, missing: &str) -> String {
    at.map_or_else(
        || missing.to_string(),
        |at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[derive(Properties, PartialEq)]
pub struct ProjectAccessTokensProps {
    pub client: MocktailClient,
    pub project_id: String,
}

#[function_component(ProjectAccessTokens)]
pub fn project_access_tokens(props: &ProjectAccessTokensProps) -> Html {
    let client = props.client.clone();
    let tokens = use_fetch(props.project_id.clone(), move |project_id| async move {
        client.list_access_tokens(&project_id).await
    });

    let body = match &*tokens {
        FetchState::Loading => html! { <LoadingSpinner text="Loading tokens..." /> },
        FetchState::Failed(message) => html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(tokens) => html! {
            <TokenManager
                client={props.client.clone()}
                project_id={props.project_id.clone()}
                initial={tokens.clone()}
            />
        },
    };

    html! {
        <section class="flex flex-col gap-6">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-semibold">{"API tokens"}</h1>
                <Link<Route> to={Route::Project { project_id: props.project_id.clone() }}
                    classes="px-3 py-1 rounded-md border">
                    {"Back to project"}
                </Link<Route>>
            </div>
            {body}
        </section>
    }
}

/// Token list reducer; every action applies to the current list
#[derive(Clone, Debug, Default, PartialEq)]
struct TokenListState(AccessTokenList);

impl Reducible for TokenListState {
    type Action = AccessTokenAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(Self(next))
    }
}

#[derive(Properties, PartialEq)]
struct TokenManagerProps {
    client: MocktailClient,
    project_id: String,
    initial: Vec<ProjectAccessToken>,
}

#[function_component(TokenManager)]
fn token_manager(props: &TokenManagerProps) -> Html {
    let list = use_reducer(|| TokenListState(AccessTokenList::from_fetched(props.initial.clone())));
    let deleting = use_state(|| None::<ProjectAccessToken>);
    let delete_error = use_state(|| None::<AttrValue>);

    let on_created = {
        let list = list.clone();
        Callback::from(move |token: ProjectAccessToken| list.dispatch(AccessTokenAction::Created(token)))
    };

    let on_acknowledge = {
        let list = list.clone();
        Callback::from(move |token_id: String| list.dispatch(AccessTokenAction::Acknowledged(token_id)))
    };

    let on_request_delete = {
        let deleting = deleting.clone();
        Callback::from(move |token: ProjectAccessToken| deleting.set(Some(token)))
    };

    let on_cancel_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_: MouseEvent| deleting.set(None))
    };

    let on_confirm_delete = {
        let client = props.client.clone();
        let list = list.clone();
        let deleting = deleting.clone();
        let delete_error = delete_error.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(token) = (*deleting).clone() else {
                return;
            };
            let client = client.clone();
            let list = list.clone();
            let deleting = deleting.clone();
            let delete_error = delete_error.clone();
            spawn_local(async move {
                match client.delete_access_token(&token.token_id).await {
                    Ok(()) => {
                        info!(token_id = %token.token_id, "Deleted access token");
                        list.dispatch(AccessTokenAction::Removed(token.token_id.clone()));
                        delete_error.set(None);
                    }
                    Err(e) => {
                        error!(token_id = %token.token_id, error = %e, "Failed to delete access token");
                        delete_error.set(Some(e.to_string().into()));
                    }
                }
                deleting.set(None);
            });
        })
    };

    let tokens = &list.0;
    let heading = if tokens.is_empty() {
        "Existing tokens".to_string()
    } else {
        format!("Existing tokens ({})", tokens.len())
    };

    html! {
        <>
            <CreateTokenForm client={props.client.clone()} project_id={props.project_id.clone()} {on_created} />
            <div class="flex flex-col gap-4">
                <h2 class="text-xl font-semibold">{heading}</h2>
                if let Some(error) = &*delete_error {
                    <ErrorNotice message={error.clone()} />
                }
                if tokens.is_empty() {
                    <p class="text-center py-8 italic text-gray-500">{"No access tokens created yet"}</p>
                } else {
                    { for tokens.iter().map(|token| html! {
                        <TokenCard
                            key={token.token_id.clone()}
                            token={token.clone()}
                            is_new={tokens.is_new(&token.token_id)}
                            on_acknowledge={on_acknowledge.clone()}
                            on_delete={on_request_delete.clone()}
                        />
                    }) }
                }
            </div>
            if let Some(token) = &*deleting {
                <div class="fixed inset-0 flex items-center justify-center bg-black/40">
                    <div class="p-6 rounded-md bg-white dark:bg-gray-900 flex flex-col gap-4">
                        <p>{format!("Delete token \"{}\"? Apps using it will lose access.", token.name)}</p>
                        <div class="flex justify-end gap-2">
                            <button onclick={on_cancel_delete} class="px-3 py-1 rounded-md border">{"Cancel"}</button>
                            <button onclick={on_confirm_delete} class="px-3 py-1 rounded-md text-white bg-red-600">
                                {"Delete"}
                            </button>
                        </div>
                    </div>
                </div>
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct CreateTokenFormProps {
    client: MocktailClient,
    project_id: String,
    on_created: Callback<ProjectAccessToken>,
}

#[function_component(CreateTokenForm)]
fn create_token_form(props: &CreateTokenFormProps) -> Html {
    let name = use_state(String::new);
    let expires_at = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<AttrValue>);

    let onsubmit = {
        let client = props.client.clone();
        let project_id = props.project_id.clone();
        let on_created = props.on_created.clone();
        let (name, expires_at) = (name.clone(), expires_at.clone());
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let token_name = name.trim().to_string();
            if token_name.is_empty() {
                return;
            }
            let body = CreateAccessTokenRequest {
                project_id: project_id.clone(),
                name: token_name,
                expires_at: parse_expiry(&expires_at),
            };
            let client = client.clone();
            let on_created = on_created.clone();
            let (name, expires_at) = (name.clone(), expires_at.clone());
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            spawn_local(async move {
                match client.create_access_token(&body).await {
                    Ok(token) => {
                        on_created.emit(token);
                        name.set(String::new());
                        expires_at.set(String::new());
                        error.set(None);
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to create access token");
                        error.set(Some(e.to_string().into()));
                    }
                }
                busy.set(false);
            });
        })
    };

    let disabled = *busy || name.trim().is_empty();

    html! {
        <form {onsubmit} class="flex flex-col gap-3 max-w-xl">
            <h2 class="text-xl font-semibold">{"Create new access token"}</h2>
            if let Some(error) = &*error {
                <ErrorNotice message={error.clone()} />
            }
            <input placeholder="Token name" value={(*name).clone()} oninput={bind_input(&name)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <label class="flex flex-col gap-1 text-sm">
                {"Expires at (optional)"}
                <input type="datetime-local" value={(*expires_at).clone()} oninput={bind_input(&expires_at)}
                    class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            </label>
            <button type="submit" {disabled}
                class="self-start px-4 py-2 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                {"Create token"}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct TokenCardProps {
    token: ProjectAccessToken,
    is_new: bool,
    on_acknowledge: Callback<String>,
    on_delete: Callback<ProjectAccessToken>,
}

#[function_component(TokenCard)]
fn token_card(props: &TokenCardProps) -> Html {
    let token = &props.token;
    let acknowledge = {
        let on_acknowledge = props.on_acknowledge.clone();
        let token_id = token.token_id.clone();
        Callback::from(move |_: MouseEvent| on_acknowledge.emit(token_id.clone()))
    };
    let delete = {
        let on_delete = props.on_delete.clone();
        let token = token.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(token.clone()))
    };

    html! {
        <div class="p-4 rounded-md border dark:border-gray-700 flex flex-col gap-2">
            <div class="flex justify-between items-center">
                <span class="font-medium">{token.name.clone()}</span>
                <button onclick={delete} class="px-3 py-1 rounded-md border border-red-500 text-red-600">
                    {"Delete"}
                </button>
            </div>
            <div class="text-sm text-gray-500 flex gap-4">
                <span>{format!("Created {}", format_timestamp(token.created_at, "-"))}</span>
                <span>{format!("Expires {}", format_timestamp(token.expires_at, "never"))}</span>
                if !token.is_active {
                    <span class="text-red-600">{"inactive"}</span>
                }
            </div>
            if let (true, Some(secret)) = (props.is_new, &token.token) {
                <div class="p-3 rounded-md bg-yellow-50 dark:bg-yellow-900/30 flex flex-col gap-2">
                    <p class="text-sm">{"Copy this token now. It will not be shown again."}</p>
                    <code class="font-mono break-all">{secret.clone()}</code>
                    <button onclick={acknowledge} class="self-start px-3 py-1 rounded-md border">
                        {"I have copied it"}
                    </button>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_parse_expiry() {
        let parsed = parse_expiry("2030-05-01T12:30").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format(DATETIME_LOCAL).to_string(), "2030-05-01T12:30");

        assert!(parse_expiry("").is_none());
        assert!(parse_expiry("next week").is_none());
    }

    #[wasm_bindgen_test]
    fn test_reducer_applies_actions_to_latest_list() {
        let old = ProjectAccessToken {
            token_id: "old".to_string(),
            name: "old".to_string(),
            project_id: "p-1".to_string(),
            created_at: None,
            expires_at: None,
            is_active: true,
            token: None,
        };
        let fresh = ProjectAccessToken {
            token_id: "fresh".to_string(),
            token: Some("secret".to_string()),
            ..old.clone()
        };

        let state = Rc::new(TokenListState(AccessTokenList::from_fetched(vec![old])));
        let state = state.reduce(AccessTokenAction::Created(fresh));
        let state = state.reduce(AccessTokenAction::Removed("old".to_string()));

        let ids: Vec<_> = state.0.iter().map(|t| t.token_id.as_str()).collect();
        assert_eq!(ids, vec!["fresh"]);
        assert!(state.0.is_new("fresh"));
    }

    #[wasm_bindgen_test]
    fn test_missing_timestamp_uses_placeholder() {
        assert_eq!(format_timestamp(None, "never"), "never");
    }
}

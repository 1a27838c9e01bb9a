//! Login and registration pages

use super::ErrorNotice;
use crate::app::AppServices;
use crate::router::Route;
use mocktail_http::types::Credentials;
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub services: AppServices,
}

#[derive(Properties, PartialEq)]
struct CredentialsFormProps {
    title: AttrValue,
    submit_label: AttrValue,
    busy: bool,
    error: Option<AttrValue>,
    on_submit: Callback<Credentials>,
}

#[function_component(CredentialsForm)]
fn credentials_form(props: &CredentialsFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };
    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(Credentials {
                email: email.trim().to_string(),
                password: (*password).clone(),
            });
        })
    };

    let disabled = props.busy || email.trim().is_empty() || password.is_empty();

    html! {
        <form {onsubmit} class="max-w-sm mx-auto flex flex-col gap-4">
            <h1 class="text-2xl font-semibold">{props.title.clone()}</h1>
            if let Some(error) = &props.error {
                <ErrorNotice message={error.clone()} />
            }
            <input type="email" placeholder="Email" value={(*email).clone()} oninput={on_email}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <input type="password" placeholder="Password" value={(*password).clone()} oninput={on_password}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <button type="submit" {disabled}
                class="px-4 py-2 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                {props.submit_label.clone()}
            </button>
        </form>
    }
}

#[function_component(Login)]
pub fn login(props: &AuthPageProps) -> Html {
    let busy = use_state(|| false);
    let error = use_state(|| None::<AttrValue>);
    let navigator = use_navigator();

    let on_submit = {
        let AppServices { auth, client } = props.services.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |credentials: Credentials| {
            let auth = auth.clone();
            let client = client.clone();
            let busy = busy.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            busy.set(true);
            spawn_local(async move {
                match client.login(&credentials).await {
                    Ok(response) => {
                        auth.update_access_token(client.session().access_token());
                        auth.update_authorized_user_data(Some(response.authorized_user));
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Login failed");
                        error.set(Some("Wrong email or password.".into()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    html! {
        <>
            <CredentialsForm title="Sign in" submit_label="Sign in" busy={*busy}
                error={(*error).clone()} {on_submit} />
            <p class="text-center mt-4 text-sm">
                {"No account yet? "}
                <Link<Route> to={Route::Register} classes="text-blue-600">{"Register"}</Link<Route>>
            </p>
        </>
    }
}

#[function_component(Register)]
pub fn register(props: &AuthPageProps) -> Html {
    let busy = use_state(|| false);
    let error = use_state(|| None::<AttrValue>);
    let navigator = use_navigator();

    let on_submit = {
        let client = props.services.client.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |credentials: Credentials| {
            let client = client.clone();
            let busy = busy.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            busy.set(true);
            spawn_local(async move {
                match client.register(&credentials).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::RegisterSuccess);
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Registration failed");
                        error.set(Some(e.to_string().into()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    html! {
        <CredentialsForm title="Create account" submit_label="Register" busy={*busy}
            error={(*error).clone()} {on_submit} />
    }
}

#[function_component(RegisterSuccess)]
pub fn register_success() -> Html {
    html! {
        <section class="text-center py-16">
            <h1 class="text-2xl font-semibold mb-4">{"Account created"}</h1>
            <Link<Route> to={Route::Login} classes="text-blue-600">{"Sign in"}</Link<Route>>
        </section>
    }
}

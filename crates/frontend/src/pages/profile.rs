use crate::components::LoadingSpinner;
use crate::hooks::{FetchState, use_fetch};
use super::ErrorNotice;
use mocktail_http::MocktailClient;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProfileProps {
    pub client: MocktailClient,
}

#[function_component(Profile)]
pub fn profile(props: &ProfileProps) -> Html {
    let client = props.client.clone();
    let user = use_fetch((), move |_| async move { client.profile().await });

    match &*user {
        FetchState::Loading => html! { <LoadingSpinner text="Loading profile..." /> },
        FetchState::Failed(message) => html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(user) => html! {
            <section>
                <h1 class="text-2xl font-semibold mb-4">{"Profile"}</h1>
                <dl class="grid grid-cols-[max-content_1fr] gap-x-6 gap-y-2">
                    <dt class="font-medium">{"Name"}</dt>
                    <dd>{user.display_name().to_string()}</dd>
                    <dt class="font-medium">{"Email"}</dt>
                    <dd>{user.email.clone().unwrap_or_else(|| "-".to_string())}</dd>
                    <dt class="font-medium">{"User id"}</dt>
                    <dd class="font-mono text-sm">{user.id.clone()}</dd>
                </dl>
            </section>
        },
    }
}

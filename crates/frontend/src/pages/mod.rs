mod access_tokens;
mod auth;
mod dashboard;
mod info;
mod profile;
mod projects;
mod templates;

pub use access_tokens::ProjectAccessTokens;
pub use auth::{Login, Register, RegisterSuccess};
pub use dashboard::Dashboard;
pub use info::{About, Docs, Landing, PageNotFound, Support, Waiting};
pub use profile::Profile;
pub use projects::{ProjectForm, ProjectView, Projects};
pub use templates::{TemplateForm, TemplateView, Templates};

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Inline error box shown by pages
#[derive(Properties, PartialEq)]
pub struct ErrorNoticeProps {
    pub message: AttrValue,
}

#[function_component(ErrorNotice)]
pub fn error_notice(props: &ErrorNoticeProps) -> Html {
    html! {
        <div class="p-4 mb-4 rounded-md bg-red-50 dark:bg-red-900/30 text-red-700 dark:text-red-300 text-sm">
            {props.message.clone()}
        </div>
    }
}

/// Mirror a text input into `state`
pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

pub(crate) fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

pub(crate) fn bind_checkbox(state: &UseStateHandle<bool>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.checked());
    })
}

/// Comma separated keywords, trimmed, empties dropped
pub(crate) fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank optional text becomes `None`
pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_split_keywords() {
        assert_eq!(split_keywords(" users, ,orders,"), vec!["users", "orders"]);
        assert!(split_keywords("").is_empty());
    }

    #[wasm_bindgen_test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" demo ").as_deref(), Some("demo"));
    }
}

//! Theme context and toggle

use crate::platform::BrowserStorage;
use mocktail_core::Theme;
use tracing::warn;
use yew::prelude::*;

pub type ThemeContext = UseStateHandle<Theme>;

/// Mirror the theme onto `<html>` for the stylesheet
fn apply_document_theme(theme: Theme) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let _ = element.set_attribute("data-theme", theme.as_str());
    let class_list = element.class_list();
    let _ = match theme {
        Theme::Dark => class_list.add_1("dark"),
        Theme::Light => class_list.remove_1("dark"),
    };
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(|| Theme::load(&BrowserStorage).unwrap_or_default());

    use_effect_with(*theme, |theme| {
        apply_document_theme(*theme);
        if let Err(e) = theme.save(&BrowserStorage) {
            warn!(error = %e, "Failed to save theme");
        }
    });

    html! {
        <ContextProvider<ThemeContext> context={theme}>
            {props.children.clone()}
        </ContextProvider<ThemeContext>>
    }
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let Some(theme) = use_context::<ThemeContext>() else {
        return html! {};
    };

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggle()))
    };
    let label = match *theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };

    html! {
        <button {onclick} class="text-sm text-gray-600 dark:text-gray-400 hover:text-gray-900 dark:hover:text-gray-100">
            {label}
        </button>
    }
}

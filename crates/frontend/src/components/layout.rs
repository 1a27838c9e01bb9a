//! Page chrome for public and in-app pages

use super::{Breadcrumbs, ThemeToggle};
use crate::app::AppServices;
use crate::hooks::use_auth_state;
use crate::router::Route;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub services: AppServices,
    pub children: Children,
}

#[function_component(RootLayout)]
pub fn root_layout(props: &LayoutProps) -> Html {
    let state = use_auth_state(&props.services.auth);

    html! {
        <div class="min-h-screen bg-gray-50 dark:bg-gray-900">
            <nav class="bg-white/80 dark:bg-gray-900/80 border-b border-gray-200 dark:border-gray-700">
                <div class="max-w-7xl mx-auto px-4 flex justify-between h-16 items-center">
                    <div class="flex items-center gap-6">
                        <Link<Route> to={Route::Landing} classes="text-2xl font-bold">{"MockTail"}</Link<Route>>
                        <Link<Route> to={Route::About}>{"About"}</Link<Route>>
                        <Link<Route> to={Route::Docs}>{"Docs"}</Link<Route>>
                        <Link<Route> to={Route::Support}>{"Support"}</Link<Route>>
                    </div>
                    <div class="flex items-center gap-4">
                        if state.status.is_authorized() {
                            <Link<Route> to={Route::Dashboard}>{"Open app"}</Link<Route>>
                        } else {
                            <Link<Route> to={Route::Login}>{"Sign In"}</Link<Route>>
                            <Link<Route> to={Route::Register}>{"Sign Up"}</Link<Route>>
                        }
                        <ThemeToggle />
                    </div>
                </div>
            </nav>
            <main class="max-w-7xl mx-auto px-4 py-8">
                {props.children.clone()}
            </main>
        </div>
    }
}

#[function_component(AppLayout)]
pub fn app_layout(props: &LayoutProps) -> Html {
    let state = use_auth_state(&props.services.auth);
    let navigator = use_navigator();

    let on_logout = {
        let AppServices { auth, client } = props.services.clone();
        Callback::from(move |_| {
            let auth = auth.clone();
            let client = client.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                client.logout().await;
                auth.update_access_token(None);
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Login);
                }
            });
        })
    };

    let user_name = state
        .authorized_user
        .as_ref()
        .map(|user| user.display_name().to_string());

    html! {
        <div class="min-h-screen flex bg-white dark:bg-gray-900">
            <aside class="w-56 border-r border-gray-200 dark:border-gray-700 p-4 flex flex-col gap-2">
                <Link<Route> to={Route::Landing} classes="text-xl font-bold mb-4">{"MockTail"}</Link<Route>>
                <Link<Route> to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
                <Link<Route> to={Route::Projects}>{"Projects"}</Link<Route>>
                <Link<Route> to={Route::Profile}>{"Profile"}</Link<Route>>
            </aside>
            <div class="flex-1 flex flex-col">
                <header class="p-4 border-b border-gray-200 dark:border-gray-700 flex justify-end items-center gap-4">
                    if let Some(name) = user_name {
                        <span class="text-sm text-gray-600 dark:text-gray-400">{name}</span>
                    }
                    <ThemeToggle />
                    <button onclick={on_logout} class="text-sm text-gray-600 dark:text-gray-400 hover:text-gray-900 dark:hover:text-gray-100">
                        {"Sign Out"}
                    </button>
                </header>
                <main class="p-6">
                    <Breadcrumbs client={props.services.client.clone()} />
                    {props.children.clone()}
                </main>
            </div>
        </div>
    }
}

//! Route enum and the guarded route switch
//!
//! Templates mirror the core route table; access decisions come from
//! [`mocktail_core::authorize_path`] only.

use crate::app::AppServices;
use crate::components::{AppLayout, LoadingSpinner, RootLayout};
use crate::hooks::use_auth_state;
use crate::pages;
use mocktail_core::{GuardDecision, RouteTable, authorize_path};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/about")]
    About,
    #[at("/docs")]
    Docs,
    #[at("/support")]
    Support,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/register/success")]
    RegisterSuccess,
    #[not_found]
    #[at("/page-not-found")]
    PageNotFound,
    #[at("/waiting")]
    Waiting,
    #[at("/profile")]
    Profile,
    #[at("/app")]
    AppRoot,
    #[at("/app/dashboard")]
    Dashboard,
    #[at("/app/projects")]
    Projects,
    #[at("/app/projects/create")]
    ProjectCreate,
    #[at("/app/projects/:project_id")]
    Project { project_id: String },
    #[at("/app/projects/:project_id/edit")]
    ProjectEdit { project_id: String },
    #[at("/app/projects/:project_id/api-tokens")]
    ProjectAccessTokens { project_id: String },
    #[at("/app/projects/:project_id/templates")]
    Templates { project_id: String },
    #[at("/app/projects/:project_id/templates/create")]
    TemplateCreate { project_id: String },
    #[at("/app/projects/:project_id/templates/:template_id")]
    Template {
        project_id: String,
        template_id: String,
    },
    #[at("/app/projects/:project_id/templates/:template_id/edit")]
    TemplateEdit {
        project_id: String,
        template_id: String,
    },
}

/// `Switch` render function
pub fn switch(route: Route, services: &AppServices) -> Html {
    html! { <Guarded route={route} services={services.clone()} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: Route,
    services: AppServices,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let state = use_auth_state(&props.services.auth);
    // Unmatched URLs arrive here as `PageNotFound`; guard on the real path
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_else(|| props.route.to_path());
    let table = RouteTable::standard();

    {
        let title = table.resolve(&path).and_then(|matched| matched.route.title);
        use_effect_with(title, |title| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                document.set_title(&title.map_or_else(
                    || "MockTail".to_string(),
                    |title| format!("{title} | MockTail"),
                ));
            }
        });
    }

    match authorize_path(table, &path, state.status) {
        GuardDecision::Render => render_page(&props.route, &props.services),
        GuardDecision::Loading => html! { <LoadingSpinner text="Checking your session..." /> },
        GuardDecision::Redirect(to) => {
            let target = Route::recognize(to).unwrap_or(Route::PageNotFound);
            html! { <Redirect<Route> to={target} /> }
        }
    }
}

fn render_page(route: &Route, services: &AppServices) -> Html {
    let services = services.clone();
    let in_app = |page: Html| html! { <AppLayout services={services.clone()}>{page}</AppLayout> };
    let public = |page: Html| html! { <RootLayout services={services.clone()}>{page}</RootLayout> };

    match route.clone() {
        Route::Landing => public(html! { <pages::Landing /> }),
        Route::About => public(html! { <pages::About /> }),
        Route::Docs => public(html! { <pages::Docs /> }),
        Route::Support => public(html! { <pages::Support /> }),
        Route::Login => public(html! { <pages::Login services={services.clone()} /> }),
        Route::Register => public(html! { <pages::Register services={services.clone()} /> }),
        Route::RegisterSuccess => public(html! { <pages::RegisterSuccess /> }),
        Route::PageNotFound => public(html! { <pages::PageNotFound /> }),
        Route::Waiting => public(html! { <pages::Waiting /> }),
        Route::Profile => in_app(html! { <pages::Profile client={services.client.clone()} /> }),
        // Redirected by the guard
        Route::AppRoot => html! {},
        Route::Dashboard => in_app(html! { <pages::Dashboard services={services.clone()} /> }),
        Route::Projects => in_app(html! { <pages::Projects client={services.client.clone()} /> }),
        Route::ProjectCreate => in_app(html! {
            <pages::ProjectForm client={services.client.clone()} />
        }),
        Route::Project { project_id } => in_app(html! {
            <pages::ProjectView client={services.client.clone()} {project_id} />
        }),
        Route::ProjectEdit { project_id } => in_app(html! {
            <pages::ProjectForm client={services.client.clone()} project_id={Some(project_id)} />
        }),
        Route::ProjectAccessTokens { project_id } => in_app(html! {
            <pages::ProjectAccessTokens client={services.client.clone()} {project_id} />
        }),
        Route::Templates { project_id } => in_app(html! {
            <pages::Templates client={services.client.clone()} {project_id} />
        }),
        Route::TemplateCreate { project_id } => in_app(html! {
            <pages::TemplateForm client={services.client.clone()} {project_id} />
        }),
        Route::Template {
            project_id,
            template_id,
        } => in_app(html! {
            <pages::TemplateView client={services.client.clone()} {project_id} {template_id} />
        }),
        Route::TemplateEdit {
            project_id,
            template_id,
        } => in_app(html! {
            <pages::TemplateForm
                client={services.client.clone()}
                {project_id}
                template_id={Some(template_id)}
            />
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn all_routes() -> Vec<Route> {
        let p = || "p-1".to_string();
        let t = || "t-1".to_string();
        vec![
            Route::Landing,
            Route::About,
            Route::Docs,
            Route::Support,
            Route::Login,
            Route::Register,
            Route::RegisterSuccess,
            Route::PageNotFound,
            Route::Waiting,
            Route::Profile,
            Route::AppRoot,
            Route::Dashboard,
            Route::Projects,
            Route::ProjectCreate,
            Route::Project { project_id: p() },
            Route::ProjectEdit { project_id: p() },
            Route::ProjectAccessTokens { project_id: p() },
            Route::Templates { project_id: p() },
            Route::TemplateCreate { project_id: p() },
            Route::Template { project_id: p(), template_id: t() },
            Route::TemplateEdit { project_id: p(), template_id: t() },
        ]
    }

    #[wasm_bindgen_test]
    fn test_every_route_exists_in_core_table() {
        let table = RouteTable::standard();
        for route in all_routes() {
            let path = route.to_path();
            assert!(table.resolve(&path).is_some(), "{path} missing from route table");
        }
        assert_eq!(all_routes().len(), table.routes().len());
    }

    #[wasm_bindgen_test]
    fn test_redirect_targets_are_routable() {
        for target in ["/login", "/app/dashboard", "/page-not-found"] {
            assert!(Route::recognize(target).is_some());
        }
    }
}

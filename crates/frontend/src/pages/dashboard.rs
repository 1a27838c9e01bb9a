//! Landing page of the signed-in area

use crate::app::AppServices;
use crate::components::{LoadingSpinner, SpinnerSize};
use crate::hooks::{FetchState, use_auth_state, use_fetch};
use crate::router::Route;
use mocktail_http::MocktailClient;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub services: AppServices,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let state = use_auth_state(&props.services.auth);
    let client = props.services.client.clone();
    let projects = use_fetch((), move |_| async move { client.list_projects().await });

    let greeting = state
        .authorized_user
        .as_ref()
        .map_or_else(|| "Welcome".to_string(), |user| format!("Welcome, {}", user.display_name()));

    let summary = match &*projects {
        FetchState::Loading => html! {
            <LoadingSpinner text="Loading projects..." size={SpinnerSize::Inline} />
        },
        FetchState::Failed(_) => html! { <span class="text-red-600">{"Projects unavailable"}</span> },
        FetchState::Ready(projects) => html! {
            <span>{format!("{} project(s)", projects.len())}</span>
        },
    };

    html! {
        <section class="flex flex-col gap-6">
            <h1 class="text-2xl font-semibold">{greeting}</h1>
            <div class="flex items-center gap-4">
                {summary}
                <Link<Route> to={Route::Projects} classes="text-blue-600">{"Open projects"}</Link<Route>>
            </div>
            <ServiceStatus client={props.services.client.clone()} />
        </section>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Service {
    Auth,
    Backend,
    Content,
}

impl Service {
    const ALL: [Self; 3] = [Self::Auth, Self::Backend, Self::Content];

    fn label(self) -> &'static str {
        match self {
            Self::Auth => "Authentication",
            Self::Backend => "Projects",
            Self::Content => "Templates",
        }
    }
}

#[derive(Properties, PartialEq)]
struct ServiceStatusProps {
    client: MocktailClient,
}

#[function_component(ServiceStatus)]
fn service_status(props: &ServiceStatusProps) -> Html {
    html! {
        <div>
            <h2 class="text-lg font-medium mb-2">{"Services"}</h2>
            <ul class="space-y-1">
                { for Service::ALL.into_iter().map(|service| html! {
                    <ServiceRow client={props.client.clone()} {service} />
                }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ServiceRowProps {
    client: MocktailClient,
    service: Service,
}

#[function_component(ServiceRow)]
fn service_row(props: &ServiceRowProps) -> Html {
    let client = props.client.clone();
    let status = use_fetch(props.service, move |service| async move {
        match service {
            Service::Auth => client.check_auth_availability().await,
            Service::Backend => client.check_backend_availability().await,
            Service::Content => client.check_content_availability().await,
        }
    });

    let (text, class) = match &*status {
        FetchState::Loading => ("checking", "text-gray-500"),
        FetchState::Ready(_) => ("available", "text-green-600"),
        FetchState::Failed(_) => ("unavailable", "text-red-600"),
    };

    html! {
        <li class="flex gap-2">
            <span class="w-40">{props.service.label()}</span>
            <span {class}>{text}</span>
        </li>
    }
}

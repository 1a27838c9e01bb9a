//! Breadcrumb trail for the current location

use crate::hooks::{FetchState, use_fetch};
use crate::router::Route;
use mocktail_core::{CrumbLabel, RouteTable};
use mocktail_http::MocktailClient;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BreadcrumbsProps {
    pub client: MocktailClient,
}

#[function_component(Breadcrumbs)]
pub fn breadcrumbs(props: &BreadcrumbsProps) -> Html {
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let crumbs = RouteTable::standard()
        .resolve(&path)
        .map(|matched| matched.breadcrumbs())
        .unwrap_or_default();

    if crumbs.is_empty() {
        return html! {};
    }

    let last = crumbs.len() - 1;
    html! {
        <nav class="flex items-center gap-2 text-sm text-gray-500 dark:text-gray-400 mb-4">
            { for crumbs.into_iter().enumerate().map(|(index, crumb)| {
                let text = html! { <CrumbText label={crumb.label} client={props.client.clone()} /> };
                let link = match Route::recognize(&crumb.href) {
                    Some(route) if index != last => html! { <Link<Route> to={route}>{text}</Link<Route>> },
                    _ => html! { <span class="text-gray-900 dark:text-gray-100">{text}</span> },
                };
                html! {
                    <>
                        if index > 0 { <span>{"/"}</span> }
                        {link}
                    </>
                }
            }) }
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct CrumbTextProps {
    label: CrumbLabel,
    client: MocktailClient,
}

#[function_component(CrumbText)]
fn crumb_text(props: &CrumbTextProps) -> Html {
    match &props.label {
        CrumbLabel::Static(text) => html! { {*text} },
        CrumbLabel::Project(id) => html! {
            <ProjectTitle id={id.clone()} client={props.client.clone()} />
        },
        CrumbLabel::Template(id) => html! {
            <TemplateName id={id.clone()} client={props.client.clone()} />
        },
    }
}

#[derive(Properties, PartialEq)]
struct EntityProps {
    id: String,
    client: MocktailClient,
}

#[function_component(ProjectTitle)]
fn project_title(props: &EntityProps) -> Html {
    let client = props.client.clone();
    let title = use_fetch(props.id.clone(), move |id| async move {
        client.get_project(&id).await.map(|project| project.title)
    });

    match &*title {
        FetchState::Ready(title) => html! { {title.clone()} },
        _ => html! { {CrumbLabel::Project(props.id.clone()).fallback()} },
    }
}

#[function_component(TemplateName)]
fn template_name(props: &EntityProps) -> Html {
    let client = props.client.clone();
    let name = use_fetch(props.id.clone(), move |id| async move {
        client.get_template(&id).await.map(|template| template.name)
    });

    match &*name {
        FetchState::Ready(name) => html! { {name.clone()} },
        _ => html! { {CrumbLabel::Template(props.id.clone()).fallback()} },
    }
}

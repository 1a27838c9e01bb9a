//! Project list, detail and editor pages

use super::{ErrorNotice, bind_checkbox, bind_input, bind_textarea, non_empty, split_keywords};
use crate::components::LoadingSpinner;
use crate::hooks::{FetchState, use_fetch};
use crate::router::Route;
use mocktail_http::MocktailClient;
use mocktail_http::types::{Project, ProjectPayload};
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjectsProps {
    pub client: MocktailClient,
}

#[function_component(Projects)]
pub fn projects(props: &ProjectsProps) -> Html {
    let client = props.client.clone();
    let projects = use_fetch((), move |_| async move { client.list_projects().await });

    let body = match &*projects {
        FetchState::Loading => html! { <LoadingSpinner text="Loading projects..." /> },
        FetchState::Failed(message) => html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(projects) if projects.is_empty() => html! {
            <p class="text-gray-500">{"No projects yet."}</p>
        },
        FetchState::Ready(projects) => html! {
            <ul class="divide-y dark:divide-gray-700">
                { for projects.iter().map(project_row) }
            </ul>
        },
    };

    html! {
        <section>
            <div class="flex justify-between items-center mb-4">
                <h1 class="text-2xl font-semibold">{"Projects"}</h1>
                <Link<Route> to={Route::ProjectCreate}
                    classes="px-4 py-2 rounded-md text-white bg-blue-600 hover:bg-blue-700">
                    {"New project"}
                </Link<Route>>
            </div>
            {body}
        </section>
    }
}

fn project_row(project: &Project) -> Html {
    html! {
        <li class="py-3">
            <Link<Route> to={Route::Project { project_id: project.id.clone() }} classes="font-medium text-blue-600">
                {project.title.clone()}
            </Link<Route>>
            if let Some(description) = &project.description {
                <p class="text-sm text-gray-500">{description.clone()}</p>
            }
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectViewProps {
    pub client: MocktailClient,
    pub project_id: String,
}

#[function_component(ProjectView)]
pub fn project_view(props: &ProjectViewProps) -> Html {
    let client = props.client.clone();
    let project = use_fetch(props.project_id.clone(), move |id| async move {
        client.get_project(&id).await
    });
    let delete_error = use_state(|| None::<AttrValue>);
    let navigator = use_navigator();

    let on_delete = {
        let client = props.client.clone();
        let project_id = props.project_id.clone();
        let delete_error = delete_error.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let project_id = project_id.clone();
            let delete_error = delete_error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match client.delete_project(&project_id).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Projects);
                        }
                    }
                    Err(e) => {
                        error!(project_id = %project_id, error = %e, "Failed to delete project");
                        delete_error.set(Some(e.to_string().into()));
                    }
                }
            });
        })
    };

    let project = match &*project {
        FetchState::Loading => return html! { <LoadingSpinner text="Loading project..." /> },
        FetchState::Failed(message) => return html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(project) => project.clone(),
    };
    let project_id = project.id.clone();

    html! {
        <section class="flex flex-col gap-4">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-semibold">{project.title.clone()}</h1>
                <div class="flex gap-2">
                    <Link<Route> to={Route::ProjectEdit { project_id: project_id.clone() }}
                        classes="px-3 py-1 rounded-md border">
                        {"Edit"}
                    </Link<Route>>
                    <button onclick={on_delete} class="px-3 py-1 rounded-md border border-red-500 text-red-600">
                        {"Delete"}
                    </button>
                </div>
            </div>
            if let Some(error) = &*delete_error {
                <ErrorNotice message={error.clone()} />
            }
            if let Some(description) = &project.description {
                <p>{description.clone()}</p>
            }
            if !project.key_words.is_empty() {
                <p class="text-sm text-gray-500">{project.key_words.join(", ")}</p>
            }
            if project.with_mock_server {
                <p class="text-sm">{"Mock server enabled"}</p>
            }
            <nav class="flex gap-4">
                <Link<Route> to={Route::Templates { project_id: project_id.clone() }} classes="text-blue-600">
                    {format!("Templates ({})", project.templates.len())}
                </Link<Route>>
                <Link<Route> to={Route::ProjectAccessTokens { project_id }} classes="text-blue-600">
                    {"API tokens"}
                </Link<Route>>
            </nav>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectFormProps {
    pub client: MocktailClient,
    /// Existing project to edit; `None` creates a new one
    #[prop_or_default]
    pub project_id: Option<String>,
}

/// Create or edit a project
#[function_component(ProjectForm)]
pub fn project_form(props: &ProjectFormProps) -> Html {
    let client = props.client.clone();
    let existing = use_fetch(props.project_id.clone(), move |id| async move {
        match id {
            Some(id) => client.get_project(&id).await.map(Some),
            None => Ok(None),
        }
    });

    match &*existing {
        FetchState::Loading => html! { <LoadingSpinner text="Loading project..." /> },
        FetchState::Failed(message) => html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(project) => html! {
            <ProjectEditor client={props.client.clone()} project={project.clone()} />
        },
    }
}

#[derive(Properties, PartialEq)]
struct ProjectEditorProps {
    client: MocktailClient,
    project: Option<Project>,
}

#[function_component(ProjectEditor)]
fn project_editor(props: &ProjectEditorProps) -> Html {
    let existing = props.project.as_ref();
    let title = use_state(|| existing.map(|p| p.title.clone()).unwrap_or_default());
    let description = use_state(|| {
        existing
            .and_then(|p| p.description.clone())
            .unwrap_or_default()
    });
    let key_words = use_state(|| existing.map(|p| p.key_words.join(", ")).unwrap_or_default());
    let with_mock_server = use_state(|| existing.is_some_and(|p| p.with_mock_server));
    let busy = use_state(|| false);
    let error = use_state(|| None::<AttrValue>);
    let navigator = use_navigator();

    let onsubmit = {
        let client = props.client.clone();
        let project_id = props.project.as_ref().map(|p| p.id.clone());
        let (title, description, key_words, with_mock_server) = (
            title.clone(),
            description.clone(),
            key_words.clone(),
            with_mock_server.clone(),
        );
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = ProjectPayload {
                title: title.trim().to_string(),
                key_words: split_keywords(&key_words),
                description: non_empty(&description),
                with_mock_server: *with_mock_server,
            };
            let client = client.clone();
            let project_id = project_id.clone();
            let busy = busy.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            busy.set(true);
            spawn_local(async move {
                let saved = match project_id {
                    Some(id) => client.update_project(&id, &payload).await.map(|()| id),
                    None => client.create_project(&payload).await.map(|project| project.id),
                };
                match saved {
                    Ok(project_id) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Project { project_id });
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to save project");
                        error.set(Some(e.to_string().into()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let heading = if props.project.is_some() { "Edit project" } else { "New project" };
    let disabled = *busy || title.trim().is_empty();

    html! {
        <form {onsubmit} class="max-w-xl flex flex-col gap-4">
            <h1 class="text-2xl font-semibold">{heading}</h1>
            if let Some(error) = &*error {
                <ErrorNotice message={error.clone()} />
            }
            <input placeholder="Title" value={(*title).clone()} oninput={bind_input(&title)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <textarea placeholder="Description" value={(*description).clone()}
                oninput={bind_textarea(&description)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <input placeholder="Keywords, comma separated" value={(*key_words).clone()}
                oninput={bind_input(&key_words)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <label class="flex items-center gap-2">
                <input type="checkbox" checked={*with_mock_server} onchange={bind_checkbox(&with_mock_server)} />
                {"Serve generated data through the mock server"}
            </label>
            <button type="submit" {disabled}
                class="self-start px-4 py-2 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                {"Save"}
            </button>
        </form>
    }
}

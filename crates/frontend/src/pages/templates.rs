//! Template pages: list, editor, and detail with data generation

use super::{ErrorNotice, bind_input, bind_textarea, non_empty, split_keywords};
use crate::components::LoadingSpinner;
use crate::hooks::{FetchState, use_fetch};
use crate::router::Route;
use mocktail_http::MocktailClient;
use mocktail_http::types::{Template, TemplatePayload};
use tracing::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const MAX_GENERATED: u32 = 100;

#[derive(Properties, PartialEq)]
pub struct TemplatesProps {
    pub client: MocktailClient,
    pub project_id: String,
}

#[function_component(Templates)]
pub fn templates(props: &TemplatesProps) -> Html {
    let client = props.client.clone();
    let templates = use_fetch(props.project_id.clone(), move |project_id| async move {
        client.list_templates(&project_id).await
    });

    let body = match &*templates {
        FetchState::Loading => html! { <LoadingSpinner text="Loading templates..." /> },
        FetchState::Failed(message) => html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(templates) if templates.is_empty() => html! {
            <p class="text-gray-500">{"This project has no templates yet."}</p>
        },
        FetchState::Ready(templates) => html! {
            <ul class="divide-y dark:divide-gray-700">
                { for templates.iter().map(template_row) }
            </ul>
        },
    };

    html! {
        <section>
            <div class="flex justify-between items-center mb-4">
                <h1 class="text-2xl font-semibold">{"Templates"}</h1>
                <Link<Route> to={Route::TemplateCreate { project_id: props.project_id.clone() }}
                    classes="px-4 py-2 rounded-md text-white bg-blue-600 hover:bg-blue-700">
                    {"New template"}
                </Link<Route>>
            </div>
            {body}
        </section>
    }
}

fn template_row(template: &Template) -> Html {
    let route = Route::Template {
        project_id: template.related_project_id.clone(),
        template_id: template.id.clone(),
    };
    html! {
        <li class="py-3">
            <Link<Route> to={route} classes="font-medium text-blue-600">{template.name.clone()}</Link<Route>>
            if let Some(description) = &template.description {
                <p class="text-sm text-gray-500">{description.clone()}</p>
            }
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct TemplateViewProps {
    pub client: MocktailClient,
    pub project_id: String,
    pub template_id: String,
}

#[function_component(TemplateView)]
pub fn template_view(props: &TemplateViewProps) -> Html {
    let client = props.client.clone();
    let template = use_fetch(props.template_id.clone(), move |id| async move {
        client.get_template(&id).await
    });
    let action_error = use_state(|| None::<AttrValue>);
    let navigator = use_navigator();

    let on_delete = {
        let client = props.client.clone();
        let project_id = props.project_id.clone();
        let template_id = props.template_id.clone();
        let action_error = action_error.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let project_id = project_id.clone();
            let template_id = template_id.clone();
            let action_error = action_error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match client.delete_template(&template_id).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Templates { project_id });
                        }
                    }
                    Err(e) => {
                        error!(template_id = %template_id, error = %e, "Failed to delete template");
                        action_error.set(Some(e.to_string().into()));
                    }
                }
            });
        })
    };

    let template = match &*template {
        FetchState::Loading => return html! { <LoadingSpinner text="Loading template..." /> },
        FetchState::Failed(message) => return html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(template) => template.clone(),
    };

    html! {
        <section class="flex flex-col gap-4">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-semibold">{template.name.clone()}</h1>
                <div class="flex gap-2">
                    <Link<Route>
                        to={Route::TemplateEdit {
                            project_id: props.project_id.clone(),
                            template_id: template.id.clone(),
                        }}
                        classes="px-3 py-1 rounded-md border">
                        {"Edit"}
                    </Link<Route>>
                    <button onclick={on_delete} class="px-3 py-1 rounded-md border border-red-500 text-red-600">
                        {"Delete"}
                    </button>
                </div>
            </div>
            if let Some(error) = &*action_error {
                <ErrorNotice message={error.clone()} />
            }
            if let Some(description) = &template.description {
                <p>{description.clone()}</p>
            }
            <pre class="p-4 rounded-md bg-gray-100 dark:bg-gray-800 text-sm overflow-x-auto">
                {template.schema.clone()}
            </pre>
            <Generator client={props.client.clone()} template_id={template.id.clone()} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct GeneratorProps {
    client: MocktailClient,
    template_id: String,
}

/// Count picker and preview of generated records
#[function_component(Generator)]
fn generator(props: &GeneratorProps) -> Html {
    let count = use_state(|| "5".to_string());
    let output = use_state(|| None::<Result<String, String>>);
    let busy = use_state(|| false);

    let parsed = count
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_GENERATED).contains(n));

    let onclick = {
        let client = props.client.clone();
        let template_id = props.template_id.clone();
        let output = output.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(count) = parsed else { return };
            let client = client.clone();
            let template_id = template_id.clone();
            let output = output.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                let result = match client.generate_from_template(&template_id, count).await {
                    Ok(data) => serde_json::to_string_pretty(&data).map_err(|e| e.to_string()),
                    Err(e) => {
                        error!(template_id = %template_id, error = %e, "Generation failed");
                        Err(e.to_string())
                    }
                };
                output.set(Some(result));
                busy.set(false);
            });
        })
    };

    html! {
        <div class="flex flex-col gap-2">
            <h2 class="text-lg font-medium">{"Generate"}</h2>
            <div class="flex gap-2">
                <input type="number" min="1" max={MAX_GENERATED.to_string()} value={(*count).clone()}
                    oninput={bind_input(&count)} class="w-24 px-3 py-1 border rounded-md dark:bg-gray-800" />
                <button {onclick} disabled={*busy || parsed.is_none()}
                    class="px-4 py-1 rounded-md text-white bg-blue-600 disabled:opacity-50">
                    {"Generate"}
                </button>
            </div>
            {
                match &*output {
                    None => html! {},
                    Some(Ok(json)) => html! {
                        <pre class="p-4 rounded-md bg-gray-100 dark:bg-gray-800 text-sm overflow-x-auto">{json.clone()}</pre>
                    },
                    Some(Err(message)) => html! { <ErrorNotice message={message.clone()} /> },
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TemplateFormProps {
    pub client: MocktailClient,
    pub project_id: String,
    /// Existing template to edit; `None` creates a new one
    #[prop_or_default]
    pub template_id: Option<String>,
}

#[function_component(TemplateForm)]
pub fn template_form(props: &TemplateFormProps) -> Html {
    let client = props.client.clone();
    let existing = use_fetch(props.template_id.clone(), move |id| async move {
        match id {
            Some(id) => client.get_template(&id).await.map(Some),
            None => Ok(None),
        }
    });

    match &*existing {
        FetchState::Loading => html! { <LoadingSpinner text="Loading template..." /> },
        FetchState::Failed(message) => html! { <ErrorNotice message={message.clone()} /> },
        FetchState::Ready(template) => html! {
            <TemplateEditor
                client={props.client.clone()}
                project_id={props.project_id.clone()}
                template={template.clone()}
            />
        },
    }
}

#[derive(Properties, PartialEq)]
struct TemplateEditorProps {
    client: MocktailClient,
    project_id: String,
    template: Option<Template>,
}

#[function_component(TemplateEditor)]
fn template_editor(props: &TemplateEditorProps) -> Html {
    let existing = props.template.as_ref();
    let name = use_state(|| existing.map(|t| t.name.clone()).unwrap_or_default());
    let description = use_state(|| {
        existing
            .and_then(|t| t.description.clone())
            .unwrap_or_default()
    });
    let key_words = use_state(|| existing.map(|t| t.key_words.join(", ")).unwrap_or_default());
    let schema = use_state(|| existing.map(|t| t.schema.clone()).unwrap_or_default());
    let busy = use_state(|| false);
    let error = use_state(|| None::<AttrValue>);
    let navigator = use_navigator();

    let onsubmit = {
        let client = props.client.clone();
        let project_id = props.project_id.clone();
        let template_id = existing.map(|t| t.id.clone());
        let (name, description, key_words, schema) =
            (name.clone(), description.clone(), key_words.clone(), schema.clone());
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = TemplatePayload {
                name: name.trim().to_string(),
                schema: (*schema).clone(),
                key_words: split_keywords(&key_words),
                description: non_empty(&description),
                related_project_id: project_id.clone(),
            };
            let client = client.clone();
            let project_id = project_id.clone();
            let template_id = template_id.clone();
            let busy = busy.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            busy.set(true);
            spawn_local(async move {
                let saved = match template_id {
                    Some(id) => client.update_template(&id, &payload).await.map(|()| id),
                    None => client.create_template(&payload).await.map(|template| template.id),
                };
                match saved {
                    Ok(template_id) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Template {
                                project_id,
                                template_id,
                            });
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to save template");
                        error.set(Some(e.to_string().into()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let heading = if existing.is_some() { "Edit template" } else { "New template" };
    let disabled = *busy || name.trim().is_empty() || schema.trim().is_empty();

    html! {
        <form {onsubmit} class="max-w-2xl flex flex-col gap-4">
            <h1 class="text-2xl font-semibold">{heading}</h1>
            if let Some(error) = &*error {
                <ErrorNotice message={error.clone()} />
            }
            <input placeholder="Name" value={(*name).clone()} oninput={bind_input(&name)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <textarea placeholder="Description" value={(*description).clone()}
                oninput={bind_textarea(&description)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <input placeholder="Keywords, comma separated" value={(*key_words).clone()}
                oninput={bind_input(&key_words)}
                class="px-3 py-2 border rounded-md dark:bg-gray-800" />
            <textarea placeholder="type User = { id: string; name: string }" rows="12"
                value={(*schema).clone()} oninput={bind_textarea(&schema)}
                class="px-3 py-2 border rounded-md font-mono text-sm dark:bg-gray-800" />
            <button type="submit" {disabled}
                class="self-start px-4 py-2 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                {"Save"}
            </button>
        </form>
    }
}

//! Static pages

use crate::components::LoadingSpinner;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Landing)]
pub fn landing() -> Html {
    html! {
        <section class="text-center py-16">
            <h1 class="text-4xl font-extrabold text-gray-900 dark:text-white">{"MockTail"}</h1>
            <p class="mt-4 max-w-2xl mx-auto text-lg text-gray-500 dark:text-gray-400">
                {"Describe your data with TypeScript types and get realistic mock JSON for local development."}
            </p>
            <div class="mt-8">
                <Link<Route> to={Route::Register} classes="px-6 py-3 rounded-md text-white bg-blue-600 hover:bg-blue-700">
                    {"Get started"}
                </Link<Route>>
            </div>
        </section>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <section>
            <h1 class="text-2xl font-semibold mb-4">{"About"}</h1>
            <p>{"MockTail organises mock data templates into projects and serves generated data to your apps through project access tokens."}</p>
        </section>
    }
}

#[function_component(Docs)]
pub fn docs() -> Html {
    html! {
        <section>
            <h1 class="text-2xl font-semibold mb-4">{"Docs"}</h1>
            <ol class="list-decimal ml-6 space-y-2">
                <li>{"Create a project."}</li>
                <li>{"Add templates whose schema is a TypeScript type."}</li>
                <li>{"Issue an API token for the project and call the mock endpoint with it."}</li>
            </ol>
        </section>
    }
}

#[function_component(Support)]
pub fn support() -> Html {
    html! {
        <section>
            <h1 class="text-2xl font-semibold mb-4">{"Support"}</h1>
            <p>{"Found a bug or need help? Open an issue in the project repository."}</p>
        </section>
    }
}

#[function_component(PageNotFound)]
pub fn page_not_found() -> Html {
    html! {
        <section class="text-center py-16">
            <h1 class="text-3xl font-bold mb-4">{"Page not found"}</h1>
            <Link<Route> to={Route::Landing} classes="text-blue-600">{"Back to home"}</Link<Route>>
        </section>
    }
}

#[function_component(Waiting)]
pub fn waiting() -> Html {
    html! { <LoadingSpinner /> }
}

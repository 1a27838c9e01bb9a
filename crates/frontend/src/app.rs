//! Application root

use crate::components::ThemeProvider;
use crate::platform::{BrowserNavigator, BrowserStorage, api_origin};
use crate::router::{Route, switch};
use crate::session::SessionKeeper;
use mocktail_core::{AuthStore, TokenStore};
use mocktail_http::{ClientConfig, ClientError, MocktailClient};
use std::sync::Arc;
use tracing::error;
use yew::prelude::*;
use yew_router::prelude::*;

/// Long-lived handles shared by every page
///
/// Built once by [`App`] and passed down explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct AppServices {
    pub auth: AuthStore,
    pub client: MocktailClient,
}

impl AppServices {
    pub fn browser() -> Result<Self, ClientError> {
        let config = ClientConfig::builder().base_url(api_origin()).build()?;
        let tokens = TokenStore::new(BrowserStorage);
        let client = MocktailClient::new(config, tokens, Arc::new(BrowserNavigator))?;

        Ok(Self {
            auth: AuthStore::new(),
            client,
        })
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let services = use_memo((), |_| AppServices::browser());

    let services = match services.as_ref() {
        Ok(services) => services.clone(),
        Err(e) => {
            error!(error = %e, "Failed to initialise API client");
            return html! {
                <div class="p-10 text-center text-red-600">{"MockTail could not start."}</div>
            };
        }
    };

    let render = {
        let services = services.clone();
        Callback::from(move |route: Route| switch(route, &services))
    };

    html! {
        <ThemeProvider>
            <BrowserRouter>
                <SessionKeeper services={services} />
                <Switch<Route> render={render} />
            </BrowserRouter>
        </ThemeProvider>
    }
}

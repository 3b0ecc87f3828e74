use crate::api::BackendHandle;
use crate::components::dashboard::DashboardComponent;
use crate::components::login::LoginComponent;
use crate::session;
use presenter::DashboardConfig;
use yew::{html, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: DashboardConfig,
}

/// Picks the page by path: everything under `/auth` is the login screen,
/// anything else the dashboard.
pub struct App {
    backend: BackendHandle,
}

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            backend: BackendHandle::http(&ctx.props().config.api_base),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = ctx.props().config.clone();
        let backend = self.backend.clone();

        if session::current_path().starts_with(session::AUTH_PREFIX) {
            html! { <LoginComponent {backend} {config} /> }
        } else {
            html! { <DashboardComponent {backend} {config} /> }
        }
    }
}

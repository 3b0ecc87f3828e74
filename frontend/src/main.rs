use crate::app::{App, AppProps};

mod api;
mod app;
mod components;
mod config;
mod logger;
mod session;

fn main() {
    let config = config::load();
    logger::init(config.log_level());
    log::info!("starting dashboard (api base {:?})", config.api_base);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}

//! Résumé Desk Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod form;
mod list_sync;
mod location;
mod models;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_build_env();
    console_logger::init(config.log_level).ok();
    log::info!("Résumé Desk starting");
    mount_to_body(move || view! { <App config=config.clone() /> });
}

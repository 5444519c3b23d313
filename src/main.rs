//! Zai Toon Admin Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod crud;
mod debounce;
mod error;
mod forms;
mod media;
mod models;
mod pages;
mod resource;
mod session;
mod status;
mod store;
mod task;

use app::App;
use config::AdminConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AdminConfig::from_env();
    if let Err(err) = admin_logger::init(config.log_level, admin_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("[APP] logger already installed: {}", err).into());
    }

    mount_to_body(move || view! { <App config=config.clone()/> });
}

#![allow(warnings)]
//! To-Do Frontend Entry Point

mod models;
mod error;
mod ids;
mod storage;
mod todo_list;
mod config;
mod logger;
mod store;
mod context;
mod components;
mod app;

use app::App;
use config::TodoConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = TodoConfig::from_document();
    if let Err(e) = logger::init(config.level_filter()) {
        web_sys::console::warn_1(&format!("[MAIN] logger already set: {}", e).into());
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}

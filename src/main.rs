//! Sprint Board Frontend Entry Point

mod app;
mod clipboard;
mod components;
mod context;
mod identity;
mod markdown;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("SprintBoard", LevelFilter::Info) {
        web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
    }
    mount_to_body(App);
}

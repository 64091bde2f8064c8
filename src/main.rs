//! Monty Frontend Entry Point

use leptos::prelude::*;
use monty_ui::app::App;
use monty_ui::config::AppConfig;
use monty_ui::logger;

fn main() {
    console_error_panic_hook::set_once();
    if logger::init(AppConfig::resolve(None).log_level).is_err() {
        web_sys::console::warn_1(&"[APP] Logger already installed".into());
    }
    mount_to_body(App);
}

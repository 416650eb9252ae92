pub mod app;
pub mod app_shell;
pub mod layout;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

use crate::shared::navigation::init_navigation;
use crate::system::pages::config_error::ConfigErrorPage;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match init_navigation() {
        Ok(tree) => leptos::mount::mount_to_body(move || leptos::view! { <app::App tree=tree /> }),
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            let message = e.to_string();
            leptos::mount::mount_to_body(move || leptos::view! { <ConfigErrorPage message=message.clone() /> });
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}

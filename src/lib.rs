/// Nav Shortcuts - browser extension that adds configurable links to a shop's navigation bar
/// Built with Rust + WASM + Yew

pub mod error;
pub mod host;
pub mod injector;
pub mod links;
pub mod reconcile;
pub mod storage;
pub mod ui;

use log::error;
use storage::{LinkRepository, SyncStorage};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Set up panic hook and logging for the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Content script entry: inject the enabled links once per page load
#[wasm_bindgen]
pub fn start_injector() {
    spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            error!("No document available, skipping link injection");
            return;
        };

        let repository = LinkRepository::new(SyncStorage);
        if let Err(e) = injector::run(&document, &repository).await {
            error!("{}", e);
        }
    });
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}

mod app;
mod config;
mod error;
mod player;

use app::{App, AppProps};
use config::PageConfig;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(level));

    let config = PageConfig::load();
    log::info!("starting player for {}", config.src);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}

// src/main.rs
mod components;
mod lightbox;
mod site_config;
mod utils;

use site_config::SiteConfig;

fn main() {
    // Read the config before the logger exists so its level can apply.
    let config = SiteConfig::from_page();
    let level = config
        .as_ref()
        .map(SiteConfig::log_level)
        .unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));

    let config = config.unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        SiteConfig::default()
    });

    utils::on_dom_ready(move || {
        components::mount_all(&config);
        log::info!("Page behaviours mounted");
    });
}

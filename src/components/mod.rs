// src/components/mod.rs
pub mod back_to_top;
pub mod contact_form;
pub mod fade_in;
pub mod lightbox;
pub mod navbar;

use crate::site_config::SiteConfig;

/// Wires every page behaviour. Each one is skipped on its own when its markup
/// is missing.
pub fn mount_all(config: &SiteConfig) {
    navbar::mount_menu();
    navbar::mount_navbar(&config.navbar, &config.base_path);
    back_to_top::mount(config.back_to_top.threshold);
    lightbox::mount();
    match fade_in::mount(config.fade_in.threshold) {
        Ok(count) => log::debug!("Observing {} fade-in sections", count),
        Err(e) => log::error!("Fade-in disabled: {}", e),
    }
    contact_form::mount(&config.contact);
}

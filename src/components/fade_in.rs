// src/components/fade_in.rs
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::utils::query_all;

const VISIBLE_CLASS: &str = "is-visible";

/// Reveals each `.fade-in-section` the first time it scrolls into view.
pub fn mount(threshold: f64) -> Result<usize, String> {
    let sections = query_all(".fade-in-section");
    if sections.is_empty() {
        return Ok(0);
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(VISIBLE_CLASS);
                    // Fade in once only.
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| format!("Failed to create IntersectionObserver: {:?}", e))?;
    callback.forget();

    for section in &sections {
        observer.observe(section);
    }
    Ok(sections.len())
}

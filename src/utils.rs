// src/utils.rs
use gloo::events::EventListener;
use gloo::utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Build an asset URL under the deployment prefix. Without a prefix the path
/// is left page-relative, the same way the markup references its assets.
pub fn resource_url(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let clean_path = path.trim_start_matches('/');

    if base.is_empty() {
        clean_path.to_string()
    } else if base.starts_with('/') {
        format!("{}/{}", base, clean_path)
    } else {
        format!("/{}/{}", base, clean_path)
    }
}

/// Touch-capable if the browser exposes touch events or reports touch points.
pub fn is_touch_capable() -> bool {
    let window = window();
    let has_touch_events = js_sys::Reflect::has(&window, &"ontouchstart".into()).unwrap_or(false);
    has_touch_events || window.navigator().max_touch_points() > 0
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document().get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nodes) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn current_scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

/// `document.readyState` is "loading" until parsing finishes, then
/// "interactive" and "complete".
fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Runs `f` once the document has been parsed.
pub fn on_dom_ready<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let document = document();
    if is_parsed(&document.ready_state()) {
        f();
        return;
    }
    EventListener::once(&document, "DOMContentLoaded", move |_| f()).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url_without_prefix_stays_page_relative() {
        assert_eq!(
            resource_url("", "img/logo-w-wordmark.png"),
            "img/logo-w-wordmark.png"
        );
        assert_eq!(resource_url("", "/img/logo.png"), "img/logo.png");
        assert_eq!(resource_url("/", "img/logo.png"), "img/logo.png");
    }

    #[test]
    fn test_resource_url_with_prefix() {
        assert_eq!(resource_url("/portfolio", "img/logo.png"), "/portfolio/img/logo.png");
        assert_eq!(resource_url("/portfolio/", "/img/logo.png"), "/portfolio/img/logo.png");
        assert_eq!(resource_url("portfolio", "img/logo.png"), "/portfolio/img/logo.png");
    }

    #[test]
    fn test_is_parsed() {
        assert!(!is_parsed("loading"));
        assert!(is_parsed("interactive"));
        assert!(is_parsed("complete"));
    }
}

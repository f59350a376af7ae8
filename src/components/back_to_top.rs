// src/components/back_to_top.rs
use gloo::events::EventListener;
use gloo::utils::window;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::utils::{by_id, current_scroll_y, is_touch_capable};

const SHOW_CLASS: &str = "show";

pub fn is_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn mount(threshold: f64) {
    let Some(button) = by_id::<HtmlElement>("back-to-top") else {
        log::warn!("Back-to-top disabled: missing #back-to-top");
        return;
    };

    {
        let button = button.clone();
        EventListener::new(&window(), "scroll", move |_| {
            let _ = button
                .class_list()
                .toggle_with_force(SHOW_CLASS, is_visible(current_scroll_y(), threshold));
        })
        .forget();
    }

    let blur_after_click = is_touch_capable();
    let target = button.clone();
    EventListener::new(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window().scroll_to_with_scroll_to_options(&options);

        // Touch browsers keep :hover/:focus on the button after the tap.
        if blur_after_click {
            let _ = target.blur();
        }
    })
    .forget();
}

// src/components/lightbox.rs
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use gloo::utils::{body, document};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent,
    TouchEvent, TouchList,
};

use crate::lightbox::{resolve_image, Effect, LightboxController, Point, TRANSITION_MS};
use crate::utils::{by_id, is_touch_capable, query, query_all};

const HIDDEN_CLASS: &str = "hidden";
const NO_SCROLL_CLASS: &str = "no-scroll";
const ZOOMED_CLASS: &str = "zoomed";

/// Everything the lightbox needs from the page, or nothing at all.
struct Elements {
    overlay: HtmlElement,
    image: HtmlImageElement,
    close: Element,
    content: Option<Element>,
    thumbnails: Vec<Element>,
}

impl Elements {
    fn find() -> Result<Self, String> {
        let overlay = by_id::<HtmlElement>("lightbox-overlay").ok_or("missing #lightbox-overlay")?;
        let image = by_id::<HtmlImageElement>("lightbox-img").ok_or("missing #lightbox-img")?;
        let close = by_id::<Element>("close-btn").ok_or("missing #close-btn")?;
        let thumbnails = query_all(".project-thumbnail");
        if thumbnails.is_empty() {
            return Err("no .project-thumbnail elements".to_string());
        }
        Ok(Self {
            overlay,
            image,
            close,
            content: query::<Element>(".lightbox-content"),
            thumbnails,
        })
    }
}

struct Lightbox {
    controller: RefCell<LightboxController>,
    overlay: HtmlElement,
    image: HtmlImageElement,
    pending: RefCell<Option<Timeout>>,
}

pub fn mount() {
    match Elements::find() {
        Ok(elements) => {
            let thumbnails = elements.thumbnails.len();
            wire(elements);
            log::info!("Lightbox ready for {} thumbnails", thumbnails);
        }
        Err(e) => log::warn!("Lightbox disabled: {}", e),
    }
}

fn wire(elements: Elements) {
    let Elements {
        overlay,
        image,
        close,
        content,
        thumbnails,
    } = elements;

    let lightbox = Rc::new(Lightbox {
        controller: RefCell::new(LightboxController::new(is_touch_capable())),
        overlay: overlay.clone(),
        image: image.clone(),
        pending: RefCell::new(None),
    });

    // ------ OPEN ------
    for thumbnail in thumbnails {
        let lightbox = lightbox.clone();
        let source = thumbnail.clone();
        EventListener::new(&thumbnail, "click", move |_| {
            let highres = source.get_attribute("data-highres");
            let src = match source.dyn_ref::<HtmlImageElement>() {
                Some(img) => img.src(),
                None => source.get_attribute("src").unwrap_or_default(),
            };
            let src = resolve_image(highres, src);
            log::debug!("Opening lightbox with {}", src);
            let effects = lightbox.controller.borrow_mut().open(src);
            lightbox.dispatch(effects, None);
        })
        .forget();
    }

    // ------ CLOSE ------
    {
        let lightbox = lightbox.clone();
        EventListener::new(&close, "click", move |_| {
            let effects = lightbox.controller.borrow_mut().close();
            lightbox.dispatch(effects, None);
        })
        .forget();
    }
    {
        let lightbox = lightbox.clone();
        let backdrop = overlay.clone();
        EventListener::new(&overlay, "click", move |event| {
            let on_backdrop = event
                .target()
                .map_or(false, |target| js_sys::Object::is(&target, &backdrop));
            let effects = lightbox.controller.borrow_mut().backdrop_click(on_backdrop);
            lightbox.dispatch(effects, None);
        })
        .forget();
    }
    if let Some(content) = content {
        EventListener::new(&content, "click", |event| event.stop_propagation()).forget();
    } else {
        log::warn!("No .lightbox-content; only direct backdrop clicks are filtered");
    }
    {
        let lightbox = lightbox.clone();
        EventListener::new(&document(), "keydown", move |event| {
            let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let effects = lightbox
                .controller
                .borrow_mut()
                .key_down(&keyboard_event.key());
            lightbox.dispatch(effects, None);
        })
        .forget();
    }

    // ------ MOUSE ZOOM ------
    {
        let lightbox = lightbox.clone();
        EventListener::new(&image, "click", move |_| {
            let effects = lightbox.controller.borrow_mut().image_click();
            lightbox.dispatch(effects, None);
        })
        .forget();
    }

    // ------ TOUCH ------
    {
        let lightbox = lightbox.clone();
        EventListener::new_with_options(
            &image,
            "touchstart",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let points = touch_points(&touch_event.touches());
                let effects = lightbox
                    .controller
                    .borrow_mut()
                    .touch_start(&points, js_sys::Date::now());
                lightbox.dispatch(effects, Some(event));
            },
        )
        .forget();
    }
    {
        let lightbox = lightbox.clone();
        EventListener::new_with_options(
            &image,
            "touchmove",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let points = touch_points(&touch_event.touches());
                let effects = lightbox.controller.borrow_mut().touch_move(&points);
                lightbox.dispatch(effects, Some(event));
            },
        )
        .forget();
    }
    for event_type in ["touchend", "touchcancel"] {
        let lightbox = lightbox.clone();
        EventListener::new(&image, event_type, move |event| {
            let remaining = event
                .dyn_ref::<TouchEvent>()
                .map_or(0, |e| e.touches().length() as usize);
            let effects = lightbox.controller.borrow_mut().touch_end(remaining);
            lightbox.dispatch(effects, Some(event));
        })
        .forget();
    }
}

fn touch_points(touches: &TouchList) -> Vec<Point> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

impl Lightbox {
    fn dispatch(self: &Rc<Self>, effects: Vec<Effect>, event: Option<&Event>) {
        for effect in effects {
            if let Err(e) = self.apply(effect, event) {
                log::error!("Lightbox update failed: {}", e);
            }
        }
    }

    fn apply(self: &Rc<Self>, effect: Effect, event: Option<&Event>) -> Result<(), String> {
        let image_style = self.image.style();
        match effect {
            Effect::Show { src } => {
                self.image.set_src(&src);
                self.overlay
                    .class_list()
                    .remove_1(HIDDEN_CLASS)
                    .map_err(js_err)?;
                body().class_list().add_1(NO_SCROLL_CLASS).map_err(js_err)?;
            }
            Effect::Hide => {
                self.overlay.class_list().add_1(HIDDEN_CLASS).map_err(js_err)?;
                body()
                    .class_list()
                    .remove_1(NO_SCROLL_CLASS)
                    .map_err(js_err)?;
                self.image.remove_attribute("src").map_err(js_err)?;
            }
            Effect::Render(transform) => {
                set_style(&image_style, "transform", &transform.to_string())?;
            }
            Effect::Track(transform) => {
                set_style(&image_style, "transition", "none")?;
                set_style(&image_style, "transform", &transform.to_string())?;
            }
            Effect::Animate(transform) => {
                set_style(
                    &image_style,
                    "transition",
                    &format!("transform {}ms ease", TRANSITION_MS),
                )?;
                set_style(&image_style, "transform", &transform.to_string())?;
            }
            Effect::ClearStyle => {
                set_style(&image_style, "transition", "")?;
                set_style(&image_style, "transform", "")?;
            }
            Effect::Backdrop(alpha) => {
                set_style(
                    &self.overlay.style(),
                    "background-color",
                    &format!("rgba(0,0,0,{})", alpha),
                )?;
            }
            Effect::Zoomed(zoomed) => {
                self.image
                    .class_list()
                    .toggle_with_force(ZOOMED_CLASS, zoomed)
                    .map_err(js_err)?;
            }
            Effect::Schedule { token, delay_ms } => {
                let weak = Rc::downgrade(self);
                let timeout = Timeout::new(delay_ms, move || {
                    if let Some(lightbox) = weak.upgrade() {
                        let effects = lightbox.controller.borrow_mut().finish_transition(token);
                        lightbox.dispatch(effects, None);
                    }
                });
                // Replacing the handle cancels any earlier timer.
                *self.pending.borrow_mut() = Some(timeout);
            }
            Effect::CancelScheduled => {
                self.pending.borrow_mut().take();
            }
            Effect::ConsumeEvent => {
                if let Some(event) = event {
                    event.prevent_default();
                }
            }
        }
        Ok(())
    }
}

fn set_style(style: &CssStyleDeclaration, property: &str, value: &str) -> Result<(), String> {
    style.set_property(property, value).map_err(js_err)
}

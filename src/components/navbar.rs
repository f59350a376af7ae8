// src/components/navbar.rs
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::utils::window;
use web_sys::{Element, HtmlImageElement};

use crate::site_config::NavbarConfig;
use crate::utils::{by_id, current_scroll_y, query, query_all, resource_url};

const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavbarMode {
    Solid,
    Scrolled,
}

impl NavbarMode {
    /// Solid at the very top of the page or while hovered.
    pub fn for_scroll(scroll_y: f64, hovered: bool) -> Self {
        if scroll_y == 0.0 || hovered {
            NavbarMode::Solid
        } else {
            NavbarMode::Scrolled
        }
    }

    fn class(self) -> &'static str {
        match self {
            NavbarMode::Solid => "solid",
            NavbarMode::Scrolled => "scrolled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogoVariant {
    Solid,
    Default,
}

impl LogoVariant {
    pub fn pick(viewport_width: f64, mobile_breakpoint: f64, mode: NavbarMode) -> Self {
        if viewport_width <= mobile_breakpoint || mode == NavbarMode::Solid {
            LogoVariant::Solid
        } else {
            LogoVariant::Default
        }
    }
}

/// Hamburger toggle for the mobile menu. Following a link closes the menu.
pub fn mount_menu() {
    let (Some(hamburger), Some(menu)) =
        (query::<Element>(".hamburger"), query::<Element>(".nav-menu"))
    else {
        log::warn!("Mobile menu disabled: missing .hamburger or .nav-menu");
        return;
    };

    {
        let toggle_target = hamburger.clone();
        let menu = menu.clone();
        EventListener::new(&hamburger, "click", move |_| {
            let _ = toggle_target.class_list().toggle(ACTIVE_CLASS);
            let _ = menu.class_list().toggle(ACTIVE_CLASS);
        })
        .forget();
    }

    for link in query_all(".nav-link") {
        let hamburger = hamburger.clone();
        let menu = menu.clone();
        EventListener::new(&link, "click", move |_| {
            let _ = hamburger.class_list().remove_1(ACTIVE_CLASS);
            let _ = menu.class_list().remove_1(ACTIVE_CLASS);
        })
        .forget();
    }
}

struct Navbar {
    element: Element,
    logo: Option<HtmlImageElement>,
    // Kept alive so both logo files stay cached.
    logo_solid: HtmlImageElement,
    logo_default: HtmlImageElement,
    mobile_breakpoint: f64,
}

impl Navbar {
    fn set_mode(&self, mode: NavbarMode) {
        let classes = self.element.class_list();
        let other = match mode {
            NavbarMode::Solid => NavbarMode::Scrolled,
            NavbarMode::Scrolled => NavbarMode::Solid,
        };
        let _ = classes.add_1(mode.class());
        let _ = classes.remove_1(other.class());
        self.update_logo(mode);
    }

    fn update_logo(&self, mode: NavbarMode) {
        let Some(logo) = &self.logo else {
            return;
        };
        let width = window()
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::MAX);
        let source = match LogoVariant::pick(width, self.mobile_breakpoint, mode) {
            LogoVariant::Solid => &self.logo_solid,
            LogoVariant::Default => &self.logo_default,
        };
        let new_src = source.src();
        if logo.src() != new_src {
            logo.set_src(&new_src);
        }
    }

    fn refresh(&self) {
        let hovered = self.element.matches(":hover").unwrap_or(false);
        self.set_mode(NavbarMode::for_scroll(current_scroll_y(), hovered));
    }
}

fn preload(url: &str) -> Result<HtmlImageElement, String> {
    let image = HtmlImageElement::new().map_err(|e| format!("{:?}", e))?;
    image.set_src(url);
    Ok(image)
}

/// Navbar background and logo that follow the scroll position.
pub fn mount_navbar(config: &NavbarConfig, base_path: &str) {
    let Some(element) = query::<Element>(".navbar") else {
        log::warn!("Navbar effects disabled: missing .navbar");
        return;
    };
    let preloaded = preload(&resource_url(base_path, &config.logo_solid)).and_then(|solid| {
        preload(&resource_url(base_path, &config.logo_default)).map(|default| (solid, default))
    });
    let (logo_solid, logo_default) = match preloaded {
        Ok(images) => images,
        Err(e) => {
            log::error!("Could not preload logos: {}", e);
            return;
        }
    };

    // Shared by the listeners below, which live for the page. Holding the
    // preloaded logos here keeps them cached, so a swap never refetches.
    let navbar = Rc::new(Navbar {
        element: element.clone(),
        logo: by_id::<HtmlImageElement>("logo"),
        logo_solid,
        logo_default,
        mobile_breakpoint: config.mobile_breakpoint,
    });
    navbar.refresh();

    {
        let navbar = navbar.clone();
        EventListener::new(&window(), "scroll", move |_| navbar.refresh()).forget();
    }
    {
        let navbar = navbar.clone();
        EventListener::new(&element, "mouseenter", move |_| {
            navbar.set_mode(NavbarMode::Solid)
        })
        .forget();
    }
    {
        let navbar = navbar.clone();
        EventListener::new(&element, "mouseleave", move |_| {
            navbar.set_mode(NavbarMode::for_scroll(current_scroll_y(), false))
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_mode() {
        assert_eq!(NavbarMode::for_scroll(0.0, false), NavbarMode::Solid);
        assert_eq!(NavbarMode::for_scroll(250.0, true), NavbarMode::Solid);
        assert_eq!(NavbarMode::for_scroll(0.5, false), NavbarMode::Scrolled);
    }

    #[test]
    fn test_logo_variant() {
        assert_eq!(
            LogoVariant::pick(1280.0, 768.0, NavbarMode::Scrolled),
            LogoVariant::Default
        );
        assert_eq!(
            LogoVariant::pick(1280.0, 768.0, NavbarMode::Solid),
            LogoVariant::Solid
        );
        // Phones always get the solid logo.
        assert_eq!(
            LogoVariant::pick(768.0, 768.0, NavbarMode::Scrolled),
            LogoVariant::Solid
        );
    }
}

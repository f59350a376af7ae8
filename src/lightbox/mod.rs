// src/lightbox/mod.rs
//
// Browser-independent lightbox core: viewer state, gesture recognition,
// transforms and the open/close lifecycle. The DOM wiring lives in
// `components::lightbox`.

pub mod controller;
pub mod gesture;
pub mod transform;
pub mod viewer;

pub use controller::{Effect, LightboxController, TRANSITION_MS};
pub use viewer::Point;

/// Image to show for a thumbnail: its high-resolution variant when one is
/// declared, otherwise the thumbnail's own source.
pub fn resolve_image(highres: Option<String>, src: String) -> String {
    highres
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_image_prefers_highres() {
        assert_eq!(
            resolve_image(Some("img/full.jpg".to_string()), "img/thumb.jpg".to_string()),
            "img/full.jpg"
        );
    }

    #[test]
    fn test_resolve_image_falls_back_to_src() {
        assert_eq!(resolve_image(None, "img/thumb.jpg".to_string()), "img/thumb.jpg");
        assert_eq!(
            resolve_image(Some("  ".to_string()), "img/thumb.jpg".to_string()),
            "img/thumb.jpg"
        );
    }
}

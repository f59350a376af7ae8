// src/lightbox/transform.rs
use std::fmt;

use super::viewer::{Point, ViewerState};

/// A CSS transform for the lightbox image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Zoom and pan. Translation is in the image's pre-scale space so a pan
    /// moves the same on-screen distance at every zoom level.
    Viewer { scale: f64, pan: Point },
    /// Swipe feedback, independent of zoom.
    Swipe { offset: Point },
}

impl Transform {
    pub fn identity() -> Self {
        Transform::Swipe {
            offset: Point::ORIGIN,
        }
    }

    pub fn offscreen(direction: f64, distance: f64) -> Self {
        Transform::Swipe {
            offset: Point::new(0.0, direction.signum() * distance),
        }
    }
}

impl From<&ViewerState> for Transform {
    fn from(state: &ViewerState) -> Self {
        Transform::Viewer {
            scale: state.scale,
            pan: state.pan,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transform::Viewer { scale, pan } => write!(
                f,
                "scale({}) translate({}px, {}px)",
                scale,
                pan.x / scale,
                pan.y / scale
            ),
            Transform::Swipe { offset } => {
                write!(f, "translate({}px, {}px) scale(1)", offset.x, offset.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_viewer_transform() {
        let css = Transform::from(&ViewerState::default()).to_string();
        assert_eq!(css, "scale(1) translate(0px, 0px)");
    }

    #[test]
    fn test_pan_is_divided_by_scale() {
        let state = ViewerState {
            scale: 2.0,
            pan: Point::new(50.0, -30.0),
            ..ViewerState::default()
        };
        assert_eq!(
            Transform::from(&state).to_string(),
            "scale(2) translate(25px, -15px)"
        );
    }

    #[test]
    fn test_rendering_is_stable() {
        let state = ViewerState {
            scale: 3.0,
            pan: Point::new(90.0, 45.0),
            ..ViewerState::default()
        };
        let first = Transform::from(&state).to_string();
        for _ in 0..100 {
            assert_eq!(Transform::from(&state).to_string(), first);
        }
    }

    #[test]
    fn test_swipe_transforms() {
        let drag = Transform::Swipe {
            offset: Point::new(4.0, 120.0),
        };
        assert_eq!(drag.to_string(), "translate(4px, 120px) scale(1)");
        assert_eq!(
            Transform::offscreen(-42.0, 1000.0).to_string(),
            "translate(0px, -1000px) scale(1)"
        );
    }
}

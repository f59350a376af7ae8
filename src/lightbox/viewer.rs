// src/lightbox/viewer.rs
use std::ops::{Add, Sub};

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 5.0;
/// Scale reached by a zoom toggle from rest.
pub const ZOOM_STEP: f64 = 2.0;

/// A position or offset in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Zoom and pan of the enlarged image, plus the values committed at the last
/// settle point. Pinches scale relative to `last_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    pub scale: f64,
    pub pan: Point,
    pub last_scale: f64,
    pub last_pan: Point,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            pan: Point::ORIGIN,
            last_scale: MIN_SCALE,
            last_pan: Point::ORIGIN,
        }
    }
}

impl ViewerState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_at_rest(&self) -> bool {
        self.scale <= MIN_SCALE
    }

    /// Flips between rest and `ZOOM_STEP`. Returns whether the image is now zoomed.
    pub fn toggle_zoom(&mut self) -> bool {
        if self.is_at_rest() {
            self.scale = ZOOM_STEP;
            self.last_scale = ZOOM_STEP;
            true
        } else {
            self.reset();
            false
        }
    }

    /// Scales the committed scale by `ratio`, clamped to the allowed range.
    pub fn pinch(&mut self, ratio: f64) {
        if !ratio.is_finite() {
            return;
        }
        self.scale = (self.last_scale * ratio).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn pan_to(&mut self, pan: Point) {
        self.pan = pan;
    }

    pub fn commit(&mut self) {
        self.last_scale = self.scale;
        self.last_pan = self.pan;
    }

    /// Re-centres an image that is back at rest. Returns true when pan was reset.
    pub fn recenter_if_at_rest(&mut self) -> bool {
        if !self.is_at_rest() {
            return false;
        }
        self.pan = Point::ORIGIN;
        self.last_pan = Point::ORIGIN;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let state = ViewerState::default();
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.pan, Point::ORIGIN);
        assert!(state.is_at_rest());
    }

    #[test]
    fn test_pinch_clamps_extreme_ratios() {
        let mut state = ViewerState::default();
        state.pinch(1000.0);
        assert_eq!(state.scale, MAX_SCALE);
        state.pinch(0.0001);
        assert_eq!(state.scale, MIN_SCALE);
        state.pinch(f64::INFINITY);
        assert_eq!(state.scale, MIN_SCALE);
    }

    #[test]
    fn test_pinch_is_relative_to_committed_scale() {
        let mut state = ViewerState::default();
        state.pinch(2.0);
        state.commit();
        state.pinch(1.5);
        assert_eq!(state.scale, 3.0);
    }

    #[test]
    fn test_toggle_pair_restores_identity() {
        let mut state = ViewerState::default();
        assert!(state.toggle_zoom());
        state.pan_to(Point::new(40.0, -12.0));
        assert!(!state.toggle_zoom());
        assert_eq!(state, ViewerState::default());
    }

    #[test]
    fn test_recenter_only_at_rest() {
        let mut state = ViewerState::default();
        state.pinch(3.0);
        state.pan_to(Point::new(10.0, 10.0));
        assert!(!state.recenter_if_at_rest());
        assert_eq!(state.pan, Point::new(10.0, 10.0));

        state.pinch(0.1);
        assert!(state.recenter_if_at_rest());
        assert_eq!(state.pan, Point::ORIGIN);
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}

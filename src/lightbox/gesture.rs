// src/lightbox/gesture.rs
//
// Touch-sequence classification for the lightbox. The recognizer only tracks
// what kind of gesture is in progress; the controller decides what a gesture
// does to the viewer.

use super::viewer::Point;

/// Two taps closer than this are a double tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
/// Vertical swipe distance that must be exceeded to dismiss.
pub const DISMISS_DISTANCE: f64 = 100.0;
/// Vertical swipe distance over which the backdrop fades out completely.
pub const FADE_DISTANCE: f64 = 300.0;
/// Backdrop alpha while the overlay is at rest.
pub const BACKDROP_ALPHA: f64 = 0.8;

/// Backdrop alpha for a swipe that has travelled `delta_y` vertically.
pub fn backdrop_alpha(delta_y: f64) -> f64 {
    let progress = (delta_y.abs() / FADE_DISTANCE).min(1.0);
    (1.0 - progress) * BACKDROP_ALPHA
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureSession {
    #[default]
    Idle,
    PinchTracking {
        start_distance: f64,
    },
    PanTracking {
        anchor: Point,
    },
    SwipeTracking {
        origin: Point,
        current_delta: Point,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TapTimer {
    last_tap: Option<f64>,
}

impl TapTimer {
    /// Records a tap at `now` (ms). Returns true if it completes a double tap,
    /// in which case the timer is cleared so a third tap starts over.
    pub fn register(&mut self, now: f64) -> bool {
        match self.last_tap {
            Some(last) if now - last < DOUBLE_TAP_WINDOW_MS => {
                self.last_tap = None;
                true
            }
            _ => {
                self.last_tap = Some(now);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.last_tap = None;
    }
}

/// What a touch event amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Nothing for the viewer to do.
    Ignored,
    /// A session started that wants the browser default suppressed.
    Captured,
    DoubleTap,
    /// Ratio of the current finger distance to the distance at pinch start.
    Pinch { ratio: f64 },
    Pan { pan: Point },
    Swipe { delta: Point },
}

#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    session: GestureSession,
    taps: TapTimer,
}

impl Recognizer {
    pub fn session(&self) -> GestureSession {
        self.session
    }

    pub fn reset(&mut self) {
        self.session = GestureSession::Idle;
        self.taps.clear();
    }

    /// Classifies a new touch sequence. `at_rest` is whether the viewer is at
    /// scale 1; `pan` is the current pan offset.
    pub fn start(&mut self, points: &[Point], now: f64, at_rest: bool, pan: Point) -> Gesture {
        match points {
            [] => {
                self.session = GestureSession::Idle;
                Gesture::Ignored
            }
            [a, b, ..] => {
                self.session = GestureSession::PinchTracking {
                    start_distance: a.distance_to(*b),
                };
                Gesture::Captured
            }
            [touch] => {
                if self.taps.register(now) {
                    self.session = GestureSession::Idle;
                    return Gesture::DoubleTap;
                }
                self.session = if at_rest {
                    GestureSession::SwipeTracking {
                        origin: *touch,
                        current_delta: Point::ORIGIN,
                    }
                } else {
                    GestureSession::PanTracking {
                        anchor: *touch - pan,
                    }
                };
                Gesture::Ignored
            }
        }
    }

    pub fn moved(&mut self, points: &[Point]) -> Gesture {
        match (points, self.session) {
            ([a, b, ..], GestureSession::PinchTracking { start_distance }) => {
                if start_distance <= 0.0 {
                    return Gesture::Captured;
                }
                Gesture::Pinch {
                    ratio: a.distance_to(*b) / start_distance,
                }
            }
            // A second finger we never saw start; pinch from here.
            ([a, b, ..], _) => {
                self.session = GestureSession::PinchTracking {
                    start_distance: a.distance_to(*b),
                };
                Gesture::Captured
            }
            ([touch], GestureSession::PanTracking { anchor }) => Gesture::Pan {
                pan: *touch - anchor,
            },
            ([touch], GestureSession::SwipeTracking { origin, .. }) => {
                let delta = *touch - origin;
                self.session = GestureSession::SwipeTracking {
                    origin,
                    current_delta: delta,
                };
                Gesture::Swipe { delta }
            }
            _ => Gesture::Ignored,
        }
    }

    /// Handles lifted fingers. Returns the final swipe delta if a swipe ended.
    pub fn end(&mut self, remaining: usize) -> Option<Point> {
        match self.session {
            GestureSession::SwipeTracking { current_delta, .. } => {
                self.session = GestureSession::Idle;
                Some(current_delta)
            }
            GestureSession::PinchTracking { .. } if remaining < 2 => {
                self.session = GestureSession::Idle;
                None
            }
            _ => {
                if remaining == 0 {
                    self.session = GestureSession::Idle;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_tap_timer_window() {
        let mut taps = TapTimer::default();
        assert!(!taps.register(1_000.0));
        assert!(taps.register(1_299.0));

        let mut taps = TapTimer::default();
        assert!(!taps.register(1_000.0));
        assert!(!taps.register(1_301.0));
        // The late tap becomes the new reference.
        assert!(taps.register(1_400.0));
    }

    #[test]
    fn test_tap_timer_is_consumed() {
        let mut taps = TapTimer::default();
        taps.register(0.0);
        assert!(taps.register(100.0));
        assert!(!taps.register(200.0));
    }

    #[test]
    fn test_single_touch_at_rest_starts_swipe() {
        let mut rec = Recognizer::default();
        rec.start(&[p(10.0, 20.0)], 0.0, true, Point::ORIGIN);
        assert_eq!(
            rec.session(),
            GestureSession::SwipeTracking {
                origin: p(10.0, 20.0),
                current_delta: Point::ORIGIN
            }
        );
    }

    #[test]
    fn test_single_touch_zoomed_starts_pan_with_anchor() {
        let mut rec = Recognizer::default();
        rec.start(&[p(100.0, 100.0)], 0.0, false, p(30.0, -10.0));
        assert_eq!(
            rec.session(),
            GestureSession::PanTracking {
                anchor: p(70.0, 110.0)
            }
        );
        assert_eq!(
            rec.moved(&[p(120.0, 90.0)]),
            Gesture::Pan { pan: p(50.0, -20.0) }
        );
    }

    #[test]
    fn test_two_points_take_precedence() {
        let mut rec = Recognizer::default();
        let gesture = rec.start(&[p(0.0, 0.0), p(0.0, 100.0)], 0.0, true, Point::ORIGIN);
        assert_eq!(gesture, Gesture::Captured);
        assert_eq!(
            rec.session(),
            GestureSession::PinchTracking {
                start_distance: 100.0
            }
        );
        assert_eq!(
            rec.moved(&[p(0.0, 0.0), p(0.0, 250.0)]),
            Gesture::Pinch { ratio: 2.5 }
        );
    }

    #[test]
    fn test_zero_distance_pinch_is_inert() {
        let mut rec = Recognizer::default();
        rec.start(&[p(5.0, 5.0), p(5.0, 5.0)], 0.0, true, Point::ORIGIN);
        assert_eq!(rec.moved(&[p(0.0, 0.0), p(50.0, 0.0)]), Gesture::Captured);
    }

    #[test]
    fn test_unannounced_second_finger_starts_pinch() {
        let mut rec = Recognizer::default();
        rec.start(&[p(0.0, 0.0)], 0.0, true, Point::ORIGIN);
        assert_eq!(rec.moved(&[p(0.0, 0.0), p(30.0, 40.0)]), Gesture::Captured);
        assert_eq!(
            rec.session(),
            GestureSession::PinchTracking {
                start_distance: 50.0
            }
        );
    }

    #[test]
    fn test_swipe_tracks_delta_and_reports_on_end() {
        let mut rec = Recognizer::default();
        rec.start(&[p(50.0, 50.0)], 0.0, true, Point::ORIGIN);
        rec.moved(&[p(55.0, 170.0)]);
        assert_eq!(rec.end(0), Some(p(5.0, 120.0)));
        assert_eq!(rec.session(), GestureSession::Idle);
    }

    #[test]
    fn test_pinch_ends_when_one_finger_lifts() {
        let mut rec = Recognizer::default();
        rec.start(&[p(0.0, 0.0), p(10.0, 0.0)], 0.0, true, Point::ORIGIN);
        assert_eq!(rec.end(1), None);
        assert_eq!(rec.session(), GestureSession::Idle);
        assert_eq!(rec.moved(&[p(3.0, 3.0)]), Gesture::Ignored);
    }

    #[test]
    fn test_backdrop_alpha_fades_and_caps() {
        assert_eq!(backdrop_alpha(0.0), BACKDROP_ALPHA);
        assert!((backdrop_alpha(150.0) - 0.4).abs() < 1e-9);
        assert_eq!(backdrop_alpha(-300.0), 0.0);
        assert_eq!(backdrop_alpha(900.0), 0.0);

        let mut previous = backdrop_alpha(0.0);
        for step in 1..=300 {
            let alpha = backdrop_alpha(step as f64);
            assert!(alpha <= previous);
            assert!((0.0..=BACKDROP_ALPHA).contains(&alpha));
            previous = alpha;
        }
    }
}

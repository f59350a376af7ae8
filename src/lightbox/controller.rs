// src/lightbox/controller.rs
use super::gesture::{
    backdrop_alpha, Gesture, GestureSession, Recognizer, BACKDROP_ALPHA, DISMISS_DISTANCE,
};
use super::transform::Transform;
use super::viewer::{Point, ViewerState};

/// Duration of the dismiss and snap-back animations.
pub const TRANSITION_MS: u32 = 300;
/// How far the image travels when swiped away.
pub const OFFSCREEN_DISTANCE: f64 = 1000.0;

/// A change the DOM binding has to make. Effects are applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Unhide the overlay, lock page scrolling and load `src`.
    Show { src: String },
    /// Hide the overlay, release the scroll lock and unload the image.
    Hide,
    /// Set the image transform, leaving any running transition alone.
    Render(Transform),
    /// Set the image transform with transitions disabled.
    Track(Transform),
    /// Animate the image to a transform over `TRANSITION_MS`.
    Animate(Transform),
    /// Drop inline transition and transform styles.
    ClearStyle,
    Backdrop(f64),
    Zoomed(bool),
    /// Call `finish_transition(token)` after `delay_ms`.
    Schedule { token: u64, delay_ms: u32 },
    /// Drop any scheduled callback.
    CancelScheduled,
    /// Prevent the browser default for the current event.
    ConsumeEvent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Dismiss { token: u64 },
    SnapBack { token: u64 },
}

impl Transition {
    fn token(self) -> u64 {
        match self {
            Transition::Dismiss { token } | Transition::SnapBack { token } => token,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    pub open: bool,
    pub image: Option<String>,
}

/// Owns everything the lightbox remembers between events. Every handler takes
/// the input of one browser event and returns the effects to apply.
#[derive(Debug, Clone)]
pub struct LightboxController {
    overlay: OverlayState,
    viewer: ViewerState,
    recognizer: Recognizer,
    transition: Option<Transition>,
    next_token: u64,
    touch_capable: bool,
}

impl LightboxController {
    pub fn new(touch_capable: bool) -> Self {
        Self {
            overlay: OverlayState::default(),
            viewer: ViewerState::default(),
            recognizer: Recognizer::default(),
            transition: None,
            next_token: 0,
            touch_capable,
        }
    }

    pub fn is_open(&self) -> bool {
        self.overlay.open
    }

    #[cfg(test)]
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    #[cfg(test)]
    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    #[cfg(test)]
    pub fn session(&self) -> GestureSession {
        self.recognizer.session()
    }

    #[cfg(test)]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    // ------ LIFECYCLE ------

    pub fn open(&mut self, image: impl Into<String>) -> Vec<Effect> {
        let src = image.into();
        let mut effects = self.cancel_transition();
        self.overlay = OverlayState {
            open: true,
            image: Some(src.clone()),
        };
        effects.push(Effect::Show { src });
        effects.extend(self.reset_viewer());
        effects
    }

    pub fn close(&mut self) -> Vec<Effect> {
        if !self.overlay.open {
            return Vec::new();
        }
        let mut effects = self.cancel_transition();
        self.overlay = OverlayState::default();
        effects.push(Effect::Hide);
        effects.extend(self.reset_viewer());
        effects
    }

    pub fn key_down(&mut self, key: &str) -> Vec<Effect> {
        if key == "Escape" && self.overlay.open {
            self.close()
        } else {
            Vec::new()
        }
    }

    /// Clicks that reach the overlay element. Only clicks on the backdrop
    /// itself close; content clicks never get here.
    pub fn backdrop_click(&mut self, on_backdrop: bool) -> Vec<Effect> {
        if on_backdrop {
            self.close()
        } else {
            Vec::new()
        }
    }

    /// Mouse click on the image. Touch devices zoom with a double tap instead.
    pub fn image_click(&mut self) -> Vec<Effect> {
        if self.touch_capable || !self.overlay.open {
            return Vec::new();
        }
        self.toggle_zoom()
    }

    pub fn toggle_zoom(&mut self) -> Vec<Effect> {
        let zoomed = self.viewer.toggle_zoom();
        vec![Effect::Zoomed(zoomed), self.render()]
    }

    // ------ TOUCH ------

    pub fn touch_start(&mut self, points: &[Point], now: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.transition {
            Some(Transition::Dismiss { .. }) => return vec![Effect::ConsumeEvent],
            Some(Transition::SnapBack { .. }) => {
                effects.extend(self.cancel_transition());
                effects.push(self.render());
            }
            None => {}
        }

        // A new finger lands mid-swipe; the swipe is abandoned.
        if self.is_swiping() {
            effects.extend(restore_style());
        }
        let gesture = self
            .recognizer
            .start(points, now, self.viewer.is_at_rest(), self.viewer.pan);
        match gesture {
            Gesture::Captured => effects.push(Effect::ConsumeEvent),
            Gesture::DoubleTap => {
                effects.push(Effect::ConsumeEvent);
                effects.extend(self.toggle_zoom());
            }
            _ => {}
        }
        effects
    }

    pub fn touch_move(&mut self, points: &[Point]) -> Vec<Effect> {
        if matches!(self.transition, Some(Transition::Dismiss { .. })) {
            return vec![Effect::ConsumeEvent];
        }
        let was_swiping = self.is_swiping();
        match self.recognizer.moved(points) {
            Gesture::Captured if was_swiping => {
                let mut effects = vec![Effect::ConsumeEvent];
                effects.extend(restore_style());
                effects
            }
            Gesture::Captured => vec![Effect::ConsumeEvent],
            Gesture::Pinch { ratio } => {
                self.viewer.pinch(ratio);
                vec![Effect::ConsumeEvent, self.render()]
            }
            Gesture::Pan { pan } if !self.viewer.is_at_rest() => {
                self.viewer.pan_to(pan);
                vec![Effect::ConsumeEvent, self.render()]
            }
            Gesture::Swipe { delta } => vec![
                Effect::ConsumeEvent,
                Effect::Track(Transform::Swipe { offset: delta }),
                Effect::Backdrop(backdrop_alpha(delta.y)),
            ],
            _ => Vec::new(),
        }
    }

    /// `remaining` is the number of fingers still on the surface.
    pub fn touch_end(&mut self, remaining: usize) -> Vec<Effect> {
        if matches!(self.transition, Some(Transition::Dismiss { .. })) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let Some(delta) = self.recognizer.end(remaining) {
            let token = self.issue_token();
            if delta.y.abs() > DISMISS_DISTANCE {
                log::debug!("Swipe of {:.0}px dismisses lightbox", delta.y);
                self.transition = Some(Transition::Dismiss { token });
                effects.push(Effect::Animate(Transform::offscreen(
                    delta.y,
                    OFFSCREEN_DISTANCE,
                )));
                effects.push(Effect::Backdrop(0.0));
            } else {
                self.transition = Some(Transition::SnapBack { token });
                effects.push(Effect::Animate(Transform::identity()));
                effects.push(Effect::Backdrop(BACKDROP_ALPHA));
            }
            effects.push(Effect::Schedule {
                token,
                delay_ms: TRANSITION_MS,
            });
        }

        if remaining < 2 {
            self.viewer.commit();
            let dismissing = matches!(self.transition, Some(Transition::Dismiss { .. }));
            if !dismissing && self.viewer.recenter_if_at_rest() {
                effects.push(self.render());
            }
        }
        effects
    }

    /// Completes the transition identified by `token`. Stale tokens are ignored.
    pub fn finish_transition(&mut self, token: u64) -> Vec<Effect> {
        match self.transition {
            Some(transition) if transition.token() == token => {
                self.transition = None;
                match transition {
                    Transition::Dismiss { .. } => self.close(),
                    Transition::SnapBack { .. } => vec![Effect::ClearStyle, self.render()],
                }
            }
            _ => Vec::new(),
        }
    }

    // ------ HELPERS ------

    fn render(&self) -> Effect {
        Effect::Render(Transform::from(&self.viewer))
    }

    /// Also drops whatever a swipe left on the image and backdrop.
    fn reset_viewer(&mut self) -> Vec<Effect> {
        self.viewer.reset();
        self.recognizer.reset();
        let mut effects = restore_style().to_vec();
        effects.push(Effect::Zoomed(false));
        effects.push(self.render());
        effects
    }

    fn is_swiping(&self) -> bool {
        matches!(
            self.recognizer.session(),
            GestureSession::SwipeTracking { .. }
        )
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn cancel_transition(&mut self) -> Vec<Effect> {
        match self.transition.take() {
            Some(_) => {
                let mut effects = vec![Effect::CancelScheduled];
                effects.extend(restore_style());
                effects
            }
            None => Vec::new(),
        }
    }
}

fn restore_style() -> [Effect; 2] {
    [Effect::ClearStyle, Effect::Backdrop(BACKDROP_ALPHA)]
}

use std::time::Duration;

use glam::DVec2;

use super::{Host, RevealElement, SlideWrapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Single-pointer touch event in wrapper-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub pos: DVec2,
    /// Event timestamp, on the same timeline as the wrapper clock.
    pub time: Duration,
}

/// Which part of the hierarchy receives the events of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TouchTarget {
    Child,
    Wrapper,
}

/// Tap, long press and drag disambiguation state.
#[derive(Debug, Default)]
pub(super) struct Classifier {
    /// State of the current touch sequence.
    pub session: Option<GestureSession>,
    /// Taps and long presses are not delivered while the wrapper is open.
    pub suppress_while_open: bool,
    pub long_press_pending: bool,
}

#[derive(Debug)]
pub(super) struct GestureSession {
    pub down_pos: DVec2,
    pub down_time: Duration,
    /// Horizontal position the next drag delta is measured from.
    pub last_x: f64,
    /// Whether the direction of the gesture has been looked at.
    pub decided: bool,
    pub was_open_at_down: bool,
    /// Set once the gesture is classified as a horizontal drag.
    pub suppress: bool,
    /// Whether any drag delta changed the reveal.
    pub dragged: bool,
    /// Release already turned into a close.
    pub closing: bool,
    pub target: Option<TouchTarget>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, pos: DVec2, time: Duration) -> Self {
        Self { phase, pos, time }
    }

    pub fn down(x: f64, y: f64, time: Duration) -> Self {
        Self::new(TouchPhase::Down, DVec2::new(x, y), time)
    }

    pub fn motion(x: f64, y: f64, time: Duration) -> Self {
        Self::new(TouchPhase::Move, DVec2::new(x, y), time)
    }

    pub fn up(x: f64, y: f64, time: Duration) -> Self {
        Self::new(TouchPhase::Up, DVec2::new(x, y), time)
    }

    pub fn cancel(x: f64, y: f64, time: Duration) -> Self {
        Self::new(TouchPhase::Cancel, DVec2::new(x, y), time)
    }

    fn with_phase(self, phase: TouchPhase) -> Self {
        Self { phase, ..self }
    }
}

impl GestureSession {
    fn new(event: &TouchEvent) -> Self {
        Self {
            down_pos: event.pos,
            down_time: event.time,
            last_x: event.pos.x,
            decided: false,
            was_open_at_down: false,
            suppress: false,
            dragged: false,
            closing: false,
            target: None,
        }
    }
}

impl<E: RevealElement, H: Host> SlideWrapper<E, H> {
    /// Runs the pre-pass over every event that reaches the wrapper.
    ///
    /// This classifies the gesture, manages the long-press timer and resolves the reveal
    /// distance on first use.
    pub fn dispatch_touch(&mut self, event: &TouchEvent) {
        let _span = tracy_client::span!("SlideWrapper::dispatch_touch");

        match event.phase {
            TouchPhase::Down => {
                self.interrupt_snap();
                self.gesture.session = Some(GestureSession::new(event));

                if !self.gesture.suppress_while_open {
                    self.host.schedule_long_press(self.options.gestures.long_press_timeout);
                    self.gesture.long_press_pending = true;
                }
            }
            TouchPhase::Move => {
                let Some(session) = &mut self.gesture.session else {
                    trace!("ignoring motion without a touch down");
                    return;
                };

                let gestures = &self.options.gestures;
                let delta = (event.pos - session.down_pos).abs();

                let past_slop = delta.x > gestures.touch_slop && delta.y > gestures.touch_slop;
                if past_slop && self.gesture.long_press_pending {
                    self.gesture.long_press_pending = false;
                    self.host.cancel_long_press();
                }

                if !session.decided {
                    let dx = (event.pos.x as i32 - session.down_pos.x as i32).abs();
                    let dy = (event.pos.y as i32 - session.down_pos.y as i32).abs();

                    if dx > 0 && dy > 0 {
                        session.decided = true;

                        let ratio = f64::from(dx) / f64::from(dy);
                        trace!("gesture direction decided, ratio {ratio:.2}");

                        if ratio > gestures.horizontal_ratio {
                            session.suppress = true;
                            if self.gesture.long_press_pending {
                                self.gesture.long_press_pending = false;
                                self.host.cancel_long_press();
                            }
                            self.host.request_disallow_intercept(true);
                        }
                    }
                }
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                if self.gesture.long_press_pending {
                    self.gesture.long_press_pending = false;
                    self.host.cancel_long_press();
                }
                self.host.request_disallow_intercept(false);

                let was_open = self
                    .gesture
                    .session
                    .as_ref()
                    .is_some_and(|session| session.was_open_at_down);
                if was_open && self.options.close_on_click {
                    self.close();
                    if let Some(session) = &mut self.gesture.session {
                        session.closing = true;
                    }
                }
            }
        }

        self.ensure_scrollable();
    }

    /// Decides whether the wrapper takes the gesture away from its children.
    ///
    /// While open, nothing is intercepted so that the controls receive input. While closed, any
    /// motion is claimed.
    pub fn intercept_touch(&mut self, event: &TouchEvent) -> bool {
        let is_open = self.is_open();
        let Some(session) = &mut self.gesture.session else {
            return false;
        };

        if is_open {
            session.was_open_at_down = true;
            return false;
        }

        match event.phase {
            TouchPhase::Down => {
                session.last_x = event.pos.x;
                false
            }
            TouchPhase::Move => {
                session.last_x = event.pos.x;
                true
            }
            TouchPhase::Up | TouchPhase::Cancel => false,
        }
    }

    /// Handles an event the wrapper itself is the target of.
    ///
    /// Returns whether the event was consumed.
    pub fn touch(&mut self, event: &TouchEvent) -> bool {
        let _span = tracy_client::span!("SlideWrapper::touch");

        let Some(session) = &mut self.gesture.session else {
            debug!("ignoring {:?} without a touch down", event.phase);
            return false;
        };

        match event.phase {
            TouchPhase::Down => {
                session.down_time = event.time;
                true
            }
            TouchPhase::Move => {
                let delta = (event.pos.x - session.last_x).round() as i32;
                session.last_x = event.pos.x;

                if self.snap.is_some() {
                    trace!("ignoring drag while snapping");
                    return true;
                }

                if self.apply_delta(delta) {
                    if let Some(session) = &mut self.gesture.session {
                        session.dragged = true;
                    }
                }
                true
            }
            TouchPhase::Up => {
                let gestures = &self.options.gestures;
                let elapsed = event.time.saturating_sub(session.down_time);
                let delta = (event.pos - session.down_pos).abs();

                let is_tap = elapsed <= gestures.tap_timeout
                    && delta.x < gestures.touch_slop
                    && delta.y < gestures.touch_slop
                    && !session.suppress
                    && !self.gesture.suppress_while_open;
                if is_tap {
                    trace!("tap");
                    self.host.perform_click();

                    // A tap may still have nudged the content.
                    if self.reveal == 0. {
                        return true;
                    }
                }

                if !session.closing {
                    self.release();
                }
                true
            }
            TouchPhase::Cancel => {
                if !session.closing {
                    self.release();
                }
                true
            }
        }
    }

    /// Routes an event through the pre-pass, the interception policy and the touch handler,
    /// keeping track of whether a child or the wrapper receives the gesture.
    ///
    /// Returns whether the event was consumed.
    pub fn process_touch(&mut self, event: &TouchEvent) -> bool {
        self.dispatch_touch(event);

        let handled = if event.phase == TouchPhase::Down {
            if !self.intercept_touch(event) && self.host.deliver_to_child(event) {
                self.set_touch_target(TouchTarget::Child);
                true
            } else {
                self.set_touch_target(TouchTarget::Wrapper);
                self.touch(event)
            }
        } else {
            let target = self
                .gesture
                .session
                .as_ref()
                .and_then(|session| session.target);

            match target {
                Some(TouchTarget::Child) => {
                    if self.intercept_touch(event) {
                        trace!("taking the gesture away from the child");
                        self.host.deliver_to_child(&event.with_phase(TouchPhase::Cancel));
                        self.set_touch_target(TouchTarget::Wrapper);
                        true
                    } else {
                        self.host.deliver_to_child(event)
                    }
                }
                Some(TouchTarget::Wrapper) => self.touch(event),
                None => false,
            }
        };

        if matches!(event.phase, TouchPhase::Up | TouchPhase::Cancel) {
            self.gesture.session = None;
        }

        handled
    }

    /// Called by the host when the timer from [`Host::schedule_long_press`] fires.
    pub fn on_long_press_timeout(&mut self) {
        if !self.gesture.long_press_pending {
            return;
        }

        self.gesture.long_press_pending = false;
        trace!("long press");
        self.host.perform_long_click();
    }

    fn set_touch_target(&mut self, target: TouchTarget) {
        if let Some(session) = &mut self.gesture.session {
            session.target = Some(target);
        }
    }
}

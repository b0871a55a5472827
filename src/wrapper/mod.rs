//! Swipe-to-reveal controller.
//!
//! A [`SlideWrapper`] wraps one content element and a row of control elements hidden behind it.
//! Dragging the content to the left reveals the controls, either by sliding the whole block
//! (dynamic mode) or by sliding the content over controls fixed in place (static mode). On
//! release the wrapper snaps flush open or back closed and reports the outcome through a
//! [`Callback`].
//!
//! Internally the state is a single reveal distance in `[0, scrollable]`, where `scrollable` is
//! the total width of the controls. [`Position`] turns it into a scroll or a translation for the
//! host.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use slidewrap_config::{Config, Mode};

use crate::animation::Clock;

mod geometry;
mod gesture;
mod notify;
mod offset;
mod snap;


pub use geometry::{Placement, Rectangle, Size};
pub use gesture::{TouchEvent, TouchPhase};
pub use notify::{Callback, Event};
pub use offset::Position;
pub use snap::{decide_release, Settle};

/// Element owned by the host that the wrapper measures and toggles.
pub trait RevealElement {
    /// Intrinsic size of the element.
    fn measured_size(&self) -> Size;

    /// Sets whether the element accepts input.
    fn set_enabled(&mut self, enabled: bool);
}

/// Services the surrounding layout system provides to the wrapper.
pub trait Host {
    /// Schedules [`SlideWrapper::on_long_press_timeout`] to run after `delay`.
    fn schedule_long_press(&mut self, delay: Duration);
    fn cancel_long_press(&mut self);

    fn perform_click(&mut self);
    fn perform_long_click(&mut self);

    /// Asks the parent container to stop or resume intercepting the current gesture.
    fn request_disallow_intercept(&mut self, disallow: bool);

    /// Asks for [`SlideWrapper::advance_animations`] to be called on the next frame.
    fn request_frame(&mut self);

    /// Delivers an event to the child under the pointer. Returns whether the child consumed it.
    fn deliver_to_child(&mut self, event: &TouchEvent) -> bool;
}

/// Supplies control elements at runtime instead of passing them at construction.
pub trait ElementProvider<E> {
    fn controls(&mut self) -> Vec<E>;

    /// Width of each control, in density-independent units.
    fn widths_dp(&self) -> Vec<i32>;
}

static NEXT_WRAPPER_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique identifier of a wrapper, passed to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WrapperId(u32);

impl WrapperId {
    fn next() -> WrapperId {
        WrapperId(NEXT_WRAPPER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub mode: Mode,
    pub close_on_click: bool,
    /// Pixels per density-independent unit.
    pub scale: f64,
    pub animation: slidewrap_config::Animation,
    pub gestures: GestureOptions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOptions {
    pub tap_timeout: Duration,
    pub long_press_timeout: Duration,
    /// Maximum movement along each axis for a tap.
    pub touch_slop: f64,
    /// Minimum `|dx| / |dy|` for a gesture to count as a horizontal drag.
    pub horizontal_ratio: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let gestures = &config.gestures;
        Self {
            mode: config.mode,
            close_on_click: config.close_on_click,
            scale: config.scale.0,
            animation: config.animation,
            gestures: GestureOptions {
                tap_timeout: Duration::from_millis(u64::from(gestures.tap_timeout_ms)),
                long_press_timeout: Duration::from_millis(u64::from(
                    gestures.long_press_timeout_ms,
                )),
                touch_slop: gestures.touch_slop.0,
                horizontal_ratio: gestures.horizontal_ratio.0,
            },
        }
    }
}

pub struct SlideWrapper<E, H> {
    id: WrapperId,
    content: E,
    controls: Vec<E>,
    provider: Option<Box<dyn ElementProvider<E>>>,
    host: H,
    callback: Option<Box<dyn Callback>>,
    clock: Clock,
    options: Options,
    /// Cached reveal distance, `None` until the first touch.
    scrollable: Option<i32>,
    /// How far the controls are revealed.
    reveal: f64,
    /// Whether the last completed snap left the wrapper open.
    rest_open: bool,
    snap: Option<snap::Snap>,
    gesture: gesture::Classifier,
    /// Last enablement pushed to static controls.
    controls_enabled: bool,
}

impl<E: RevealElement, H: Host> SlideWrapper<E, H> {
    pub fn new(config: &Config, clock: Clock, host: H, content: E, controls: Vec<E>) -> Self {
        Self::with_options(Options::from_config(config), clock, host, content, controls)
    }

    pub fn with_options(
        options: Options,
        clock: Clock,
        host: H,
        content: E,
        controls: Vec<E>,
    ) -> Self {
        let mut wrapper = Self {
            id: WrapperId::next(),
            content,
            controls,
            provider: None,
            host,
            callback: None,
            clock,
            options,
            scrollable: None,
            reveal: 0.,
            rest_open: false,
            snap: None,
            gesture: gesture::Classifier::default(),
            controls_enabled: true,
        };

        // Closed static controls sit under the content and must not take its clicks.
        wrapper.enable_controls(false);
        wrapper
    }

    pub fn set_callback(&mut self, callback: impl Callback + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Replaces the control elements with the ones from `provider`.
    ///
    /// The provider widths take precedence over measured widths from now on.
    pub fn set_element_provider(&mut self, provider: impl ElementProvider<E> + 'static) {
        let mut provider = Box::new(provider);
        self.controls = provider.controls();
        self.provider = Some(provider);
        self.sync_controls();
        self.invalidate_scrollable();
    }

    pub fn set_scale(&mut self, scale: f64) {
        if self.options.scale == scale {
            return;
        }

        self.options.scale = scale;
        self.invalidate_scrollable();
    }

    /// Drops the cached reveal distance so that it is computed again on the next touch.
    ///
    /// Call this after the controls change size.
    pub fn invalidate_scrollable(&mut self) {
        self.scrollable = None;
    }

    /// Cached reveal distance, `None` if not computed yet.
    pub fn scrollable(&self) -> Option<i32> {
        self.scrollable
    }

    /// Applies a reloaded configuration.
    ///
    /// Switching mode resets the wrapper to closed without any notification.
    pub fn update_config(&mut self, config: &Config) {
        let options = Options::from_config(config);
        if options == self.options {
            return;
        }

        let mode_changed = options.mode != self.options.mode;
        let scale_changed = options.scale != self.options.scale;
        self.options = options;

        if mode_changed {
            debug!("wrapper {:?} switched to {:?} mode", self.id, options.mode);
            self.snap = None;
            self.reveal = 0.;
            self.rest_open = false;
            self.gesture.suppress_while_open = false;
            self.controls_enabled = false;
            self.sync_controls();
        }

        if scale_changed {
            self.invalidate_scrollable();
        }
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        if let Some(scrollable) = self.scrollable {
            assert!(scrollable >= 0);
            assert!(
                (0. ..=f64::from(scrollable)).contains(&self.reveal),
                "reveal {} must be within [0, {scrollable}]",
                self.reveal
            );
        }

        assert_eq!(
            self.controls_enabled, self.rest_open,
            "controls must be enabled exactly while open"
        );
        assert_eq!(
            self.gesture.suppress_while_open, self.rest_open,
            "taps must be suppressed exactly while open"
        );

        if let Some(snap) = &self.snap {
            assert_ne!(snap.settle, Settle::NoOp);
        }
    }
}

impl<E, H> SlideWrapper<E, H> {
    pub fn id(&self) -> WrapperId {
        self.id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn content(&self) -> &E {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut E {
        &mut self.content
    }

    pub fn controls(&self) -> &[E] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [E] {
        &mut self.controls
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

use slidewrap_config::Mode;

use super::snap::Settle;
use super::{RevealElement, SlideWrapper, WrapperId};

/// Lifecycle event reported once a snap completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CompletelyOpen,
    CompleteClosed,
    PullBack,
}

/// Receives lifecycle events of a wrapper.
pub trait Callback {
    /// The controls became fully revealed.
    fn on_completely_open(&mut self, _id: WrapperId) {}

    /// The wrapper went from open to closed.
    fn on_complete_closed(&mut self, _id: WrapperId) {}

    /// A partial drag was released and snapped back closed.
    fn on_pull_back(&mut self, _id: WrapperId) {}
}

impl Settle {
    pub fn event(self) -> Option<Event> {
        match self {
            Settle::Opened => Some(Event::CompletelyOpen),
            Settle::ClosedViaPullback => Some(Event::PullBack),
            Settle::ClosedViaExplicitClose => Some(Event::CompleteClosed),
            Settle::NoOp => None,
        }
    }
}

impl<E: RevealElement, H> SlideWrapper<E, H> {
    pub(super) fn notify(&mut self, event: Event) {
        // Wrapper state goes first so that callbacks observe it updated.
        match event {
            Event::CompletelyOpen => {
                self.gesture.suppress_while_open = true;
                self.enable_controls(true);
            }
            Event::CompleteClosed => {
                self.gesture.suppress_while_open = false;
                self.enable_controls(false);
            }
            Event::PullBack => {
                self.gesture.suppress_while_open = false;
            }
        }

        let Some(callback) = &mut self.callback else {
            return;
        };

        match event {
            Event::CompletelyOpen => callback.on_completely_open(self.id),
            Event::CompleteClosed => callback.on_complete_closed(self.id),
            Event::PullBack => callback.on_pull_back(self.id),
        }
    }

    /// Changes whether the controls accept input. Only static mode controls are touched, since
    /// they sit under the content while closed.
    pub(super) fn enable_controls(&mut self, enable: bool) {
        if self.controls_enabled == enable {
            return;
        }

        self.controls_enabled = enable;
        if self.options.mode == Mode::Static {
            for control in &mut self.controls {
                control.set_enabled(enable);
            }
        }
    }

    /// Pushes the current enablement to every control element.
    pub(super) fn sync_controls(&mut self) {
        let enable = self.controls_enabled();
        for control in &mut self.controls {
            control.set_enabled(enable);
        }
    }

    /// Whether the controls currently accept input.
    ///
    /// Always true in dynamic mode, where the controls are only reachable once scrolled into view.
    pub fn controls_enabled(&self) -> bool {
        self.options.mode == Mode::Dynamic || self.controls_enabled
    }
}

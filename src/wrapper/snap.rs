use super::{Host, RevealElement, SlideWrapper};
use crate::animation::{Animation, Progress};

/// How a snap settles the wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Flush open.
    Opened,
    /// Back to closed after a drag that did not go far enough.
    ClosedViaPullback,
    /// Closed from the open state, by [`SlideWrapper::close`] or by a release.
    ClosedViaExplicitClose,
    /// Nothing to do.
    NoOp,
}

/// Snap animation in progress.
#[derive(Debug)]
pub(super) struct Snap {
    pub anim: Animation,
    pub settle: Settle,
}

impl Settle {
    /// Reveal this settle ends at.
    pub fn target(self, scrollable: i32) -> i32 {
        match self {
            Settle::Opened => scrollable,
            _ => 0,
        }
    }
}

/// Decides how a release at `offset` settles.
///
/// Past a third of the reveal distance the wrapper opens, otherwise it closes. A wrapper that
/// was at rest open closes as an explicit close. An untouched closed wrapper and a wrapper
/// that is already flush open stay as they are.
pub fn decide_release(offset: i32, scrollable: i32, rest_open: bool, dragged: bool) -> Settle {
    if scrollable <= 0 {
        return Settle::NoOp;
    }

    if offset > 0 && offset >= scrollable / 3 {
        if rest_open && offset >= scrollable {
            Settle::NoOp
        } else {
            Settle::Opened
        }
    } else if rest_open {
        Settle::ClosedViaExplicitClose
    } else if offset == 0 && !dragged {
        Settle::NoOp
    } else {
        Settle::ClosedViaPullback
    }
}

impl<E: RevealElement, H: Host> SlideWrapper<E, H> {
    pub(super) fn release(&mut self) {
        let scrollable = self.ensure_scrollable();
        let offset = self.reveal.round() as i32;
        // A sub-pixel reveal left by an interrupted snap still has to go home.
        let dragged = self.reveal != 0.
            || self
                .gesture
                .session
                .as_ref()
                .is_some_and(|session| session.dragged);

        let settle = decide_release(offset, scrollable, self.rest_open, dragged);
        debug!("released at {offset} of {scrollable}: {settle:?}");
        self.start_snap(settle);
    }

    pub(super) fn start_snap(&mut self, settle: Settle) {
        if settle == Settle::NoOp {
            return;
        }

        let target = f64::from(settle.target(self.peek_scrollable()));
        if self.reveal == target {
            self.settle(settle);
            return;
        }

        let anim = Animation::new(self.clock.clone(), self.reveal, target, self.options.animation);
        if anim.is_done() {
            self.reveal = target;
            self.settle(settle);
            return;
        }

        self.snap = Some(Snap { anim, settle });
        self.host.request_frame();
    }

    /// Stops the snap in progress, keeping the reveal at its current value.
    ///
    /// The pending notification of the stopped snap is dropped.
    pub(super) fn interrupt_snap(&mut self) {
        if let Some(snap) = self.snap.take() {
            self.reveal = snap.anim.value();
            debug!("interrupted {:?} snap at {}", snap.settle, self.reveal);
        }
    }

    fn settle(&mut self, settle: Settle) {
        let Some(event) = settle.event() else {
            return;
        };

        self.reveal = f64::from(settle.target(self.peek_scrollable()));
        self.rest_open = settle == Settle::Opened;

        debug!("wrapper {:?} settled: {settle:?}", self.id);
        self.notify(event);
    }

    /// Advances the snap animation to the current clock time.
    ///
    /// Call this once per frame while [`Self::are_animations_ongoing`]. Completion is reported
    /// through the callback from here.
    pub fn advance_animations(&mut self) {
        let _span = tracy_client::span!("SlideWrapper::advance_animations");

        let Some(snap) = self.snap.take() else {
            return;
        };

        match snap.anim.progress() {
            Progress::Running(value) => {
                self.reveal = value;
                self.snap = Some(snap);
                self.host.request_frame();
            }
            Progress::Finished(_) => self.settle(snap.settle),
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.snap.is_some()
    }

    /// Whether the controls are fully revealed.
    pub fn is_open(&self) -> bool {
        let scrollable = self.peek_scrollable();
        scrollable > 0 && self.reveal >= f64::from(scrollable)
    }

    /// Animates the wrapper closed.
    ///
    /// Does nothing if the wrapper is closed and not on its way to open. Otherwise the
    /// completion is reported as a complete close, whatever the current offset.
    pub fn close(&mut self) {
        let heading = self.snap.as_ref().map(|snap| snap.settle);
        if heading == Some(Settle::ClosedViaExplicitClose) {
            return;
        }

        if !self.rest_open && heading != Some(Settle::Opened) && !self.is_open() {
            trace!("close on a closed wrapper");
            return;
        }

        self.interrupt_snap();
        self.start_snap(Settle::ClosedViaExplicitClose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_threshold_is_a_third() {
        assert_eq!(decide_release(29, 90, false, true), Settle::ClosedViaPullback);
        assert_eq!(decide_release(30, 90, false, true), Settle::Opened);
        assert_eq!(decide_release(89, 90, false, true), Settle::Opened);
    }

    #[test]
    fn release_at_bounds() {
        assert_eq!(decide_release(0, 90, false, false), Settle::NoOp);
        assert_eq!(decide_release(0, 90, false, true), Settle::ClosedViaPullback);
        assert_eq!(decide_release(90, 90, false, true), Settle::Opened);
        assert_eq!(decide_release(90, 90, true, false), Settle::NoOp);
    }

    #[test]
    fn release_from_open_closes_explicitly() {
        assert_eq!(decide_release(29, 90, true, true), Settle::ClosedViaExplicitClose);
        assert_eq!(decide_release(0, 90, true, true), Settle::ClosedViaExplicitClose);
        assert_eq!(decide_release(45, 90, true, true), Settle::Opened);
    }

    #[test]
    fn release_with_nothing_to_reveal() {
        assert_eq!(decide_release(0, 0, false, true), Settle::NoOp);
        assert_eq!(decide_release(0, 2, false, true), Settle::ClosedViaPullback);
        assert_eq!(decide_release(1, 2, false, true), Settle::Opened);
    }

    #[test]
    fn target() {
        assert_eq!(Settle::Opened.target(90), 90);
        assert_eq!(Settle::ClosedViaPullback.target(90), 0);
        assert_eq!(Settle::ClosedViaExplicitClose.target(90), 0);
    }
}

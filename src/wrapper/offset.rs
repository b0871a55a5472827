use slidewrap_config::Mode;

use super::{RevealElement, SlideWrapper};

/// Mode-specific rendition of the reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Horizontal scroll of the content and controls block (dynamic mode).
    Scroll(i32),
    /// Horizontal translation of the content alone (static mode).
    Translation(f64),
}

impl Position {
    pub fn from_reveal(mode: Mode, reveal: f64) -> Self {
        match mode {
            Mode::Dynamic => Position::Scroll(reveal.round() as i32),
            Mode::Static => Position::Translation(-reveal),
        }
    }
}

impl<E: RevealElement, H> SlideWrapper<E, H> {
    /// Applies a horizontal drag delta, negative towards the left.
    ///
    /// Dragging left reveals the controls. The reveal is clamped to `[0, scrollable]`, so a drag
    /// past either bound lands exactly on it. Returns whether the reveal changed.
    pub(super) fn apply_delta(&mut self, delta: i32) -> bool {
        let max = f64::from(self.scrollable.unwrap_or(0).max(0));
        let reveal = (self.reveal - f64::from(delta)).clamp(0., max);

        if reveal == self.reveal {
            return false;
        }

        trace!("reveal {} -> {reveal}", self.reveal);
        self.reveal = reveal;
        true
    }

    /// Distance the controls are revealed by, in `[0, scrollable]`.
    pub fn reveal(&self) -> f64 {
        self.reveal
    }

    pub fn position(&self) -> Position {
        Position::from_reveal(self.options.mode, self.reveal)
    }

    /// Signed offset as the host sees it: the scroll position in dynamic mode, the content
    /// translation in static mode.
    pub fn current_offset(&self) -> i32 {
        match self.position() {
            Position::Scroll(x) => x,
            Position::Translation(x) => x.round() as i32,
        }
    }

    /// Horizontal scroll to apply to the whole block. Always 0 in static mode.
    pub fn scroll_x(&self) -> i32 {
        match self.position() {
            Position::Scroll(x) => x,
            Position::Translation(_) => 0,
        }
    }

    /// Horizontal translation to apply to the content. Always 0 in dynamic mode.
    pub fn translation_x(&self) -> f64 {
        match self.position() {
            Position::Scroll(_) => 0.,
            Position::Translation(x) => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_follows_mode() {
        assert_eq!(Position::from_reveal(Mode::Dynamic, 45.4), Position::Scroll(45));
        assert_eq!(Position::from_reveal(Mode::Static, 45.5), Position::Translation(-45.5));
        assert_eq!(Position::from_reveal(Mode::Dynamic, 0.), Position::Scroll(0));
    }
}

use slidewrap_config::Mode;

use super::{Host, RevealElement, SlideWrapper};
use crate::utils::dip_to_px;

/// Size of an element in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

/// Placement of an element relative to the wrapper origin, in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Where the host should put the wrapper children.
///
/// Positions are before any scroll or translation: in dynamic mode the host scrolls the whole
/// block by [`SlideWrapper::scroll_x`], in static mode it translates only the content by
/// [`SlideWrapper::translation_x`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Placement {
    pub content: Rectangle,
    /// One rectangle per control element, in control order.
    pub controls: Vec<Rectangle>,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

impl Rectangle {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

impl<E: RevealElement, H: Host> SlideWrapper<E, H> {
    /// Computes the reveal distance from provider widths or measured control widths.
    pub(super) fn resolve_scrollable(&self) -> i32 {
        let scale = self.options.scale;

        if let Some(provider) = &self.provider {
            let widths = provider.widths_dp();
            if !widths.is_empty() {
                return widths
                    .iter()
                    .map(|w| dip_to_px(*w, scale).max(0))
                    .fold(0, i32::saturating_add);
            }
        }

        self.controls
            .iter()
            .map(|control| control.measured_size().w.max(0))
            .fold(0, i32::saturating_add)
    }

    /// Returns the cached reveal distance, computing it if needed.
    pub(super) fn ensure_scrollable(&mut self) -> i32 {
        if let Some(scrollable) = self.scrollable {
            return scrollable;
        }

        let scrollable = self.resolve_scrollable();
        self.scrollable = Some(scrollable);

        if scrollable == 0 {
            warn!("wrapper {:?} has nothing to reveal", self.id);
        } else {
            debug!("wrapper {:?} resolved scrollable to {scrollable}", self.id);
        }

        let max = f64::from(scrollable);
        if let Some(snap) = self.snap.take() {
            // Retarget the snap to the new bounds.
            self.reveal = snap.anim.value().clamp(0., max);
            self.start_snap(snap.settle);
        } else if self.rest_open {
            self.reveal = max;
        } else {
            self.reveal = self.reveal.clamp(0., max);
        }

        scrollable
    }

    /// Reveal distance without caching it.
    pub(super) fn peek_scrollable(&self) -> i32 {
        self.scrollable.unwrap_or_else(|| self.resolve_scrollable())
    }

    fn control_width(&self, idx: usize) -> i32 {
        let provided = self.provider.as_ref().and_then(|provider| {
            let widths = provider.widths_dp();
            widths.get(idx).copied()
        });

        match provided {
            Some(dp) => dip_to_px(dp, self.options.scale).max(0),
            None => self.controls[idx].measured_size().w.max(0),
        }
    }

    /// Places the content and the control elements inside a container of the given width.
    ///
    /// The content goes at the origin with its measured size. Controls take the content height.
    /// In dynamic mode they are laid out left to right starting at the container's right bound,
    /// in static mode they are right-aligned inside the container.
    pub fn layout(&self, container_width: i32) -> Placement {
        let _span = tracy_client::span!("SlideWrapper::layout");

        let content_size = self.content.measured_size();
        let content = Rectangle::new(0, 0, content_size.w, content_size.h);
        let h = content_size.h;

        let mut controls = Vec::with_capacity(self.controls.len());
        match self.options.mode {
            Mode::Dynamic => {
                let mut x = container_width;
                for idx in 0..self.controls.len() {
                    let w = self.control_width(idx);
                    controls.push(Rectangle::new(x, 0, w, h));
                    x = x.saturating_add(w);
                }
            }
            Mode::Static => {
                let mut right = container_width;
                for idx in (0..self.controls.len()).rev() {
                    let w = self.control_width(idx);
                    right = right.saturating_sub(w);
                    controls.push(Rectangle::new(right, 0, w, h));
                }
                controls.reverse();
            }
        }

        Placement { content, controls }
    }
}

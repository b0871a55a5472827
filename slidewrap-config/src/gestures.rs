use crate::FloatOrInt;

/// Thresholds for telling taps, long presses and drags apart.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Gestures {
    /// Longest press that still counts as a tap.
    #[knuffel(child, unwrap(argument), default = Self::default().tap_timeout_ms)]
    pub tap_timeout_ms: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().long_press_timeout_ms)]
    pub long_press_timeout_ms: u32,
    /// Movement along an axis, in pixels, that a tap tolerates.
    #[knuffel(child, unwrap(argument), default = Self::default().touch_slop)]
    pub touch_slop: FloatOrInt<0, 65535>,
    /// Minimum dx / dy for a drag to be claimed as horizontal. 1.73 is about 60 degrees.
    #[knuffel(child, unwrap(argument), default = Self::default().horizontal_ratio)]
    pub horizontal_ratio: FloatOrInt<0, 1000>,
}

impl Default for Gestures {
    fn default() -> Self {
        Self {
            tap_timeout_ms: 300,
            long_press_timeout_ms: 400,
            touch_slop: FloatOrInt(20.),
            horizontal_ratio: FloatOrInt(1.73),
        }
    }
}

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::utils::get_monotonic_time;

/// Shareable lazy clock.
///
/// The time is fetched once and then held until it is set again, so that everything reading the
/// clock during one frame sees the same time.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<ClockState>>,
}

#[derive(Debug, Default)]
struct ClockState {
    /// Current time, `None` until fetched.
    time: Option<Duration>,
    complete_instantly: bool,
}

impl Clock {
    /// Creates a clock frozen at the given time.
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClockState {
                time: Some(time),
                complete_instantly: false,
            })),
        }
    }

    pub fn now(&self) -> Duration {
        *self
            .inner
            .borrow_mut()
            .time
            .get_or_insert_with(get_monotonic_time)
    }

    /// Sets the current time.
    pub fn set_time(&mut self, time: Duration) {
        self.inner.borrow_mut().time = Some(time);
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_until_set() {
        let mut clock = Clock::with_time(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(10));

        clock.set_time(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[test]
    fn clones_share_time() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let other = clock.clone();
        assert_eq!(clock, other);

        clock.set_time(Duration::from_millis(40));
        assert_eq!(other.now(), Duration::from_millis(40));
        assert_ne!(clock, Clock::with_time(Duration::ZERO));
    }

    #[test]
    fn default_holds_first_fetched_time() {
        let clock = Clock::default();
        let first = clock.now();
        // Real monotonic time is well past zero on any running system.
        assert!(first > Duration::ZERO);
        assert_eq!(clock.clone().now(), first);
    }
}

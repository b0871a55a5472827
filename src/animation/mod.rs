use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod bezier;
use bezier::CubicBezier;

mod clock;
pub use clock::Clock;

/// Eased transition of a single value over a fixed duration.
#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    clock: Clock,
    curve: Curve,
}

#[derive(Debug, Clone, Copy)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
    CubicBezier(CubicBezier),
}

/// State of an animation at the current clock time.
///
/// `Finished` is reported once the duration has elapsed, and always carries the exact target, so
/// callers never have to compare interpolated floats against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Running(f64),
    Finished(f64),
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: slidewrap_config::Animation) -> Self {
        if config.off {
            return Self::ease(clock, from, to, Duration::ZERO, Curve::Linear);
        }

        let duration =
            Duration::from_millis(u64::from(config.duration_ms)).mul_f64(config.slowdown.max(0.));
        Self::ease(clock, from, to, duration, Curve::from(config.curve))
    }

    pub fn ease(clock: Clock, from: f64, to: f64, duration: Duration, curve: Curve) -> Self {
        Self {
            from,
            to,
            duration,
            start_time: clock.now(),
            clock,
            curve,
        }
    }

    pub fn is_done(&self) -> bool {
        if self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.end_time()
    }

    pub fn value_at(&self, at: Duration) -> f64 {
        if self.clock.should_complete_instantly() || self.end_time() <= at {
            return self.to;
        }
        if at <= self.start_time {
            return self.from;
        }

        let passed = (at - self.start_time).as_secs_f64();
        let x = (passed / self.duration.as_secs_f64()).clamp(0., 1.);
        self.curve.y(x) * (self.to - self.from) + self.from
    }

    pub fn value(&self) -> f64 {
        self.value_at(self.clock.now())
    }

    pub fn progress(&self) -> Progress {
        if self.is_done() {
            Progress::Finished(self.to)
        } else {
            Progress::Running(self.value())
        }
    }

    pub fn end_time(&self) -> Duration {
        self.start_time + self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
            Curve::CubicBezier(b) => b.y(x),
        }
    }
}

impl From<slidewrap_config::Curve> for Curve {
    fn from(value: slidewrap_config::Curve) -> Self {
        match value {
            slidewrap_config::Curve::Linear => Curve::Linear,
            slidewrap_config::Curve::EaseOutQuad => Curve::EaseOutQuad,
            slidewrap_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            slidewrap_config::Curve::EaseOutExpo => Curve::EaseOutExpo,
            slidewrap_config::Curve::CubicBezier(x1, y1, x2, y2) => {
                Curve::CubicBezier(CubicBezier::new(x1, y1, x2, y2))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn linear(duration_ms: u32) -> slidewrap_config::Animation {
        slidewrap_config::Animation {
            duration_ms,
            curve: slidewrap_config::Curve::Linear,
            ..Default::default()
        }
    }

    #[test]
    fn linear_progress() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 30., 90., linear(300));

        assert_eq!(anim.progress(), Progress::Running(30.));

        clock.set_time(Duration::from_millis(100));
        let Progress::Running(value) = anim.progress() else {
            panic!("animation finished too early");
        };
        assert_abs_diff_eq!(value, 50., epsilon = 1e-9);

        clock.set_time(Duration::from_millis(300));
        assert_eq!(anim.progress(), Progress::Finished(90.));

        clock.set_time(Duration::from_millis(1000));
        assert_eq!(anim.progress(), Progress::Finished(90.));
    }

    #[test]
    fn off_finishes_immediately() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock, 10., 0., slidewrap_config::Animation::new_off());
        assert!(anim.is_done());
        assert_eq!(anim.progress(), Progress::Finished(0.));
    }

    #[test]
    fn slowdown_stretches_duration() {
        let clock = Clock::with_time(Duration::ZERO);
        let config = slidewrap_config::Animation {
            slowdown: 2.,
            ..linear(300)
        };
        let anim = Animation::new(clock, 0., 1., config);
        assert_eq!(anim.duration(), Duration::from_millis(600));
    }

    #[test]
    fn complete_instantly_jumps_to_target() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 0., 90., linear(300));
        assert!(!anim.is_done());

        clock.set_complete_instantly(true);
        assert_eq!(anim.progress(), Progress::Finished(90.));
    }

    #[test]
    fn easing_stays_within_range() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 90., 0., Default::default());

        for ms in 0..=300 {
            clock.set_time(Duration::from_millis(ms));
            let value = anim.value();
            assert!((0. ..=90.).contains(&value), "{value} out of range at {ms} ms");
        }
    }
}

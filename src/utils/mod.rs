use std::time::Duration;

use git_version::git_version;
use rustix::time::{clock_gettime, ClockId};

pub fn version() -> String {
    format!(
        "{} ({})",
        env!("CARGO_PKG_VERSION"),
        git_version!(fallback = "unknown commit"),
    )
}

pub fn get_monotonic_time() -> Duration {
    let ts = clock_gettime(ClockId::Monotonic);
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

/// Converts density-independent units to whole pixels, rounding half up.
pub fn dip_to_px(dip: i32, scale: f64) -> i32 {
    (f64::from(dip) * scale + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dip_to_px_rounds_half_up() {
        assert_eq!(dip_to_px(90, 1.), 90);
        assert_eq!(dip_to_px(90, 2.), 180);
        assert_eq!(dip_to_px(45, 1.5), 68);
        assert_eq!(dip_to_px(3, 0.5), 2);
        assert_eq!(dip_to_px(0, 3.), 0);
    }
}

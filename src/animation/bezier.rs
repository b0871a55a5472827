use keyframe::EasingFunction;

/// CSS-style cubic Bézier timing curve with fixed end points at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Evaluates one coordinate of the curve at parameter `t`.
fn sample(p1: f64, p2: f64, t: f64) -> f64 {
    let u = 1. - t;
    3. * u * u * t * p1 + 3. * u * t * t * p2 + t * t * t
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Finds the curve parameter for a given time by bisection; x is monotonic for x1, x2 in
    /// [0, 1].
    fn solve_t(&self, x: f64) -> f64 {
        let (mut lo, mut hi) = (0., 1.);
        for _ in 0..32 {
            let mid = (lo + hi) / 2.;
            if sample(self.x1, self.x2, mid) > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        (lo + hi) / 2.
    }
}

impl EasingFunction for CubicBezier {
    fn y(&self, x: f64) -> f64 {
        let x = x.clamp(0., 1.);
        if x == 0. || x == 1. {
            return x;
        }

        sample(self.y1, self.y2, self.solve_t(x))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn linear_control_points() {
        let curve = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        for x in [0.1, 0.3, 0.5, 0.9] {
            assert_abs_diff_eq!(curve.y(x), x, epsilon = 1e-6);
        }
    }

    #[test]
    fn end_points_are_exact() {
        let curve = CubicBezier::new(0.05, 0.7, 0.1, 1.);
        assert_eq!(curve.y(0.), 0.);
        assert_eq!(curve.y(1.), 1.);
        assert_eq!(curve.y(2.), 1.);
    }
}

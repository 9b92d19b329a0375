use std::f64::consts::{PI, TAU};

/// A point-like memory layout to achieve zero copy.
///
/// The planar solvers work on `[f64; 2]` directly.
pub trait Point: Sized + Copy {
    /// Create a point.
    fn point(x: f64, y: f64) -> Self;
    /// X coordinate.
    fn x(&self) -> f64;
    /// Y coordinate.
    fn y(&self) -> f64;

    /// The point at distance `d0` and angle `a0` from this point.
    fn pla(&self, d0: f64, a0: f64) -> Self {
        Self::point(self.x() + d0 * a0.cos(), self.y() + d0 * a0.sin())
    }

    /// The vector from this point to `rhs`.
    fn to(&self, rhs: &Self) -> [f64; 2] {
        [rhs.x() - self.x(), rhs.y() - self.y()]
    }

    /// Distance to `rhs`.
    fn dist(&self, rhs: &Self) -> f64 {
        let [dx, dy] = self.to(rhs);
        dx.hypot(dy)
    }

    /// Direction angle from this point to `rhs`.
    fn angle_to(&self, rhs: &Self) -> f64 {
        let [dx, dy] = self.to(rhs);
        dy.atan2(dx)
    }

    /// Intersection of two circles.
    ///
    /// Return the point at distance `d0` from this point and `d1` from `rhs`,
    /// the `inv` flag selects the other side of the center line. Return
    /// `None` if the circles do not intersect or share the same center.
    fn pllp(&self, d0: f64, d1: f64, rhs: &Self, inv: bool) -> Option<Self> {
        let [dx, dy] = self.to(rhs);
        let d = dx.hypot(dy);
        if d > d0 + d1 || d < (d0 - d1).abs() || d < f64::EPSILON {
            return None;
        }
        let a = (d0 * d0 - d1 * d1 + d * d) / (2. * d);
        let h = (d0 * d0 - a * a).max(0.).sqrt();
        let xm = self.x() + a * dx / d;
        let ym = self.y() + a * dy / d;
        Some(if inv {
            Self::point(xm + h * dy / d, ym - h * dx / d)
        } else {
            Self::point(xm - h * dy / d, ym + h * dx / d)
        })
    }
}

impl Point for [f64; 2] {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        [x, y]
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Point for (f64, f64) {
    #[inline(always)]
    fn point(x: f64, y: f64) -> Self {
        (x, y)
    }
    #[inline(always)]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline(always)]
    fn y(&self) -> f64 {
        self.1
    }
}

/// Law of cosines: the angle between side `a` and side `b` of a triangle,
/// opposite to side `c`.
///
/// The cosine is clamped into `[-1, 1]`, so a triangle that is flat up to
/// rounding error gives `0` or `π` instead of NaN.
pub fn cos_law(a: f64, b: f64, c: f64) -> f64 {
    ((a * a + b * b - c * c) / (2. * a * b))
        .clamp(-1., 1.)
        .acos()
}

/// Wrap an angle into `(-π, π]`.
pub fn wrap_angle(a: f64) -> f64 {
    let a = a.rem_euclid(TAU);
    if a > PI {
        a - TAU
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circle_intersection() {
        let o = [0f64, 0.];
        let p = o.pllp(5., 5., &[6., 0.], false).unwrap();
        assert_abs_diff_eq!(p[0], 3., epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 4., epsilon = 1e-12);
        let p = o.pllp(5., 5., &[6., 0.], true).unwrap();
        assert_abs_diff_eq!(p[1], -4., epsilon = 1e-12);
        assert!(o.pllp(1., 1., &[3., 0.], false).is_none());
        assert!(o.pllp(5., 1., &[1., 0.], false).is_none());
        assert!(o.pllp(1., 1., &o, false).is_none());
    }

    #[test]
    fn tangent_circles() {
        let p = (0f64, 0f64).pllp(2., 3., &(5., 0.), false).unwrap();
        assert_abs_diff_eq!(p.0, 2., epsilon = 1e-12);
        assert_abs_diff_eq!(p.1, 0., epsilon = 1e-6);
    }

    #[test]
    fn law_of_cosines() {
        assert_abs_diff_eq!(cos_law(3., 4., 5.), PI / 2., epsilon = 1e-12);
        assert_abs_diff_eq!(cos_law(1., 1., 2.), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(cos_law(1., 2., 3. + 1e-12), PI, epsilon = 1e-12);
        assert_eq!(cos_law(2., 2., 0.), 0.);
    }

    #[test]
    fn wrapping() {
        assert_abs_diff_eq!(wrap_angle(3.5 * PI), -PI / 2., epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(-PI / 2.), -PI / 2., epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(TAU + 0.5), 0.5, epsilon = 1e-12);
        assert_eq!(wrap_angle(0.), 0.);
    }
}

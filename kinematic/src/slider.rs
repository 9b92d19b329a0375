//! Slider-crank mechanism with the slider on the X axis.
use crate::{error::check_lengths, Point, Result};

/// In-line slider-crank mechanism.
///
/// The crank pivot is the origin and the slider moves along the X axis.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Lengths"))]
#[derive(Clone, Debug, PartialEq)]
pub struct SliderCrank {
    crank: f64,
    rod: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Lengths {
    crank: f64,
    rod: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<Lengths> for SliderCrank {
    type Error = crate::Error;

    fn try_from(v: Lengths) -> Result<Self> {
        Self::new(v.crank, v.rod)
    }
}

/// Position solution of [`SliderCrank`].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SliderPose {
    /// Crank pin
    pub pin: [f64; 2],
    /// Slider position on the X axis
    pub slider: f64,
    /// Direction of the rod, from the pin to the slider
    pub rod_angle: f64,
}

impl SliderCrank {
    /// Create a new mechanism from the crank and the connecting rod lengths.
    pub fn new(crank: f64, rod: f64) -> Result<Self> {
        check_lengths(["crank", "rod"], [crank, rod])?;
        log::debug!("slider-crank: {crank}, {rod}");
        Ok(Self { crank, rod })
    }

    /// Length of the crank.
    pub const fn crank(&self) -> f64 {
        self.crank
    }

    /// Length of the connecting rod.
    pub const fn rod(&self) -> f64 {
        self.rod
    }

    /// Return true if the crank can rotate a full turn.
    pub fn is_full_turn(&self) -> bool {
        self.rod >= self.crank
    }

    /// Solve the positions with the crank angle.
    ///
    /// Return `None` if the rod is shorter than the pin height.
    pub fn solve_positions(&self, angle: f64) -> Option<SliderPose> {
        let pin = [0f64, 0.].pla(self.crank, angle);
        let h = self.rod * self.rod - pin[1] * pin[1];
        if h < 0. {
            return None;
        }
        let slider = pin[0] + h.sqrt();
        let rod_angle = pin.angle_to(&[slider, 0.]);
        Some(SliderPose { pin, slider, rod_angle })
    }

    /// Slider velocity from the crank angular velocity `omega`.
    ///
    /// Return `None` if the mechanism cannot be assembled, or the rod is
    /// perpendicular to the slide.
    pub fn velocity(&self, angle: f64, omega: f64) -> Option<f64> {
        let Self { crank: r, rod: l } = *self;
        let (s, c) = angle.sin_cos();
        let h = l * l - r * r * s * s;
        if h <= 0. {
            return None;
        }
        Some(-r * omega * s - r * r * omega * s * c / h.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn dead_centers() {
        let sc = SliderCrank::new(1., 3.).unwrap();
        assert!(sc.is_full_turn());
        assert_abs_diff_eq!(sc.solve_positions(0.).unwrap().slider, 4., epsilon = 1e-12);
        let pose = sc.solve_positions(std::f64::consts::PI).unwrap();
        assert_abs_diff_eq!(pose.slider, 2., epsilon = 1e-12);
        let pose = sc.solve_positions(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(pose.slider, 8f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(pose.pin.dist(&[pose.slider, 0.]), 3., epsilon = 1e-12);
    }

    #[test]
    fn short_rod() {
        let sc = SliderCrank::new(2., 1.).unwrap();
        assert!(!sc.is_full_turn());
        assert!(sc.solve_positions(0.).is_some());
        assert!(sc.solve_positions(FRAC_PI_2).is_none());
        assert!(sc.velocity(FRAC_PI_2, 1.).is_none());
        assert!(SliderCrank::new(0., 1.).is_err());
    }

    #[test]
    fn velocity_matches_finite_difference() {
        let sc = SliderCrank::new(0.5, 2.).unwrap();
        let h = 1e-6;
        for t in [0.1, 1., 2., 3.5, 5.] {
            let x0 = sc.solve_positions(t - h).unwrap().slider;
            let x1 = sc.solve_positions(t + h).unwrap().slider;
            let v = sc.velocity(t, 2.).unwrap();
            assert_abs_diff_eq!(v, 2. * (x1 - x0) / (2. * h), epsilon = 1e-6);
        }
    }
}

use super::*;
use crate::{cos_law, error::check_lengths, wrap_angle};
use nalgebra::Vector3;
use std::f64::consts::PI;

/// SCARA arm, joints `[θ1, θ2, d3, θ4]`.
///
/// Two horizontal links turn around vertical axes, the quill moves down by
/// `d3` from the base height and turns the tool by `θ4`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Scara {
    /// Height of the arm plane
    pub base: f64,
    /// Inner link
    pub l1: f64,
    /// Outer link
    pub l2: f64,
}

impl Scara {
    /// An example arm.
    pub const fn example() -> Self {
        Self { base: 0.4, l1: 0.3, l2: 0.25 }
    }
}

impl Kinematics for Scara {
    fn dof(&self) -> usize {
        4
    }

    fn check(&self) -> Result<()> {
        check_lengths(["base", "l1", "l2"], [self.base, self.l1, self.l2])
    }

    fn forward(&self, joints: &[f64]) -> Result<EePose> {
        let [t1, t2, d3, t4] = take(joints)?;
        let t12 = t1 + t2;
        let pos = [
            self.l1 * t1.cos() + self.l2 * t12.cos(),
            self.l1 * t1.sin() + self.l2 * t12.sin(),
            self.base - d3,
        ];
        let rot = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), t12 + t4);
        Ok(EePose { pos, rot: Some(rot) })
    }

    /// Solve with `θ2` in `[0, π]`.
    ///
    /// The tool can only turn around the vertical axis, a tilted orientation
    /// is unreachable.
    fn inverse(&self, target: &EePose) -> Result<Vec<f64>> {
        let Self { base, l1, l2 } = *self;
        let [x, y, z] = target.pos;
        let r = x.hypot(y);
        if r > l1 + l2 || r < (l1 - l2).abs() {
            log::debug!("scara radius {r} is out of reach");
            return Err(Error::Unreachable);
        }
        let t2 = PI - cos_law(l1, l2, r);
        let t1 = y.atan2(x) - (l2 * t2.sin()).atan2(l1 + l2 * t2.cos());
        let t4 = match target.rot {
            Some(rot) => {
                if (rot * Vector3::z()).z < 1. - 1e-9 {
                    log::debug!("scara tool cannot tilt");
                    return Err(Error::Unreachable);
                }
                let (_, _, yaw) = rot.euler_angles();
                wrap_angle(yaw - t1 - t2)
            }
            None => 0.,
        };
        Ok(vec![t1, t2, base - z, t4])
    }

    fn reach(&self) -> Option<[f64; 2]> {
        Some([(self.l1 - self.l2).abs(), self.l1 + self.l2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward() {
        let scara = Scara::example();
        let pose = scara.forward(&[0., 0., 0.1, 0.]).unwrap();
        assert_abs_diff_eq!(pose.pos[0], 0.55, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.pos[2], 0.3, epsilon = 1e-12);
        let pose = scara.forward(&[std::f64::consts::FRAC_PI_2, 0., 0., 0.]).unwrap();
        assert_abs_diff_eq!(pose.pos[0], 0., epsilon = 1e-12);
        assert_abs_diff_eq!(pose.pos[1], 0.55, epsilon = 1e-12);
    }

    #[test]
    fn round_trip() {
        let scara = Scara::example();
        let rot = UnitQuaternion::from_euler_angles(0., 0., 0.7);
        for pos in [[0.3, 0.2, 0.1], [-0.1, 0.4, 0.35], [0.05, -0.02, 0.]] {
            let target = EePose::new(pos).with_rot(rot);
            let joints = scara.inverse(&target).unwrap();
            assert!(joints[1] >= 0.);
            let pose = scara.forward(&joints).unwrap();
            for i in 0..3 {
                assert_abs_diff_eq!(pose.pos[i], pos[i], epsilon = 1e-9);
            }
            let diff = rot.inverse() * pose.rot.unwrap();
            assert!(diff.imag().norm() < 1e-9);
        }
    }

    #[test]
    fn position_only() {
        let scara = Scara::example();
        let joints = scara.inverse(&EePose::new([0.2, 0.3, 0.2])).unwrap();
        assert_eq!(joints[2], 0.2);
        assert_eq!(joints[3], 0.);
    }

    #[test]
    fn unreachable() {
        let scara = Scara::example();
        assert_eq!(scara.inverse(&EePose::new([0.6, 0., 0.])), Err(Error::Unreachable));
        assert_eq!(scara.inverse(&EePose::new([0.01, 0.01, 0.])), Err(Error::Unreachable));
        let tilted = EePose::new([0.3, 0.2, 0.1])
            .with_rot(UnitQuaternion::from_euler_angles(0.1, 0., 0.));
        assert_eq!(scara.inverse(&tilted), Err(Error::Unreachable));
    }
}

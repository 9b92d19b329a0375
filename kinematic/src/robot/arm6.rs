use super::*;
use crate::{cos_law, error::check_lengths};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

/// Articulated arm with six revolute joints and a spherical wrist.
///
/// + Joint 1 turns the arm around the vertical axis.
/// + Joint 2 (shoulder) and joint 3 (elbow) are the elevation of the upper
///   arm and the bend of the forearm, zero is horizontal and straight.
/// + Joints 4 to 6 are the roll-pitch-roll wrist, zero points the tool along
///   the forearm.
///
/// The tool frame has its X axis along the tool.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Arm6 {
    /// Height of the shoulder from the base
    pub base: f64,
    /// Upper arm, from the shoulder to the elbow
    pub upper: f64,
    /// Forearm, from the elbow to the wrist center
    pub fore: f64,
    /// Tool offset from the wrist center
    pub tool: f64,
}

impl Arm6 {
    /// A 15 kg payload industrial arm.
    pub const fn example() -> Self {
        Self { base: 0.1625, upper: 0.425, fore: 0.3922, tool: 0.0996 }
    }

    fn frame3(t1: f64, phi: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), t1)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -phi)
    }

    fn wrist(t4: f64, t5: f64, t6: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), t4)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), t5)
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), t6)
    }

    /// Default tool orientation, pointing down.
    pub fn tool_down() -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2)
    }
}

/// Decompose `Rx(a) Ry(b) Rx(c)` with `b` in `[0, π]`.
fn decompose_xyx(m: &Matrix3<f64>) -> [f64; 3] {
    let b = m[(0, 1)].hypot(m[(0, 2)]).atan2(m[(0, 0)]);
    if b.sin() > 1e-12 {
        [m[(1, 0)].atan2(-m[(2, 0)]), b, m[(0, 1)].atan2(m[(0, 2)])]
    } else if m[(0, 0)] > 0. {
        [0., 0., m[(2, 1)].atan2(m[(1, 1)])]
    } else {
        [0., PI, (-m[(2, 1)]).atan2(m[(1, 1)])]
    }
}

impl Kinematics for Arm6 {
    fn dof(&self) -> usize {
        6
    }

    fn check(&self) -> Result<()> {
        check_lengths(["base", "upper", "fore"], [self.base, self.upper, self.fore])?;
        if !(self.tool.is_finite() && self.tool >= 0.) {
            return Err(Error::invalid(format!("tool must not be negative, got {}", self.tool)));
        }
        Ok(())
    }

    fn forward(&self, joints: &[f64]) -> Result<EePose> {
        let [t1, t2, t3, t4, t5, t6] = take(joints)?;
        let phi = t2 + t3;
        let u = Vector3::new(t1.cos(), t1.sin(), 0.);
        let z = Vector3::z();
        let w = z * self.base
            + (u * t2.cos() + z * t2.sin()) * self.upper
            + (u * phi.cos() + z * phi.sin()) * self.fore;
        let rot = Self::frame3(t1, phi) * Self::wrist(t4, t5, t6);
        let p = w + rot * Vector3::x() * self.tool;
        Ok(EePose { pos: p.into(), rot: Some(rot) })
    }

    /// Closed-form solution of the right arm, elbow up and non-negative
    /// wrist pitch branch.
    fn inverse(&self, target: &EePose) -> Result<Vec<f64>> {
        let Self { base, upper, fore, tool } = *self;
        let rot = target.rot.unwrap_or_else(Self::tool_down);
        let w = Vector3::from(target.pos) - rot * Vector3::x() * tool;
        let t1 = w.y.atan2(w.x);
        let r = w.x.hypot(w.y);
        let s = w.z - base;
        let d = r.hypot(s);
        if d > upper + fore || d < (upper - fore).abs() {
            log::debug!("wrist center {d} is out of reach");
            return Err(Error::Unreachable);
        }
        let t3 = -(PI - cos_law(upper, fore, d));
        let t2 = s.atan2(r) - (fore * t3.sin()).atan2(upper + fore * t3.cos());
        let r36 = Self::frame3(t1, t2 + t3).inverse() * rot;
        let [t4, t5, t6] = decompose_xyx(r36.to_rotation_matrix().matrix());
        Ok(vec![t1, t2, t3, t4, t5, t6])
    }

    fn reach(&self) -> Option<[f64; 2]> {
        Some([(self.upper - self.fore).abs(), self.upper + self.fore])
    }
}

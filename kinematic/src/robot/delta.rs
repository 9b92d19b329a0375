use super::*;
use crate::{error::check_lengths, Point};
use nalgebra::{Rotation3, Vector3};
use std::f64::consts::TAU;

/// Rotary delta robot, joints are the angles of the three actuator arms.
///
/// The arms are `120°` apart starting from the X axis. A zero angle points
/// the arm horizontally outward, a positive angle moves it down. The
/// effector hangs under the base plane with fixed orientation.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Delta {
    /// Radius from the center to the actuator axes
    pub base: f64,
    /// Radius from the effector center to the forearm joints
    pub effector: f64,
    /// Actuator arm
    pub upper: f64,
    /// Forearm (parallelogram) length
    pub fore: f64,
}

impl Delta {
    /// An example robot.
    pub const fn example() -> Self {
        Self { base: 0.1, effector: 0.03, upper: 0.1, fore: 0.25 }
    }

    fn arm_rot(i: usize) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), i as f64 * TAU / 3.)
    }

    /// Center of the forearm sphere of arm `i`, the effector center is on it.
    fn sphere_center(&self, i: usize, angle: f64) -> Vector3<f64> {
        let (s, c) = angle.sin_cos();
        let v = Vector3::new(self.base - self.effector + self.upper * c, 0., -self.upper * s);
        Self::arm_rot(i) * v
    }
}

impl Kinematics for Delta {
    fn dof(&self) -> usize {
        3
    }

    fn check(&self) -> Result<()> {
        check_lengths(
            ["base", "effector", "upper", "fore"],
            [self.base, self.effector, self.upper, self.fore],
        )
    }

    /// Intersection of the three forearm spheres, the lower one is taken.
    fn forward(&self, joints: &[f64]) -> Result<EePose> {
        let angles = take::<3>(joints)?;
        let [c1, c2, c3] = std::array::from_fn(|i| self.sphere_center(i, angles[i]));
        let d = (c2 - c1).norm();
        if d < f64::EPSILON {
            return Err(Error::Infeasible);
        }
        let ex = (c2 - c1) / d;
        let i = ex.dot(&(c3 - c1));
        let ey = c3 - c1 - ex * i;
        let j = ey.norm();
        if j < f64::EPSILON {
            return Err(Error::Infeasible);
        }
        let ey = ey / j;
        let ez = ex.cross(&ey);
        let x = d / 2.;
        let y = (i * i + j * j) / (2. * j) - i * x / j;
        let z2 = self.fore * self.fore - x * x - y * y;
        if z2 < -1e-12 {
            log::debug!("delta arms cannot close at {angles:?}");
            return Err(Error::Infeasible);
        }
        let z = z2.max(0.).sqrt();
        let p = c1 + ex * x + ey * y;
        let [p1, p2] = [p + ez * z, p - ez * z];
        let p = if p1.z < p2.z { p1 } else { p2 };
        Ok(EePose { pos: p.into(), rot: Some(UnitQuaternion::identity()) })
    }

    /// Solve each arm in its own vertical plane, with the elbow outward.
    ///
    /// The orientation of the target is ignored. A target above the plane
    /// of the forearm sphere centers is unreachable, since the forward
    /// kinematics takes the lower intersection.
    fn inverse(&self, target: &EePose) -> Result<Vec<f64>> {
        let p = Vector3::from(target.pos);
        let shoulder = [self.base, 0.];
        let angles = (0..3)
            .map(|i| -> Result<f64> {
                let q = Self::arm_rot(i).inverse() * p + Vector3::x() * self.effector;
                // Forearm projected into the arm plane
                let lb2 = self.fore * self.fore - q.y * q.y;
                if lb2 < 0. {
                    return Err(Error::Unreachable);
                }
                let joint = [q.x, q.z];
                let elbow = [false, true]
                    .into_iter()
                    .filter_map(|inv| shoulder.pllp(self.upper, lb2.sqrt(), &joint, inv))
                    .max_by(|a, b| a[0].total_cmp(&b[0]))
                    .ok_or(Error::Unreachable)?;
                Ok((-elbow[1]).atan2(elbow[0] - self.base))
            })
            .collect::<Result<Vec<_>>>()?;
        // Reject the upper branch
        match self.forward(&angles) {
            Ok(pose) if pose.dist(target) < 1e-6 => Ok(angles),
            _ => {
                log::debug!("delta target {:?} is above the arms", target.pos);
                Err(Error::Unreachable)
            }
        }
    }
}

use super::*;

/// Three orthogonal linear axes, joints are the axis displacements.
///
/// Each axis has a scale and a travel. A negative scale flips the axis
/// direction, the travel bounds the joint value of the axis.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Gantry {
    /// Scale of the X, Y and Z axes
    pub scale: [f64; 3],
    /// Travel `[lower, upper]` of the X, Y and Z axes
    pub travel: [[f64; 2]; 3],
}

impl Gantry {
    /// Unit axes with a 0.6 × 0.4 × 0.3 m work envelope.
    pub const fn example() -> Self {
        Self { scale: [1.; 3], travel: [[0., 0.6], [0., 0.4], [0., 0.3]] }
    }

    fn outside(&self, joints: &[f64; 3]) -> Option<usize> {
        (joints.iter().zip(&self.travel)).position(|(v, [lo, hi])| !(lo..=hi).contains(&v))
    }
}

impl Kinematics for Gantry {
    fn dof(&self) -> usize {
        3
    }

    fn check(&self) -> Result<()> {
        if let Some(i) = self.scale.iter().position(|s| !s.is_normal()) {
            return Err(Error::invalid(format!(
                "axis {i} must have a finite non-zero scale, got {}",
                self.scale[i]
            )));
        }
        match (self.travel.iter()).position(|[lo, hi]| !(lo.is_finite() && hi.is_finite() && lo <= hi)) {
            Some(i) => Err(Error::invalid(format!("axis {i} has an empty travel"))),
            None => Ok(()),
        }
    }

    fn forward(&self, joints: &[f64]) -> Result<EePose> {
        let joints = take::<3>(joints)?;
        if let Some(joint) = self.outside(&joints) {
            return Err(Error::JointLimit { joint, value: joints[joint] });
        }
        let pos = std::array::from_fn(|i| joints[i] * self.scale[i]);
        Ok(EePose { pos, rot: Some(UnitQuaternion::identity()) })
    }

    fn inverse(&self, target: &EePose) -> Result<Vec<f64>> {
        let joints = std::array::from_fn(|i| target.pos[i] / self.scale[i]);
        if let Some(i) = self.outside(&joints) {
            log::debug!("axis {i} cannot travel to {}", joints[i]);
            return Err(Error::Unreachable);
        }
        Ok(joints.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        let gantry = Gantry::example();
        let joints = [0.1, 0.25, 0.3];
        let pose = gantry.forward(&joints).unwrap();
        assert_eq!(pose.pos, joints);
        assert_eq!(gantry.inverse(&pose).unwrap(), joints);
    }

    #[test]
    fn flipped_axis() {
        let travel = [[-1., 1.]; 3];
        let gantry = Gantry { scale: [1., -1., 2.], travel };
        let pose = gantry.forward(&[0.5, 0.5, 0.5]).unwrap();
        assert_eq!(pose.pos, [0.5, -0.5, 1.]);
        assert_eq!(gantry.inverse(&pose).unwrap(), [0.5, 0.5, 0.5]);
        assert!(Gantry { scale: [1., 0., 1.], travel }.check().is_err());
        assert!(Gantry { scale: [1., f64::NAN, 1.], travel }.check().is_err());
        assert!(Gantry { scale: [1., f64::INFINITY, 1.], travel }.check().is_err());
    }

    #[test]
    fn outside_of_travel() {
        let gantry = Gantry::example();
        assert_eq!(gantry.inverse(&EePose::new([0.7, 0., 0.])), Err(Error::Unreachable));
        assert_eq!(gantry.inverse(&EePose::new([0., -0.01, 0.])), Err(Error::Unreachable));
        assert_eq!(
            gantry.forward(&[0., 0., 0.4]),
            Err(Error::JointLimit { joint: 2, value: 0.4 })
        );
        let travel = [[0., 1.], [1., 0.], [0., 1.]];
        assert!(Gantry { travel, ..Gantry::example() }.check().is_err());
        let travel = [[0., f64::INFINITY], [0., 1.], [0., 1.]];
        assert!(Gantry { travel, ..Gantry::example() }.check().is_err());
    }
}

//! Forward and inverse kinematics of robot topologies.
//!
//! Each topology has its own configuration type implementing [`Kinematics`],
//! [`RobotConfig`] is the closed set of them, and [`Robot`] adds joint limits
//! on top.
//!
//! Lengths are in meters and revolute joints are in radians.
pub use self::{arm6::*, delta::*, gantry::*, scara::*, traj::*};
use crate::{Error, Result};
use nalgebra::UnitQuaternion;

mod arm6;
mod delta;
mod gantry;
mod scara;
mod traj;

/// Topology tag of a robot.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RobotTopology {
    /// Six revolute joints articulated arm
    #[cfg_attr(feature = "serde", serde(rename = "cartesian-6dof"))]
    #[cfg_attr(feature = "clap", value(name = "cartesian-6dof"))]
    Cartesian6Dof,
    /// Selective compliance arm, `R R P R`
    #[cfg_attr(feature = "serde", serde(rename = "scara"))]
    #[cfg_attr(feature = "clap", value(name = "scara"))]
    Scara,
    /// Parallel delta robot with three rotary actuators
    #[cfg_attr(feature = "serde", serde(rename = "delta"))]
    #[cfg_attr(feature = "clap", value(name = "delta"))]
    Delta,
    /// Three orthogonal linear axes
    #[cfg_attr(feature = "serde", serde(rename = "linear-xyz"))]
    #[cfg_attr(feature = "clap", value(name = "linear-xyz"))]
    LinearXyz,
}

impl RobotTopology {
    /// List all topologies.
    pub const fn list() -> [Self; 4] {
        [Self::Cartesian6Dof, Self::Scara, Self::Delta, Self::LinearXyz]
    }

    /// Tag of the topology.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cartesian6Dof => "cartesian-6dof",
            Self::Scara => "scara",
            Self::Delta => "delta",
            Self::LinearXyz => "linear-xyz",
        }
    }

    /// Kinds of the joints, from the base to the tool.
    pub const fn joint_kinds(&self) -> &'static [JointKind] {
        use JointKind::*;
        match self {
            Self::Cartesian6Dof => &[Revolute; 6],
            Self::Scara => &[Revolute, Revolute, Prismatic, Revolute],
            Self::Delta => &[Revolute; 3],
            Self::LinearXyz => &[Prismatic; 3],
        }
    }

    /// Degree of freedom.
    pub const fn dof(&self) -> usize {
        self.joint_kinds().len()
    }
}

impl std::fmt::Display for RobotTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RobotTopology {
    type Err = Error;

    /// Parse a tag, underscores are accepted as hyphens.
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::list()
            .into_iter()
            .find(|t| t.name() == tag)
            .ok_or_else(|| Error::UnsupportedTopology(s.to_string()))
    }
}

/// Kind of a joint.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum JointKind {
    /// Rotation, in radians
    Revolute,
    /// Translation, in meters
    Prismatic,
}

/// End-effector pose.
///
/// The orientation is optional for targets, a missing orientation lets the
/// solver pick its default tool direction.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct EePose {
    /// Position
    pub pos: [f64; 3],
    /// Orientation
    #[cfg_attr(feature = "serde", serde(default))]
    pub rot: Option<UnitQuaternion<f64>>,
}

impl EePose {
    /// Create a pose with position only.
    pub const fn new(pos: [f64; 3]) -> Self {
        Self { pos, rot: None }
    }

    /// Set the orientation.
    pub fn with_rot(self, rot: UnitQuaternion<f64>) -> Self {
        Self { rot: Some(rot), ..self }
    }

    /// Distance between the positions.
    pub fn dist(&self, rhs: &Self) -> f64 {
        let [x, y, z] = std::array::from_fn(|i| self.pos[i] - rhs.pos[i]);
        x.hypot(y).hypot(z)
    }

    /// Linear interpolation of the position, spherical interpolation of the
    /// orientation if both sides have one.
    pub fn lerp(&self, rhs: &Self, t: f64) -> Self {
        let pos = std::array::from_fn(|i| self.pos[i] + (rhs.pos[i] - self.pos[i]) * t);
        let rot = match (self.rot, rhs.rot) {
            (Some(a), Some(b)) => Some(a.slerp(&b, t)),
            (a, b) => a.or(b),
        };
        Self { pos, rot }
    }
}

/// Kinematic solver of a robot topology.
pub trait Kinematics {
    /// Degree of freedom.
    fn dof(&self) -> usize;
    /// Check the configuration.
    fn check(&self) -> Result<()>;
    /// Forward kinematics, joint values to the end-effector pose.
    fn forward(&self, joints: &[f64]) -> Result<EePose>;
    /// Inverse kinematics, the end-effector pose to joint values.
    fn inverse(&self, target: &EePose) -> Result<Vec<f64>>;
    /// Minimum and maximum reach of the wrist, if it is bounded by a
    /// sphere shell.
    fn reach(&self) -> Option<[f64; 2]> {
        None
    }
}

/// Take a fixed number of joint values.
pub(crate) fn take<const N: usize>(joints: &[f64]) -> Result<[f64; N]> {
    joints
        .try_into()
        .map_err(|_| Error::JointCount { expect: N, got: joints.len() })
}

/// Configuration of all topologies.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum RobotConfig {
    /// Configuration of [`RobotTopology::Cartesian6Dof`]
    Arm6(Arm6),
    /// Configuration of [`RobotTopology::Scara`]
    Scara(Scara),
    /// Configuration of [`RobotTopology::Delta`]
    Delta(Delta),
    /// Configuration of [`RobotTopology::LinearXyz`]
    LinearXyz(Gantry),
}

impl RobotConfig {
    /// An example configuration of the topology.
    pub const fn example(topology: RobotTopology) -> Self {
        match topology {
            RobotTopology::Cartesian6Dof => Self::Arm6(Arm6::example()),
            RobotTopology::Scara => Self::Scara(Scara::example()),
            RobotTopology::Delta => Self::Delta(Delta::example()),
            RobotTopology::LinearXyz => Self::LinearXyz(Gantry::example()),
        }
    }

    /// Topology of the configuration.
    pub const fn topology(&self) -> RobotTopology {
        match self {
            Self::Arm6(_) => RobotTopology::Cartesian6Dof,
            Self::Scara(_) => RobotTopology::Scara,
            Self::Delta(_) => RobotTopology::Delta,
            Self::LinearXyz(_) => RobotTopology::LinearXyz,
        }
    }

    fn as_dyn(&self) -> &dyn Kinematics {
        match self {
            Self::Arm6(c) => c,
            Self::Scara(c) => c,
            Self::Delta(c) => c,
            Self::LinearXyz(c) => c,
        }
    }

    fn check_topology(&self, topology: RobotTopology) -> Result<()> {
        if self.topology() == topology {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "{topology} robot with a {} configuration",
                self.topology()
            )))
        }
    }
}

impl Kinematics for RobotConfig {
    fn dof(&self) -> usize {
        self.as_dyn().dof()
    }

    fn check(&self) -> Result<()> {
        self.as_dyn().check()
    }

    fn forward(&self, joints: &[f64]) -> Result<EePose> {
        self.as_dyn().forward(joints)
    }

    fn inverse(&self, target: &EePose) -> Result<Vec<f64>> {
        self.as_dyn().inverse(target)
    }

    fn reach(&self) -> Option<[f64; 2]> {
        self.as_dyn().reach()
    }
}

/// A validated robot: configuration and joint limits.
///
/// ```
/// use kinematic::{EePose, Robot, RobotTopology};
/// let robot = Robot::example(RobotTopology::LinearXyz);
/// let joints = robot.inverse(&EePose::new([0.1, 0.2, 0.3])).unwrap();
/// assert_eq!(joints, [0.1, 0.2, 0.3]);
/// assert!(robot.inverse(&EePose::new([1., 0., 0.])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Robot {
    config: RobotConfig,
    limits: Vec<[f64; 2]>,
}

impl Robot {
    /// Create a robot without joint limits.
    pub fn new(topology: RobotTopology, config: RobotConfig) -> Result<Self> {
        config.check_topology(topology)?;
        config.check()?;
        log::debug!("{topology} robot: {config:?}");
        Ok(Self { config, limits: Vec::new() })
    }

    /// An example robot of the topology, without joint limits.
    pub fn example(topology: RobotTopology) -> Self {
        Self { config: RobotConfig::example(topology), limits: Vec::new() }
    }

    /// Set the joint limits `[lower, upper]` of each joint.
    ///
    /// An empty list removes the limits.
    pub fn with_limits(self, limits: Vec<[f64; 2]>) -> Result<Self> {
        if !limits.is_empty() && limits.len() != self.dof() {
            return Err(Error::invalid(format!(
                "expect {} joint limits, got {}",
                self.dof(),
                limits.len()
            )));
        }
        if let Some(i) = limits.iter().position(|[lo, hi]| lo.is_nan() || hi.is_nan() || lo > hi) {
            return Err(Error::invalid(format!("joint {i} has an empty range")));
        }
        Ok(Self { limits, ..self })
    }

    /// Topology of the robot.
    pub const fn topology(&self) -> RobotTopology {
        self.config.topology()
    }

    /// Configuration of the robot.
    pub const fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Joint limits, empty if unlimited.
    pub fn limits(&self) -> &[[f64; 2]] {
        &self.limits
    }

    /// Degree of freedom.
    pub const fn dof(&self) -> usize {
        self.topology().dof()
    }

    /// Minimum and maximum reach, see [`Kinematics::reach()`].
    pub fn reach(&self) -> Option<[f64; 2]> {
        self.config.reach()
    }

    fn check_joints(&self, joints: &[f64]) -> Result<()> {
        if joints.len() != self.dof() {
            return Err(Error::JointCount { expect: self.dof(), got: joints.len() });
        }
        match joints
            .iter()
            .zip(&self.limits)
            .position(|(v, [lo, hi])| !(lo..=hi).contains(&v))
        {
            Some(joint) => Err(Error::JointLimit { joint, value: joints[joint] }),
            None => Ok(()),
        }
    }

    /// Forward kinematics.
    pub fn forward(&self, joints: &[f64]) -> Result<EePose> {
        self.check_joints(joints)?;
        self.config.forward(joints)
    }

    /// Inverse kinematics.
    ///
    /// A solution outside of the joint limits is unreachable.
    pub fn inverse(&self, target: &EePose) -> Result<Vec<f64>> {
        let joints = self.config.inverse(target)?;
        match self.check_joints(&joints) {
            Ok(()) => Ok(joints),
            Err(e) => {
                log::debug!("{} target {:?} rejected: {e}", self.topology(), target.pos);
                Err(Error::Unreachable)
            }
        }
    }

    /// Smooth joint trajectory from `start` to `end` with `n` samples.
    pub fn joint_path(&self, start: &[f64], end: &[f64], n: usize) -> Result<Vec<Vec<f64>>> {
        self.check_joints(start)?;
        self.check_joints(end)?;
        joint_path(start, end, n)
    }

    /// Joint values along the straight line from `from` to `to` with `n`
    /// samples.
    ///
    /// Fail with the first sample that cannot be solved.
    pub fn linear_path(&self, from: &EePose, to: &EePose, n: usize) -> Result<Vec<Vec<f64>>> {
        let step = if n > 1 { (n - 1) as f64 } else { 1. };
        (0..n)
            .map(|i| self.inverse(&from.lerp(to, i as f64 / step)))
            .collect()
    }
}

/// Forward kinematics of a configuration.
///
/// Fail if the configuration does not match the topology.
pub fn forward_kinematics(
    joints: &[f64],
    topology: RobotTopology,
    config: &RobotConfig,
) -> Result<EePose> {
    config.check_topology(topology)?;
    config.check()?;
    config.forward(joints)
}

/// Inverse kinematics of a configuration.
///
/// Fail if the configuration does not match the topology.
pub fn inverse_kinematics(
    target: &EePose,
    topology: RobotTopology,
    config: &RobotConfig,
) -> Result<Vec<f64>> {
    config.check_topology(topology)?;
    config.check()?;
    config.inverse(target)
}

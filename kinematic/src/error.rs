/// Result type of the solvers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors of the kinematic solvers.
///
/// The variants fall into two kinds, see [`Error::is_infeasible()`] and
/// [`Error::is_config()`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed or non-positive parameters
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Unknown topology tag, or a topology without solver
    #[error("unsupported topology: {0}")]
    UnsupportedTopology(String),
    /// Wrong length of the joint vector
    #[error("expect {expect} joint values, got {got}")]
    JointCount {
        /// Degree of freedom of the robot
        expect: usize,
        /// Length of the given vector
        got: usize,
    },
    /// Joint value outside of its limits
    #[error("joint {joint} is out of range: {value}")]
    JointLimit {
        /// Index of the joint
        joint: usize,
        /// The rejected value
        value: f64,
    },
    /// Target pose is outside of the workspace
    #[error("target is outside of the workspace")]
    Unreachable,
    /// The mechanism cannot be assembled with the given joint values
    #[error("mechanism cannot be assembled")]
    Infeasible,
}

impl Error {
    /// Return true if the error is a geometric infeasibility.
    ///
    /// These errors depend on the input value only, a sweep over many inputs
    /// can skip them and continue.
    pub const fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::Unreachable | Self::Infeasible | Self::JointLimit { .. }
        )
    }

    /// Return true if the error is caused by the configuration.
    pub const fn is_config(&self) -> bool {
        !self.is_infeasible()
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Check the lengths are positive and finite.
pub(crate) fn check_lengths<const N: usize>(names: [&str; N], values: [f64; N]) -> Result<()> {
    match names.iter().zip(values).find(|(_, v)| !(v.is_finite() && *v > 0.)) {
        Some((name, v)) => Err(Error::invalid(format!("{name} must be positive, got {v}"))),
        None => Ok(()),
    }
}

/// Assembly branch (circuit) of the four-bar linkage.
///
/// For the same crank angle, the output link can close the loop on either
/// side of the line from the output pivot to the crank joint.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Branch {
    /// Output angle `γ + α`
    #[default]
    Open,
    /// Output angle `γ - α`
    Crossed,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Crossed => write!(f, "crossed"),
        }
    }
}

/// Error for branch conversion.
#[derive(Debug)]
pub struct BranchError;

impl std::fmt::Display for BranchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid branch, expect \"open\" or \"crossed\"")
    }
}

impl std::error::Error for BranchError {}

impl std::str::FromStr for Branch {
    type Err = BranchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "crossed" => Ok(Self::Crossed),
            _ => Err(BranchError),
        }
    }
}

impl Branch {
    /// List all branches.
    pub const fn list() -> [Self; 2] {
        [Self::Open, Self::Crossed]
    }

    /// Sign of the `α` term.
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Open => 1.,
            Self::Crossed => -1.,
        }
    }

    /// The other branch.
    pub const fn other(&self) -> Self {
        match self {
            Self::Open => Self::Crossed,
            Self::Crossed => Self::Open,
        }
    }
}

//! Planar four-bar linkages.
//!
//! The loop order is `[ground, input, coupler, output]` everywhere in this
//! module.
pub use self::{fb2d::*, stat::*};
use std::f64::consts::TAU;

mod fb2d;
mod stat;

/// Type of the four-bar linkage.
///
/// Grashof linkages satisfy `s + l <= p + q` (equality included, the change
/// point case), where `s` and `l` are the shortest and the longest links.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub enum FourBarTy {
    /// Grashof double crank (Drag-link), the ground link is the shortest
    GCCC,
    /// Grashof crank rocker, the input link is the shortest
    GCRR,
    /// Grashof double rocker, the coupler link is the shortest
    GRCR,
    /// Grashof rocker crank, the output link is the shortest
    GRRC,
    /// Non-Grashof triple rocker (ground link is the longest)
    RRR1,
    /// Non-Grashof triple rocker (input link is the longest)
    RRR2,
    /// Non-Grashof triple rocker (coupler link is the longest)
    RRR3,
    /// Non-Grashof triple rocker (output link is the longest)
    RRR4,
    /// Invalid, the longest link is longer than the others together
    Invalid,
}

impl FourBarTy {
    /// Detect from four-bar loop `[ground, input, coupler, output]`.
    pub fn from_loop(fb_loop: [f64; 4]) -> Self {
        let mut sorted = fb_loop;
        sorted.sort_unstable_by(f64::total_cmp);
        let [s, p, q, l] = sorted;
        if l > s + p + q {
            return Self::Invalid;
        }
        // First link that has the length, the loop order decides the type
        let pick = |d: f64, tys: [Self; 4]| {
            fb_loop
                .iter()
                .position(|&x| x == d)
                .map_or(Self::Invalid, |i| tys[i])
        };
        if s + l <= p + q {
            pick(s, [Self::GCCC, Self::GCRR, Self::GRCR, Self::GRRC])
        } else {
            pick(l, [Self::RRR1, Self::RRR2, Self::RRR3, Self::RRR4])
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GCCC => "Grashof double crank (Drag-link, GCCC)",
            Self::GCRR => "Grashof crank rocker (GCRR)",
            Self::GRCR => "Grashof double rocker (GRCR)",
            Self::GRRC => "Grashof rocker crank (GRRC)",
            Self::RRR1 => "Non-Grashof triple rocker (RRR1)",
            Self::RRR2 => "Non-Grashof triple rocker (RRR2)",
            Self::RRR3 => "Non-Grashof triple rocker (RRR3)",
            Self::RRR4 => "Non-Grashof triple rocker (RRR4)",
            Self::Invalid => "Invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR | Self::GRCR | Self::GRRC)
    }

    /// Return true if the input link can rotate a full turn.
    pub const fn is_crank_input(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR)
    }
}

impl std::fmt::Display for FourBarTy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Angle boundary types. The input angle range where the linkage can be
/// assembled.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub enum AngleBound {
    /// Full turn
    Closed,
    /// One interval (`[start, end]`)
    Open([f64; 2]),
    /// Two separated intervals (`[[start, end]; 2]`)
    OpenBranch([[f64; 2]; 2]),
    /// Invalid
    #[default]
    Invalid,
}

impl AngleBound {
    /// Check angle bound from a planar loop `[ground, input, coupler,
    /// output]`.
    ///
    /// The crank endpoint distance to the output pivot is
    /// `L² = g² + i² - 2gi·cos θ`, the linkage assembles when
    /// `|c - o| <= L <= c + o`.
    pub fn from_planar_loop(planar_loop: [f64; 4]) -> Self {
        if !FourBarTy::from_loop(planar_loop).is_valid() {
            return Self::Invalid;
        }
        let [l1, l2, l3, l4] = planar_loop;
        // Cosine of the input angle where `L == d`
        let cos_at = |d: f64| ((l1 * l1 + l2 * l2 - d * d) / (2. * l1 * l2)).clamp(-1., 1.);
        match (l1 + l2 <= l3 + l4, (l1 - l2).abs() >= (l3 - l4).abs()) {
            (true, true) => Self::Closed,
            (true, false) => {
                let a = cos_at(l3 - l4).acos();
                Self::Open([a, TAU - a])
            }
            (false, true) => {
                let a = cos_at(l3 + l4).acos();
                Self::Open([-a, a])
            }
            (false, false) => {
                let a1 = cos_at(l3 - l4).acos();
                let a2 = cos_at(l3 + l4).acos();
                Self::OpenBranch([[a1, a2], [TAU - a2, TAU - a1]])
            }
        }
    }

    /// Check there has two intervals.
    pub fn has_branch(&self) -> bool {
        matches!(self, Self::OpenBranch(_))
    }

    /// Turn into the first interval. The closed bound is `[0, 2π]`.
    pub fn to_value(self) -> Option<[f64; 2]> {
        match self {
            Self::Closed => Some([0., TAU]),
            Self::Open(a) | Self::OpenBranch([a, _]) => Some(a),
            Self::Invalid => None,
        }
    }

    /// List all intervals.
    pub fn intervals(&self) -> Vec<[f64; 2]> {
        match *self {
            Self::Closed => vec![[0., TAU]],
            Self::Open(a) => vec![a],
            Self::OpenBranch(a) => a.to_vec(),
            Self::Invalid => Vec::new(),
        }
    }

    /// Return true if the input angle is inside the bound.
    pub fn contains(&self, angle: f64) -> bool {
        let angle = angle.rem_euclid(TAU);
        self.intervals().into_iter().any(|[start, end]| {
            let start = start.rem_euclid(TAU);
            let span = end - start + if end < start { TAU } else { 0. };
            (angle - start).rem_euclid(TAU) <= span
        })
    }

    /// Check if the data is valid.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

//! Position and velocity analysis of planar four-bar linkages.
use super::*;
use crate::{cos_law, error::check_lengths, Point, Result};

/// Planar four-bar linkage.
///
/// The fixed pivot `A` of the input link is the origin, the fixed pivot `B`
/// of the output link is at `(ground, 0)`.
///
/// # Parameters
///
/// + Ground link `ground`, from `A` to `B`
/// + Input link (crank) `input`, from `A` to `C`
/// + Coupler link `coupler`, from `C` to `D`
/// + Output link (rocker) `output`, from `B` to `D`
///
/// All lengths are positive, checked at construction.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Lengths"))]
#[derive(Clone, Debug, PartialEq)]
pub struct FourBar {
    ground: f64,
    input: f64,
    coupler: f64,
    output: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Lengths {
    ground: f64,
    input: f64,
    coupler: f64,
    output: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<Lengths> for FourBar {
    type Error = crate::Error;

    fn try_from(v: Lengths) -> Result<Self> {
        Self::new(v.ground, v.input, v.coupler, v.output)
    }
}

/// Position solution of [`FourBar`] for one input angle.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FourBarPose {
    /// Fixed pivot of the input link
    pub a: [f64; 2],
    /// Fixed pivot of the output link
    pub b: [f64; 2],
    /// Joint of the input link and the coupler
    pub c: [f64; 2],
    /// Joint of the coupler and the output link
    pub d: [f64; 2],
    /// Input angle
    pub input_angle: f64,
    /// Output angle, direction of `B -> D`
    pub output_angle: f64,
    /// Coupler angle, direction of `C -> D`
    pub coupler_angle: f64,
    /// Assembly branch of the solution
    pub branch: Branch,
}

impl FourBarPose {
    /// Joints in order `[A, B, C, D]`.
    pub fn joints(&self) -> [[f64; 2]; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Transmission angle, the interior angle between the coupler and the
    /// output link at `D`, in `[0, π]`.
    pub fn transmission_angle(&self) -> f64 {
        let [x1, y1] = self.d.to(&self.c);
        let [x2, y2] = self.d.to(&self.b);
        (x1 * y2 - y1 * x2).abs().atan2(x1 * x2 + y1 * y2)
    }
}

/// Angular velocities of [`FourBar`] for one input angle.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FourBarVel {
    /// Input angular velocity
    pub input: f64,
    /// Coupler angular velocity
    pub coupler: f64,
    /// Output angular velocity
    pub output: f64,
}

impl FourBar {
    /// Create a new linkage from link lengths.
    pub fn new(ground: f64, input: f64, coupler: f64, output: f64) -> Result<Self> {
        check_lengths(
            ["ground", "input", "coupler", "output"],
            [ground, input, coupler, output],
        )?;
        log::debug!("four-bar linkage: {ground}, {input}, {coupler}, {output}");
        Ok(Self { ground, input, coupler, output })
    }

    /// Create from a planar loop `[ground, input, coupler, output]`.
    pub fn from_loop([ground, input, coupler, output]: [f64; 4]) -> Result<Self> {
        Self::new(ground, input, coupler, output)
    }

    /// An example crank rocker.
    pub const fn example() -> Self {
        Self { ground: 90., input: 35., coupler: 70., output: 70. }
    }

    /// Length of the ground link.
    pub const fn ground(&self) -> f64 {
        self.ground
    }

    /// Length of the input link.
    pub const fn input(&self) -> f64 {
        self.input
    }

    /// Length of the coupler link.
    pub const fn coupler(&self) -> f64 {
        self.coupler
    }

    /// Length of the output link.
    pub const fn output(&self) -> f64 {
        self.output
    }

    /// Get the planar loop `[ground, input, coupler, output]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.ground, self.input, self.coupler, self.output]
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        FourBarTy::from_loop(self.planar_loop())
    }

    /// Input angle bounds of the linkage.
    pub fn angle_bound(&self) -> AngleBound {
        AngleBound::from_planar_loop(self.planar_loop())
    }

    /// Solve the positions with the input angle, on the open branch.
    ///
    /// Return `None` if the linkage cannot be assembled at this angle.
    ///
    /// ```
    /// use kinematic::FourBar;
    /// let fb = FourBar::new(4., 2., 5., 5.).unwrap();
    /// assert!(fb.solve_positions(0.).is_some());
    /// let fb = FourBar::new(20., 2., 5., 5.).unwrap();
    /// assert!(fb.solve_positions(0.).is_none());
    /// ```
    pub fn solve_positions(&self, input_angle: f64) -> Option<FourBarPose> {
        self.solve_positions_branch(input_angle, Branch::Open)
    }

    /// Solve the positions with the input angle on the specified branch.
    pub fn solve_positions_branch(&self, input_angle: f64, branch: Branch) -> Option<FourBarPose> {
        let Self { ground, input, coupler, output } = *self;
        let a = [0f64, 0.];
        let b = [ground, 0.];
        let c = a.pla(input, input_angle);
        let l = b.dist(&c);
        // `C` on top of `B` leaves the output direction undefined
        if l > coupler + output || l < (coupler - output).abs() || l < f64::EPSILON {
            log::trace!("four-bar cannot be assembled at {input_angle}");
            return None;
        }
        let gamma = b.angle_to(&c);
        let alpha = cos_law(output, l, coupler);
        let output_angle = gamma + branch.sign() * alpha;
        let d = b.pla(output, output_angle);
        let coupler_angle = c.angle_to(&d);
        Some(FourBarPose {
            a,
            b,
            c,
            d,
            input_angle,
            output_angle,
            coupler_angle,
            branch,
        })
    }

    /// Solve the angular velocities from the input angular velocity `omega`,
    /// on the open branch.
    ///
    /// Return `None` if the linkage cannot be assembled, or at the toggle
    /// positions where the coupler and the output link are collinear.
    pub fn velocity(&self, input_angle: f64, omega: f64) -> Option<FourBarVel> {
        self.velocity_branch(input_angle, omega, Branch::Open)
    }

    /// Solve the angular velocities on the specified branch.
    pub fn velocity_branch(&self, input_angle: f64, omega: f64, branch: Branch) -> Option<FourBarVel> {
        let pose = self.solve_positions_branch(input_angle, branch)?;
        let t2 = input_angle;
        let t3 = pose.coupler_angle;
        let t4 = pose.output_angle;
        let s43 = (t4 - t3).sin();
        if s43.abs() < 1e-12 {
            return None;
        }
        let v = self.input * omega;
        Some(FourBarVel {
            input: omega,
            coupler: -v * (t4 - t2).sin() / (self.coupler * s43),
            output: v * (t2 - t3).sin() / (self.output * s43),
        })
    }

    /// Sweep the input angle over `[0, 2π)` with `res` steps.
    ///
    /// Infeasible angles are kept as `None`, so the frame index matches the
    /// angle index.
    pub fn sweep(&self, res: usize) -> impl Iterator<Item = (f64, Option<FourBarPose>)> + '_ {
        self.sweep_in(0., TAU, res)
    }

    /// Sweep the input angle over `[start, end)` with `res` steps.
    pub fn sweep_in(
        &self,
        start: f64,
        end: f64,
        res: usize,
    ) -> impl Iterator<Item = (f64, Option<FourBarPose>)> + '_ {
        linspace(start, end, res).map(|t| (t, self.solve_positions(t)))
    }

    /// Feasible poses over `[0, 2π)` with `res` steps, infeasible angles are
    /// skipped.
    pub fn curve(&self, res: usize) -> Vec<FourBarPose> {
        self.sweep(res).filter_map(|(_, pose)| pose).collect()
    }
}

fn linspace(start: f64, end: f64, res: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / res as f64;
    (0..res).map(move |n| start + n as f64 * step)
}

/// Solve the positions of `geo` with the input angle, on the open branch.
///
/// This is [`FourBar::solve_positions()`] in function form.
pub fn solve_positions(geo: &FourBar, input_angle: f64) -> Option<FourBarPose> {
    geo.solve_positions(input_angle)
}

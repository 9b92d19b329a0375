//! Kinematic solvers for planar four-bar linkages and common robot
//! topologies.
//!
//! The crate is a set of pure functions over immutable configurations:
//!
//! + [`FourBar`] solves the closed-form position (and velocity) of a planar
//!   four-bar linkage for a given crank angle.
//! + [`SliderCrank`] does the same for the slider-crank mechanism.
//! + [`Robot`] converts between joint space and task space for the
//!   [`RobotTopology`] variants.
//!
//! ```
//! use kinematic::*;
//! let fb = FourBar::new(4., 2., 5., 5.).unwrap();
//! let pose = fb.solve_positions(0.).unwrap();
//! assert_eq!(pose.c, [2., 0.]);
//!
//! let robot = Robot::example(RobotTopology::Scara);
//! let joints = robot.inverse(&EePose::new([0.3, 0.2, 0.1])).unwrap();
//! let pose = robot.forward(&joints).unwrap();
//! assert!((pose.pos[0] - 0.3).abs() < 1e-9);
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
pub use crate::{error::*, fb::*, point::*, robot::*, slider::*};
#[doc(no_inline)]
pub use nalgebra as na;

#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
mod error;
pub mod fb;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
mod point;
pub mod robot;
pub mod slider;
#[cfg(test)]
mod tests;

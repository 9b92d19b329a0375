use crate::*;
use approx::assert_abs_diff_eq;
use std::f64::consts::{FRAC_PI_2, TAU};

fn grid(lo: f64, hi: f64, n: usize) -> impl Iterator<Item = f64> + Clone {
    (0..n).map(move |i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
}

#[test]
fn four_bar_scenario() {
    let fb = FourBar::new(4., 2., 5., 5.).unwrap();
    let pose = solve_positions(&fb, 0.).unwrap();
    assert_eq!(pose.b.dist(&pose.c), 2.);
    // γ = π, cos α = 0.2
    let alpha = 0.2f64.acos();
    assert_abs_diff_eq!(pose.d[0], 4. - 5. * alpha.cos(), epsilon = 1e-12);
    assert_abs_diff_eq!(pose.d[1], -5. * alpha.sin(), epsilon = 1e-12);
    assert_eq!(pose.input_angle, 0.);
    assert_eq!(pose.branch, Branch::Open);
}

#[test]
fn four_bar_gaps_are_not_errors() {
    // Triple rocker, a full turn has infeasible frames in between
    let fb = FourBar::new(4., 3., 2., 2.).unwrap();
    assert!(!fb.ty().is_grashof());
    let (ok, gap): (Vec<_>, Vec<_>) = fb.sweep(72).partition(|(_, p)| p.is_some());
    assert!(!ok.is_empty());
    assert!(!gap.is_empty());
}

#[test]
fn four_bar_linkage_closes() {
    for fb in [
        FourBar::example(),
        FourBar::new(4., 2., 5., 5.).unwrap(),
        FourBar::new(1., 2., 2.5, 2.).unwrap(),
    ] {
        for pose in fb.curve(120) {
            assert_abs_diff_eq!(pose.a.dist(&pose.c), fb.input(), epsilon = 1e-9);
            assert_abs_diff_eq!(pose.c.dist(&pose.d), fb.coupler(), epsilon = 1e-9);
            assert_abs_diff_eq!(pose.b.dist(&pose.d), fb.output(), epsilon = 1e-9);
        }
    }
}

#[test]
fn arm6_round_trip_in_workspace() {
    let robot = Robot::example(RobotTopology::Cartesian6Dof);
    for x in grid(0.2, 0.6, 5) {
        for y in grid(-0.3, 0.3, 5) {
            for z in grid(0., 0.5, 5) {
                let target = EePose::new([x, y, z]);
                let joints = robot.inverse(&target).unwrap();
                let pose = robot.forward(&joints).unwrap();
                assert!(pose.dist(&target) < 1e-6, "{target:?} -> {pose:?}");
            }
        }
    }
}

#[test]
fn scara_round_trip_in_workspace() {
    let config = RobotConfig::example(RobotTopology::Scara);
    for r in grid(0.1, 0.5, 5) {
        for a in grid(0., TAU, 9) {
            for z in grid(0., 0.4, 3) {
                let target = EePose::new([r * a.cos(), r * a.sin(), z]);
                let joints = inverse_kinematics(&target, RobotTopology::Scara, &config).unwrap();
                let pose = forward_kinematics(&joints, RobotTopology::Scara, &config).unwrap();
                assert!(pose.dist(&target) < 1e-6, "{target:?} -> {pose:?}");
            }
        }
    }
}

#[test]
fn delta_round_trip_in_workspace() {
    let robot = Robot::example(RobotTopology::Delta);
    let mut reached = 0;
    // Up to the base plane and above it
    for x in grid(-0.1, 0.1, 5) {
        for y in grid(-0.1, 0.1, 5) {
            for z in grid(-0.35, 0.2, 12) {
                let target = EePose::new([x, y, z]);
                match robot.inverse(&target) {
                    Ok(joints) => {
                        let pose = robot.forward(&joints).unwrap();
                        assert!(pose.dist(&target) < 1e-6, "{target:?} -> {pose:?}");
                        reached += 1;
                    }
                    Err(err) => assert_eq!(err, Error::Unreachable, "{target:?}"),
                }
            }
        }
    }
    assert!(reached > 0);
    let target = EePose::new([0., 0., 0.2]);
    assert_eq!(robot.inverse(&target), Err(Error::Unreachable));
}

#[test]
fn linear_xyz_exact() {
    let robot = Robot::example(RobotTopology::LinearXyz);
    for x in grid(0., 0.6, 4) {
        for y in grid(0., 0.4, 4) {
            for z in grid(0., 0.3, 4) {
                let target = EePose::new([x, y, z]);
                let joints = robot.inverse(&target).unwrap();
                assert_eq!(joints, [x, y, z]);
                assert_eq!(robot.forward(&joints).unwrap().pos, target.pos);
            }
        }
    }
    // Outside of the travel
    assert_eq!(robot.inverse(&EePose::new([0.7, 0., 0.])), Err(Error::Unreachable));
    assert!(matches!(
        robot.forward(&[0., 0., -0.1]),
        Err(Error::JointLimit { joint: 2, .. })
    ));
}

#[test]
fn linear_xyz_travel_in_free_functions() {
    let topology = RobotTopology::LinearXyz;
    let config = RobotConfig::example(topology);
    let target = EePose::new([0.3, 0.2, 0.1]);
    let joints = inverse_kinematics(&target, topology, &config).unwrap();
    assert_eq!(joints, [0.3, 0.2, 0.1]);
    assert_eq!(forward_kinematics(&joints, topology, &config).unwrap().pos, target.pos);
    let far = EePose::new([1e6, -5., 5.]);
    assert_eq!(inverse_kinematics(&far, topology, &config), Err(Error::Unreachable));
    assert!(matches!(
        forward_kinematics(&[0.7, 0., 0.], topology, &config),
        Err(Error::JointLimit { joint: 0, .. })
    ));
}

#[test]
fn unreachable_is_infeasible() {
    for topology in RobotTopology::list() {
        let robot = Robot::example(topology);
        let err = robot.inverse(&EePose::new([5., 5., 5.])).unwrap_err();
        assert_eq!(err, Error::Unreachable, "{topology}");
        assert!(err.is_infeasible());
    }
}

#[test]
fn stateless_solvers() {
    let robot = Robot::example(RobotTopology::Delta);
    let a = robot.forward(&[0.1, 0.2, 0.3]);
    let b = robot.forward(&[0.1, 0.2, 0.3]);
    assert_eq!(a, b);
    let fb = FourBar::example();
    assert_eq!(fb.solve_positions(FRAC_PI_2), fb.solve_positions(FRAC_PI_2));
}

#[test]
fn share_between_threads() {
    fn is_send_sync<T: Send + Sync>() {}
    is_send_sync::<FourBar>();
    is_send_sync::<Robot>();
    is_send_sync::<RobotConfig>();
    let robot = Robot::example(RobotTopology::Scara);
    let expect = robot.forward(&[0.1, 0.2, 0.05, 0.]).unwrap();
    std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| s.spawn(|| robot.forward(&[0.1, 0.2, 0.05, 0.]).unwrap()))
            .collect::<Vec<_>>();
        for h in handles {
            assert_eq!(h.join().unwrap(), expect);
        }
    });
}

#[test]
fn joint_path_reaches_target() {
    let robot = Robot::example(RobotTopology::Cartesian6Dof);
    let start = robot.inverse(&EePose::new([0.4, -0.2, 0.2])).unwrap();
    let end = robot.inverse(&EePose::new([0.3, 0.3, 0.4])).unwrap();
    let path = robot.joint_path(&start, &end, 11).unwrap();
    assert_eq!(path.len(), 11);
    let last = robot.forward(&path[10]).unwrap();
    assert!(last.dist(&EePose::new([0.3, 0.3, 0.4])) < 1e-9);
    assert!(robot.joint_path(&start, &end[..5], 11).is_err());
}

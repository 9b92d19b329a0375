use super::{logger::Logger, CliErr};
use kinematic::{na::UnitQuaternion, EePose, JointKind, Robot, RobotConfig, RobotTopology};
use std::{io::Write, path::PathBuf};

#[derive(clap::Args)]
pub(crate) struct RobotArgs {
    /// Robot file in RON format, default to an example robot
    ///
    /// The file has the configuration and the optional joint limits (in
    /// radians and meters), e.g. `(config: Scara((base: 0.4, l1: 0.3, l2:
    /// 0.25)), limits: [(-3.0, 3.0), (-2.5, 2.5), (0.0, 0.4), (-3.0, 3.0)])`
    #[clap(long)]
    cfg: Option<PathBuf>,
    /// Revolute joints and orientation angles in degrees
    #[clap(long)]
    deg: bool,
}

#[derive(clap::Args)]
pub(crate) struct FkCfg {
    /// Robot topology
    #[clap(value_enum)]
    topology: RobotTopology,
    #[clap(flatten)]
    robot: RobotArgs,
    /// Joint values, from the base to the tool
    #[clap(required = true, allow_negative_numbers = true)]
    joints: Vec<f64>,
}

#[derive(clap::Args)]
pub(crate) struct IkCfg {
    /// Robot topology
    #[clap(value_enum)]
    topology: RobotTopology,
    #[clap(flatten)]
    robot: RobotArgs,
    /// Target X
    #[clap(allow_negative_numbers = true)]
    x: f64,
    /// Target Y
    #[clap(allow_negative_numbers = true)]
    y: f64,
    /// Target Z
    #[clap(allow_negative_numbers = true)]
    z: f64,
    /// Target orientation in roll, pitch and yaw
    #[clap(long, num_args = 3, value_names = ["ROLL", "PITCH", "YAW"], allow_negative_numbers = true)]
    rpy: Option<Vec<f64>>,
}

#[derive(serde::Deserialize)]
struct RobotFile {
    config: RobotConfig,
    #[serde(default)]
    limits: Vec<[f64; 2]>,
}

#[derive(serde::Serialize)]
struct PoseReport {
    x: f64,
    y: f64,
    z: f64,
    roll: Option<f64>,
    pitch: Option<f64>,
    yaw: Option<f64>,
}

#[derive(serde::Serialize)]
struct JointReport {
    joints: Vec<f64>,
}

fn load(topology: RobotTopology, path: Option<PathBuf>) -> Result<Robot, CliErr> {
    let Some(path) = path else {
        return Ok(Robot::example(topology));
    };
    let RobotFile { config, limits } = ron::from_str(&std::fs::read_to_string(&path)?)?;
    let robot = Robot::new(topology, config)?.with_limits(limits)?;
    log::info!("load {}", path.display());
    Ok(robot)
}

fn map_revolute(topology: RobotTopology, joints: &mut [f64], f: fn(f64) -> f64) {
    for (v, kind) in joints.iter_mut().zip(topology.joint_kinds()) {
        if *kind == JointKind::Revolute {
            *v = f(*v);
        }
    }
}

pub(super) fn fk<W: Write>(cfg: FkCfg, w: &mut W) -> Result<(), CliErr> {
    let FkCfg { topology, robot: RobotArgs { cfg, deg }, mut joints } = cfg;
    let robot = load(topology, cfg)?;
    if deg {
        map_revolute(topology, &mut joints, f64::to_radians);
    }
    let EePose { pos: [x, y, z], rot } = robot.forward(&joints)?;
    let angles = rot.map(|rot| {
        let (r, p, y) = rot.euler_angles();
        [r, p, y].map(|a| if deg { a.to_degrees() } else { a })
    });
    let mut logger = Logger::new(w);
    logger.top_title(&format!("{topology}.fk"))?;
    logger.log(PoseReport {
        x,
        y,
        z,
        roll: angles.map(|a| a[0]),
        pitch: angles.map(|a| a[1]),
        yaw: angles.map(|a| a[2]),
    })?;
    Ok(())
}

pub(super) fn ik<W: Write>(cfg: IkCfg, w: &mut W) -> Result<(), CliErr> {
    let IkCfg { topology, robot: RobotArgs { cfg, deg }, x, y, z, rpy } = cfg;
    let robot = load(topology, cfg)?;
    let mut target = EePose::new([x, y, z]);
    if let Some(rpy) = rpy {
        let [r, p, y] = <[f64; 3]>::try_from(rpy)
            .map_err(|_| CliErr::Args("expect roll, pitch and yaw".to_string()))?
            .map(|a| if deg { a.to_radians() } else { a });
        target = target.with_rot(UnitQuaternion::from_euler_angles(r, p, y));
    }
    let mut joints = robot.inverse(&target)?;
    if deg {
        map_revolute(topology, &mut joints, f64::to_degrees);
    }
    let mut logger = Logger::new(w);
    logger.top_title(&format!("{topology}.ik"))?;
    logger.log(JointReport { joints })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::{run_args, CliErr};
    use kinematic::Error;

    #[test]
    fn fk_degrees() {
        let s = run_args(&["fk", "scara", "--deg", "90", "0", "0.1", "0"]).unwrap();
        assert_eq!(
            s,
            "[scara.fk]\nx=0.0000\ny=0.5500\nz=0.3000\nroll=0.0000\npitch=0.0000\nyaw=90.0000\n"
        );
        // Prismatic joints are not converted
        let s = run_args(&["fk", "linear-xyz", "--deg", "0.1", "0.2", "0.3"]).unwrap();
        assert!(s.contains("x=0.1000\ny=0.2000\nz=0.3000\n"));
    }

    #[test]
    fn ik_report() {
        let s = run_args(&["ik", "linear-xyz", "0.1", "0.2", "0.3"]).unwrap();
        assert_eq!(s, "[linear-xyz.ik]\njoints=[0.1000, 0.2000, 0.3000]\n");
        let s = run_args(&["ik", "cartesian-6dof", "0.5", "-0.2", "0.3", "--rpy", "0", "90", "0", "--deg"]);
        assert!(s.unwrap().starts_with("[cartesian-6dof.ik]\njoints=["));
    }

    #[test]
    fn solver_errors() {
        assert!(matches!(
            run_args(&["ik", "linear-xyz", "0.7", "0", "0"]),
            Err(CliErr::Kin(Error::Unreachable))
        ));
        assert!(matches!(
            run_args(&["fk", "cartesian-6dof", "0", "0", "0", "0", "0"]),
            Err(CliErr::Kin(Error::JointCount { expect: 6, got: 5 }))
        ));
        assert!(matches!(run_args(&["fk", "scara"]), Err(CliErr::Args(_))));
    }

    #[test]
    fn config_file() {
        let dir = std::env::temp_dir().join(format!("kinematic-cli-robot-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scara.ron");
        std::fs::write(
            &path,
            "(config: Scara((base: 0.5, l1: 0.3, l2: 0.2)), limits: [(-1.0, 1.0), (-1.0, 1.0), (0.0, 0.4), (-3.0, 3.0)])",
        )
        .unwrap();
        let cfg = path.to_str().unwrap();
        let s = run_args(&["fk", "scara", "--cfg", cfg, "0", "0", "0.1", "0"]).unwrap();
        assert!(s.contains("x=0.5000\ny=0.0000\nz=0.4000\n"));
        assert!(matches!(
            run_args(&["fk", "scara", "--cfg", cfg, "0", "1.5", "0.1", "0"]),
            Err(CliErr::Kin(Error::JointLimit { joint: 1, .. }))
        ));
        assert!(matches!(
            run_args(&["fk", "delta", "--cfg", cfg, "0", "0", "0"]),
            Err(CliErr::Kin(Error::InvalidConfig(_)))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

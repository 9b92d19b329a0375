use super::{logger::Logger, CliErr};
use kinematic::{plot, Branch, FourBar};
use std::{io::Write, path::PathBuf};

#[derive(clap::Args)]
pub(crate) struct LinkageCfg {
    /// Linkage file in RON format, default to an example crank rocker
    file: Option<PathBuf>,
    /// Number of the input angles in a full turn
    #[clap(long, default_value_t = 360)]
    res: usize,
    /// Solve the pose at this input angle
    #[clap(long, allow_negative_numbers = true)]
    at: Option<f64>,
    /// Assembly branch of the pose
    #[clap(long, value_enum, default_value_t = Branch::Open)]
    branch: Branch,
    /// Input and output angles in degrees
    #[clap(long)]
    deg: bool,
    /// Write the sweep to a CSV file
    #[clap(long)]
    csv: Option<PathBuf>,
    /// Plot the sweep to an SVG file
    #[clap(long)]
    svg: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct Sweep<'a> {
    ty: &'a str,
    grashof: bool,
    bound: Vec<[f64; 2]>,
    res: usize,
    feasible: usize,
}

#[derive(serde::Serialize)]
struct Pose {
    input: f64,
    branch: Branch,
    c: [f64; 2],
    d: [f64; 2],
    output: f64,
    coupler: f64,
    transmission: f64,
}

pub(super) fn linkage<W: Write>(cfg: LinkageCfg, w: &mut W) -> Result<(), CliErr> {
    let LinkageCfg { file, res, at, branch, deg, csv, svg } = cfg;
    if res == 0 {
        return Err(CliErr::Args("resolution must be positive".to_string()));
    }
    let (title, fb) = match &file {
        Some(path) => {
            let s = std::fs::read_to_string(path)?;
            (path.display().to_string(), ron::from_str::<FourBar>(&s)?)
        }
        None => ("example".to_string(), FourBar::example()),
    };
    log::info!("{title}: {fb:?}");
    let to_out = |a: f64| if deg { a.to_degrees() } else { a };
    let ty = fb.ty();
    let sweep = Sweep {
        ty: ty.name(),
        grashof: ty.is_grashof(),
        bound: (fb.angle_bound().intervals().into_iter())
            .map(|[a, b]| [to_out(a), to_out(b)])
            .collect(),
        res,
        feasible: fb.curve(res).len(),
    };
    let mut logger = Logger::new(w);
    logger.top_title(&title)?;
    logger.log(&fb)?;
    logger.title("sweep")?;
    logger.log(&sweep)?;
    if let Some(at) = at {
        let input = if deg { at.to_radians() } else { at };
        logger.title("pose")?;
        match fb.solve_positions_branch(input, branch) {
            Some(pose) => logger.log(Pose {
                input: to_out(pose.input_angle),
                branch,
                c: pose.c,
                d: pose.d,
                output: to_out(pose.output_angle),
                coupler: to_out(pose.coupler_angle),
                transmission: to_out(pose.transmission_angle()),
            })?,
            None => logger.line("feasible", false)?,
        }
    }
    if let Some(path) = csv {
        std::fs::write(&path, kinematic::csv::sweep_csv(&fb, res)?)?;
        log::info!("write {}", path.display());
    }
    if let Some(path) = svg {
        let backend = plot::SVGBackend::new(&path, (800, 800));
        plot::plot_sweep(backend, "Four-bar Sweep", &fb, res)?;
        log::info!("write {}", path.display());
    }
    Ok(())
}

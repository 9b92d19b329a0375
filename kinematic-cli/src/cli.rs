use std::io::Write;

mod linkage;
mod logger;
mod robot;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about)]
pub(crate) struct Entry {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Sweep a four-bar linkage over a full turn of the input link
    Linkage(linkage::LinkageCfg),
    /// Forward kinematics, joint values to the end-effector pose
    Fk(robot::FkCfg),
    /// Inverse kinematics, the end-effector position to joint values
    Ik(robot::IkCfg),
}

pub(crate) enum CliErr {
    // Reading or writing file error
    Io(std::io::Error),
    // Deserialization error
    Ron(ron::error::SpannedError),
    // CSV or SVG output error
    Output(Box<dyn std::error::Error>),
    // Solver error
    Kin(kinematic::Error),
    // Invalid arguments
    Args(String),
}

impl std::fmt::Display for CliErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "file error: {e}"),
            Self::Ron(e) => write!(f, "ron deserialization error: {e}"),
            Self::Output(e) => write!(f, "output error: {e}"),
            Self::Kin(e) => write!(f, "{e}"),
            Self::Args(e) => write!(f, "invalid arguments: {e}"),
        }
    }
}

impl std::fmt::Debug for CliErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl From<std::io::Error> for CliErr {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ron::error::SpannedError> for CliErr {
    fn from(e: ron::error::SpannedError) -> Self {
        Self::Ron(e)
    }
}

impl From<Box<dyn std::error::Error>> for CliErr {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        Self::Output(e)
    }
}

impl From<kinematic::Error> for CliErr {
    fn from(e: kinematic::Error) -> Self {
        Self::Kin(e)
    }
}

impl Entry {
    pub(super) fn main() {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        // `RUST_LOG` overrides the default level
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Warn)
            .parse_default_env()
            .init();
        register_panic_hook();
        let res = entry.run(&mut std::io::stdout().lock());
        if let Err(e) = res {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    fn run<W: Write>(self, w: &mut W) -> Result<(), CliErr> {
        match self.cmd {
            Cmd::Linkage(cfg) => linkage::linkage(cfg, w),
            Cmd::Fk(cfg) => robot::fk(cfg, w),
            Cmd::Ik(cfg) => robot::ik(cfg, w),
        }
    }
}

fn register_panic_hook() {
    // Print panic messages without stack trace
    std::panic::set_hook(Box::new(|info| {
        match info.payload().downcast_ref::<&str>() {
            Some(s) => eprintln!("{s}"),
            None => eprintln!("{info}"),
        }
        std::process::exit(1);
    }));
}

#[cfg(test)]
fn run_args(args: &[&str]) -> Result<String, CliErr> {
    let args = std::iter::once(APP_NAME).chain(args.iter().copied());
    let entry = <Entry as clap::Parser>::try_parse_from(args)
        .map_err(|e| CliErr::Args(e.to_string()))?;
    let mut buf = Vec::new();
    entry.run(&mut buf)?;
    String::from_utf8(buf).map_err(|e| CliErr::Args(e.to_string()))
}

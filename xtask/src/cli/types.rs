use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    #[value(name = "release")]
    Release,
    #[value(name = "debug")]
    Debug,
}

impl Profile {
    pub fn id(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Debug => "debug",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "xtask")]
#[command(about = "Comi build script: compile the crate, optionally package the installer")]
pub struct Cli {
    /// Type of build to perform.
    #[arg(value_enum)]
    pub build_type: Profile,

    /// Build the installer after compiling the Rust project.
    #[arg(long)]
    pub installer: bool,

    #[arg(
        long,
        value_name = "DIR",
        help = "Project root. Defaults to the directory containing the xtask crate."
    )]
    pub root: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Manifest to read the version from. Defaults to <root>/Cargo.toml."
    )]
    pub manifest: Option<PathBuf>,

    #[arg(
        long = "installer-script",
        value_name = "PATH",
        help = "Inno Setup script. Defaults to <root>/InstallerScripts/ComiInstallerScript.iss."
    )]
    pub installer_script: Option<PathBuf>,

    #[arg(
        long = "define-symbol",
        value_name = "NAME",
        default_value = crate::util::tools::DEFAULT_DEFINE_SYMBOL,
        help = "Preprocessor symbol that receives the version (passed as /D<NAME>=<version>)."
    )]
    pub define_symbol: String,

    /// Print the commands that would run without spawning them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors.
    #[arg(short, long, conflicts_with_all = ["verbose", "dry_run"])]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

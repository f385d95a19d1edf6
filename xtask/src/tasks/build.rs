//! Compile the crate, then optionally package the Inno Setup installer.
//!
//! Each step gates the next: a manifest error stops before the build, and a
//! failed build never reaches the installer.

use crate::cli::Profile;
use crate::util::manifest::{self, ManifestError};
use crate::util::process::{CommandRunner, Invocation, ProcessError};
use crate::util::repo::Layout;
use crate::util::tools::Tools;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildRequest {
    pub profile: Profile,
    pub installer: bool,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Error reading {}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },

    #[error("Cargo build failed.")]
    BuildFailure(#[source] ProcessError),

    #[error("{program} not found. Is Inno Setup installed and added to your PATH?")]
    ToolNotFound { program: String },

    #[error("{program} failed.")]
    InstallerFailure {
        program: String,
        #[source]
        source: ProcessError,
    },
}

impl BuildError {
    /// Process exit status for this failure. Usage errors exit with 2 from
    /// clap before anything here runs.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ManifestRead { .. } => 3,
            Self::BuildFailure(_) => 4,
            Self::ToolNotFound { .. } => 5,
            Self::InstallerFailure { .. } => 6,
        }
    }
}

pub fn run(
    request: BuildRequest,
    layout: &Layout,
    tools: &Tools,
    runner: &mut dyn CommandRunner,
) -> Result<(), BuildError> {
    let version = read_version(layout)?;
    info!("Crate version: {version}");

    run_build(request.profile, layout, tools, runner)?;

    if request.installer {
        run_installer(&version, layout, tools, runner)?;
    }
    Ok(())
}

pub fn read_version(layout: &Layout) -> Result<String, BuildError> {
    manifest::read_version(&layout.manifest).map_err(|source| BuildError::ManifestRead {
        path: layout.manifest.clone(),
        source,
    })
}

pub fn run_build(
    profile: Profile,
    layout: &Layout,
    tools: &Tools,
    runner: &mut dyn CommandRunner,
) -> Result<(), BuildError> {
    info!("Building Rust project [{}]...", profile.id());
    runner
        .execute(&build_invocation(profile, layout, tools))
        .map_err(BuildError::BuildFailure)
}

pub fn run_installer(
    version: &str,
    layout: &Layout,
    tools: &Tools,
    runner: &mut dyn CommandRunner,
) -> Result<(), BuildError> {
    info!("Building installer with version: {version}");
    let invocation = installer_invocation(version, layout, tools);
    runner.execute(&invocation).map_err(|e| match e {
        ProcessError::NotFound { program } => BuildError::ToolNotFound { program },
        source => BuildError::InstallerFailure {
            program: invocation.program_name(),
            source,
        },
    })
}

pub fn build_invocation(profile: Profile, layout: &Layout, tools: &Tools) -> Invocation {
    let inv = Invocation::new(&tools.compiler, &layout.root).arg("build");
    match profile {
        Profile::Release => inv.arg("--release"),
        Profile::Debug => inv,
    }
}

pub fn installer_invocation(version: &str, layout: &Layout, tools: &Tools) -> Invocation {
    Invocation::new(&tools.installer, &layout.root)
        .arg(&layout.installer_script)
        .arg(format!("/D{}={version}", tools.define_symbol))
}

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "Cargo.toml";
const INSTALLER_SCRIPT: &str = "InstallerScripts/ComiInstallerScript.iss";

pub fn repo_root() -> Result<PathBuf> {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask is expected at <repo>/xtask")
}

/// Fixed project paths, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub installer_script: PathBuf,
}

impl Layout {
    pub fn new(root: PathBuf) -> Self {
        Self {
            manifest: root.join(MANIFEST_FILE),
            installer_script: root.join(INSTALLER_SCRIPT),
            root,
        }
    }

    /// Resolves the layout from CLI overrides, falling back to the repo root.
    ///
    /// Relative overrides are taken relative to the current directory and
    /// made absolute here, since the external tools run inside `root`.
    pub fn resolve(
        root: Option<PathBuf>,
        manifest: Option<PathBuf>,
        installer_script: Option<PathBuf>,
    ) -> Result<Self> {
        let cwd = env::current_dir().context("Reading current directory")?;
        Ok(Self::resolve_in(&cwd, repo_root()?, root, manifest, installer_script))
    }

    fn resolve_in(
        cwd: &Path,
        default_root: PathBuf,
        root: Option<PathBuf>,
        manifest: Option<PathBuf>,
        installer_script: Option<PathBuf>,
    ) -> Self {
        let root = root.map_or(default_root, |r| cwd.join(r));
        let mut layout = Self::new(root);
        if let Some(m) = manifest {
            layout.manifest = cwd.join(m);
        }
        if let Some(s) = installer_script {
            layout.installer_script = cwd.join(s);
        }
        layout
    }
}

//! Reads the crate version out of `Cargo.toml`.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read manifest")]
    Io(#[from] io::Error),
    #[error("manifest is not valid TOML")]
    Parse(#[from] toml::de::Error),
    #[error("no `package.version` string in manifest")]
    MissingVersion,
}

#[derive(Deserialize)]
struct Manifest {
    package: Option<Package>,
    workspace: Option<Workspace>,
}

#[derive(Deserialize)]
struct Package {
    version: Option<VersionField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VersionField {
    Literal(String),
    // `version.workspace = true`
    Inherited { workspace: bool },
}

#[derive(Deserialize)]
struct Workspace {
    package: Option<WorkspacePackage>,
}

#[derive(Deserialize)]
struct WorkspacePackage {
    version: Option<String>,
}

impl Manifest {
    fn into_version(self) -> Option<String> {
        let Self { package, workspace } = self;
        let inherited = || workspace?.package?.version;
        match package {
            Some(Package {
                version: Some(VersionField::Literal(v)),
            }) => Some(v),
            Some(Package {
                version: Some(VersionField::Inherited { workspace: true }),
            }) => inherited(),
            _ => None,
        }
    }
}

pub fn read_version(path: &Path) -> Result<String, ManifestError> {
    let text = fs::read_to_string(path)?;
    parse_version(&text)
}

pub fn parse_version(text: &str) -> Result<String, ManifestError> {
    let manifest: Manifest = toml::from_str(text)?;
    manifest.into_version().ok_or(ManifestError::MissingVersion)
}

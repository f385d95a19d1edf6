use std::env;
use std::ffi::OsString;

pub const DEFAULT_DEFINE_SYMBOL: &str = "MyAppVersion";

const DEFAULT_COMPILER: &str = "cargo";
const DEFAULT_INSTALLER: &str = "iscc";

/// External programs the build drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tools {
    pub compiler: OsString,
    pub installer: OsString,
    pub define_symbol: String,
}

impl Tools {
    /// `CARGO` is what cargo itself exports to subcommands, so `cargo xtask`
    /// keeps using the same toolchain. `ISCC` points at a specific Inno Setup
    /// compiler when it is not on PATH.
    pub fn from_env(define_symbol: String) -> Self {
        Self::from_vars(env::var_os("CARGO"), env::var_os("ISCC"), define_symbol)
    }

    fn from_vars(
        compiler: Option<OsString>,
        installer: Option<OsString>,
        define_symbol: String,
    ) -> Self {
        Self {
            compiler: non_empty(compiler).unwrap_or_else(|| DEFAULT_COMPILER.into()),
            installer: non_empty(installer).unwrap_or_else(|| DEFAULT_INSTALLER.into()),
            define_symbol,
        }
    }
}

fn non_empty(v: Option<OsString>) -> Option<OsString> {
    v.filter(|s| !s.is_empty())
}

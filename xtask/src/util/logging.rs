use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Installs the stderr logger. `RUST_LOG` takes precedence over `level`.
///
/// Lines keep the `[info]`/`[warn]` tag style of the rest of the tooling
/// output rather than env_logger's timestamped default.
pub fn init(level: LevelFilter) {
    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}",
                record.level().as_str().to_ascii_lowercase(),
                record.args()
            )
        })
        .init();
}

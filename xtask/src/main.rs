use clap::Parser;
use std::process::ExitCode;

mod app;
mod cli;
mod tasks;
mod util;

fn main() -> ExitCode {
    let cli = crate::cli::Cli::parse();
    crate::util::logging::init(cli.log_level());
    match crate::app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(crate::app::exit_code(&e))
        }
    }
}

use anyhow::Result;

pub fn run(cli: crate::cli::Cli) -> Result<()> {
    let layout = crate::util::repo::Layout::resolve(cli.root, cli.manifest, cli.installer_script)?;
    let tools = crate::util::tools::Tools::from_env(cli.define_symbol);
    let request = crate::tasks::build::BuildRequest {
        profile: cli.build_type,
        installer: cli.installer,
    };

    log::debug!("Repo: {}", layout.root.display());
    log::debug!("Manifest: {}", layout.manifest.display());

    let mut runner: Box<dyn crate::util::process::CommandRunner> = if cli.dry_run {
        Box::new(crate::util::process::DryRunner)
    } else {
        Box::new(crate::util::process::SystemRunner)
    };
    crate::tasks::build::run(request, &layout, &tools, runner.as_mut())?;

    log::info!("{} build finished", request.profile.id());
    Ok(())
}

/// Exit status for a failed run; anything outside the build taxonomy is 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<crate::tasks::build::BuildError>()
        .map_or(1, crate::tasks::build::BuildError::exit_code)
}

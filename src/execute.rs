use std::process::ExitCode;
use anyhow::{Context, Result};
use ring_dt::{
    link, load_template, unlink, Error, Host, Layout, LinkOutcome, PackageGenerator, Progress,
    Spinner, VersionPropagator,
};
use crate::cli::{RingCommand, SetCommand, CLI};

/// Exit status of `link` when no package matches the host platform.
pub const UNSUPPORTED_PLATFORM_EXIT: u8 = 3;

pub fn execute(cli: CLI, spinner: &Spinner) -> Result<ExitCode> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let layout = Layout::load(&root)?;

    match cli.command {
        RingCommand::Build => {
            let _span = tracing::info_span!("build").entered();
            execute_build(&layout, spinner)
        }
        RingCommand::Link => {
            let _span = tracing::info_span!("link").entered();
            execute_link(&layout, &Host::detect())
        }
        RingCommand::Unlink => {
            let _span = tracing::info_span!("unlink").entered();
            execute_unlink(&layout, &Host::detect())
        }
        RingCommand::Set { property: SetCommand::Version { value } } => {
            let _span = tracing::info_span!("version").entered();
            execute_set_version(&layout, &value, spinner)
        }
    }
}

pub fn execute_build(layout: &Layout, spinner: &Spinner) -> Result<ExitCode> {
    spinner.start("Building ...");
    let result = load_template(layout)
        .and_then(|template| {
            PackageGenerator::new(layout)
                .with_progress(spinner)
                .generate(&template, &layout.config.targets)
        });

    match result {
        Ok(packages) => {
            spinner.succeed(&format!("{} packages generated", packages.len()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            spinner.fail("Build failed");
            Err(e).context("Could not generate platform packages")
        }
    }
}

pub fn execute_link(layout: &Layout, host: &Host) -> Result<ExitCode> {
    match link(layout, host) {
        Ok(LinkOutcome::AlreadyLinked(path)) => {
            tracing::info!("Already linked");
            tracing::debug!("{} exists", path.display());
        }
        Ok(LinkOutcome::Created(path)) => {
            tracing::info!("Link successfully created");
            tracing::debug!("{} -> {}", path.display(), layout.executable_path().display());
        }
        Err(Error::UnsupportedPlatform { platform, arch }) => {
            tracing::warn!("Unsupported platform: {}-{}", platform, arch);
            return Ok(ExitCode::from(UNSUPPORTED_PLATFORM_EXIT));
        }
        Err(e) => {
            return Err(e).context("Could not link the local executable");
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn execute_unlink(layout: &Layout, host: &Host) -> Result<ExitCode> {
    if unlink(layout, host)? {
        tracing::info!("Link removed");
    } else {
        tracing::info!("Not linked");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn execute_set_version(layout: &Layout, value: &str, spinner: &Spinner) -> Result<ExitCode> {
    spinner.start("Updating versions ...");
    let result = VersionPropagator::new(layout)
        .with_progress(spinner)
        .propagate(&layout.config.base_name, value);

    match result {
        Ok(written) => {
            spinner.succeed(&format!("{} manifests updated", written.len()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            spinner.fail("Version update failed");
            Err(e).context("Could not propagate version")
        }
    }
}

use std::path::{Path, PathBuf};
use crate::config::Layout;
use crate::error::{Error, Result};
use crate::manifest::MANIFEST_FILE;
use crate::platform::Host;
use crate::util::exists;

/// Result of a successful [`link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new symlink was created at the given path.
    Created(PathBuf),
    /// Something already exists at the given path, it was left untouched.
    AlreadyLinked(PathBuf),
}

/// Path of the executable inside the platform package of `host`.
pub fn link_path(layout: &Layout, host: &Host) -> PathBuf {
    let name = format!("{}{}", layout.config.exe_name, host.exe_suffix());
    layout.platform_package_dir(&host.target()).join("bin").join(name)
}

/// Path of the locally built executable for `host`.
pub fn executable_path(layout: &Layout, host: &Host) -> PathBuf {
    let mut path = layout.executable_path().into_os_string();
    path.push(host.exe_suffix());
    PathBuf::from(path)
}

/// Links the locally built executable into the platform package of `host`.
///
/// # Errors
/// [`Error::UnsupportedPlatform`] when no package was generated for `host`.
pub fn link(layout: &Layout, host: &Host) -> Result<LinkOutcome> {
    tracing::debug!("Detected platform: {}", host);

    let package = layout.platform_package_dir(&host.target());
    if !exists(package.join(MANIFEST_FILE))? {
        return Err(Error::UnsupportedPlatform {
            platform: host.platform.clone(),
            arch: host.arch.clone(),
        });
    }

    let link = link_path(layout, host);
    if exists(&link)? {
        return Ok(LinkOutcome::AlreadyLinked(link));
    }

    let target = executable_path(layout, host);
    if let Some(parent) = link.parent() {
        std::fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    tracing::debug!("Creating symlink {}", link.display());
    create_symlink(&target, &link)?;

    Ok(LinkOutcome::Created(link))
}

/// Removes the link created by [`link`]. Returns `false` if there was none.
pub fn unlink(layout: &Layout, host: &Host) -> Result<bool> {
    let link = link_path(layout, host);
    if !exists(&link)? {
        return Ok(false);
    }
    tracing::debug!("Removing {}", link.display());
    std::fs::remove_file(&link).map_err(Error::io(&link))?;
    Ok(true)
}

/// Creates a file symlink at `link` pointing to `target`.
///
/// The target does not need to exist yet, it is usually built afterwards.
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).map_err(Error::io(link))?;
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link).map_err(Error::io(link))?;
    }
    Ok(())
}

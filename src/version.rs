use std::path::PathBuf;
use semver::Version;
use crate::config::Layout;
use crate::error::Result;
use crate::manifest::PackageManifest;
use crate::output::{NoProgress, Progress};

/// Strips one leading `v`, so `v1.2.3` becomes `1.2.3`. Other strings are returned as is.
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Writes a version into a package and every package reachable through its
/// `optionalDependencies`, pinning those dependencies to the same version.
///
/// Packages are visited with a stack, last pushed first. A package listed by
/// several others is rewritten each time it is reached.
pub struct VersionPropagator<'a> {
    layout: &'a Layout,
    progress: &'a dyn Progress,
}

impl<'a> VersionPropagator<'a> {
    pub fn new(layout: &'a Layout) -> VersionPropagator<'a> {
        VersionPropagator { layout, progress: &NoProgress }
    }

    pub fn with_progress(mut self, progress: &'a dyn Progress) -> VersionPropagator<'a> {
        self.progress = progress;
        self
    }

    /// Sets `version` (normalized) on `root` and its optional dependencies.
    ///
    /// Returns the manifests written, in order, repeated ones included.
    ///
    /// # Errors
    /// Stops at the first manifest that is missing or invalid. Manifests
    /// already written keep the new version.
    pub fn propagate(&self, root: &str, version: &str) -> Result<Vec<PathBuf>> {
        let version = normalize_version(version);
        if let Err(e) = Version::parse(version) {
            tracing::warn!("{} is not a valid semver version ({}), writing it anyway", version, e);
        }

        let mut written: Vec<PathBuf> = Vec::new();
        let mut packages = vec![root.to_string()];

        while let Some(name) = packages.pop() {
            let path = self.layout.manifest_path(&name);
            if written.contains(&path) {
                tracing::debug!("Updating {} again", path.display());
            } else {
                tracing::debug!("Updating {}", path.display());
            }
            self.progress.set_message(&format!("Updating {}", name));

            let mut manifest = PackageManifest::load(&path)?;
            manifest.set_version(version);

            for dep in manifest.pin_optional_dependencies(version) {
                packages.push(self.layout.config.strip_scope(&dep).to_string());
            }

            manifest.save(&path)?;
            tracing::info!("{} set to {}", manifest.name().unwrap_or(&name), version);
            written.push(path);
        }

        Ok(written)
    }
}

use std::path::PathBuf;
use crate::config::Layout;
use crate::error::{Error, Result};
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::output::{NoProgress, Progress};
use crate::platform::Target;
use crate::util::remove_dir_if_exists;

/// Loads the template manifest every platform package starts from.
pub fn load_template(layout: &Layout) -> Result<PackageManifest> {
    PackageManifest::load(layout.template_path())
}

/// Writes one npm package per target under the npm root.
///
/// Each package directory is recreated from scratch, so running the generator
/// twice produces the same files.
pub struct PackageGenerator<'a> {
    layout: &'a Layout,
    progress: &'a dyn Progress,
}

impl<'a> PackageGenerator<'a> {
    pub fn new(layout: &'a Layout) -> PackageGenerator<'a> {
        PackageGenerator { layout, progress: &NoProgress }
    }

    pub fn with_progress(mut self, progress: &'a dyn Progress) -> PackageGenerator<'a> {
        self.progress = progress;
        self
    }

    /// Builds the manifest of `target` from `template`.
    ///
    /// # Errors
    /// [`Error::Configuration`] if the target is missing from a naming table.
    pub fn manifest_for(&self, template: &PackageManifest, target: &Target) -> Result<PackageManifest> {
        let config = &self.layout.config;
        let mut manifest = template.clone();

        manifest.set_name(&config.scoped(&target.package_dir_name(&config.base_name)));
        manifest.set_description(&format!(
            "{} {} {} binary.",
            config.display_name,
            target.platform,
            target.humanized_arch()?
        ));
        manifest.set_os(target.node_os()?);
        manifest.set_cpu(target.node_cpu()?);

        Ok(manifest)
    }

    /// Generates the package of every target, in order, and returns their directories.
    ///
    /// Stops at the first error. Packages generated before it are left in place.
    pub fn generate(&self, template: &PackageManifest, targets: &[Target]) -> Result<Vec<PathBuf>> {
        let mut generated = Vec::with_capacity(targets.len());
        for target in targets {
            self.progress.set_message(&format!("Generating {} package", target));
            generated.push(self.generate_target(template, target)?);
        }
        Ok(generated)
    }

    fn generate_target(&self, template: &PackageManifest, target: &Target) -> Result<PathBuf> {
        let manifest = self.manifest_for(template, target)?;
        let needs_stub = target.needs_stub()?;

        let output = self.layout.platform_package_dir(target);
        tracing::debug!("Recreating {}", output.display());
        remove_dir_if_exists(&output)?;

        let bin_dir = output.join("bin");
        std::fs::create_dir_all(&bin_dir).map_err(Error::io(&bin_dir))?;

        if needs_stub {
            let stub = self.layout.stub_path();
            let dest = bin_dir.join(&self.layout.config.exe_name);
            tracing::debug!("Copying {} to {}", stub.display(), dest.display());
            std::fs::copy(&stub, &dest).map_err(Error::io(&stub))?;
        }

        manifest.save(output.join(MANIFEST_FILE))?;
        tracing::info!("Generated {}", target.package_dir_name(&self.layout.config.base_name));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::default_targets;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, Layout, PackageManifest) {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path(), Config::default());
        std::fs::create_dir_all(layout.stub_path().parent().unwrap()).unwrap();
        std::fs::write(layout.stub_path(), "#!/bin/sh\necho stub\n").unwrap();
        let template: PackageManifest = serde_json::from_value(json!({
            "name": "template",
            "version": "0.0.0",
            "description": "template",
            "license": "MIT",
        })).unwrap();
        (dir, layout, template)
    }

    #[test]
    fn test_manifest_for_macos_arm64() {
        let (_dir, layout, template) = setup();
        let generator = PackageGenerator::new(&layout);
        let manifest = generator.manifest_for(&template, &Target::new("macos", "arm64")).unwrap();

        assert_eq!(manifest.name(), Some("@jujulego/ring-macos-arm64"));
        assert_eq!(manifest.description(), Some("Ring macos arm64 binary."));
        assert_eq!(manifest.os(), vec!["darwin"]);
        assert_eq!(manifest.cpu(), vec!["arm64"]);
        assert_eq!(manifest.version(), Some("0.0.0"));
    }

    #[test]
    fn test_description_uses_humanized_arch() {
        let (_dir, layout, template) = setup();
        let generator = PackageGenerator::new(&layout);
        let manifest = generator.manifest_for(&template, &Target::new("linux", "amd64")).unwrap();
        assert_eq!(manifest.description(), Some("Ring linux x64 binary."));
    }

    #[test]
    fn test_generate_all_targets() {
        let (_dir, layout, template) = setup();
        let dirs = PackageGenerator::new(&layout)
            .generate(&template, &default_targets())
            .unwrap();

        assert_eq!(dirs.len(), 4);
        for (dir, target) in dirs.iter().zip(default_targets()) {
            assert!(dir.join("bin").is_dir());
            let manifest = PackageManifest::load(dir.join(MANIFEST_FILE)).unwrap();
            assert_eq!(manifest.os(), vec![target.node_os().unwrap()]);
            assert_eq!(manifest.cpu(), vec![target.node_cpu().unwrap()]);
            assert!(manifest.name().unwrap().contains(&target.platform));
            assert!(manifest.name().unwrap().contains(&target.arch));
        }
    }

    #[test]
    fn test_only_windows_gets_stub() {
        let (_dir, layout, template) = setup();
        PackageGenerator::new(&layout)
            .generate(&template, &default_targets())
            .unwrap();

        for target in default_targets() {
            let stub = layout.platform_package_dir(&target).join("bin").join("ring");
            assert_eq!(stub.exists(), target.platform == "windows", "{}", target);
        }
    }

    #[test]
    fn test_generate_is_idempotent() {
        let (_dir, layout, template) = setup();
        let generator = PackageGenerator::new(&layout);
        let target = Target::new("windows", "amd64");
        let path = layout.platform_package_dir(&target).join(MANIFEST_FILE);

        generator.generate(&template, &[target.clone()]).unwrap();
        let first = std::fs::read(&path).unwrap();
        generator.generate(&template, &[target]).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_removes_stale_files() {
        let (_dir, layout, template) = setup();
        let target = Target::new("linux", "amd64");
        let output = layout.platform_package_dir(&target);
        std::fs::create_dir_all(output.join("bin")).unwrap();
        std::fs::write(output.join("bin").join("stale"), "old").unwrap();

        PackageGenerator::new(&layout).generate(&template, &[target]).unwrap();

        assert!(!output.join("bin").join("stale").exists());
        assert!(output.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_generate_keeps_template_key_order() {
        let (_dir, layout, template) = setup();
        let target = Target::new("linux", "amd64");
        PackageGenerator::new(&layout).generate(&template, &[target.clone()]).unwrap();

        let content = std::fs::read_to_string(layout.platform_package_dir(&target).join(MANIFEST_FILE)).unwrap();
        let expected = r#"{
  "name": "@jujulego/ring-linux-amd64",
  "version": "0.0.0",
  "description": "Ring linux x64 binary.",
  "license": "MIT",
  "os": [
    "linux"
  ],
  "cpu": [
    "x64"
  ]
}
"#;
        assert_eq!(content, expected);
    }

    #[test]
    fn test_generate_replaces_file_at_output_path() {
        let (_dir, layout, template) = setup();
        let target = Target::new("linux", "amd64");
        let output = layout.platform_package_dir(&target);
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(&output, "not a directory").unwrap();

        PackageGenerator::new(&layout).generate(&template, &[target]).unwrap();

        assert!(output.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_unknown_target_fails_before_touching_disk() {
        let (_dir, layout, template) = setup();
        let target = Target::new("plan9", "amd64");
        let output = layout.platform_package_dir(&target);
        std::fs::create_dir_all(&output).unwrap();
        std::fs::write(output.join("keep"), "").unwrap();

        let err = PackageGenerator::new(&layout)
            .generate(&template, &[target])
            .unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));
        assert!(output.join("keep").exists());
    }

    #[test]
    fn test_missing_stub_is_fatal() {
        let (_dir, layout, template) = setup();
        std::fs::remove_file(layout.stub_path()).unwrap();

        let err = PackageGenerator::new(&layout)
            .generate(&template, &[Target::new("windows", "amd64")])
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

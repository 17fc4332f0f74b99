use std::path::{Path, PathBuf};
use serde::Deserialize;
use anyhow::{Context, Result};
use crate::manifest::MANIFEST_FILE;
use crate::platform::{default_targets, Target};

/// Name of the optional configuration file at the repository root.
pub const CONFIG_FILE: &str = "ring-dt.toml";

/// Represents the contents of a `ring-dt.toml` file.
///
/// Every key is optional, missing ones fall back to the layout of the ring repository.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory holding the npm packages, relative to the root.
    pub npm_dir: PathBuf,
    /// npm scope of every package, e.g. `@jujulego`. Empty for unscoped packages.
    pub scope: String,
    /// Name of the root package, also prefix of every platform package.
    pub base_name: String,
    /// Name used in generated descriptions.
    pub display_name: String,
    /// File name of the executable inside `bin/`.
    pub exe_name: String,
    /// Template manifest for platform packages.
    pub template: PathBuf,
    /// Placeholder executable copied into packages that need one.
    pub stub: PathBuf,
    /// Locally built executable targeted by `link`, without extension.
    pub executable: PathBuf,
    pub targets: Vec<Target>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            npm_dir: PathBuf::from("npm"),
            scope: String::from("@jujulego"),
            base_name: String::from("ring"),
            display_name: String::from("Ring"),
            exe_name: String::from("ring"),
            template: PathBuf::from("scripts/templates/package.tpl.json"),
            stub: PathBuf::from("scripts/templates/bin/ring"),
            executable: PathBuf::from("target/debug/ring-cli"),
            targets: default_targets(),
        }
    }
}

impl Config {
    /// Loads `ring-dt.toml` from `root`, or the defaults if there is none.
    ///
    /// # Errors
    /// Returns an error if the file exists but can't be read or deserialized.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Config> {
        let path = root.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            return Ok(Config::default());
        }

        tracing::debug!("Loading {}", path.display());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Removes the configured scope from a package name, e.g. `@jujulego/ring-linux-amd64`
    /// becomes `ring-linux-amd64`. Names outside the scope are returned unchanged.
    pub fn strip_scope<'a>(&self, name: &'a str) -> &'a str {
        if self.scope.is_empty() {
            return name;
        }
        name.strip_prefix(self.scope.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(name)
    }

    /// Adds the configured scope to a package name.
    pub fn scoped(&self, name: &str) -> String {
        if self.scope.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.scope, name)
        }
    }
}

/// Resolves every path used by the tool from a repository root and its configuration.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub config: Config,
}

impl Layout {
    pub fn new<P: Into<PathBuf>>(root: P, config: Config) -> Layout {
        Layout { root: root.into(), config }
    }

    /// Builds the layout of `root`, reading its `ring-dt.toml` if present.
    pub fn load<P: Into<PathBuf>>(root: P) -> Result<Layout> {
        let root = root.into();
        let config = Config::load(&root)?;
        Ok(Layout { root, config })
    }

    /// Returns the path to the npm packages directory.
    pub fn npm_root(&self) -> PathBuf {
        self.root.join(&self.config.npm_dir)
    }
    /// Returns the directory of a local package, by unscoped name.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.npm_root().join(name)
    }
    /// Returns the `package.json` path of a local package, by unscoped name.
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.package_dir(name).join(MANIFEST_FILE)
    }
    /// Returns the directory of the package published for `target`.
    pub fn platform_package_dir(&self, target: &Target) -> PathBuf {
        self.package_dir(&target.package_dir_name(&self.config.base_name))
    }
    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.config.template)
    }
    pub fn stub_path(&self) -> PathBuf {
        self.root.join(&self.config.stub)
    }
    pub fn executable_path(&self) -> PathBuf {
        self.root.join(&self.config.executable)
    }
}

use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::error::{Error, Result};

/// File name of an npm package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Represents the contents of a `package.json` file.
///
/// Backed by the ordered JSON object itself: setters replace values in place,
/// new keys go last, and every field this tool does not touch is written back
/// exactly as it was read.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct PackageManifest {
    fields: Map<String, Value>,
}

impl PackageManifest {
    /// Loads a manifest from a file path.
    ///
    /// # Errors
    /// [`Error::ManifestNotFound`] if the file can't be read,
    /// [`Error::ManifestParse`] if it is not a JSON object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PackageManifest> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| Error::ManifestNotFound { path: path.to_path_buf(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| Error::ManifestParse { path: path.to_path_buf(), source })
    }

    /// Saves the manifest as pretty JSON (two spaces, trailing newline),
    /// replacing any previous content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Io { path: path.to_path_buf(), source: e.into() })?;
        content.push('\n');
        std::fs::write(path, content).map_err(Error::io(path))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets `key`, keeping its position if it already exists.
    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_str_list(&self, key: &str) -> Vec<&str> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }
    pub fn set_name(&mut self, name: &str) {
        self.set("name", Value::from(name));
    }

    pub fn version(&self) -> Option<&str> {
        self.get_str("version")
    }
    pub fn set_version(&mut self, version: &str) {
        self.set("version", Value::from(version));
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }
    pub fn set_description(&mut self, description: &str) {
        self.set("description", Value::from(description));
    }

    /// npm `os` restriction, one entry for platform packages.
    pub fn os(&self) -> Vec<&str> {
        self.get_str_list("os")
    }
    pub fn set_os(&mut self, os: &str) {
        self.set("os", Value::from(vec![os]));
    }

    /// npm `cpu` restriction, one entry for platform packages.
    pub fn cpu(&self) -> Vec<&str> {
        self.get_str_list("cpu")
    }
    pub fn set_cpu(&mut self, cpu: &str) {
        self.set("cpu", Value::from(vec![cpu]));
    }

    /// Package names to pinned versions, in declaration order.
    pub fn optional_dependencies(&self) -> Option<&Map<String, Value>> {
        self.get("optionalDependencies").and_then(Value::as_object)
    }

    /// Sets every optional dependency to `version` and returns their names in declaration order.
    pub fn pin_optional_dependencies(&mut self, version: &str) -> Vec<String> {
        match self.fields.get_mut("optionalDependencies") {
            Some(Value::Object(deps)) => {
                deps.iter_mut()
                    .map(|(name, pinned)| {
                        *pinned = Value::from(version);
                        name.clone()
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for PackageManifest {
    fn from(fields: Map<String, Value>) -> Self {
        PackageManifest { fields }
    }
}

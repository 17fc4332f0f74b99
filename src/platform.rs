use serde::Deserialize;
use crate::error::{Error, Result};

/// Target platform names to the `os` values npm understands.
pub const NODE_OS: &[(&str, &str)] = &[
    ("linux", "linux"),
    ("windows", "win32"),
    ("macos", "darwin"),
];

/// Target architecture names to the `cpu` values npm understands.
pub const NODE_CPU: &[(&str, &str)] = &[
    ("amd64", "x64"),
    ("arm64", "arm64"),
];

/// Architecture labels used in package descriptions.
///
/// Same values as [`NODE_CPU`] today, kept apart so both can evolve separately.
pub const HUMANIZED_ARCH: &[(&str, &str)] = &[
    ("amd64", "x64"),
    ("arm64", "arm64"),
];

/// Rust host architecture names (`std::env::consts::ARCH`) to target architecture names.
pub const HOST_ARCH: &[(&str, &str)] = &[
    ("x86_64", "amd64"),
    ("aarch64", "arm64"),
];

/// The npm `os` value of the platform that ships a placeholder executable.
const STUB_NODE_OS: &str = "win32";

fn lookup(table: &'static str, entries: &[(&str, &'static str)], key: &str) -> Result<&'static str> {
    entries.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| Error::Configuration { table, value: key.to_string() })
}

/// A (platform, architecture) pair the ring binary is published for.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub platform: String,
    pub arch: String,
}

impl Target {
    pub fn new(platform: &str, arch: &str) -> Target {
        Target {
            platform: platform.to_string(),
            arch: arch.to_string(),
        }
    }

    pub fn node_os(&self) -> Result<&'static str> {
        lookup("node os", NODE_OS, &self.platform)
    }

    pub fn node_cpu(&self) -> Result<&'static str> {
        lookup("node cpu", NODE_CPU, &self.arch)
    }

    pub fn humanized_arch(&self) -> Result<&'static str> {
        lookup("humanized arch", HUMANIZED_ARCH, &self.arch)
    }

    /// Directory (and unscoped package) name, e.g. `ring-linux-amd64`.
    pub fn package_dir_name(&self, base: &str) -> String {
        format!("{}-{}-{}", base, self.platform, self.arch)
    }

    /// Whether the generated package must contain the placeholder executable.
    pub fn needs_stub(&self) -> Result<bool> {
        Ok(self.node_os()? == STUB_NODE_OS)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}

/// Targets built when the configuration does not list any.
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new("linux", "amd64"),
        Target::new("windows", "amd64"),
        Target::new("macos", "amd64"),
        Target::new("macos", "arm64"),
    ]
}

/// Platform and architecture of the running process, in target naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub platform: String,
    pub arch: String,
}

impl Host {
    pub fn new(platform: &str, arch: &str) -> Host {
        Host {
            platform: platform.to_string(),
            arch: arch.to_string(),
        }
    }

    /// Reads the host from `std::env::consts`.
    ///
    /// Architectures missing from [`HOST_ARCH`] are kept as reported so that
    /// the lookup of a matching package fails instead of the detection.
    pub fn detect() -> Host {
        let os = std::env::consts::OS;
        let arch = std::env::consts::ARCH;
        let arch = lookup("host arch", HOST_ARCH, arch).unwrap_or(arch);
        Host::new(os, arch)
    }

    pub fn target(&self) -> Target {
        Target::new(&self.platform, &self.arch)
    }

    pub fn exe_suffix(&self) -> &'static str {
        if self.platform == "windows" { ".exe" } else { "" }
    }
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_translate() {
        let expected = [
            ("linux", "x64"),
            ("win32", "x64"),
            ("darwin", "x64"),
            ("darwin", "arm64"),
        ];
        for (target, (os, cpu)) in default_targets().iter().zip(expected) {
            assert_eq!(target.node_os().unwrap(), os);
            assert_eq!(target.node_cpu().unwrap(), cpu);
        }
    }

    #[test]
    fn test_unknown_platform_is_configuration_error() {
        let target = Target::new("freebsd", "amd64");
        match target.node_os() {
            Err(Error::Configuration { table, value }) => {
                assert_eq!(table, "node os");
                assert_eq!(value, "freebsd");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_arch_is_configuration_error() {
        let target = Target::new("linux", "riscv64");
        assert!(matches!(target.node_cpu(), Err(Error::Configuration { .. })));
        assert!(matches!(target.humanized_arch(), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_only_windows_needs_stub() {
        let stubbed: Vec<_> = default_targets().into_iter()
            .filter(|t| t.needs_stub().unwrap())
            .collect();
        assert_eq!(stubbed, vec![Target::new("windows", "amd64")]);
    }

    #[test]
    fn test_package_dir_name() {
        assert_eq!(Target::new("macos", "arm64").package_dir_name("ring"), "ring-macos-arm64");
    }

    #[test]
    fn test_host_exe_suffix() {
        assert_eq!(Host::new("windows", "amd64").exe_suffix(), ".exe");
        assert_eq!(Host::new("linux", "amd64").exe_suffix(), "");
    }

    #[test]
    fn test_detect_uses_target_naming() {
        let host = Host::detect();
        assert_eq!(host.platform, std::env::consts::OS);
        if std::env::consts::ARCH == "x86_64" {
            assert_eq!(host.arch, "amd64");
        }
    }
}

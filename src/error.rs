use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating, linking or versioning the npm packages.
#[derive(Error, Debug)]
pub enum Error {
    /// A platform or architecture has no entry in one of the naming tables.
    #[error("no {table} entry for `{value}`")]
    Configuration {
        table: &'static str,
        value: String,
    },

    #[error("manifest not found at {}", path.display())]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No platform package was generated for the host.
    #[error("unsupported platform: {platform}-{arch}")]
    UnsupportedPlatform { platform: String, arch: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

use std::io::ErrorKind;
use std::path::Path;
use crate::error::{Error, Result};

/// Recursively removes whatever sits at `path`: a directory tree, a file or a
/// symlink (not followed). Nothing there is not an error.
pub fn remove_dir_if_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::Io { path: path.to_path_buf(), source: e }),
    };

    let removed = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io { path: path.to_path_buf(), source: e }),
    }
}

/// Checks whether something exists at `path`, without following symlinks.
///
/// Only "not found" means `false`. Any other failure, like a permission
/// error, is returned.
pub fn exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    tracing::trace!("Testing existence of {}", path.display());

    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Io { path: path.to_path_buf(), source: e }),
    }
}

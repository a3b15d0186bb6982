use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};

/// Create the workspace and its projects subdirectory if missing.
///
/// Existing directories and anything already inside them are left alone.
pub fn provision(projects_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(projects_dir).map_err(|source| BootstrapError::DirectoryCreation {
        path: projects_dir.to_path_buf(),
        source,
    })
}

/// Check that every required file exists in the build context.
pub fn check_build_context(context: &Path, required: &[String]) -> Result<()> {
    match required
        .iter()
        .map(|name| context.join(name))
        .find(|path| !path.is_file())
    {
        Some(path) => Err(BootstrapError::MissingBuildFile { path }),
        None => Ok(()),
    }
}

/// Absolute form of `path`, without touching the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| BootstrapError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}

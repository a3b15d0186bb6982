use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BootstrapError, Result};

/// Hands out exclusive slots for reserved container names.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    lock_dir: PathBuf,
}

/// Exclusive claim on a container name for the duration of one bootstrap.
///
/// Released when dropped.
#[derive(Debug)]
pub struct InstanceSlot {
    name: String,
    path: PathBuf,
    _file: File,
}

impl InstanceSlot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lock_path(&self) -> &Path {
        &self.path
    }
}

impl Lifecycle {
    pub fn new(lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            lock_dir: lock_dir.into(),
        }
    }

    /// Claim the slot for `name`, failing fast if another process holds it.
    pub fn acquire(&self, name: &str) -> Result<InstanceSlot> {
        if !is_valid_name(name) {
            return Err(BootstrapError::InvalidName {
                name: name.to_string(),
            });
        }

        let path = self.lock_dir.join(format!("qgenie-launcher-{name}.lock"));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| BootstrapError::Lock {
                path: path.clone(),
                source,
            })?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(BootstrapError::Contention {
                    name: name.to_string(),
                });
            }
            Err(TryLockError::Error(source)) => {
                return Err(BootstrapError::Lock { path, source });
            }
        }
        debug!(name, lock = %path.display(), "acquired instance slot");

        Ok(InstanceSlot {
            name: name.to_string(),
            path,
            _file: file,
        })
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

/// Container names as the docker CLI accepts them: `[A-Za-z0-9][A-Za-z0-9_.-]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

//! Filesystem layout the website expects next to its code.

pub mod access;

use crate::error::SetupError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use access::{ACCESS_CONTROL, ACCESS_CONTROL_FILE, write_access_control};

/// Directories created under the base directory, in creation order.
pub const DIRECTORIES: [&str; 5] = [
    "uploads",
    "uploads/profiles",
    "uploads/site",
    "data",
    "logs",
];

pub const UPLOADS_DIR: &str = "uploads";

pub const DIR_MODE: u32 = 0o755;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOutcome {
    pub path: PathBuf,
    /// `false` when the directory was already there.
    pub created: bool,
}

/// Make sure `path` exists as a directory, creating parents as needed.
pub fn ensure_directory(path: &Path) -> Result<DirectoryOutcome, SetupError> {
    if path.exists() {
        return Ok(DirectoryOutcome {
            path: path.to_path_buf(),
            created: false,
        });
    }

    create_dir_all(path).map_err(SetupError::filesystem(path))?;
    info!(path = %path.display(), mode = %format!("{DIR_MODE:o}"), "created directory");
    Ok(DirectoryOutcome {
        path: path.to_path_buf(),
        created: true,
    })
}

#[cfg(unix)]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(path)?;
    // umask may have stripped bits from the requested mode
    fs::set_permissions(path, fs::Permissions::from_mode(DIR_MODE))
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

/// Absolute paths of `DIRECTORIES` under `base`.
pub fn directories(base: &Path) -> Vec<PathBuf> {
    DIRECTORIES.iter().map(|d| base.join(d)).collect()
}

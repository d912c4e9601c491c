//! Input discovery for WOD cast files.

use crate::constants::PROFILE_FILE_PATTERN;
use crate::error::{Result, WodError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate WOD cast files (`ocldb*`) in the data directory.
///
/// The directory layout is flat: WODselect drops every requested cast
/// file directly into the download directory. An empty match is a valid
/// zero-work run, not an error.
pub fn discover_cast_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(WodError::DataDirNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let pattern = data_dir.join(PROFILE_FILE_PATTERN);
    let mut files = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }

    // Sort for a consistent processing order.
    files.sort();

    debug!(
        "discovered {} cast files in {}",
        files.len(),
        data_dir.display()
    );
    Ok(files)
}

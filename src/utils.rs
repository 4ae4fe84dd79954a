//! Utility functions for file naming and path handling

use crate::config::FileCollisionAction;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// File name for a thumbnail URL: everything after the last `/`
///
/// Query strings and fragments are kept as-is. A URL ending in `/`, or whose
/// last segment is `.` or `..`, has no usable name.
///
/// # Examples
///
/// ```
/// use thumbnail_dl::utils::filename_from_url;
///
/// let name = filename_from_url("https://cdn.example/s8/1/OvCc/abc.jpg").unwrap();
/// assert_eq!(name, "abc.jpg");
/// assert!(filename_from_url("https://cdn.example/dir/").is_err());
/// ```
pub fn filename_from_url(url: &str) -> Result<&str> {
    let name = url.rsplit('/').next().unwrap_or(url);
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return Err(Error::InvalidFilename {
            url: url.to_string(),
        });
    }
    Ok(name)
}

/// Path a download should be written to, given what already exists on disk
///
/// Overwrite always targets `path`. Skip refuses an existing file. Rename
/// picks the first free name among `name (1).ext`, `name (2).ext`, ...
///
/// # Examples
///
/// ```
/// use thumbnail_dl::utils::resolve_collision;
/// use thumbnail_dl::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/does-not-exist-thumb.jpg");
/// let target = resolve_collision(path, FileCollisionAction::Rename).unwrap();
/// assert_eq!(target, path);
/// ```
pub fn resolve_collision(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    if action == FileCollisionAction::Overwrite || !path.exists() {
        return Ok(path.to_path_buf());
    }
    let collision = |reason: String| Error::FileCollision {
        path: path.to_path_buf(),
        reason,
    };

    match action {
        FileCollisionAction::Rename => (1..=MAX_RENAME_ATTEMPTS)
            .map(|n| numbered_sibling(path, n))
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| {
                collision(format!(
                    "no free name after {MAX_RENAME_ATTEMPTS} attempts"
                ))
            }),
        _ => Err(collision("file already exists".to_string())),
    }
}

/// `dir/name.ext` → `dir/name (n).ext`
fn numbered_sibling(path: &Path, n: u32) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem} ({n}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({n})"),
    };
    path.with_file_name(name)
}

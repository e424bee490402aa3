//! Static file module
//!
//! Existence and readability checks for a target that already passed
//! containment. Absent, directory and unreadable targets are all reported as
//! not found so the response never reveals which one it was.

use crate::error::{NotFoundReason, ResponderError};
use crate::http::mime;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// An opened file ready for transmission
#[derive(Debug)]
pub struct StaticFile {
    pub path: PathBuf,
    pub file: File,
    pub content_type: &'static str,
    pub content_length: u64,
}

/// Stat and open a contained target
///
/// `path` is what gets opened; the content type comes from the file name of
/// `requested`, so a link named `latest.html` is typed by its own name and not
/// by whatever it points at.
pub fn open(path: &Path, requested: &Path) -> Result<StaticFile, ResponderError> {
    let not_found = |reason, source| ResponderError::NotFound {
        path: path.to_path_buf(),
        reason,
        source,
    };

    let metadata = fs::metadata(path).map_err(|e| not_found(NotFoundReason::Missing, Some(e)))?;
    if metadata.is_dir() {
        return Err(not_found(NotFoundReason::Directory, None));
    }

    let file = File::open(path).map_err(|e| not_found(NotFoundReason::Unreadable, Some(e)))?;
    // Length of what was actually opened, not of what was stat'ed before
    let content_length = file
        .metadata()
        .map_err(|e| not_found(NotFoundReason::Unreadable, Some(e)))?
        .len();

    let file_name = requested
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    Ok(StaticFile {
        path: path.to_path_buf(),
        file,
        content_type: mime::content_type_for(file_name),
        content_length,
    })
}

//! Path resolution and containment guard
//!
//! Maps a logical path onto the document root and rejects anything that lands
//! outside it. The lexical check in [`resolve`] touches no filesystem state, so
//! a traversal attempt is refused before any stat or open can happen. Symbolic
//! links are handled afterwards by [`confine`], which only runs on paths that
//! already passed the lexical check.

use crate::error::{NotFoundReason, PathSubject, ResponderError};
use std::io;
use std::path::{Component, Path, PathBuf};

/// A logical path mapped onto the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub logical_path: String,
    /// Absolute, normalized document root
    pub document_root: PathBuf,
    /// Absolute, normalized target, lexically inside `document_root`
    pub target: PathBuf,
}

/// Lexically normalize a path: drop `.`, apply `..`, collapse separators
///
/// `..` at the filesystem root stays at the root. Links are not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
        }
    }
    out
}

/// Absolute, normalized form of `path`, relative paths taken from the working directory
fn absolute(path: &Path, subject: PathSubject) -> Result<PathBuf, ResponderError> {
    std::path::absolute(path)
        .map(|abs| normalize(&abs))
        .map_err(|source| ResponderError::PathResolution { subject, source })
}

/// Segment-aware containment: `/srv/site2` is not inside `/srv/site`
pub fn is_contained(target: &Path, root: &Path) -> bool {
    target.starts_with(root)
}

/// Join a logical path onto the document root and verify containment
///
/// `/` and the empty logical path map to `index_file`. Otherwise exactly one
/// leading `/` is removed and the remaining segments are appended to the
/// root, so an absolute-looking remainder (`//etc/passwd`) can never replace
/// the root the way [`Path::join`] would.
pub fn resolve(
    logical_path: &str,
    document_root: &Path,
    index_file: &str,
) -> Result<ResolvedTarget, ResponderError> {
    let mut joined = document_root.to_path_buf();
    if logical_path.is_empty() || logical_path == "/" {
        joined.push(index_file);
    } else {
        let relative = logical_path.strip_prefix('/').unwrap_or(logical_path);
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            joined.push(segment);
        }
    }

    let target = absolute(&joined, PathSubject::Target)?;
    let root = absolute(document_root, PathSubject::DocumentRoot)?;

    if !is_contained(&target, &root) {
        return Err(ResponderError::PathTraversal { requested: target });
    }

    Ok(ResolvedTarget {
        logical_path: logical_path.to_string(),
        document_root: root,
        target,
    })
}

/// Resolve symbolic links on both sides and re-check containment
///
/// Returns the canonical target, which is the path that gets opened.
pub fn confine(resolved: &ResolvedTarget) -> Result<PathBuf, ResponderError> {
    let root = resolved
        .document_root
        .canonicalize()
        .map_err(|source| ResponderError::PathResolution {
            subject: PathSubject::DocumentRoot,
            source,
        })?;

    let target = resolved
        .target
        .canonicalize()
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => ResponderError::NotFound {
                path: resolved.target.clone(),
                reason: NotFoundReason::Missing,
                source: Some(source),
            },
            _ => ResponderError::PathResolution {
                subject: PathSubject::Target,
                source,
            },
        })?;

    if !is_contained(&target, &root) {
        return Err(ResponderError::PathTraversal { requested: target });
    }
    Ok(target)
}
